//! State management module
//!
//! This module contains the countdown and domination engines and the shared
//! application state that drives them.

pub mod app_state;
pub mod countdown;
pub mod domination;
pub mod puzzle;

// Re-export main types
pub use app_state::AppState;
pub use countdown::{CountdownState, Outcome};
pub use domination::{Actor, DominationState};
pub use puzzle::{DisarmPuzzle, SWITCH_COUNT};

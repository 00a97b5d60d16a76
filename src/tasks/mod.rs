//! Background tasks module
//!
//! This module contains the periodic tasks that drive both engines.

pub mod countdown_ticker;
pub mod domination_ticker;

// Re-export main functions
pub use countdown_ticker::countdown_ticker_task;
pub use domination_ticker::domination_ticker_task;

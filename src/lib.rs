//! Boomtick - A countdown bomb timer and domination bar as a state-managed HTTP server
//!
//! This library provides the countdown and domination engines, the periodic
//! tasks that drive them, and the feedback cues they emit for presentation
//! clients.

pub mod api;
pub mod config;
pub mod error;
pub mod feedback;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
pub use utils::signals::shutdown_signal;

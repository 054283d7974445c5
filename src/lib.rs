//! Category Timers - An in-memory HTTP service for countdown timers
//!
//! Named countdown timers grouped by category, controlled one by one or a
//! category at a time. A single store task owns every timer; a ticker
//! advances running timers once per second and completions are queued as
//! notifications until dismissed.

pub mod api;
pub mod config;
pub mod error;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use error::{TimerError, ValidationError};
pub use state::{AppState, StoreHandle, Timer, TimerId, TimerStatus, TimerStore};
pub use tasks::Ticker;
pub use utils::signals::shutdown_signal;

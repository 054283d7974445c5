//! State management module
//!
//! Timer records, the store that mutates them, the actor that owns the
//! store, and the completion notifications it produces.

pub mod actor;
pub mod app_state;
pub mod notifications;
pub mod store;
pub mod timer;

// Re-export main types
pub use actor::{NotificationView, StoreActor, StoreHandle, StoreStats, TickReport};
pub use app_state::AppState;
pub use notifications::{CompletionEvent, CompletionQueue, NotificationMode};
pub use store::{categories, group_by_category, CategoryGroup, Intent, Snapshot, TimerStore, Validation};
pub use timer::{Timer, TimerId, TimerStatus};

//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{CategoryGroup, CompletionEvent, NotificationMode, Timer, TimerStatus};

/// Body of POST /timers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTimerRequest {
    pub name: String,
    /// Seconds
    pub duration: i64,
    pub category: String,
}

/// A timer plus the fields a renderer needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    #[serde(flatten)]
    pub timer: Timer,
    pub progress: f64,
    pub remaining_display: String,
    pub can_start: bool,
    pub can_pause: bool,
}

impl From<&Timer> for TimerView {
    fn from(timer: &Timer) -> Self {
        Self {
            timer: timer.clone(),
            progress: timer.progress(),
            remaining_display: timer.remaining_display(),
            can_start: timer.can_start(),
            can_pause: timer.can_pause(),
        }
    }
}

pub fn timer_views(timers: &[Timer]) -> Vec<TimerView> {
    timers.iter().map(TimerView::from).collect()
}

/// Response to reads of the collection and to every intent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timers: Vec<TimerView>,
}

impl ApiResponse {
    pub fn ok(message: String, timers: &[Timer]) -> Self {
        Self {
            status: "ok".to_string(),
            message,
            timestamp: Utc::now(),
            timers: timer_views(timers),
        }
    }
}

/// Response carrying a single timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl TimerResponse {
    pub fn ok(message: String, timer: &Timer) -> Self {
        Self {
            status: "ok".to_string(),
            message,
            timestamp: Utc::now(),
            timer: TimerView::from(timer),
        }
    }
}

/// Error body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryView {
    pub category: String,
    pub timers: Vec<TimerView>,
}

impl From<CategoryGroup> for CategoryView {
    fn from(group: CategoryGroup) -> Self {
        Self {
            category: group.category,
            timers: timer_views(&group.timers),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoriesResponse {
    pub timestamp: DateTime<Utc>,
    pub categories: Vec<CategoryView>,
}

/// The completion notification on display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub timestamp: DateTime<Utc>,
    pub current: Option<CompletionEvent>,
    pub message: Option<String>,
    pub pending: usize,
}

impl NotificationResponse {
    pub fn new(current: Option<CompletionEvent>, pending: usize) -> Self {
        let message = current
            .as_ref()
            .map(|event| format!("Your timer \"{}\" has finished.", event.timer.name));
        Self {
            timestamp: Utc::now(),
            current,
            message,
            pending,
        }
    }
}

/// Number of timers in each status
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusCounts {
    pub idle: usize,
    pub running: usize,
    pub paused: usize,
    pub completed: usize,
}

impl StatusCounts {
    pub fn count(timers: &[Timer]) -> Self {
        let mut counts = Self::default();
        for timer in timers {
            match timer.status {
                TimerStatus::Idle => counts.idle += 1,
                TimerStatus::Running => counts.running += 1,
                TimerStatus::Paused => counts.paused += 1,
                TimerStatus::Completed => counts.completed += 1,
            }
        }
        counts
    }
}

/// Server status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub tick_ms: u64,
    pub validation: String,
    pub notification_mode: NotificationMode,
    pub ticks: u64,
    pub completions: u64,
    pub pending_notifications: usize,
    pub categories: usize,
    pub timers: StatusCounts,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

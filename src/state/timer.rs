//! Timer record and its lifecycle status

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::utils::format_seconds;

/// Opaque timer identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimerId(String);

impl TimerId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TimerId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for TimerId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lifecycle status of a timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    Idle,
    Running,
    Paused,
    /// Terminal until reset
    Completed,
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

/// A named countdown timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub id: TimerId,
    pub name: String,
    pub category: String,
    /// Total countdown length in seconds
    pub duration: i64,
    /// Seconds left
    pub remaining: i64,
    pub status: TimerStatus,
}

impl Timer {
    /// Create an idle timer with the full duration remaining
    pub fn new(name: String, duration: i64, category: String) -> Self {
        Self {
            id: TimerId::generate(),
            name,
            category,
            duration,
            remaining: duration,
            status: TimerStatus::Idle,
        }
    }

    pub fn with_status(&self, status: TimerStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }

    /// Copy of this timer back at its full duration and idle
    pub fn reset(&self) -> Self {
        Self {
            remaining: self.duration,
            status: TimerStatus::Idle,
            ..self.clone()
        }
    }

    /// Copy of this timer advanced by one second.
    ///
    /// Only running timers move. Reaching zero (or below) clamps `remaining`
    /// to zero and completes the timer.
    pub fn advanced(&self) -> Self {
        if self.status != TimerStatus::Running {
            return self.clone();
        }

        let remaining = self.remaining.saturating_sub(1);
        if remaining <= 0 {
            Self {
                remaining: 0,
                status: TimerStatus::Completed,
                ..self.clone()
            }
        } else {
            Self {
                remaining,
                ..self.clone()
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == TimerStatus::Running
    }

    pub fn is_completed(&self) -> bool {
        self.status == TimerStatus::Completed
    }

    /// Whether a start control should be offered
    pub fn can_start(&self) -> bool {
        !matches!(self.status, TimerStatus::Running | TimerStatus::Completed)
    }

    /// Whether a pause control should be offered
    pub fn can_pause(&self) -> bool {
        self.is_running()
    }

    /// Fraction of the duration still remaining, in `[0, 1]`
    pub fn progress(&self) -> f64 {
        if self.duration <= 0 {
            return 0.0;
        }
        (self.remaining as f64 / self.duration as f64).clamp(0.0, 1.0)
    }

    pub fn remaining_display(&self) -> String {
        format_seconds(self.remaining)
    }
}

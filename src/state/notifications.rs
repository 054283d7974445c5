//! Completion notifications waiting to be shown

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::Timer;

/// A timer reaching zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionEvent {
    /// The timer as it was when it completed
    pub timer: Timer,
    pub completed_at: DateTime<Utc>,
}

impl CompletionEvent {
    pub fn now(timer: Timer) -> Self {
        Self {
            timer,
            completed_at: Utc::now(),
        }
    }
}

/// How pending completions are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationMode {
    /// Show every completion, one at a time
    #[default]
    Queue,
    /// Keep only the most recent completion
    Latest,
}

/// Completions shown one at a time, dismiss-to-advance
#[derive(Debug, Default)]
pub struct CompletionQueue {
    mode: NotificationMode,
    pending: VecDeque<CompletionEvent>,
}

impl CompletionQueue {
    pub fn new(mode: NotificationMode) -> Self {
        Self {
            mode,
            pending: VecDeque::new(),
        }
    }

    pub fn mode(&self) -> NotificationMode {
        self.mode
    }

    pub fn push(&mut self, event: CompletionEvent) {
        if self.mode == NotificationMode::Latest {
            self.pending.clear();
        }
        self.pending.push_back(event);
    }

    /// The notification currently on display
    pub fn current(&self) -> Option<&CompletionEvent> {
        self.pending.front()
    }

    /// Drop the current notification and return it; the next one becomes current
    pub fn dismiss(&mut self) -> Option<CompletionEvent> {
        self.pending.pop_front()
    }

    /// Number of notifications waiting, including the current one
    pub fn pending(&self) -> usize {
        self.pending.len()
    }
}

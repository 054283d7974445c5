//! Authoritative timer collection and its mutation surface
//!
//! Every mutation builds a new collection and swaps it in, so a snapshot
//! handed out earlier is never changed underneath its reader.

use std::{collections::HashSet, fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Timer, TimerId, TimerStatus};
use crate::error::ValidationError;

/// Immutable view of the timer collection, in creation order
pub type Snapshot = Arc<Vec<Timer>>;

/// Timers of one category, in creation order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: String,
    pub timers: Vec<Timer>,
}

/// Whether `create` checks its input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Reject non-positive durations and blank names or categories
    #[default]
    Strict,
    /// Accept anything
    Lenient,
}

impl Validation {
    pub fn as_str(self) -> &'static str {
        match self {
            Validation::Strict => "strict",
            Validation::Lenient => "lenient",
        }
    }

    pub fn check(self, name: &str, duration: i64, category: &str) -> Result<(), ValidationError> {
        if self == Validation::Lenient {
            return Ok(());
        }
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if category.trim().is_empty() {
            return Err(ValidationError::EmptyCategory);
        }
        if duration <= 0 {
            return Err(ValidationError::NonPositiveDuration(duration));
        }
        Ok(())
    }
}

/// A user intent against one timer or a whole category
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Start(TimerId),
    Pause(TimerId),
    Reset(TimerId),
    StartCategory(String),
    PauseCategory(String),
    ResetCategory(String),
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intent::Start(id) => write!(f, "start timer {}", id),
            Intent::Pause(id) => write!(f, "pause timer {}", id),
            Intent::Reset(id) => write!(f, "reset timer {}", id),
            Intent::StartCategory(c) => write!(f, "start category {:?}", c),
            Intent::PauseCategory(c) => write!(f, "pause category {:?}", c),
            Intent::ResetCategory(c) => write!(f, "reset category {:?}", c),
        }
    }
}

/// Holds every timer and applies intents to them
#[derive(Debug, Default)]
pub struct TimerStore {
    timers: Snapshot,
    validation: Validation,
}

impl TimerStore {
    pub fn new(validation: Validation) -> Self {
        Self {
            timers: Arc::new(Vec::new()),
            validation,
        }
    }

    /// Current snapshot of the collection
    pub fn timers(&self) -> Snapshot {
        Arc::clone(&self.timers)
    }

    pub fn get(&self, id: &TimerId) -> Option<Timer> {
        self.timers.iter().find(|t| &t.id == id).cloned()
    }

    pub fn categories(&self) -> Vec<String> {
        categories(&self.timers)
    }

    pub fn grouped(&self) -> Vec<CategoryGroup> {
        group_by_category(&self.timers)
    }

    /// Append a new idle timer
    pub fn create(
        &mut self,
        name: String,
        duration: i64,
        category: String,
    ) -> Result<Timer, ValidationError> {
        self.validation.check(&name, duration, &category)?;

        let timer = Timer::new(name, duration, category);
        let mut next = Vec::with_capacity(self.timers.len() + 1);
        next.extend(self.timers.iter().cloned());
        next.push(timer.clone());
        self.timers = Arc::new(next);

        debug!("Created timer {} ({}s) in {:?}", timer.id, timer.duration, timer.category);
        Ok(timer)
    }

    /// Apply an intent. Returns the number of timers touched.
    pub fn apply(&mut self, intent: &Intent) -> usize {
        match intent {
            Intent::Start(id) => self.start(id),
            Intent::Pause(id) => self.pause(id),
            Intent::Reset(id) => self.reset(id),
            Intent::StartCategory(c) => self.start_category(c),
            Intent::PauseCategory(c) => self.pause_category(c),
            Intent::ResetCategory(c) => self.reset_category(c),
        }
    }

    /// Mark a timer running, whatever its status. Returns the number of timers touched.
    pub fn start(&mut self, id: &TimerId) -> usize {
        self.update(|t| &t.id == id, |t| t.with_status(TimerStatus::Running))
    }

    pub fn pause(&mut self, id: &TimerId) -> usize {
        self.update(|t| &t.id == id, |t| t.with_status(TimerStatus::Paused))
    }

    pub fn reset(&mut self, id: &TimerId) -> usize {
        self.update(|t| &t.id == id, Timer::reset)
    }

    /// Start every timer in the category that has not completed
    pub fn start_category(&mut self, category: &str) -> usize {
        self.update(
            |t| t.category == category && !t.is_completed(),
            |t| t.with_status(TimerStatus::Running),
        )
    }

    /// Pause every running timer in the category
    pub fn pause_category(&mut self, category: &str) -> usize {
        self.update(
            |t| t.category == category && t.is_running(),
            |t| t.with_status(TimerStatus::Paused),
        )
    }

    /// Reset every timer in the category
    pub fn reset_category(&mut self, category: &str) -> usize {
        self.update(|t| t.category == category, Timer::reset)
    }

    /// Advance every running timer by one second.
    ///
    /// Returns the timers that completed during this call, in collection order.
    pub fn advance_all(&mut self) -> Vec<Timer> {
        let mut completed = Vec::new();
        let next: Vec<Timer> = self
            .timers
            .iter()
            .map(|timer| {
                if !timer.is_running() {
                    return timer.clone();
                }
                let advanced = timer.advanced();
                if advanced.is_completed() {
                    completed.push(advanced.clone());
                }
                advanced
            })
            .collect();
        self.timers = Arc::new(next);
        completed
    }

    fn update<P, F>(&mut self, matches: P, apply: F) -> usize
    where
        P: Fn(&Timer) -> bool,
        F: Fn(&Timer) -> Timer,
    {
        let mut touched = 0;
        let next: Vec<Timer> = self
            .timers
            .iter()
            .map(|timer| {
                if matches(timer) {
                    touched += 1;
                    apply(timer)
                } else {
                    timer.clone()
                }
            })
            .collect();
        self.timers = Arc::new(next);
        touched
    }
}

/// Distinct categories, in the order they first appear
pub fn categories(timers: &[Timer]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut categories = Vec::new();
    for timer in timers {
        if seen.insert(timer.category.as_str()) {
            categories.push(timer.category.clone());
        }
    }
    categories
}

pub fn group_by_category(timers: &[Timer]) -> Vec<CategoryGroup> {
    categories(timers)
        .into_iter()
        .map(|category| {
            let timers = timers
                .iter()
                .filter(|t| t.category == category)
                .cloned()
                .collect();
            CategoryGroup { category, timers }
        })
        .collect()
}

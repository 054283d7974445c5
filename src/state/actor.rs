//! Store actor: the single task that owns the timer store
//!
//! Intents and ticks arrive over an mpsc channel and are applied one at a
//! time. Each new snapshot is published on a watch channel so readers never
//! wait on the actor.

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tracing::{debug, info};

use super::{
    CompletionEvent, CompletionQueue, Intent, NotificationMode, Snapshot, Timer, TimerStore,
    Validation,
};
use crate::error::TimerError;

const COMMAND_BUFFER: usize = 64;
const COMPLETION_BUFFER: usize = 100;

/// Messages understood by the store actor
pub enum StoreCommand {
    Create {
        name: String,
        duration: i64,
        category: String,
        reply: oneshot::Sender<Result<Timer, TimerError>>,
    },
    Apply {
        intent: Intent,
        reply: oneshot::Sender<Snapshot>,
    },
    Tick {
        reply: oneshot::Sender<TickReport>,
    },
    Notification {
        reply: oneshot::Sender<NotificationView>,
    },
    Dismiss {
        reply: oneshot::Sender<Option<CompletionEvent>>,
    },
    Stats {
        reply: oneshot::Sender<StoreStats>,
    },
}

/// Outcome of one tick
#[derive(Debug, Clone)]
pub struct TickReport {
    pub timers: Snapshot,
    /// Every timer that completed on this tick
    pub completed: Vec<CompletionEvent>,
}

impl TickReport {
    /// Timers that moved on this tick: those still running plus those that just completed
    pub fn advanced(&self) -> usize {
        self.timers.iter().filter(|t| t.is_running()).count() + self.completed.len()
    }
}

/// The completion currently on display and how many are waiting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationView {
    pub current: Option<CompletionEvent>,
    pub pending: usize,
}

/// Counters kept by the actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStats {
    pub ticks: u64,
    pub completions: u64,
    pub pending_notifications: usize,
    pub notification_mode: NotificationMode,
}

pub struct StoreActor {
    receiver: mpsc::Receiver<StoreCommand>,
    store: TimerStore,
    notifications: CompletionQueue,
    timers_tx: watch::Sender<Snapshot>,
    completion_tx: broadcast::Sender<CompletionEvent>,
    ticks: u64,
    completions: u64,
}

impl StoreActor {
    pub fn new(validation: Validation, mode: NotificationMode) -> (Self, StoreHandle) {
        let (sender, receiver) = mpsc::channel(COMMAND_BUFFER);
        let store = TimerStore::new(validation);
        let (timers_tx, timers_rx) = watch::channel(store.timers());
        let (completion_tx, _) = broadcast::channel(COMPLETION_BUFFER);

        let handle = StoreHandle {
            sender,
            timers_rx,
            completion_tx: completion_tx.clone(),
        };
        let actor = Self {
            receiver,
            store,
            notifications: CompletionQueue::new(mode),
            timers_tx,
            completion_tx,
            ticks: 0,
            completions: 0,
        };
        (actor, handle)
    }

    /// Process commands until every handle is dropped
    pub async fn run(mut self) {
        info!("Timer store started");

        while let Some(command) = self.receiver.recv().await {
            self.handle(command);
        }

        info!("Timer store stopped");
    }

    fn handle(&mut self, command: StoreCommand) {
        match command {
            StoreCommand::Create {
                name,
                duration,
                category,
                reply,
            } => {
                let result = self
                    .store
                    .create(name, duration, category)
                    .map_err(TimerError::from);
                match &result {
                    Ok(timer) => {
                        info!("Created timer {:?} ({}s) in {:?}", timer.name, timer.duration, timer.category);
                        self.publish();
                    }
                    Err(e) => info!("Rejected new timer: {}", e),
                }
                let _ = reply.send(result);
            }

            StoreCommand::Apply { intent, reply } => {
                let touched = self.store.apply(&intent);
                info!("Applied {} ({} timers)", intent, touched);
                if touched > 0 {
                    self.publish();
                }
                let _ = reply.send(self.store.timers());
            }

            StoreCommand::Tick { reply } => {
                let report = self.tick();
                let _ = reply.send(report);
            }

            StoreCommand::Notification { reply } => {
                let _ = reply.send(self.notification_view());
            }

            StoreCommand::Dismiss { reply } => {
                let dismissed = self.notifications.dismiss();
                if let Some(event) = &dismissed {
                    debug!("Dismissed completion of {:?}", event.timer.name);
                }
                let _ = reply.send(dismissed);
            }

            StoreCommand::Stats { reply } => {
                let _ = reply.send(StoreStats {
                    ticks: self.ticks,
                    completions: self.completions,
                    pending_notifications: self.notifications.pending(),
                    notification_mode: self.notifications.mode(),
                });
            }
        }
    }

    fn tick(&mut self) -> TickReport {
        self.ticks += 1;
        let completed: Vec<CompletionEvent> = self
            .store
            .advance_all()
            .into_iter()
            .map(CompletionEvent::now)
            .collect();
        self.publish();

        for event in &completed {
            info!("Timer {:?} in {:?} completed", event.timer.name, event.timer.category);
            self.completions += 1;
            self.notifications.push(event.clone());
            if self.completion_tx.send(event.clone()).is_err() {
                debug!("No completion subscribers");
            }
        }

        TickReport {
            timers: self.store.timers(),
            completed,
        }
    }

    fn notification_view(&self) -> NotificationView {
        NotificationView {
            current: self.notifications.current().cloned(),
            pending: self.notifications.pending(),
        }
    }

    fn publish(&self) {
        self.timers_tx.send_replace(self.store.timers());
    }
}

/// Cloneable handle to the store actor
#[derive(Clone)]
pub struct StoreHandle {
    sender: mpsc::Sender<StoreCommand>,
    timers_rx: watch::Receiver<Snapshot>,
    completion_tx: broadcast::Sender<CompletionEvent>,
}

impl StoreHandle {
    /// Create a store actor on the current runtime and return its handle
    pub fn spawn(validation: Validation, mode: NotificationMode) -> Self {
        let (actor, handle) = StoreActor::new(validation, mode);
        tokio::spawn(actor.run());
        handle
    }

    /// Latest published snapshot
    pub fn timers(&self) -> Snapshot {
        self.timers_rx.borrow().clone()
    }

    pub fn subscribe_timers(&self) -> watch::Receiver<Snapshot> {
        self.timers_rx.clone()
    }

    pub fn subscribe_completions(&self) -> broadcast::Receiver<CompletionEvent> {
        self.completion_tx.subscribe()
    }

    pub async fn create(
        &self,
        name: String,
        duration: i64,
        category: String,
    ) -> Result<Timer, TimerError> {
        self.request(|reply| StoreCommand::Create {
            name,
            duration,
            category,
            reply,
        })
        .await?
    }

    pub async fn apply(&self, intent: Intent) -> Result<Snapshot, TimerError> {
        self.request(|reply| StoreCommand::Apply { intent, reply }).await
    }

    /// Advance every running timer by one second
    pub async fn tick(&self) -> Result<TickReport, TimerError> {
        self.request(|reply| StoreCommand::Tick { reply }).await
    }

    pub async fn notification(&self) -> Result<NotificationView, TimerError> {
        self.request(|reply| StoreCommand::Notification { reply }).await
    }

    /// Dismiss the notification on display, returning it
    pub async fn dismiss_notification(&self) -> Result<Option<CompletionEvent>, TimerError> {
        self.request(|reply| StoreCommand::Dismiss { reply }).await
    }

    pub async fn stats(&self) -> Result<StoreStats, TimerError> {
        self.request(|reply| StoreCommand::Stats { reply }).await
    }

    async fn request<T, F>(&self, command: F) -> Result<T, TimerError>
    where
        F: FnOnce(oneshot::Sender<T>) -> StoreCommand,
    {
        let (reply, response) = oneshot::channel();
        self.sender
            .send(command(reply))
            .await
            .map_err(|_| TimerError::StoreUnavailable)?;
        response.await.map_err(|_| TimerError::StoreUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::TimerStatus;

    fn spawn() -> StoreHandle {
        StoreHandle::spawn(Validation::Strict, NotificationMode::Queue)
    }

    #[tokio::test]
    async fn create_publishes_snapshot() {
        let store = spawn();
        let mut updates = store.subscribe_timers();

        let timer = store.create("A".into(), 3, "Work".into()).await.unwrap();

        updates.changed().await.unwrap();
        let timers = updates.borrow().clone();
        assert_eq!(timers.len(), 1);
        assert_eq!(timers[0].id, timer.id);
        assert_eq!(store.timers()[0].status, TimerStatus::Idle);
    }

    #[tokio::test]
    async fn invalid_create_is_rejected() {
        let store = spawn();
        let result = store.create("A".into(), -1, "Work".into()).await;
        assert!(matches!(result, Err(TimerError::Validation(_))));
        assert!(store.timers().is_empty());
    }

    #[tokio::test]
    async fn ticks_report_completions_and_queue_them() {
        let store = spawn();
        let mut completions = store.subscribe_completions();
        let a = store.create("A".into(), 1, "X".into()).await.unwrap();
        let b = store.create("B".into(), 1, "X".into()).await.unwrap();
        store.apply(Intent::StartCategory("X".into())).await.unwrap();

        let report = store.tick().await.unwrap();
        assert_eq!(report.completed.len(), 2);
        assert_eq!(report.advanced(), 2);
        assert!(report.timers.iter().all(|t| t.is_completed()));

        assert_eq!(completions.recv().await.unwrap().timer.id, a.id);
        assert_eq!(completions.recv().await.unwrap().timer.id, b.id);

        let view = store.notification().await.unwrap();
        assert_eq!(view.pending, 2);
        assert_eq!(view.current.unwrap().timer.id, a.id);

        let dismissed = store.dismiss_notification().await.unwrap().unwrap();
        assert_eq!(dismissed.timer.id, a.id);
        let view = store.notification().await.unwrap();
        assert_eq!(view.current.unwrap().timer.id, b.id);

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.ticks, 1);
        assert_eq!(stats.completions, 2);
        assert_eq!(stats.pending_notifications, 1);
    }

    #[tokio::test]
    async fn tick_count_includes_running_and_completed() {
        let store = spawn();
        let short = store.create("Short".into(), 1, "X".into()).await.unwrap();
        let long = store.create("Long".into(), 5, "X".into()).await.unwrap();
        store.create("Idle".into(), 5, "X".into()).await.unwrap();
        store.apply(Intent::Start(short.id)).await.unwrap();
        store.apply(Intent::Start(long.id)).await.unwrap();

        let report = store.tick().await.unwrap();
        assert_eq!(report.completed.len(), 1);
        assert_eq!(report.advanced(), 2);
    }

    #[tokio::test]
    async fn latest_mode_keeps_single_notification() {
        let store = StoreHandle::spawn(Validation::Strict, NotificationMode::Latest);
        store.create("A".into(), 1, "X".into()).await.unwrap();
        let b = store.create("B".into(), 1, "X".into()).await.unwrap();
        store.apply(Intent::StartCategory("X".into())).await.unwrap();

        let report = store.tick().await.unwrap();
        assert_eq!(report.completed.len(), 2);

        let view = store.notification().await.unwrap();
        assert_eq!(view.pending, 1);
        assert_eq!(view.current.unwrap().timer.id, b.id);
    }

    #[tokio::test]
    async fn unknown_intent_returns_unchanged_snapshot() {
        let store = spawn();
        store.create("A".into(), 3, "Work".into()).await.unwrap();
        let before = store.timers();

        let after = store.apply(Intent::Start("missing".into())).await.unwrap();
        assert_eq!(*before, *after);
    }

    #[tokio::test]
    async fn handle_reports_stopped_store() {
        let (actor, handle) = StoreActor::new(Validation::Strict, NotificationMode::Queue);
        drop(actor);
        assert_eq!(handle.tick().await.unwrap_err(), TimerError::StoreUnavailable);
    }
}

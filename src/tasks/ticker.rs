//! Ticker background task
//!
//! Advances every running timer once per period until stopped.

use std::time::Duration;

use tokio::{
    sync::oneshot,
    task::JoinHandle,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::state::StoreHandle;

/// Drive the store forward once per `period` until `stop` fires or the store goes away
pub async fn ticker_task(store: StoreHandle, period: Duration, mut stop: oneshot::Receiver<()>) {
    info!("Starting ticker task ({}ms period)", period.as_millis());

    // First advance happens one full period after start
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match store.tick().await {
                    Ok(report) => {
                        debug!("Tick advanced {} timers ({} completed)",
                               report.advanced(), report.completed.len());
                        for event in &report.completed {
                            info!("Timer completed: {}", event.timer.name);
                        }
                    }
                    Err(e) => {
                        error!("Ticker stopping: {}", e);
                        break;
                    }
                }
            }

            _ = &mut stop => {
                info!("Ticker stopped");
                break;
            }
        }
    }
}

/// Running ticker; stopping it cancels the periodic trigger
pub struct Ticker {
    stop_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl Ticker {
    pub fn start(store: StoreHandle, period: Duration) -> Self {
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(ticker_task(store, period, stop_rx));
        Self {
            stop_tx: Some(stop_tx),
            task,
        }
    }

    /// Stop ticking and wait for the task to finish its current tick
    pub async fn stop(mut self) {
        if let Some(stop_tx) = self.stop_tx.take() {
            let _ = stop_tx.send(());
        }
        if let Err(e) = (&mut self.task).await {
            error!("Ticker task failed: {}", e);
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

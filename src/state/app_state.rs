//! Shared application state handed to HTTP handlers

use std::time::{Duration, Instant};

use super::{StoreHandle, Validation};
use crate::utils::format_seconds;

/// Handle to the timer store plus server metadata
#[derive(Clone)]
pub struct AppState {
    pub store: StoreHandle,
    pub validation: Validation,
    pub tick_period: Duration,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
}

impl AppState {
    pub fn new(
        store: StoreHandle,
        validation: Validation,
        tick_period: Duration,
        port: u16,
        host: String,
    ) -> Self {
        Self {
            store,
            validation,
            tick_period,
            start_time: Instant::now(),
            port,
            host,
        }
    }

    /// Server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_seconds(self.start_time.elapsed().as_secs() as i64)
    }
}

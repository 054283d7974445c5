//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::state::{NotificationMode, Validation};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "category-timers")]
#[command(about = "An in-memory HTTP service for named countdown timers grouped by category")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Ticker period in milliseconds
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    /// How completion notifications are kept until dismissed
    #[arg(long, value_enum, default_value_t = NotificationMode::Queue)]
    pub notifications: NotificationMode,

    /// Accept timers with empty names, empty categories or non-positive durations
    #[arg(long)]
    pub lenient: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn validation(&self) -> Validation {
        if self.lenient {
            Validation::Lenient
        } else {
            Validation::Strict
        }
    }
}

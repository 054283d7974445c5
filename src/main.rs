//! Category Timers - An in-memory HTTP service for countdown timers
//!
//! This is the main entry point for the category-timers application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use category_timers::{
    api::create_router,
    config::Config,
    state::{AppState, StoreHandle},
    tasks::Ticker,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("category_timers={},tower_http=info", config.log_level()))
        .init();

    info!("Starting category-timers server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, tick={}ms, notifications={:?}, validation={}",
        config.host,
        config.port,
        config.tick_ms,
        config.notifications,
        config.validation().as_str()
    );

    // The store task owns every timer; everything else talks to it through the handle
    let store = StoreHandle::spawn(config.validation(), config.notifications);
    let ticker = Ticker::start(store.clone(), config.tick_period());

    let state = Arc::new(AppState::new(
        store,
        config.validation(),
        config.tick_period(),
        config.port,
        config.host.clone(),
    ));
    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /timers                      - List timers");
    info!("  POST /timers                      - Create a timer");
    info!("  POST /timers/:id/start|pause|reset");
    info!("  GET  /categories                  - Timers grouped by category");
    info!("  POST /categories/:category/start|pause|reset");
    info!("  GET  /notifications               - Current completion notification");
    info!("  POST /notifications/dismiss       - Dismiss it and show the next");
    info!("  GET  /status                      - Server status");
    info!("  GET  /health                      - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    ticker.stop().await;
    info!("Server shutdown complete");
    Ok(())
}

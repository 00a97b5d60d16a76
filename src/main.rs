//! Boomtick - A countdown bomb timer and domination bar as a state-managed HTTP server
//!
//! This is the main entry point for the boomtick application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use boomtick::{
    api::create_router,
    config::Config,
    state::AppState,
    tasks::{countdown_ticker_task, domination_ticker_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("boomtick={},tower_http=info", config.log_level()))
        .init();

    info!("Starting boomtick server v{}", env!("CARGO_PKG_VERSION"));
    info!(
        "Configuration: host={}, port={}, fill_duration={}s, audio={}, haptics={}",
        config.host, config.port, config.fill_duration, !config.mute, !config.no_haptics
    );
    match &config.explosion_sample {
        Some(path) => info!("Explosion sample: {}", path.display()),
        None => info!("No explosion sample configured, explosions are synthesized"),
    }

    // Create application state
    let state = Arc::new(AppState::new(config.app_options()));
    state.log_summary();

    // Start the engine tickers
    tokio::spawn(countdown_ticker_task(Arc::clone(&state)));
    tokio::spawn(domination_ticker_task(Arc::clone(&state)));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /countdown/configure      - Arm the countdown (minutes, seconds)");
    info!("  POST /countdown/start          - Start the countdown");
    info!("  POST /countdown/disarm         - Begin or confirm a disarm attempt");
    info!("  POST /countdown/switches/:idx  - Press a disarm switch");
    info!("  POST /domination/actor         - Select the pushing side");
    info!("  POST /domination/fill-duration - Set the bar fill time");
    info!("  POST /domination/reset         - Reset the bar");
    info!("  GET  /events                   - Feedback cue stream");
    info!("  GET  /status                   - Check both tools");
    info!("  GET  /health                   - Health check");

    // Setup graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            info!("Shutdown signal received");
        })
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

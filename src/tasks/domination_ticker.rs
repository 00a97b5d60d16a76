//! Domination ticker background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{error, info};

use crate::state::AppState;

/// Time between domination ticks (20 per second)
pub const DOMINATION_PERIOD: Duration = Duration::from_millis(50);

/// Background task that integrates the domination bar at a fixed rate.
///
/// Runs even while nobody is pushing so the engine's timestamp never goes stale.
pub async fn domination_ticker_task(state: Arc<AppState>) {
    info!("Starting domination ticker task");

    let mut interval = interval(DOMINATION_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        let now = interval.tick().await;
        if let Err(e) = state.tick_domination(now.into_std()) {
            error!("Failed to tick domination bar: {}", e);
        }
    }
}

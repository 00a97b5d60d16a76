//! Countdown ticker background task

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::watch,
    time::{interval_at, Instant, MissedTickBehavior},
};
use tracing::{debug, error, info};

use crate::state::{AppState, CountdownState};

/// Time between countdown ticks
pub const COUNTDOWN_PERIOD: Duration = Duration::from_secs(1);

/// Background task that ticks the countdown once per second while it runs
pub async fn countdown_ticker_task(state: Arc<AppState>) {
    info!("Starting countdown ticker task");

    let mut countdown_rx = state.countdown_tx.subscribe();

    loop {
        let run_id = {
            let countdown = countdown_rx.borrow_and_update();
            countdown.running.then_some(countdown.run_id)
        };

        match run_id {
            Some(run_id) => run_countdown(&state, &mut countdown_rx, run_id).await,
            None => {
                // Wait for the next start
                if countdown_rx.changed().await.is_err() {
                    debug!("Countdown channel closed, stopping ticker");
                    return;
                }
            }
        }
    }
}

/// Tick one run until it finishes, is stopped, or is replaced by a new run
async fn run_countdown(
    state: &AppState,
    countdown_rx: &mut watch::Receiver<CountdownState>,
    run_id: u64,
) {
    debug!("Countdown run {} ticking", run_id);

    // First tick lands one full period after the start
    let mut interval = interval_at(Instant::now() + COUNTDOWN_PERIOD, COUNTDOWN_PERIOD);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                match state.tick_countdown(run_id) {
                    Ok(true) => {}
                    Ok(false) => break,
                    Err(e) => {
                        error!("Failed to tick countdown: {}", e);
                        break;
                    }
                }
            }

            changed = countdown_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let countdown = countdown_rx.borrow_and_update();
                if !countdown.running || countdown.run_id != run_id {
                    debug!("Countdown run {} stopped", run_id);
                    break;
                }
            }
        }
    }
}

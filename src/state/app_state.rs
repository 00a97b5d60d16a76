//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

use super::{Actor, CountdownState, DominationState};
use crate::{
    error::{Error, Result},
    feedback::{BroadcastSink, FeedbackEvent, FeedbackSink, SampleLoader},
};

/// Main application state owning both engines.
///
/// Every command and tick takes the engine's lock, mutates the single copy of
/// its state and publishes a snapshot to watchers before releasing it.
pub struct AppState {
    countdown: Mutex<CountdownState>,
    domination: Mutex<DominationState>,
    /// Where engine cues go
    pub feedback: Arc<dyn FeedbackSink>,
    /// Feedback events for presentation clients
    pub feedback_tx: broadcast::Sender<FeedbackEvent>,
    /// Snapshot channels, updated after each mutation
    pub countdown_tx: watch::Sender<CountdownState>,
    pub domination_tx: watch::Sender<DominationState>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Mutex<Option<(String, DateTime<Utc>)>>,
}

/// Options for building an [`AppState`]
#[derive(Debug)]
pub struct AppOptions {
    pub port: u16,
    pub host: String,
    pub fill_duration: f64,
    pub sample: SampleLoader,
    pub audio: bool,
    pub haptics: bool,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            port: 20554,
            host: "127.0.0.1".to_string(),
            fill_duration: 60.0,
            sample: SampleLoader::disabled(),
            audio: true,
            haptics: true,
        }
    }
}

impl AppState {
    /// Create the application state with a broadcast feedback sink
    pub fn new(options: AppOptions) -> Self {
        let (feedback_tx, _) = broadcast::channel(256);
        let feedback = Arc::new(BroadcastSink::new(
            feedback_tx.clone(),
            Arc::new(options.sample),
            options.audio,
            options.haptics,
        ));
        Self::with_feedback(options.port, options.host, options.fill_duration, feedback, feedback_tx)
    }

    /// Create the application state around an existing feedback sink
    pub fn with_feedback(
        port: u16,
        host: String,
        fill_duration: f64,
        feedback: Arc<dyn FeedbackSink>,
        feedback_tx: broadcast::Sender<FeedbackEvent>,
    ) -> Self {
        let countdown = CountdownState::new();
        let domination = DominationState::new(fill_duration);
        let (countdown_tx, _) = watch::channel(countdown.clone());
        let (domination_tx, _) = watch::channel(domination.clone());

        Self {
            countdown: Mutex::new(countdown),
            domination: Mutex::new(domination),
            feedback,
            feedback_tx,
            countdown_tx,
            domination_tx,
            start_time: Instant::now(),
            port,
            host,
            last_action: Mutex::new(None),
        }
    }

    /// Apply a countdown command and publish the result
    fn update_countdown<F>(&self, action: &str, updater: F) -> Result<CountdownState>
    where
        F: FnOnce(&mut CountdownState, &dyn FeedbackSink),
    {
        let mut countdown = self
            .countdown
            .lock()
            .map_err(|_| Error::StateUnavailable("countdown"))?;

        updater(&mut *countdown, &*self.feedback);
        let snapshot = countdown.clone();
        self.countdown_tx.send_replace(snapshot.clone());
        drop(countdown);

        self.record_action(action);
        Ok(snapshot)
    }

    /// Apply a domination command and publish the result
    fn update_domination<F>(&self, action: &str, updater: F) -> Result<DominationState>
    where
        F: FnOnce(&mut DominationState, &dyn FeedbackSink),
    {
        let mut domination = self
            .domination
            .lock()
            .map_err(|_| Error::StateUnavailable("domination"))?;

        updater(&mut *domination, &*self.feedback);
        let snapshot = domination.clone();
        self.domination_tx.send_replace(snapshot.clone());
        drop(domination);

        self.record_action(action);
        Ok(snapshot)
    }

    fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some((action.to_string(), Utc::now()));
        }
    }

    /// Configure the countdown; `duration_seconds` must already be validated
    pub fn configure_countdown(&self, duration_seconds: u32) -> Result<CountdownState> {
        if duration_seconds == 0 {
            return Err(Error::InvalidDuration);
        }
        self.update_countdown("configure", |c, _| c.configure(duration_seconds))
    }

    pub fn start_countdown(&self) -> Result<CountdownState> {
        self.update_countdown("start", |c, sink| c.start(sink))
    }

    pub fn request_disarm(&self) -> Result<CountdownState> {
        self.update_countdown("disarm", |c, sink| c.request_disarm(sink))
    }

    pub fn press_switch(&self, index: usize) -> Result<CountdownState> {
        self.update_countdown("press-switch", |c, sink| c.press_switch(index, sink))
    }

    /// Tick the countdown on behalf of run `run_id`.
    ///
    /// Returns whether that run is still going. A tick for a run that has
    /// stopped or been replaced changes nothing.
    pub fn tick_countdown(&self, run_id: u64) -> Result<bool> {
        let mut countdown = self
            .countdown
            .lock()
            .map_err(|_| Error::StateUnavailable("countdown"))?;

        if !countdown.running || countdown.run_id != run_id {
            debug!("Dropping countdown tick for finished run {}", run_id);
            return Ok(false);
        }

        countdown.tick(&*self.feedback);
        self.countdown_tx.send_replace(countdown.clone());
        Ok(countdown.running)
    }

    pub fn countdown(&self) -> Result<CountdownState> {
        self.countdown
            .lock()
            .map(|c| c.clone())
            .map_err(|_| Error::StateUnavailable("countdown"))
    }

    pub fn set_actor(&self, side: Actor) -> Result<DominationState> {
        let now = tokio::time::Instant::now().into_std();
        self.update_domination("set-actor", |d, sink| d.set_actor(side, now, sink))
    }

    /// Set the fill duration; `seconds` must already be validated
    pub fn set_fill_duration(&self, seconds: f64) -> Result<DominationState> {
        self.update_domination("set-fill-duration", |d, _| d.set_fill_duration(seconds))
    }

    pub fn reset_domination(&self) -> Result<DominationState> {
        let now = tokio::time::Instant::now().into_std();
        self.update_domination("reset", |d, _| d.reset(now))
    }

    /// Integrate the domination bar up to `now`. Watchers are only notified
    /// when the bar or its actor changed.
    pub fn tick_domination(&self, now: Instant) -> Result<()> {
        let mut domination = self
            .domination
            .lock()
            .map_err(|_| Error::StateUnavailable("domination"))?;

        let (value, actor) = (domination.value, domination.actor);
        domination.tick(now, &*self.feedback);
        if domination.value != value || domination.actor != actor {
            self.domination_tx.send_replace(domination.clone());
        }
        Ok(())
    }

    pub fn domination(&self) -> Result<DominationState> {
        self.domination
            .lock()
            .map(|d| d.clone())
            .map_err(|_| Error::StateUnavailable("domination"))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        format_uptime(self.start_time.elapsed())
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        match self.last_action.lock().ok().and_then(|a| a.clone()) {
            Some((action, time)) => (Some(action), Some(time)),
            None => (None, None),
        }
    }

    /// Log a summary of the initial state
    pub fn log_summary(&self) {
        if let Ok(domination) = self.domination() {
            info!(
                "Domination bar ready, fill duration {}s",
                domination.fill_duration
            );
        }
    }
}

fn format_uptime(duration: Duration) -> String {
    let hours = duration.as_secs() / 3600;
    let minutes = (duration.as_secs() % 3600) / 60;
    let seconds = duration.as_secs() % 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        feedback::testing::RecordingSink,
        state::{Outcome, SWITCH_COUNT},
    };

    fn recording_state() -> (AppState, Arc<RecordingSink>) {
        let sink = Arc::new(RecordingSink::new());
        let (tx, _) = broadcast::channel(8);
        let state = AppState::with_feedback(0, "test".to_string(), 10.0, sink.clone(), tx);
        (state, sink)
    }

    #[test]
    fn commands_publish_snapshots() {
        let (state, _sink) = recording_state();
        let rx = state.countdown_tx.subscribe();

        state.configure_countdown(90).expect("configure");
        assert_eq!(rx.borrow().remaining, 90);

        state.start_countdown().expect("start");
        assert!(rx.borrow().running);
        assert_eq!(state.get_last_action().0.as_deref(), Some("start"));
    }

    #[test]
    fn zero_duration_is_rejected() {
        let (state, _sink) = recording_state();
        assert!(matches!(state.configure_countdown(0), Err(Error::InvalidDuration)));
    }

    #[test]
    fn stale_run_ticks_are_dropped() {
        let (state, _sink) = recording_state();
        state.configure_countdown(10).expect("configure");
        let first_run = state.start_countdown().expect("start").run_id;

        state.configure_countdown(10).expect("reconfigure");
        assert!(!state.tick_countdown(first_run).expect("tick"));
        assert_eq!(state.countdown().expect("countdown").remaining, 10);

        let second_run = state.start_countdown().expect("start").run_id;
        assert_ne!(first_run, second_run);
        assert!(!state.tick_countdown(first_run).expect("tick"));
        assert!(state.tick_countdown(second_run).expect("tick"));
        assert_eq!(state.countdown().expect("countdown").remaining, 9);
    }

    #[test]
    fn disarm_through_app_state() {
        let (state, _sink) = recording_state();
        state.configure_countdown(30).expect("configure");
        let run_id = state.start_countdown().expect("start").run_id;
        state.request_disarm().expect("begin");
        for index in 0..SWITCH_COUNT {
            state.press_switch(index).expect("press");
        }
        let countdown = state.request_disarm().expect("confirm");
        assert_eq!(countdown.outcome, Outcome::Disarmed);
        assert!(!state.tick_countdown(run_id).expect("tick"));
    }

    #[test]
    fn idle_domination_ticks_do_not_notify() {
        let (state, _sink) = recording_state();
        let mut rx = state.domination_tx.subscribe();
        let now = Instant::now();

        state.tick_domination(now).expect("tick");
        assert!(!rx.has_changed().expect("channel"));

        state.set_actor(Actor::SideA).expect("actor");
        assert!(rx.has_changed().expect("channel"));
        rx.borrow_and_update();

        let later = state.domination().expect("domination").last_tick.expect("stamp")
            + Duration::from_secs(1);
        state.tick_domination(later).expect("tick");
        assert!(rx.has_changed().expect("channel"));
        assert!((rx.borrow().value - 10.6).abs() < 1e-6);
    }

    #[test]
    fn uptime_drops_empty_leading_units() {
        assert_eq!(format_uptime(Duration::from_millis(4_900)), "4s");
        assert_eq!(format_uptime(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_uptime(Duration::from_secs(3600)), "1h 0m 0s");
        assert_eq!(format_uptime(Duration::from_secs(90_061)), "25h 1m 1s");
    }
}

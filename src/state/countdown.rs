//! Countdown engine: remaining time, start/stop and terminal outcomes

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::DisarmPuzzle;
use crate::feedback::{
    FeedbackSink, TickUrgency, DISARMED_PATTERN, EXPLOSION_PATTERN, PULSE_PATTERN,
    PULSE_THRESHOLD, REJECTED_PATTERN,
};

/// Terminal result of a countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    None,
    Expired,
    Disarmed,
}

/// Countdown state together with the disarm puzzle it reads from.
///
/// `running` is never true once an outcome is decided or nothing remains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownState {
    pub total_duration: u32,
    pub remaining: u32,
    pub running: bool,
    pub outcome: Outcome,
    pub puzzle: DisarmPuzzle,
    /// Bumped on every start so stale ticks from an earlier run can be told apart
    pub run_id: u64,
    /// Bumped on every rejected disarm so the panel shake can be retriggered
    pub shake_count: u64,
}

impl CountdownState {
    /// Create an unconfigured countdown
    pub fn new() -> Self {
        Self {
            total_duration: 0,
            remaining: 0,
            running: false,
            outcome: Outcome::None,
            puzzle: DisarmPuzzle::new(),
            run_id: 0,
            shake_count: 0,
        }
    }

    /// Arm the countdown for `duration_seconds`. Zero is ignored; callers
    /// validate user input first.
    pub fn configure(&mut self, duration_seconds: u32) {
        if duration_seconds == 0 {
            debug!("Ignoring countdown configuration of zero seconds");
            return;
        }

        self.total_duration = duration_seconds;
        self.remaining = duration_seconds;
        self.running = false;
        self.outcome = Outcome::None;
        self.puzzle = DisarmPuzzle::new();
        info!("Countdown configured for {}s", duration_seconds);
    }

    /// Start counting down if there is time left and no outcome yet
    pub fn start(&mut self, sink: &dyn FeedbackSink) {
        sink.warm_up();

        if self.running || self.remaining == 0 || self.outcome != Outcome::None {
            debug!(
                "Ignoring start: running={}, remaining={}, outcome={:?}",
                self.running, self.remaining, self.outcome
            );
            return;
        }

        self.running = true;
        self.run_id += 1;
        info!("Countdown started with {}s remaining", self.remaining);
    }

    /// Advance by one elapsed second. No-op unless running.
    pub fn tick(&mut self, sink: &dyn FeedbackSink) {
        if !self.running {
            return;
        }

        if self.remaining <= 1 {
            self.remaining = 0;
            self.running = false;
            self.outcome = Outcome::Expired;
            self.puzzle.cancel();
            info!("Countdown expired");
            sink.play_explosion();
            sink.vibrate(EXPLOSION_PATTERN);
            return;
        }

        self.remaining -= 1;
        debug!("Countdown tick, {}s remaining", self.remaining);
        sink.play_tick(TickUrgency::for_remaining(self.remaining));
        if self.remaining <= PULSE_THRESHOLD {
            sink.vibrate(PULSE_PATTERN);
        }
    }

    /// Begin a disarm attempt, or confirm the one in progress.
    ///
    /// Confirming with every switch set disarms the countdown; otherwise the
    /// attempt stays open with its switches as they are.
    pub fn request_disarm(&mut self, sink: &dyn FeedbackSink) {
        if !self.running {
            debug!("Ignoring disarm request, countdown not running");
            return;
        }

        if !self.puzzle.active {
            self.puzzle.begin();
            info!("Disarm attempt started");
            return;
        }

        if self.puzzle.all_set() {
            self.outcome = Outcome::Disarmed;
            self.running = false;
            self.puzzle.cancel();
            info!("Countdown disarmed with {}s remaining", self.remaining);
            sink.play_success();
            sink.vibrate(DISARMED_PATTERN);
        } else {
            self.shake_count += 1;
            info!(
                "Disarm rejected, {} of {} switches set",
                self.puzzle.set_count(),
                self.puzzle.switches.len()
            );
            sink.play_failure();
            sink.vibrate(REJECTED_PATTERN);
            sink.shake();
        }
    }

    /// Press a disarm switch
    pub fn press_switch(&mut self, index: usize, sink: &dyn FeedbackSink) {
        self.puzzle.press(index, sink);
    }
}

impl Default for CountdownState {
    fn default() -> Self {
        Self::new()
    }
}

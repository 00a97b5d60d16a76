//! Domination engine: a tug-of-war bar integrated at a fixed rate

use std::time::{Duration, Instant};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::feedback::FeedbackSink;

/// Magnitude of either end of the bar
pub const BOUND: f64 = 100.0;
/// Shortest and longest allowed time to fill the bar, in seconds
pub const MIN_FILL_SECONDS: f64 = 1.0;
pub const MAX_FILL_SECONDS: f64 = 3600.0;
/// Progress applied the instant a side starts pushing
pub const KICK: Duration = Duration::from_millis(60);

// Values this close to a bound count as reaching it
const BOUND_EPSILON: f64 = 1e-9;

/// Which side is pushing the bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Actor {
    None,
    SideA,
    SideB,
}

impl Actor {
    /// +1 for side A, -1 for side B, 0 for nobody
    pub fn direction(self) -> f64 {
        match self {
            Actor::None => 0.0,
            Actor::SideA => 1.0,
            Actor::SideB => -1.0,
        }
    }
}

/// Domination bar state. Positive values are side A's share, negative
/// values side B's.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DominationState {
    pub value: f64,
    pub actor: Actor,
    pub fill_duration: f64,
    #[serde(skip)]
    pub last_tick: Option<Instant>,
}

impl DominationState {
    /// Create an idle bar at zero
    pub fn new(fill_duration: f64) -> Self {
        let mut state = Self {
            value: 0.0,
            actor: Actor::None,
            fill_duration: MIN_FILL_SECONDS,
            last_tick: None,
        };
        state.set_fill_duration(fill_duration);
        state
    }

    /// Progress in percent per second at the current fill duration
    pub fn rate(&self) -> f64 {
        BOUND / self.fill_duration
    }

    /// Set the time to fill the bar, clamped to the allowed range.
    /// Non-finite input is ignored.
    pub fn set_fill_duration(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            debug!("Ignoring non-finite fill duration");
            return;
        }
        self.fill_duration = seconds.clamp(MIN_FILL_SECONDS, MAX_FILL_SECONDS);
        info!("Domination fill duration set to {}s", self.fill_duration);
    }

    /// Select the pushing side. A side gets an immediate kick; `Actor::None`
    /// only stops integration.
    pub fn set_actor(&mut self, side: Actor, now: Instant, sink: &dyn FeedbackSink) {
        self.actor = side;
        if side == Actor::None {
            debug!("Domination actor cleared");
            return;
        }

        debug!("Domination actor set to {:?}", side);
        self.advance(KICK.as_secs_f64(), sink);
        self.last_tick = Some(now);
    }

    /// Integrate up to `now`. Idle ticks only refresh the timestamp.
    pub fn tick(&mut self, now: Instant, sink: &dyn FeedbackSink) {
        if self.actor == Actor::None {
            self.last_tick = Some(now);
            return;
        }

        let dt = self
            .last_tick
            .map(|last| now.saturating_duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        self.advance(dt, sink);
    }

    /// Back to an idle, even bar
    pub fn reset(&mut self, now: Instant) {
        self.value = 0.0;
        self.actor = Actor::None;
        self.last_tick = Some(now);
        info!("Domination bar reset");
    }

    fn advance(&mut self, seconds: f64, sink: &dyn FeedbackSink) {
        let direction = self.actor.direction();
        let mut value = (self.value + direction * self.rate() * seconds).clamp(-BOUND, BOUND);
        if BOUND - value.abs() < BOUND_EPSILON {
            value = BOUND.copysign(value);
        }
        self.value = value;

        if value * direction >= BOUND {
            let side = self.actor;
            self.actor = Actor::None;
            info!("Domination bar captured by {:?}", side);
            sink.captured(side);
        }
    }
}

impl Default for DominationState {
    fn default() -> Self {
        Self::new(60.0)
    }
}

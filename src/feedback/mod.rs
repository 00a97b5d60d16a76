//! Feedback module
//!
//! Sound, vibration and shake cues emitted by the engines on state transitions.
//! Every cue is fire-and-forget: sinks never return errors to the engines.

pub mod sample;
pub mod sink;

#[cfg(test)]
pub mod testing;

use serde::{Deserialize, Serialize};

use crate::state::Actor;

// Re-export main types
pub use sample::SampleLoader;
pub use sink::BroadcastSink;

/// Strong vibration played when the countdown expires
pub const EXPLOSION_PATTERN: &[u32] = &[400, 100, 400, 100, 800];
/// Light pulse played on each of the last few countdown ticks
pub const PULSE_PATTERN: &[u32] = &[40];
/// Medium vibration played on a successful disarm
pub const DISARMED_PATTERN: &[u32] = &[120, 60, 120];
/// Short buzz played when a disarm attempt is rejected
pub const REJECTED_PATTERN: &[u32] = &[60];

/// Remaining seconds at or below which tick cues become urgent
pub const URGENT_THRESHOLD: u32 = 10;
/// Remaining seconds at or below which each tick also vibrates
pub const PULSE_THRESHOLD: u32 = 5;

/// Intensity of a countdown tick cue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickUrgency {
    Normal,
    Urgent,
}

impl TickUrgency {
    /// Pick the tick intensity for the given remaining seconds
    pub fn for_remaining(remaining: u32) -> Self {
        if remaining <= URGENT_THRESHOLD {
            Self::Urgent
        } else {
            Self::Normal
        }
    }
}

/// Where the audio for an explosion cue comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ExplosionSource {
    /// The preloaded explosion sample
    Sample { bytes: usize },
    /// Procedural fallback when no sample is available in time
    Synthesized,
}

/// A single cue as delivered to presentation clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedbackEvent {
    AudioReady,
    Tick { urgency: TickUrgency },
    Switch { index: usize, pitch_hz: f32 },
    Failure,
    Success,
    Explosion(ExplosionSource),
    Vibrate { pattern: Vec<u32> },
    Shake,
    Captured { side: Actor },
}

/// Pitch of the confirmation tone for a disarm switch, rising by a
/// semitone per switch from A4
pub fn switch_pitch(index: usize) -> f32 {
    440.0 * 2f32.powf(index as f32 / 12.0)
}

/// Notification surface consumed by the countdown and domination engines.
///
/// Implementations must not block and must swallow their own failures.
pub trait FeedbackSink: Send + Sync {
    /// Make sure audio output is ready; repeated calls are harmless
    fn warm_up(&self);

    fn play_tick(&self, urgency: TickUrgency);

    /// Confirmation tone for a pressed disarm switch
    fn play_switch(&self, index: usize);

    fn play_failure(&self);

    fn play_success(&self);

    fn play_explosion(&self);

    /// Vibration pattern in alternating on/off milliseconds
    fn vibrate(&self, pattern: &[u32]);

    /// Retrigger the presentational shake of the disarm panel
    fn shake(&self);

    /// The domination bar reached the bound of `side`
    fn captured(&self, side: Actor);
}

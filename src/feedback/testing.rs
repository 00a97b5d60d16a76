//! Recording sink for engine tests

use std::sync::Mutex;

use super::{ExplosionSource, FeedbackEvent, FeedbackSink, TickUrgency, switch_pitch};
use crate::state::Actor;

/// Sink that keeps every cue in memory, in call order
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<FeedbackEvent>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&self, event: FeedbackEvent) {
        self.events.lock().expect("recording sink").push(event);
    }

    /// Take all cues recorded so far
    pub fn take(&self) -> Vec<FeedbackEvent> {
        std::mem::take(&mut *self.events.lock().expect("recording sink"))
    }
}

impl FeedbackSink for RecordingSink {
    fn warm_up(&self) {
        self.push(FeedbackEvent::AudioReady);
    }

    fn play_tick(&self, urgency: TickUrgency) {
        self.push(FeedbackEvent::Tick { urgency });
    }

    fn play_switch(&self, index: usize) {
        self.push(FeedbackEvent::Switch { index, pitch_hz: switch_pitch(index) });
    }

    fn play_failure(&self) {
        self.push(FeedbackEvent::Failure);
    }

    fn play_success(&self) {
        self.push(FeedbackEvent::Success);
    }

    fn play_explosion(&self) {
        self.push(FeedbackEvent::Explosion(ExplosionSource::Synthesized));
    }

    fn vibrate(&self, pattern: &[u32]) {
        self.push(FeedbackEvent::Vibrate { pattern: pattern.to_vec() });
    }

    fn shake(&self) {
        self.push(FeedbackEvent::Shake);
    }

    fn captured(&self, side: Actor) {
        self.push(FeedbackEvent::Captured { side });
    }
}

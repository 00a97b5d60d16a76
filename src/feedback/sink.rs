//! Broadcast-backed feedback sink

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::{runtime::Handle, sync::broadcast};
use tracing::{debug, info};

use super::{
    switch_pitch, ExplosionSource, FeedbackEvent, FeedbackSink, SampleLoader, TickUrgency,
};
use crate::state::Actor;

/// Feedback sink that turns every cue into a [`FeedbackEvent`] for subscribed
/// presentation clients.
///
/// Sound and vibration can be switched off independently; a disabled
/// capability turns its cues into silent no-ops.
#[derive(Debug)]
pub struct BroadcastSink {
    tx: broadcast::Sender<FeedbackEvent>,
    sample: Arc<SampleLoader>,
    audio: bool,
    haptics: bool,
    warmed: AtomicBool,
}

impl BroadcastSink {
    /// Create a sink publishing on `tx`
    pub fn new(
        tx: broadcast::Sender<FeedbackEvent>,
        sample: Arc<SampleLoader>,
        audio: bool,
        haptics: bool,
    ) -> Self {
        Self {
            tx,
            sample,
            audio,
            haptics,
            warmed: AtomicBool::new(false),
        }
    }

    /// Whether audio output has been activated
    pub fn is_warm(&self) -> bool {
        self.warmed.load(Ordering::Acquire)
    }

    fn emit(&self, event: FeedbackEvent) {
        // No subscribers is the normal idle case
        if self.tx.send(event).is_err() {
            debug!("No feedback subscribers");
        }
    }

    fn emit_sound(&self, event: FeedbackEvent) {
        if self.audio {
            self.emit(event);
        }
    }
}

impl FeedbackSink for BroadcastSink {
    fn warm_up(&self) {
        if !self.audio || self.warmed.swap(true, Ordering::AcqRel) {
            return;
        }

        info!("Audio output activated");
        self.emit(FeedbackEvent::AudioReady);

        // Start the one-time sample load so the first explosion finds it cached
        if let Ok(handle) = Handle::try_current() {
            let sample = Arc::clone(&self.sample);
            handle.spawn(async move {
                sample.get().await;
            });
        }
    }

    fn play_tick(&self, urgency: TickUrgency) {
        self.emit_sound(FeedbackEvent::Tick { urgency });
    }

    fn play_switch(&self, index: usize) {
        self.emit_sound(FeedbackEvent::Switch {
            index,
            pitch_hz: switch_pitch(index),
        });
    }

    fn play_failure(&self) {
        self.emit_sound(FeedbackEvent::Failure);
    }

    fn play_success(&self) {
        self.emit_sound(FeedbackEvent::Success);
    }

    fn play_explosion(&self) {
        if !self.audio {
            return;
        }

        let Ok(handle) = Handle::try_current() else {
            self.emit(FeedbackEvent::Explosion(ExplosionSource::Synthesized));
            return;
        };

        let tx = self.tx.clone();
        let sample = Arc::clone(&self.sample);
        handle.spawn(async move {
            let source = match sample.get_within_timeout().await {
                Some(bytes) => ExplosionSource::Sample { bytes: bytes.len() },
                None => ExplosionSource::Synthesized,
            };
            debug!("Explosion cue using {:?}", source);
            if tx.send(FeedbackEvent::Explosion(source)).is_err() {
                debug!("No feedback subscribers");
            }
        });
    }

    fn vibrate(&self, pattern: &[u32]) {
        if self.haptics {
            self.emit(FeedbackEvent::Vibrate {
                pattern: pattern.to_vec(),
            });
        }
    }

    fn shake(&self) {
        self.emit(FeedbackEvent::Shake);
    }

    fn captured(&self, side: Actor) {
        self.emit(FeedbackEvent::Captured { side });
        self.play_success();
    }
}

//! Disarm puzzle: nine switches that must all be pressed

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::feedback::FeedbackSink;

/// Number of switches on the disarm panel
pub const SWITCH_COUNT: usize = 9;

/// Disarm puzzle state. Switches are in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisarmPuzzle {
    pub active: bool,
    pub switches: [bool; SWITCH_COUNT],
}

impl DisarmPuzzle {
    /// Create an inactive puzzle with every switch released
    pub fn new() -> Self {
        Self {
            active: false,
            switches: [false; SWITCH_COUNT],
        }
    }

    /// Start an attempt with all switches cleared
    pub fn begin(&mut self) {
        self.active = true;
        self.switches = [false; SWITCH_COUNT];
    }

    /// Press a switch. Ignored while inactive, for an out-of-range index, or
    /// when the switch is already set.
    pub fn press(&mut self, index: usize, sink: &dyn FeedbackSink) {
        if !self.active {
            debug!("Ignoring switch {} press, no disarm attempt in progress", index);
            return;
        }
        let Some(switch) = self.switches.get_mut(index) else {
            debug!("Ignoring press of unknown switch {}", index);
            return;
        };
        if *switch {
            return;
        }

        *switch = true;
        sink.play_switch(index);
    }

    /// True when every switch is set
    pub fn all_set(&self) -> bool {
        self.switches.iter().all(|&s| s)
    }

    /// Number of switches currently set
    pub fn set_count(&self) -> usize {
        self.switches.iter().filter(|&&s| s).count()
    }

    /// End the attempt; switch values stay until the next `begin`
    pub fn cancel(&mut self) {
        self.active = false;
    }
}

impl Default for DisarmPuzzle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::{testing::RecordingSink, FeedbackEvent};

    #[test]
    fn press_sets_switch_once_with_tone() {
        let sink = RecordingSink::new();
        let mut puzzle = DisarmPuzzle::new();
        puzzle.begin();

        puzzle.press(3, &sink);
        puzzle.press(3, &sink);

        assert!(puzzle.switches[3]);
        assert_eq!(puzzle.set_count(), 1);
        let events = sink.take();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], FeedbackEvent::Switch { index: 3, .. }));
    }

    #[test]
    fn press_is_ignored_while_inactive_or_out_of_range() {
        let sink = RecordingSink::new();
        let mut puzzle = DisarmPuzzle::new();

        puzzle.press(0, &sink);
        assert_eq!(puzzle.set_count(), 0);

        puzzle.begin();
        puzzle.press(SWITCH_COUNT, &sink);
        assert_eq!(puzzle.set_count(), 0);
        assert!(sink.take().is_empty());
    }

    #[test]
    fn all_set_requires_every_switch() {
        let sink = RecordingSink::new();
        let mut puzzle = DisarmPuzzle::new();
        puzzle.begin();

        for index in 0..SWITCH_COUNT - 1 {
            puzzle.press(index, &sink);
            assert!(!puzzle.all_set());
        }
        puzzle.press(SWITCH_COUNT - 1, &sink);
        assert!(puzzle.all_set());
    }

    #[test]
    fn cancel_keeps_switches_until_next_begin() {
        let sink = RecordingSink::new();
        let mut puzzle = DisarmPuzzle::new();
        puzzle.begin();
        puzzle.press(0, &sink);
        puzzle.press(4, &sink);

        puzzle.cancel();
        assert!(!puzzle.active);
        assert_eq!(puzzle.set_count(), 2);

        puzzle.begin();
        assert!(puzzle.active);
        assert_eq!(puzzle.set_count(), 0);
    }
}

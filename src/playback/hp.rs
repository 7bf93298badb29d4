use crate::models::{ActorPlaybackState, LogEvent, Side};

/// Keeps one actor's displayed HP in step with the readings found in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HpTracker {
    side: Side,
}

impl HpTracker {
    pub fn new(side: Side) -> Self {
        Self { side }
    }

    /// Applies the event's HP reading and defeat override; returns whether HP changed.
    pub fn apply(&self, state: &mut ActorPlaybackState, event: &LogEvent) -> bool {
        let before = state.displayed_hp;

        if let Some(hp) = event.hp_for(self.side) {
            state.displayed_hp = hp.min(state.max_hp);
        }
        if event.defeated == Some(self.side) {
            state.displayed_hp = 0;
        }

        state.displayed_hp != before
    }
}

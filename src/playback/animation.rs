use crate::models::{ActorPlaybackState, AnimationState, LogEvent, LogEventKind, Side};

/// Drives one actor's pose from classified log lines and the finish signal.
///
/// Once [`finish`](Self::finish) has been called the machine ignores every
/// later event and settle request, so the terminal pose cannot be disturbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationStateMachine {
    side: Side,
    death_frames: usize,
    finished: bool,
}

impl AnimationStateMachine {
    pub fn new(side: Side, death_frames: usize) -> Self {
        Self {
            side,
            death_frames,
            finished: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Returns `true` when the event moved this actor into a new pose.
    pub fn on_event(&self, state: &mut ActorPlaybackState, event: &LogEvent) -> bool {
        if self.finished {
            return false;
        }

        match event.kind {
            LogEventKind::AttackHit => match event.acting_side {
                Some(actor) if actor == self.side => {
                    state.pose(AnimationState::Attack, false, None);
                    true
                }
                Some(_) => {
                    state.pose(AnimationState::Hit, false, None);
                    true
                }
                None => false,
            },
            LogEventKind::AttackMiss => {
                if event.acting_side == Some(self.side) {
                    state.pose(AnimationState::Attack, false, None);
                    true
                } else {
                    false
                }
            }
            LogEventKind::RoundMarker
            | LogEventKind::StatusOrOther
            | LogEventKind::VictoryDeclaration
            | LogEventKind::Revival
            | LogEventKind::Defeat => {
                state.pose(AnimationState::Idle, false, None);
                true
            }
        }
    }

    /// The rest pose shown between lines.
    pub fn settle(&self, state: &mut ActorPlaybackState) {
        if !self.finished {
            state.pose(AnimationState::Idle, true, Some(0));
        }
    }

    /// Applies the terminal freeze. With no winner the pose is left as it is.
    pub fn finish(&mut self, state: &mut ActorPlaybackState, winner: Option<Side>) {
        if self.finished {
            return;
        }
        self.finished = true;

        match winner {
            Some(winner) if winner == self.side => state.pose(AnimationState::Idle, true, Some(0)),
            Some(_) => state.pose(
                AnimationState::Death,
                true,
                Some(self.death_frames.saturating_sub(1)),
            ),
            None => {}
        }
    }
}

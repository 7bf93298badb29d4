use std::sync::Arc;

use tokio::sync::watch;
use tokio::time::{self, Duration, Instant};
use tracing::trace;

use crate::models::{ActorPlaybackState, AnimationState, Side, SpriteSheet};
use crate::playback::state::PlaybackState;

/// The part of an actor's state that decides how its frames advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationCue {
    pub animation: AnimationState,
    pub paused: bool,
    pub frozen_frame: Option<usize>,
}

impl From<&ActorPlaybackState> for AnimationCue {
    fn from(state: &ActorPlaybackState) -> Self {
        Self {
            animation: state.animation,
            paused: state.paused,
            frozen_frame: state.frozen_frame,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    frame: usize,
    cue: Option<AnimationCue>,
}

impl FrameClock {
    pub fn frame(&self) -> usize {
        self.frame
    }

    pub fn is_running(&self) -> bool {
        self.cue.is_some_and(|cue| !cue.paused)
    }

    /// Takes a new cue. Returns `false` when it is the cue already playing.
    ///
    /// A paused cue holds its frozen frame, or the current one, clamped to the
    /// strip. A running cue restarts at frame 0 when the animation changes or
    /// playback resumes from a pause.
    pub fn apply(&mut self, cue: AnimationCue, frame_count: usize) -> bool {
        if self.cue == Some(cue) {
            return false;
        }
        let previous = self.cue.replace(cue);
        let last = frame_count.saturating_sub(1);

        if cue.paused {
            self.frame = cue.frozen_frame.unwrap_or(self.frame).min(last);
        } else if previous.is_none_or(|previous| previous.paused || previous.animation != cue.animation) {
            self.frame = 0;
        }
        true
    }

    pub fn advance(&mut self, frame_count: usize) -> usize {
        if self.is_running() {
            self.frame = (self.frame + 1) % frame_count.max(1);
        }
        self.frame
    }
}

/// Advances one actor's sprite frame for as long as the task lives.
///
/// The tick deadline is only moved when this actor's cue changes, so frames
/// published by either clock do not disturb the other's timing.
pub async fn run_frame_clock(side: Side, sheet: SpriteSheet, state: Arc<watch::Sender<PlaybackState>>) {
    let mut updates = state.subscribe();
    let mut clock = FrameClock::default();
    let mut spec = sheet.idle;
    let tick = time::sleep(Duration::ZERO);
    tokio::pin!(tick);

    loop {
        let cue = updates.borrow_and_update().actor(side).map(AnimationCue::from);
        if let Some(cue) = cue {
            spec = *sheet.spec(cue.animation);
            if clock.apply(cue, spec.frames) {
                trace!(%side, animation = cue.animation.label(), paused = cue.paused, "sprite cue changed");
                publish_frame(&state, side, clock.frame());
                tick.as_mut().reset(Instant::now() + spec.frame_period());
            }
        }

        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    return;
                }
            }
            () = &mut tick, if clock.is_running() => {
                let frame = clock.advance(spec.frames);
                publish_frame(&state, side, frame);
                tick.as_mut().reset(Instant::now() + spec.frame_period());
            }
        }
    }
}

fn publish_frame(state: &watch::Sender<PlaybackState>, side: Side, frame: usize) {
    state.send_if_modified(|playback| {
        let Some(stage) = playback.stage.as_mut() else {
            return false;
        };
        let actor = stage.actor_mut(side);
        if actor.frame == frame {
            false
        } else {
            actor.frame = frame;
            true
        }
    });
}

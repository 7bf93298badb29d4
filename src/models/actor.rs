use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnimationState {
    #[default]
    Idle,
    /// Present on the sprite sheet but never entered from log events.
    Walk,
    Attack,
    Hit,
    Death,
}

impl AnimationState {
    pub fn label(self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
            AnimationState::Walk => "walk",
            AnimationState::Attack => "attack",
            AnimationState::Hit => "hit",
            AnimationState::Death => "death",
        }
    }
}

/// Everything the renderer needs to draw one combatant on a given tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorPlaybackState {
    /// Always within `0..=max_hp`.
    pub displayed_hp: u32,
    pub max_hp: u32,
    pub animation: AnimationState,
    pub paused: bool,
    /// Frame to hold while paused; `None` holds wherever the clock stopped.
    pub frozen_frame: Option<usize>,
    /// Consumable display names seen in the log so far. Never shrinks.
    pub used_consumables: BTreeSet<String>,
    /// Frame last published by this actor's sprite clock.
    pub frame: usize,
}

impl ActorPlaybackState {
    pub fn new(max_hp: u32) -> Self {
        Self {
            displayed_hp: max_hp,
            max_hp,
            animation: AnimationState::Idle,
            paused: false,
            frozen_frame: None,
            used_consumables: BTreeSet::new(),
            frame: 0,
        }
    }

    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp == 0 {
            0.0
        } else {
            (self.displayed_hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
        }
    }

    pub(crate) fn pose(&mut self, animation: AnimationState, paused: bool, frozen_frame: Option<usize>) {
        self.animation = animation;
        self.paused = paused;
        self.frozen_frame = frozen_frame;
    }
}

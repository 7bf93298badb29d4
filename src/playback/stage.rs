use crate::error::{ReplayError, Result};
use crate::models::{ActorPlaybackState, BattleResult, LogEvent, Side, SpriteSheet};
use crate::playback::animation::AnimationStateMachine;
use crate::playback::hp::HpTracker;

/// One combatant: its renderer-facing state plus the two components allowed to change it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorSlot {
    pub state: ActorPlaybackState,
    hp: HpTracker,
    motion: AnimationStateMachine,
}

impl ActorSlot {
    fn new(side: Side, max_hp: u32, sheet: &SpriteSheet) -> Self {
        Self {
            state: ActorPlaybackState::new(max_hp),
            hp: HpTracker::new(side),
            motion: AnimationStateMachine::new(side, sheet.death.frames),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleStage {
    attacker: ActorSlot,
    defender: ActorSlot,
}

impl BattleStage {
    pub fn new(result: &BattleResult, sheet: &SpriteSheet) -> Self {
        Self {
            attacker: ActorSlot::new(Side::Attacker, result.attacker.max_hp, sheet),
            defender: ActorSlot::new(Side::Defender, result.defender.max_hp, sheet),
        }
    }

    pub fn actor(&self, side: Side) -> &ActorPlaybackState {
        &self.slot(side).state
    }

    pub(crate) fn actor_mut(&mut self, side: Side) -> &mut ActorPlaybackState {
        &mut self.slot_mut(side).state
    }

    fn slot(&self, side: Side) -> &ActorSlot {
        match side {
            Side::Attacker => &self.attacker,
            Side::Defender => &self.defender,
        }
    }

    fn slot_mut(&mut self, side: Side) -> &mut ActorSlot {
        match side {
            Side::Attacker => &mut self.attacker,
            Side::Defender => &mut self.defender,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.attacker.motion.is_finished()
    }

    /// Feeds one classified line to both actors. Returns whether either pose changed.
    pub fn apply(&mut self, event: &LogEvent) -> bool {
        let mut transitioned = false;
        for slot in [&mut self.attacker, &mut self.defender] {
            slot.hp.apply(&mut slot.state, event);
            transitioned |= slot.motion.on_event(&mut slot.state, event);
        }

        if let (Some(potion), Some(side)) = (&event.potion_consumed, event.acting_side) {
            self.slot_mut(side).state.used_consumables.insert(potion.clone());
        }

        transitioned
    }

    pub fn settle(&mut self) {
        for slot in [&mut self.attacker, &mut self.defender] {
            slot.motion.settle(&mut slot.state);
        }
    }

    /// Applies the terminal freeze for the result's winner.
    ///
    /// The stage counts as finished even when the winner matches neither side;
    /// both poses are then left exactly as the last line put them.
    pub fn finish(&mut self, result: &BattleResult) -> Result<Side> {
        let winner = result.winner_side();
        for slot in [&mut self.attacker, &mut self.defender] {
            slot.motion.finish(&mut slot.state, winner);
        }
        winner.ok_or(ReplayError::UnresolvableWinner {
            winner_id: result.winner_id,
        })
    }
}

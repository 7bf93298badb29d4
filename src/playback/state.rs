use std::sync::Arc;

use crate::models::{ActorPlaybackState, BattleResult, LogEventKind, Side};
use crate::playback::stage::BattleStage;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Requesting,
    Playing,
    Finished,
    /// The request failed; nothing was revealed or animated.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealedLine {
    pub text: String,
    pub kind: LogEventKind,
}

/// Everything the renderer reads. Published through a `watch` channel, so a
/// reader always sees a consistent snapshot.
#[derive(Debug, Clone, Default)]
pub struct PlaybackState {
    pub status: PlaybackStatus,
    pub result: Option<Arc<BattleResult>>,
    pub stage: Option<BattleStage>,
    pub revealed_lines: Vec<RevealedLine>,
    pub current_line_index: Option<usize>,
    pub finished: bool,
    pub winner_id: Option<i64>,
    /// Set when the finish signal could not be applied cleanly.
    pub issue: Option<String>,
}

impl PlaybackState {
    pub fn actor(&self, side: Side) -> Option<&ActorPlaybackState> {
        self.stage.as_ref().map(|stage| stage.actor(side))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, PlaybackStatus::Failed(_))
    }

    /// Name of the winner once playback has finished and the winner is one of the combatants.
    pub fn winner_name(&self) -> Option<&str> {
        let result = self.result.as_ref()?;
        let winner_id = self.winner_id?;
        [Side::Attacker, Side::Defender]
            .into_iter()
            .map(|side| result.combatant(side))
            .find(|combatant| combatant.id == winner_id)
            .map(|combatant| combatant.name.as_str())
    }
}

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two combatants on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Attacker,
    Defender,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Side::Attacker => "attacker",
            Side::Defender => "defender",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogEventKind {
    AttackHit,
    AttackMiss,
    StatusOrOther,
    Revival,
    Defeat,
    VictoryDeclaration,
    RoundMarker,
}

/// Absolute HP reading carried by a log line, already clamped at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpUpdate {
    pub side: Side,
    pub new_value: u32,
}

/// Semantic reading of a single battle-log line.
///
/// Built fresh from the line text and the two display names every time; it
/// holds no reference to playback state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    pub kind: LogEventKind,
    /// `None` when neither combatant is narrated as acting.
    pub acting_side: Option<Side>,
    pub hp_update: Option<HpUpdate>,
    /// Side forced to zero HP by a defeat keyword, regardless of `hp_update`.
    pub defeated: Option<Side>,
    pub potion_consumed: Option<String>,
}

impl LogEvent {
    /// The fallback reading for text that matches nothing.
    pub fn unrecognized() -> Self {
        Self {
            kind: LogEventKind::StatusOrOther,
            acting_side: None,
            hp_update: None,
            defeated: None,
            potion_consumed: None,
        }
    }

    pub fn hp_for(&self, side: Side) -> Option<u32> {
        self.hp_update
            .filter(|update| update.side == side)
            .map(|update| update.new_value)
    }
}

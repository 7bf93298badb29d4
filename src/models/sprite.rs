use std::time::Duration;

use crate::models::actor::AnimationState;

/// Frame layout of one animation strip on the character sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationSpec {
    pub start_col: usize,
    pub frames: usize,
    /// Time for one full pass over all frames.
    pub cycle: Duration,
}

impl AnimationSpec {
    pub const fn new(start_col: usize, frames: usize, cycle_ms: u64) -> Self {
        Self {
            start_col,
            frames,
            cycle: Duration::from_millis(cycle_ms),
        }
    }

    pub fn last_frame(&self) -> usize {
        self.frames.saturating_sub(1)
    }

    pub fn frame_period(&self) -> Duration {
        self.cycle / self.frames.max(1) as u32
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteSheet {
    pub cell_width: u32,
    pub cell_height: u32,
    pub idle: AnimationSpec,
    pub walk: AnimationSpec,
    pub attack: AnimationSpec,
    pub hit: AnimationSpec,
    pub death: AnimationSpec,
}

impl Default for SpriteSheet {
    fn default() -> Self {
        Self {
            cell_width: 88,
            cell_height: 96,
            idle: AnimationSpec::new(0, 3, 600),
            walk: AnimationSpec::new(3, 4, 500),
            attack: AnimationSpec::new(7, 3, 400),
            hit: AnimationSpec::new(10, 3, 400),
            death: AnimationSpec::new(13, 3, 600),
        }
    }
}

impl SpriteSheet {
    pub fn spec(&self, animation: AnimationState) -> &AnimationSpec {
        match animation {
            AnimationState::Idle => &self.idle,
            AnimationState::Walk => &self.walk,
            AnimationState::Attack => &self.attack,
            AnimationState::Hit => &self.hit,
            AnimationState::Death => &self.death,
        }
    }
}

pub struct AvatarInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub row: usize,
    pub class_key: &'static str,
}

pub const AVATARS: &[AvatarInfo] = &[
    AvatarInfo { id: "warrior_1", name: "Heavy Warrior", row: 0, class_key: "WARRIOR" },
    AvatarInfo { id: "warrior_2", name: "Knight", row: 1, class_key: "WARRIOR" },
    AvatarInfo { id: "warrior_3", name: "Mercenary", row: 2, class_key: "WARRIOR" },
    AvatarInfo { id: "mage_1", name: "Mage", row: 3, class_key: "MAGE" },
    AvatarInfo { id: "ranger_1", name: "Ranger", row: 4, class_key: "RANGER" },
    AvatarInfo { id: "ranger_2", name: "Hunter", row: 5, class_key: "RANGER" },
    AvatarInfo { id: "rogue_1", name: "Assassin", row: 6, class_key: "ROGUE" },
    AvatarInfo { id: "cleric_1", name: "Cleric", row: 7, class_key: "CLERIC" },
];

pub fn find_avatar(id: Option<&str>) -> Option<&'static AvatarInfo> {
    let id = id?;
    AVATARS.iter().find(|avatar| avatar.id == id)
}

/// Badge colour for a character class, as RGB.
pub fn class_color(class_key: &str) -> Option<[u8; 3]> {
    match class_key {
        "WARRIOR" => Some([0xe7, 0x4c, 0x3c]),
        "ROGUE" => Some([0x9b, 0x59, 0xb6]),
        "MAGE" => Some([0x34, 0x98, 0xdb]),
        "CLERIC" => Some([0x2e, 0xcc, 0x71]),
        "RANGER" => Some([0xf3, 0x9c, 0x12]),
        _ => None,
    }
}

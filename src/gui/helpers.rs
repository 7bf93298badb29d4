use eframe::egui::Color32;

use crate::models::{AnimationState, LogEventKind};
use crate::models::sprite::class_color;
use crate::playback::RevealedLine;

pub const GOLD: Color32 = Color32::from_rgb(0xf1, 0xc4, 0x0f);
pub const DANGER: Color32 = Color32::from_rgb(0xe7, 0x4c, 0x3c);

/// HP bar colour: green above half, orange above a quarter, red below.
pub fn hp_bar_color(fraction: f32) -> Color32 {
    if fraction > 0.5 {
        Color32::from_rgb(0x2e, 0xcc, 0x71)
    } else if fraction > 0.25 {
        Color32::from_rgb(0xf3, 0x9c, 0x12)
    } else {
        DANGER
    }
}

pub fn class_badge_color(class_key: &str) -> Color32 {
    class_color(class_key).map_or(Color32::GRAY, |[r, g, b]| Color32::from_rgb(r, g, b))
}

pub fn pose_color(animation: AnimationState) -> Color32 {
    match animation {
        AnimationState::Idle | AnimationState::Walk => Color32::LIGHT_GRAY,
        AnimationState::Attack => Color32::from_rgb(0xe6, 0x7e, 0x22),
        AnimationState::Hit => DANGER,
        AnimationState::Death => Color32::DARK_GRAY,
    }
}

/// Get color for a revealed log line based on its kind and wording
pub fn line_color(line: &RevealedLine) -> Color32 {
    match line.kind {
        LogEventKind::VictoryDeclaration => GOLD,
        LogEventKind::RoundMarker => Color32::from_rgb(0x9b, 0x59, 0xb6),
        LogEventKind::Defeat => DANGER,
        LogEventKind::Revival => Color32::from_rgb(0x2e, 0xcc, 0x71),
        LogEventKind::AttackHit => {
            let lower = line.text.to_lowercase();
            if lower.contains("critical") || lower.contains("크리티컬") {
                Color32::from_rgb(0xe6, 0x7e, 0x22)
            } else {
                Color32::from_rgb(0xee, 0xee, 0xee)
            }
        }
        LogEventKind::AttackMiss => Color32::GRAY,
        LogEventKind::StatusOrOther => {
            // Consumable lines
            if line.text.contains("used!") || line.text.contains("발동!") {
                Color32::from_rgb(0x1a, 0xbc, 0x9c)
            } else {
                Color32::from_rgb(0xcc, 0xcc, 0xcc)
            }
        }
    }
}

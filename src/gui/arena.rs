use eframe::egui::{self, Align2, FontId, RichText, Vec2};

use crate::gui::helpers::{DANGER, GOLD, class_badge_color, hp_bar_color, pose_color};
use crate::models::sprite::find_avatar;
use crate::models::{ActorPlaybackState, CombatantInfo, SpriteSheet};
use crate::playback::PlaybackState;

/// Which way a sprite looks. The defender is mirrored to face the attacker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facing {
    Left,
    Right,
}

pub fn show_fighter(
    ui: &mut egui::Ui,
    combatant: &CombatantInfo,
    actor: &ActorPlaybackState,
    sheet: &SpriteSheet,
    facing: Facing,
) {
    ui.vertical_centered(|ui| {
        draw_sprite_cell(ui, combatant, actor, sheet, facing);

        ui.label(RichText::new(&combatant.name).size(15.0).strong());
        if let Some(class) = &combatant.class {
            ui.label(RichText::new(class).small().color(class_badge_color(class)));
        }

        let fraction = actor.hp_fraction();
        ui.add(
            egui::ProgressBar::new(fraction)
                .fill(hp_bar_color(fraction))
                .desired_width(150.0),
        );
        ui.label(format!("{}/{}", actor.displayed_hp, actor.max_hp));

        for potion in &combatant.potions {
            let text = RichText::new(format!("{} x{}", potion.name, potion.quantity)).small();
            if actor.used_consumables.contains(&potion.name) {
                ui.label(text.strikethrough().weak());
            } else {
                ui.label(text);
            }
        }
    });
}

/// Draws the actor's current sprite cell: pose, frame and sheet coordinates.
fn draw_sprite_cell(
    ui: &mut egui::Ui,
    combatant: &CombatantInfo,
    actor: &ActorPlaybackState,
    sheet: &SpriteSheet,
    facing: Facing,
) {
    let size = Vec2::new(sheet.cell_width as f32, sheet.cell_height as f32);
    let rect = ui.allocate_space(size).1;
    let painter = ui.painter();
    painter.rect_filled(rect, 4.0, egui::Color32::from_gray(30));

    let spec = sheet.spec(actor.animation);
    let frame = actor.frame.min(spec.last_frame());
    let avatar = find_avatar(combatant.avatar.as_deref());

    if let Some(avatar) = avatar {
        painter.text(
            rect.center_top() + Vec2::new(0.0, 4.0),
            Align2::CENTER_TOP,
            avatar.name,
            FontId::proportional(10.0),
            egui::Color32::LIGHT_GRAY,
        );
    }

    let glyph = match facing {
        Facing::Right => "▶",
        Facing::Left => "◀",
    };
    painter.text(
        rect.center() - Vec2::new(0.0, 8.0),
        Align2::CENTER_CENTER,
        glyph,
        FontId::proportional(26.0),
        pose_color(actor.animation),
    );
    painter.text(
        rect.center() + Vec2::new(0.0, 20.0),
        Align2::CENTER_CENTER,
        format!("{} {}/{}", actor.animation.label(), frame + 1, spec.frames),
        FontId::proportional(11.0),
        egui::Color32::GRAY,
    );
    painter.text(
        rect.left_bottom() + Vec2::new(4.0, -2.0),
        Align2::LEFT_BOTTOM,
        format!("r{} c{}", avatar.map_or(0, |a| a.row), spec.start_col + frame),
        FontId::monospace(9.0),
        egui::Color32::DARK_GRAY,
    );
}

pub fn show_result_banner(ui: &mut egui::Ui, state: &PlaybackState) {
    ui.vertical_centered(|ui| {
        if let Some(issue) = &state.issue {
            ui.label(RichText::new(format!("⚠ {}", issue)).color(DANGER));
            return;
        }
        let Some(winner) = state.winner_name() else {
            return;
        };
        ui.label(RichText::new(format!("🏆 {} wins!", winner)).size(20.0).strong().color(GOLD));
        if let Some(result) = &state.result {
            ui.label(RichText::new(format!("+{} gold", result.gold_reward)).color(GOLD));
        }
    });
}

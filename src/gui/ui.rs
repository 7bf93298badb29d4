use eframe::egui::{self, RichText};

use crate::gui::app::{REPAINT_INTERVAL, ReplayApp};
use crate::gui::arena::{Facing, show_fighter, show_result_banner};
use crate::gui::helpers::DANGER;
use crate::gui::log_panel::show_log_panel;
use crate::models::Side;
use crate::playback::{PlaybackState, PlaybackStatus};

impl ReplayApp {
    fn show_header(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("⚔ Battle Replay").size(16.0));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add(egui::Button::new(RichText::new("✕").size(12.0))
                    .min_size(egui::Vec2::new(25.0, 25.0))).clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }

                ui.add_space(10.0);

                // Font size decrease button (smaller A)
                if ui.add(egui::Button::new(RichText::new("A").size(8.0))
                    .min_size(egui::Vec2::new(18.0, 18.0))).clicked() {
                    self.text_scale = (self.text_scale - 0.1).max(0.5);
                    ctx.set_zoom_factor(self.text_scale);
                }

                // Font size increase button (large A)
                if ui.add(egui::Button::new(RichText::new("A").size(16.0))
                    .min_size(egui::Vec2::new(20.0, 20.0))).clicked() {
                    self.text_scale = (self.text_scale + 0.1).min(2.0);
                    ctx.set_zoom_factor(self.text_scale);
                }
            });
        });
    }

    fn show_battle(&self, ui: &mut egui::Ui, state: &PlaybackState) {
        if let (Some(result), Some(stage)) = (&state.result, &state.stage) {
            ui.columns(3, |columns| {
                show_fighter(
                    &mut columns[0],
                    result.combatant(Side::Attacker),
                    stage.actor(Side::Attacker),
                    &self.sheet,
                    Facing::Right,
                );
                columns[1].vertical_centered(|ui| {
                    ui.add_space(40.0);
                    ui.label(RichText::new("VS").size(22.0).strong());
                });
                show_fighter(
                    &mut columns[2],
                    result.combatant(Side::Defender),
                    stage.actor(Side::Defender),
                    &self.sheet,
                    Facing::Left,
                );
            });
        }

        ui.separator();
        if state.finished {
            show_result_banner(ui, state);
            ui.separator();
        }
        show_log_panel(ui, &state.revealed_lines, state.finished);
    }
}

fn show_requesting(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.spinner();
        ui.label("Requesting combat result...");
    });
}

/// A failed request shows only the error and a way out; no log is drawn.
fn show_failure(ui: &mut egui::Ui, ctx: &egui::Context, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(RichText::new("The battle could not be started").size(18.0).color(DANGER));
        ui.label(message);
        ui.add_space(12.0);
        if ui.button("Close").clicked() {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

impl eframe::App for ReplayApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = self.snapshot();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.set_min_size(egui::Vec2::new(360.0, 280.0));
            self.show_header(ui, ctx);
            ui.separator();

            match &state.status {
                PlaybackStatus::Requesting => show_requesting(ui),
                PlaybackStatus::Failed(message) => show_failure(ui, ctx, message),
                PlaybackStatus::Playing | PlaybackStatus::Finished => self.show_battle(ui, &state),
            }
        });

        // Frames advance on the engine thread, so keep polling the snapshot
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }

    /// Keep window background opaque and visible.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let color = visuals.panel_fill;
        [
            color.r() as f32 / 255.0,
            color.g() as f32 / 255.0,
            color.b() as f32 / 255.0,
            color.a() as f32 / 255.0
        ]
    }
}

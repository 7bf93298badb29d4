use eframe::egui::{self, RichText};

use crate::gui::helpers::line_color;
use crate::models::LogEventKind;
use crate::playback::RevealedLine;

/// Revealed battle log, newest line kept in view.
pub fn show_log_panel(ui: &mut egui::Ui, lines: &[RevealedLine], finished: bool) {
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .stick_to_bottom(true)
        .show(ui, |ui| {
            if lines.is_empty() {
                ui.label(RichText::new("The combatants size each other up...").weak());
            }

            for line in lines {
                let text = RichText::new(&line.text).color(line_color(line));
                let text = match line.kind {
                    LogEventKind::RoundMarker | LogEventKind::VictoryDeclaration => text.strong(),
                    _ => text,
                };
                ui.label(text);
            }

            if !finished && !lines.is_empty() {
                ui.label(RichText::new("...").weak());
            }
        });
}

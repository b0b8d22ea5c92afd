use bevy_egui::egui::{self, Align2, Color32, FontId, RichText};

use crate::domain::round::Scoreboard;

pub fn show_scoreboard(ctx: &egui::Context, scores: &Scoreboard) {
    egui::Area::new("scoreboard".into())
        .anchor(Align2::CENTER_TOP, egui::vec2(0.0, 16.0))
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(format!("You  {}  :  {}  Computer", scores.user, scores.computer))
                        .font(FontId::proportional(32.0))
                        .color(Color32::WHITE),
                );
                ui.label(
                    RichText::new(format!("Draws: {}", scores.draws))
                        .font(FontId::proportional(16.0))
                        .color(Color32::LIGHT_GRAY),
                );
            });
        });
}

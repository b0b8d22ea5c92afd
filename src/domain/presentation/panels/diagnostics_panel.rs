use bevy::diagnostic::{
    DiagnosticsStore, EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin,
};
use bevy_egui::egui;

use crate::domain::round::{Phase, Session};
use crate::domain::rules::Choice;
use crate::domain::settings::GameSettings;

pub fn show_diagnostics_panel(
    ctx: &egui::Context,
    diagnostics: &DiagnosticsStore,
    settings: &GameSettings,
    session: Option<&Session>,
    on_stage: &[Choice],
) {
    if settings.show_diagnostics {
        egui::Window::new("Diagnostics").show(ctx, |ui| {
            if let Some(fps) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) {
                if let Some(value) = fps.smoothed() {
                    ui.label(format!("FPS: {:.1}", value));
                }
            }
            if let Some(entity_count) = diagnostics.get(&EntityCountDiagnosticsPlugin::ENTITY_COUNT)
            {
                if let Some(value) = entity_count.value() {
                    ui.label(format!("Entities: {}", value));
                }
            }
            if let Some(session) = session {
                let phase = match session.phase() {
                    Phase::Idle => "idle",
                    Phase::AwaitingComputer => "awaiting computer",
                    Phase::Resolved => "resolved",
                };
                ui.label(format!("Round: {phase}"));
                ui.label(format!("Rounds played: {}", session.scores().rounds()));
            }
            let shown: Vec<_> = on_stage.iter().map(|choice| choice.label()).collect();
            if shown.is_empty() {
                ui.label("On stage: none");
            } else {
                ui.label(format!("On stage: {}", shown.join(", ")));
            }
        });
    }
}

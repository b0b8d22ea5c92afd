use bevy_egui::egui::{self, Align2, FontId, RichText};

use crate::domain::rules::Choice;
use crate::domain::settings::GameSettings;

/// What the player clicked this frame.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlsInput {
    pub choice: Option<Choice>,
    pub reset: bool,
}

pub fn show_controls_panel(
    ctx: &egui::Context,
    highlighted: Option<Choice>,
    settings: &mut GameSettings,
) -> ControlsInput {
    let mut input = ControlsInput::default();
    egui::Area::new("controls_panel".into())
        .anchor(Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                for choice in Choice::ALL {
                    let label = RichText::new(choice.label()).font(FontId::proportional(24.0));
                    let button = egui::Button::new(label)
                        .selected(highlighted == Some(choice))
                        .min_size(egui::vec2(140.0, 48.0));
                    if ui.add(button).clicked() {
                        input.choice = Some(choice);
                    }
                }

                ui.separator();

                if ui.button("Reset").clicked() {
                    input.reset = true;
                }
                let sound = if settings.sound_enabled { "Sound: ON" } else { "Sound: OFF" };
                if ui.button(sound).clicked() {
                    settings.sound_enabled = !settings.sound_enabled;
                }
            });
        });
    input
}

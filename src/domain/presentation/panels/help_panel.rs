use bevy_egui::egui;

use crate::domain::controls::Keybinds;
use crate::domain::settings::GameSettings;

pub fn show_help_panel(ctx: &egui::Context, settings: &GameSettings, keybinds: &Keybinds) {
    if settings.show_help {
        egui::Window::new("Help").show(ctx, |ui| {
            ui.label(format!(
                "{:?} / {:?} / {:?}: Rock / Paper / Scissors",
                keybinds.rock, keybinds.paper, keybinds.scissors
            ));
            ui.label(format!("{:?}: New game", keybinds.reset));
            ui.label(format!("{:?}: Toggle sound", keybinds.sound));
            ui.label(format!("{:?}: Toggle help", keybinds.help));
            ui.label(format!("{:?}: Settings", keybinds.settings));
            ui.label(format!("{:?}: Diagnostics", keybinds.diagnostics));
            ui.label("Gamepad: West / North / East to play, Start for a new game");
        });
    }
}

use bevy::prelude::KeyCode;
use bevy_egui::egui;

use crate::domain::controls::{BindAction, Keybinds};
use crate::domain::settings::GameSettings;

pub fn show_settings_panel(
    ctx: &egui::Context,
    settings: &mut GameSettings,
    keybinds: &mut Keybinds,
    rebinding: &mut Option<BindAction>,
) {
    if !settings.show_settings {
        *rebinding = None;
        return;
    }

    let mut pressed_key = None;
    ctx.input(|i| {
        for event in &i.events {
            if let egui::Event::Key {
                key,
                pressed: true,
                ..
            } = event
            {
                pressed_key = Some(*key);
            }
        }
    });

    egui::Window::new("Settings").show(ctx, |ui| {
        ui.label("Round pacing");
        ui.add(
            egui::Slider::new(&mut settings.computer_delay_ms, 0..=5000)
                .text("Computer delay (ms)"),
        );
        ui.add(egui::Slider::new(&mut settings.cooldown_ms, 0..=10_000).text("Cooldown (ms)"));

        ui.separator();

        ui.label("Animation");
        ui.add(egui::Slider::new(&mut settings.entrance_secs, 0.1..=3.0).text("Entrance (s)"));
        ui.add(egui::Slider::new(&mut settings.victory_secs, 0.1..=3.0).text("Victory (s)"));
        ui.add(egui::Slider::new(&mut settings.camera_secs, 0.1..=3.0).text("Camera (s)"));

        ui.separator();

        ui.checkbox(&mut settings.sound_enabled, "Sound");
        ui.checkbox(&mut settings.show_help, "Help");
        ui.checkbox(&mut settings.show_diagnostics, "Diagnostics");

        ui.separator();

        let opponent = &settings.opponent;
        let label = if !opponent.script.is_empty() {
            format!("Opponent: scripted ({} moves)", opponent.script.len())
        } else if let Some(seed) = opponent.seed {
            format!("Opponent: random, seed {seed}")
        } else {
            "Opponent: random".to_string()
        };
        ui.label(label);

        ui.separator();

        ui.label("Keybinds");
        for action in BindAction::ALL {
            ui.horizontal(|ui| {
                ui.label(action.label());
                let button_text = if *rebinding == Some(action) {
                    "Press a key...".to_string()
                } else {
                    format!("{:?}", keybinds.key(action))
                };
                if ui.button(button_text).clicked() {
                    *rebinding = Some(action);
                }
            });
        }
    });

    if let Some(action) = *rebinding {
        match pressed_key {
            Some(egui::Key::Escape) => *rebinding = None,
            Some(key) => {
                if let Some(key_code) = egui_to_bevy_keycode(key) {
                    keybinds.rebind(action, key_code);
                    *rebinding = None;
                }
            }
            None => {}
        }
    }
}

/// Keys offered for rebinding. Anything else keeps the prompt open.
fn egui_to_bevy_keycode(key: egui::Key) -> Option<KeyCode> {
    let code = match key {
        egui::Key::A => KeyCode::KeyA,
        egui::Key::B => KeyCode::KeyB,
        egui::Key::C => KeyCode::KeyC,
        egui::Key::D => KeyCode::KeyD,
        egui::Key::E => KeyCode::KeyE,
        egui::Key::F => KeyCode::KeyF,
        egui::Key::G => KeyCode::KeyG,
        egui::Key::I => KeyCode::KeyI,
        egui::Key::J => KeyCode::KeyJ,
        egui::Key::K => KeyCode::KeyK,
        egui::Key::L => KeyCode::KeyL,
        egui::Key::M => KeyCode::KeyM,
        egui::Key::N => KeyCode::KeyN,
        egui::Key::O => KeyCode::KeyO,
        egui::Key::P => KeyCode::KeyP,
        egui::Key::Q => KeyCode::KeyQ,
        egui::Key::R => KeyCode::KeyR,
        egui::Key::S => KeyCode::KeyS,
        egui::Key::T => KeyCode::KeyT,
        egui::Key::U => KeyCode::KeyU,
        egui::Key::V => KeyCode::KeyV,
        egui::Key::W => KeyCode::KeyW,
        egui::Key::X => KeyCode::KeyX,
        egui::Key::Y => KeyCode::KeyY,
        egui::Key::Z => KeyCode::KeyZ,
        egui::Key::Num0 => KeyCode::Digit0,
        egui::Key::Num1 => KeyCode::Digit1,
        egui::Key::Num2 => KeyCode::Digit2,
        egui::Key::Num3 => KeyCode::Digit3,
        egui::Key::Num4 => KeyCode::Digit4,
        egui::Key::Num5 => KeyCode::Digit5,
        egui::Key::Num6 => KeyCode::Digit6,
        egui::Key::Num7 => KeyCode::Digit7,
        egui::Key::Num8 => KeyCode::Digit8,
        egui::Key::Num9 => KeyCode::Digit9,
        egui::Key::ArrowUp => KeyCode::ArrowUp,
        egui::Key::ArrowDown => KeyCode::ArrowDown,
        egui::Key::ArrowLeft => KeyCode::ArrowLeft,
        egui::Key::ArrowRight => KeyCode::ArrowRight,
        egui::Key::Space => KeyCode::Space,
        egui::Key::Enter => KeyCode::Enter,
        // H, F2 and F3 stay on the window toggles
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_translate() {
        assert_eq!(egui_to_bevy_keycode(egui::Key::R), Some(KeyCode::KeyR));
        assert_eq!(egui_to_bevy_keycode(egui::Key::Num7), Some(KeyCode::Digit7));
    }

    #[test]
    fn window_toggle_keys_are_not_offered() {
        assert_eq!(egui_to_bevy_keycode(egui::Key::H), None);
        assert_eq!(egui_to_bevy_keycode(egui::Key::F2), None);
        assert_eq!(egui_to_bevy_keycode(egui::Key::Escape), None);
    }
}

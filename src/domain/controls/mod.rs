use bevy::input::gamepad::{GamepadConnection, GamepadEvent};
use bevy::prelude::*;

use crate::domain::round::{ChoiceRequested, ResetRequested, RoundSystems};
use crate::domain::rules::Choice;
use crate::domain::settings::GameSettings;

#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Keybinds {
    pub rock: KeyCode,
    pub paper: KeyCode,
    pub scissors: KeyCode,
    pub reset: KeyCode,
    pub sound: KeyCode,
    pub help: KeyCode,
    pub settings: KeyCode,
    pub diagnostics: KeyCode,
}

impl Default for Keybinds {
    fn default() -> Self {
        Self {
            rock: KeyCode::Digit1,
            paper: KeyCode::Digit2,
            scissors: KeyCode::Digit3,
            reset: KeyCode::KeyN,
            sound: KeyCode::KeyM,
            help: KeyCode::KeyH,
            settings: KeyCode::F2,
            diagnostics: KeyCode::F3,
        }
    }
}

/// Actions that can be rebound from the settings window.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BindAction {
    Rock,
    Paper,
    Scissors,
    Reset,
    Sound,
}

impl BindAction {
    pub const ALL: [BindAction; 5] = [
        BindAction::Rock,
        BindAction::Paper,
        BindAction::Scissors,
        BindAction::Reset,
        BindAction::Sound,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BindAction::Rock => "Rock",
            BindAction::Paper => "Paper",
            BindAction::Scissors => "Scissors",
            BindAction::Reset => "New game",
            BindAction::Sound => "Sound",
        }
    }
}

impl Keybinds {
    pub fn key(&self, action: BindAction) -> KeyCode {
        match action {
            BindAction::Rock => self.rock,
            BindAction::Paper => self.paper,
            BindAction::Scissors => self.scissors,
            BindAction::Reset => self.reset,
            BindAction::Sound => self.sound,
        }
    }

    /// Binds `key` to `action`. An action already on `key` takes over the
    /// old key, so one key never triggers two actions.
    pub fn rebind(&mut self, action: BindAction, key: KeyCode) {
        let old = self.key(action);
        for other in BindAction::ALL {
            if other != action && self.key(other) == key {
                *self.key_mut(other) = old;
            }
        }
        *self.key_mut(action) = key;
    }

    fn key_mut(&mut self, action: BindAction) -> &mut KeyCode {
        match action {
            BindAction::Rock => &mut self.rock,
            BindAction::Paper => &mut self.paper,
            BindAction::Scissors => &mut self.scissors,
            BindAction::Reset => &mut self.reset,
            BindAction::Sound => &mut self.sound,
        }
    }

    pub fn choice_for(&self, key: KeyCode) -> Option<Choice> {
        if key == self.rock {
            Some(Choice::Rock)
        } else if key == self.paper {
            Some(Choice::Paper)
        } else if key == self.scissors {
            Some(Choice::Scissors)
        } else {
            None
        }
    }
}

#[derive(Resource)]
struct MyGamepad(Gamepad);

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Keybinds>().add_systems(
            Update,
            (
                gamepad_connections,
                keyboard_choices,
                gamepad_choices,
                reset_trigger,
                sound_toggle,
                help_toggle,
                settings_toggle,
                diagnostics_toggle,
            )
                .before(RoundSystems),
        );
    }
}

fn keyboard_choices(
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
    mut ev_choice: EventWriter<ChoiceRequested>,
) {
    for key in keys.get_just_pressed() {
        if let Some(choice) = keybinds.choice_for(*key) {
            ev_choice.send(ChoiceRequested(choice));
        }
    }
}

fn gamepad_choices(
    my_gamepad: Option<Res<MyGamepad>>,
    buttons: Res<ButtonInput<GamepadButton>>,
    mut ev_choice: EventWriter<ChoiceRequested>,
    mut ev_reset: EventWriter<ResetRequested>,
) {
    let Some(MyGamepad(gamepad)) = my_gamepad.as_deref() else {
        return;
    };
    let pressed = |button_type| {
        buttons.just_pressed(GamepadButton {
            gamepad: *gamepad,
            button_type,
        })
    };

    if pressed(GamepadButtonType::West) {
        ev_choice.send(ChoiceRequested(Choice::Rock));
    }
    if pressed(GamepadButtonType::North) {
        ev_choice.send(ChoiceRequested(Choice::Paper));
    }
    if pressed(GamepadButtonType::East) {
        ev_choice.send(ChoiceRequested(Choice::Scissors));
    }
    if pressed(GamepadButtonType::Start) {
        ev_reset.send(ResetRequested);
    }
}

fn reset_trigger(
    mut ev_reset: EventWriter<ResetRequested>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if keys.just_pressed(keybinds.reset) {
        ev_reset.send(ResetRequested);
    }
}

fn sound_toggle(
    mut settings: ResMut<GameSettings>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if keys.just_pressed(keybinds.sound) {
        settings.sound_enabled = !settings.sound_enabled;
    }
}

fn help_toggle(
    mut settings: ResMut<GameSettings>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if keys.just_pressed(keybinds.help) {
        settings.show_help = !settings.show_help;
    }
}

fn settings_toggle(
    mut settings: ResMut<GameSettings>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if keys.just_pressed(keybinds.settings) {
        settings.show_settings = !settings.show_settings;
    }
}

fn diagnostics_toggle(
    mut settings: ResMut<GameSettings>,
    keys: Res<ButtonInput<KeyCode>>,
    keybinds: Res<Keybinds>,
) {
    if keys.just_pressed(keybinds.diagnostics) {
        settings.show_diagnostics = !settings.show_diagnostics;
    }
}

fn gamepad_connections(
    mut commands: Commands,
    my_gamepad: Option<Res<MyGamepad>>,
    mut evr_gamepad: EventReader<GamepadEvent>,
) {
    for ev in evr_gamepad.read() {
        let GamepadEvent::Connection(ev_conn) = ev else {
            continue;
        };
        match &ev_conn.connection {
            GamepadConnection::Connected(info) => {
                debug!(
                    "gamepad connected: {:?}, name: {}",
                    ev_conn.gamepad, info.name,
                );
                if my_gamepad.is_none() {
                    commands.insert_resource(MyGamepad(ev_conn.gamepad));
                }
            }
            GamepadConnection::Disconnected => {
                debug!("gamepad disconnected: {:?}", ev_conn.gamepad);
                if let Some(MyGamepad(old_id)) = my_gamepad.as_deref() {
                    if *old_id == ev_conn.gamepad {
                        commands.remove_resource::<MyGamepad>();
                    }
                }
            }
        }
    }
}

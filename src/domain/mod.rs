//! Domain modules split by discipline.
//! - `rules`: choices, outcomes and slots.
//! - `round`: the session state machine that paces a round.
//! - `animation`: easing curves and the tween runner.
//! - `scene`: 3D presentation of choices, camera and fanfare.
//! - `audio`: synthesised cues and background loop.
//! - `controls`: keyboard and gamepad input.
//! - `presentation`: HUD panels.
//! - `settings`: tunables and environment overrides.

pub mod animation;
pub mod audio;
pub mod controls;
pub mod presentation;
pub mod round;
pub mod rules;
pub mod scene;
pub mod settings;

pub use audio::SoundPlugin;
pub use controls::InputPlugin;
pub use presentation::UiPlugin;
pub use round::RoundPlugin;
pub use scene::ScenePlugin;
pub use settings::GameSettings;

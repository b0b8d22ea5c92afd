mod domain;

use bevy::diagnostic::{EntityCountDiagnosticsPlugin, FrameTimeDiagnosticsPlugin};
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use domain::{GameSettings, InputPlugin, RoundPlugin, ScenePlugin, SoundPlugin, UiPlugin};

fn main() {
    App::new()
        .insert_resource(ClearColor(Color::srgb_u8(0x12, 0x08, 0x2d)))
        .insert_resource(Msaa::Sample4)
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(EntityCountDiagnosticsPlugin)
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Rock Paper Scissors 3D".into(),
                        resolution: (1280., 800.).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    level: Level::INFO,
                    filter: "wgpu=error,naga=warn,rps3d=debug".into(),
                    ..default()
                }),
        )
        // after DefaultPlugins so LogPlugin is up to report bad overrides
        .insert_resource(GameSettings::from_env())
        .add_plugins((RoundPlugin, ScenePlugin, SoundPlugin, InputPlugin, UiPlugin))
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(domain::scene::DEFAULT_CAMERA)
                .looking_at(Vec3::ZERO, Vec3::Y),
            ..default()
        },
        MainCamera,
    ));
}

#[derive(Component)]
pub struct MainCamera;

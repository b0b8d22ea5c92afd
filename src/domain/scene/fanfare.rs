use bevy::prelude::*;
use rand::Rng;

use super::SceneRequest;

const CONFETTI_COUNT: usize = 80;
const CONFETTI_LIFESPAN: f32 = 2.0;
const GRAVITY: f32 = -6.0;
const TINT_SECONDS: f32 = 1.2;

/// Gold flash over the whole screen after a win, drawn by the HUD.
#[derive(Resource, Default)]
pub struct ScreenTint {
    timer: Option<Timer>,
}

impl ScreenTint {
    pub fn flash(&mut self) {
        self.timer = Some(Timer::from_seconds(TINT_SECONDS, TimerMode::Once));
    }

    pub fn tick(&mut self, delta: std::time::Duration) {
        if let Some(timer) = &mut self.timer {
            timer.tick(delta);
            if timer.finished() {
                self.timer = None;
            }
        }
    }

    /// Opacity in [0, 1], fading out over the flash.
    pub fn alpha(&self) -> f32 {
        self.timer
            .as_ref()
            .map(|timer| 1.0 - timer.fraction())
            .unwrap_or(0.0)
    }
}

#[derive(Component, Debug, Clone)]
pub struct Confetti {
    vel: Vec3,
    spin: f32,
    lifespan: f32,
}

impl Confetti {
    /// Integrates one frame. Returns false once the piece has expired.
    pub fn step(&mut self, transform: &mut Transform, dt: f32) -> bool {
        self.lifespan -= dt;
        if self.lifespan <= 0.0 {
            return false;
        }
        self.vel.y += GRAVITY * dt;
        transform.translation += self.vel * dt;
        transform.rotate_x(self.spin * dt);
        transform.scale = Vec3::splat((self.lifespan / CONFETTI_LIFESPAN).clamp(0.0, 1.0));
        true
    }
}

#[derive(Resource)]
pub struct ConfettiAssets {
    mesh: Handle<Mesh>,
    palette: Vec<Handle<StandardMaterial>>,
}

impl ConfettiAssets {
    pub fn new(meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) -> Self {
        let palette = [
            Color::srgb(1.0, 0.84, 0.0),
            Color::srgb(0.42, 0.26, 0.96),
            Color::srgb(0.96, 0.26, 0.6),
            Color::srgb(0.26, 0.86, 0.96),
            Color::srgb(0.4, 0.96, 0.4),
        ]
        .into_iter()
        .map(|color| {
            materials.add(StandardMaterial {
                base_color: color,
                emissive: color.to_linear() * 0.5,
                unlit: true,
                ..default()
            })
        })
        .collect();

        Self {
            mesh: meshes.add(Cuboid::new(0.06, 0.06, 0.02)),
            palette,
        }
    }
}

pub fn start_fanfare(
    mut commands: Commands,
    mut requests: EventReader<SceneRequest>,
    assets: Option<Res<ConfettiAssets>>,
    mut tint: ResMut<ScreenTint>,
) {
    for request in requests.read() {
        let SceneRequest::Fanfare(slot) = request else {
            continue;
        };
        tint.flash();

        let Some(assets) = assets.as_deref() else {
            warn!("confetti assets missing, skipping burst");
            continue;
        };
        let origin = Vec3::new(slot.anchor_x(), 1.0, 0.0);
        let mut rng = rand::thread_rng();
        for i in 0..CONFETTI_COUNT {
            let vel = Vec3::new(
                rng.gen_range(-2.0..2.0),
                rng.gen_range(2.0..5.0),
                rng.gen_range(-1.0..1.5),
            );
            commands.spawn((
                PbrBundle {
                    mesh: assets.mesh.clone(),
                    material: assets.palette[i % assets.palette.len()].clone(),
                    transform: Transform::from_translation(origin),
                    ..default()
                },
                Confetti {
                    vel,
                    spin: rng.gen_range(-12.0..12.0),
                    lifespan: CONFETTI_LIFESPAN * rng.gen_range(0.6..1.0),
                },
            ));
        }
    }
}

pub fn update_confetti(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut Confetti, &mut Transform)>,
) {
    let dt = time.delta_seconds();
    for (entity, mut piece, mut transform) in &mut q {
        if !piece.step(&mut transform, dt) {
            commands.entity(entity).despawn();
        }
    }
}

pub fn fade_tint(time: Res<Time>, mut tint: ResMut<ScreenTint>) {
    if tint.timer.is_some() {
        tint.tick(time.delta());
    }
}

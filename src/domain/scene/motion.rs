use std::f32::consts::PI;

use bevy::prelude::*;

use super::models::ChoiceModel;
use super::{SlotAnchor, DEFAULT_CAMERA};
use crate::domain::animation::{bounce, ease_in_out_quad, lerp, Tween};

/// Height a new model drops from.
pub const DROP_HEIGHT: f32 = 3.0;
const START_SCALE: f32 = 0.1;
const VICTORY_SPIN: f32 = 6.0;
const IDLE_SPIN: f32 = 0.6;

/// Anchor height and uniform scale during the entrance drop.
pub fn entrance_pose(progress: f32) -> (f32, f32) {
    let b = bounce(progress);
    (DROP_HEIGHT * (1.0 - b), lerp(START_SCALE, 1.0, b))
}

/// Anchor height and uniform scale during the victory bob.
pub fn victory_pose(progress: f32) -> (f32, f32) {
    let p = progress.clamp(0.0, 1.0);
    let y = (p * PI * 4.0).sin() * 0.5 * (1.0 - p);
    let scale = 1.0 + 0.2 * (p * PI * 2.0).sin();
    (y, scale)
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MotionKind {
    Entrance,
    Victory,
}

/// The one animation currently driving a slot anchor. Inserting a new one
/// replaces, and so cancels, the previous. A victory requested during an
/// entrance is held until the model has landed.
#[derive(Component, Debug, Clone)]
pub struct SlotMotion {
    pub kind: MotionKind,
    tween: Tween,
    queued_victory: Option<f32>,
}

impl SlotMotion {
    pub fn entrance(seconds: f32) -> Self {
        Self {
            kind: MotionKind::Entrance,
            tween: Tween::from_seconds(seconds),
            queued_victory: None,
        }
    }

    pub fn victory(seconds: f32) -> Self {
        Self {
            kind: MotionKind::Victory,
            tween: Tween::from_seconds(seconds),
            queued_victory: None,
        }
    }

    /// Chains a victory after a running entrance, or restarts a victory.
    pub fn then_victory(&mut self, seconds: f32) {
        match self.kind {
            MotionKind::Entrance if !self.tween.finished() => self.queued_victory = Some(seconds),
            _ => *self = Self::victory(seconds),
        }
    }

    #[cfg(test)]
    pub fn has_queued_victory(&self) -> bool {
        self.queued_victory.is_some()
    }
}

/// Eased camera flight. The latest request replaces any flight in progress.
#[derive(Component, Debug, Clone)]
pub struct CameraMove {
    from: Vec3,
    to: Vec3,
    tween: Tween,
}

impl CameraMove {
    pub fn new(from: Vec3, to: Vec3, seconds: f32) -> Self {
        Self {
            from,
            to,
            tween: Tween::from_seconds(seconds),
        }
    }

    pub fn home(from: Vec3, seconds: f32) -> Self {
        Self::new(from, DEFAULT_CAMERA, seconds)
    }

    #[cfg(test)]
    pub fn target(&self) -> Vec3 {
        self.to
    }
}

pub fn animate_slots(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &SlotAnchor, &mut SlotMotion, &mut Transform)>,
) {
    let dt = time.delta_seconds();
    for (entity, anchor, mut motion, mut transform) in &mut q {
        let progress = motion.tween.advance(time.delta());
        let (y, scale) = match motion.kind {
            MotionKind::Entrance => entrance_pose(progress),
            MotionKind::Victory => {
                transform.rotate_y(VICTORY_SPIN * dt);
                victory_pose(progress)
            }
        };
        transform.translation = Vec3::new(anchor.0.anchor_x(), y, 0.0);
        transform.scale = Vec3::splat(scale);

        if motion.tween.finished() {
            transform.translation.y = 0.0;
            transform.scale = Vec3::ONE;
            match motion.queued_victory.take() {
                Some(seconds) => *motion = SlotMotion::victory(seconds),
                None => {
                    commands.entity(entity).remove::<SlotMotion>();
                }
            }
        }
    }
}

pub fn animate_camera(
    mut commands: Commands,
    time: Res<Time>,
    mut q: Query<(Entity, &mut CameraMove, &mut Transform)>,
) {
    for (entity, mut flight, mut transform) in &mut q {
        let t = ease_in_out_quad(flight.tween.advance(time.delta()));
        transform.translation = flight.from.lerp(flight.to, t);
        transform.look_at(Vec3::ZERO, Vec3::Y);
        if flight.tween.finished() {
            commands.entity(entity).remove::<CameraMove>();
        }
    }
}

pub fn spin_models(time: Res<Time>, mut q: Query<&mut Transform, With<ChoiceModel>>) {
    let dt = time.delta_seconds();
    for mut transform in &mut q {
        transform.rotate_y(IDLE_SPIN * dt);
    }
}

//! 3D presentation: lights, ground, the two slot anchors and the models
//! shown in them. Requests are fire-and-forget; nothing here reports
//! completion back to the round.

mod fanfare;
mod models;
mod motion;

use std::f32::consts::PI;

use bevy::prelude::*;
use bevy::utils::HashMap;

pub use fanfare::ScreenTint;
pub use models::ChoiceModel;

use crate::domain::round::RoundSystems;
use crate::domain::rules::{Choice, Slot};
use crate::domain::settings::GameSettings;
use crate::MainCamera;
use fanfare::ConfettiAssets;
use models::ChoiceModels;
use motion::{CameraMove, SlotMotion, DROP_HEIGHT};

pub const DEFAULT_CAMERA: Vec3 = Vec3::new(0.0, 0.0, 5.0);

#[derive(Event, Clone, Copy, PartialEq, Eq, Debug)]
pub enum SceneRequest {
    /// Replace the slot's model and drop the new one in.
    Present { choice: Choice, slot: Slot },
    /// Victory bob on the slot plus a camera move toward it.
    Celebrate(Slot),
    ResetCamera,
    /// Empty both slots without animation.
    Clear,
    /// Confetti and screen tint for a user win.
    Fanfare(Slot),
}

#[derive(Component, Debug, Clone, Copy)]
pub struct SlotAnchor(pub Slot);

pub struct ScenePlugin;
impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScreenTint>()
            .add_event::<SceneRequest>()
            .add_systems(Startup, setup_scene)
            .add_systems(
                Update,
                (
                    (apply_scene_requests, fanfare::start_fanfare).after(RoundSystems),
                    (
                        motion::animate_slots,
                        motion::animate_camera,
                        motion::spin_models,
                        fanfare::update_confetti,
                        fanfare::fade_tint,
                    )
                        .after(apply_scene_requests),
                ),
            );
    }
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.insert_resource(AmbientLight {
        color: Color::srgb_u8(0x40, 0x40, 0x40),
        brightness: 300.0,
    });
    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 4_000.0,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(5.0, 10.0, 7.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });
    commands.spawn(SpotLightBundle {
        spot_light: SpotLight {
            color: Color::srgb_u8(0x6c, 0x42, 0xf5),
            intensity: 2_000_000.0,
            range: 40.0,
            outer_angle: PI / 6.0,
            inner_angle: PI / 6.0 * 0.7,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(-5.0, 10.0, 7.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            color: Color::srgb_u8(0xaa, 0x42, 0xf5),
            intensity: 400_000.0,
            range: 100.0,
            ..default()
        },
        transform: Transform::from_xyz(0.0, 3.0, 0.0),
        ..default()
    });

    commands.spawn(PbrBundle {
        mesh: meshes.add(Plane3d::default().mesh().size(10.0, 10.0)),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb_u8(0x22, 0x10, 0x52),
            perceptual_roughness: 0.8,
            metallic: 0.2,
            double_sided: true,
            cull_mode: None,
            ..default()
        }),
        transform: Transform::from_xyz(0.0, -1.5, 0.0),
        ..default()
    });

    for slot in Slot::ALL {
        commands.spawn((SpatialBundle::from_transform(rest_pose(slot)), SlotAnchor(slot)));
    }

    commands.insert_resource(ChoiceModels::new(&mut meshes, &mut materials));
    commands.insert_resource(ConfettiAssets::new(&mut meshes, &mut materials));
    debug!("scene ready");
}

fn rest_pose(slot: Slot) -> Transform {
    Transform::from_xyz(slot.anchor_x(), 0.0, 0.0)
}

fn apply_scene_requests(
    mut commands: Commands,
    mut requests: EventReader<SceneRequest>,
    mut anchors: Query<
        (Entity, &SlotAnchor, &mut Transform, Option<&mut SlotMotion>),
        Without<MainCamera>,
    >,
    camera: Query<(Entity, &Transform), (With<MainCamera>, Without<SlotAnchor>)>,
    models: Option<Res<ChoiceModels>>,
    settings: Res<GameSettings>,
) {
    // Motions started this frame, inserted once all requests are read so a
    // celebrate can chain onto an entrance that is not applied yet.
    let mut started: HashMap<Entity, SlotMotion> = HashMap::new();

    for request in requests.read() {
        match *request {
            SceneRequest::Present { choice, slot } => {
                let Some(models) = models.as_deref() else {
                    warn!("models not loaded, cannot present {choice}");
                    continue;
                };
                let Some((entity, _, mut transform, _)) =
                    anchors.iter_mut().find(|(_, anchor, _, _)| anchor.0 == slot)
                else {
                    continue;
                };
                *transform = Transform::from_xyz(slot.anchor_x(), DROP_HEIGHT, 0.0)
                    .with_scale(Vec3::splat(0.1));
                started.insert(entity, SlotMotion::entrance(settings.entrance_secs));
                commands
                    .entity(entity)
                    .despawn_descendants()
                    .with_children(|parent| models.spawn(parent, choice));
            }
            SceneRequest::Celebrate(slot) => {
                if let Some((entity, _, _, running)) =
                    anchors.iter_mut().find(|(_, anchor, _, _)| anchor.0 == slot)
                {
                    let seconds = settings.victory_secs;
                    if let Some(motion) = started.get_mut(&entity) {
                        motion.then_victory(seconds);
                    } else if let Some(mut motion) = running {
                        motion.then_victory(seconds);
                    } else {
                        started.insert(entity, SlotMotion::victory(seconds));
                    }
                }
                if let Ok((entity, transform)) = camera.get_single() {
                    commands.entity(entity).insert(CameraMove::new(
                        transform.translation,
                        slot.camera_focus(),
                        settings.camera_secs,
                    ));
                }
            }
            SceneRequest::ResetCamera => {
                if let Ok((entity, transform)) = camera.get_single() {
                    commands
                        .entity(entity)
                        .insert(CameraMove::home(transform.translation, settings.camera_secs));
                }
            }
            SceneRequest::Clear => {
                started.clear();
                for (entity, anchor, mut transform, _) in &mut anchors {
                    *transform = rest_pose(anchor.0);
                    commands
                        .entity(entity)
                        .despawn_descendants()
                        .remove::<SlotMotion>();
                }
            }
            SceneRequest::Fanfare(_) => {}
        }
    }

    for (entity, motion) in started {
        commands.entity(entity).insert(motion);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    use super::motion::MotionKind;

    fn scene_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
            .init_resource::<GameSettings>()
            .add_event::<SceneRequest>()
            .add_systems(
                Update,
                (
                    apply_scene_requests,
                    (motion::animate_slots, motion::animate_camera),
                )
                    .chain(),
            );
        for slot in Slot::ALL {
            app.world_mut()
                .spawn((SpatialBundle::from_transform(rest_pose(slot)), SlotAnchor(slot)));
        }
        app.world_mut().spawn((
            SpatialBundle::from_transform(
                Transform::from_translation(DEFAULT_CAMERA).looking_at(Vec3::ZERO, Vec3::Y),
            ),
            MainCamera,
        ));
        app.update();
        app
    }

    fn camera_position(app: &mut App) -> Vec3 {
        let mut q = app
            .world_mut()
            .query_filtered::<&Transform, With<MainCamera>>();
        q.single(app.world()).translation
    }

    fn with_models(mut app: App) -> App {
        let models = ChoiceModels::new(&mut Assets::default(), &mut Assets::default());
        app.world_mut().insert_resource(models);
        app
    }

    fn motion_kind(app: &mut App, slot: Slot) -> Option<MotionKind> {
        let mut q = app
            .world_mut()
            .query::<(&SlotAnchor, Option<&SlotMotion>)>();
        q.iter(app.world())
            .find(|(a, _)| a.0 == slot)
            .and_then(|(_, m)| m.map(|m| m.kind))
    }

    fn shown_models(app: &mut App) -> Vec<Choice> {
        let mut q = app.world_mut().query::<(&ChoiceModel, &Parent)>();
        q.iter(app.world()).map(|(model, _)| model.0).collect()
    }

    fn anchor(app: &mut App, slot: Slot) -> (Transform, bool) {
        let mut q = app
            .world_mut()
            .query::<(&SlotAnchor, &Transform, Option<&SlotMotion>)>();
        q.iter(app.world())
            .find(|(a, _, _)| a.0 == slot)
            .map(|(_, t, m)| (*t, m.is_some()))
            .expect("anchor spawned")
    }

    fn frames(app: &mut App, n: usize) {
        for _ in 0..n {
            app.update();
        }
    }

    #[test]
    fn celebrate_flies_camera_to_the_winner_and_back() {
        let mut app = scene_app();
        app.world_mut()
            .send_event(SceneRequest::Celebrate(Slot::Computer));
        frames(&mut app, 14);
        assert!(camera_position(&mut app).distance(Slot::Computer.camera_focus()) < 1e-3);

        let (transform, animating) = anchor(&mut app, Slot::Computer);
        assert!(!animating);
        assert!((transform.scale - Vec3::ONE).length() < 1e-5);

        app.world_mut().send_event(SceneRequest::ResetCamera);
        frames(&mut app, 14);
        assert!(camera_position(&mut app).distance(DEFAULT_CAMERA) < 1e-3);
    }

    #[test]
    fn latest_camera_request_wins() {
        let mut app = scene_app();
        app.world_mut()
            .send_event(SceneRequest::Celebrate(Slot::User));
        frames(&mut app, 3);
        app.world_mut().send_event(SceneRequest::ResetCamera);
        frames(&mut app, 14);
        assert!(camera_position(&mut app).distance(DEFAULT_CAMERA) < 1e-3);
    }

    #[test]
    fn present_without_models_is_a_no_op() {
        let mut app = scene_app();
        app.world_mut().send_event(SceneRequest::Present {
            choice: Choice::Rock,
            slot: Slot::User,
        });
        app.update();
        let (transform, animating) = anchor(&mut app, Slot::User);
        assert!(!animating);
        assert_eq!(transform.translation, rest_pose(Slot::User).translation);
    }

    #[test]
    fn clear_cancels_slot_motion() {
        let mut app = scene_app();
        app.world_mut()
            .send_event(SceneRequest::Celebrate(Slot::User));
        app.update();
        assert!(anchor(&mut app, Slot::User).1);

        app.world_mut().send_event(SceneRequest::Clear);
        app.update();
        let (transform, animating) = anchor(&mut app, Slot::User);
        assert!(!animating);
        assert_eq!(transform.translation, rest_pose(Slot::User).translation);
        assert_eq!(transform.scale, Vec3::ONE);
    }

    #[test]
    fn present_drops_the_model_in_and_lands_at_rest() {
        let mut app = with_models(scene_app());
        app.world_mut().send_event(SceneRequest::Present {
            choice: Choice::Scissors,
            slot: Slot::User,
        });
        app.update();
        assert_eq!(shown_models(&mut app), [Choice::Scissors]);
        assert_eq!(motion_kind(&mut app, Slot::User), Some(MotionKind::Entrance));
        let (transform, _) = anchor(&mut app, Slot::User);
        assert!(transform.translation.y > 1.0);
        assert!(transform.scale.x < 1.0);

        frames(&mut app, 10);
        let (transform, animating) = anchor(&mut app, Slot::User);
        assert!(!animating);
        assert!(transform.translation.y.abs() < 1e-5);
        assert_eq!(transform.scale, Vec3::ONE);
    }

    #[test]
    fn presenting_again_replaces_the_model() {
        let mut app = with_models(scene_app());
        app.world_mut().send_event(SceneRequest::Present {
            choice: Choice::Rock,
            slot: Slot::User,
        });
        app.update();
        app.world_mut().send_event(SceneRequest::Present {
            choice: Choice::Paper,
            slot: Slot::User,
        });
        app.update();
        assert_eq!(shown_models(&mut app), [Choice::Paper]);
    }

    #[test]
    fn celebrate_waits_for_the_drop_in() {
        let mut app = with_models(scene_app());
        app.world_mut().send_event(SceneRequest::Present {
            choice: Choice::Rock,
            slot: Slot::Computer,
        });
        app.world_mut()
            .send_event(SceneRequest::Celebrate(Slot::Computer));
        app.update();
        assert_eq!(motion_kind(&mut app, Slot::Computer), Some(MotionKind::Entrance));
        assert!(anchor(&mut app, Slot::Computer).0.translation.y > 1.0);

        frames(&mut app, 9);
        assert_eq!(motion_kind(&mut app, Slot::Computer), Some(MotionKind::Victory));

        frames(&mut app, 12);
        let (transform, animating) = anchor(&mut app, Slot::Computer);
        assert!(!animating);
        assert!(transform.translation.y.abs() < 1e-5);
        assert_eq!(transform.scale, Vec3::ONE);
    }
}

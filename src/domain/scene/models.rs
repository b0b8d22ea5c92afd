use std::f32::consts::FRAC_PI_4;

use bevy::hierarchy::ChildBuilder;
use bevy::prelude::*;

use crate::domain::rules::Choice;

/// Shared meshes and materials for the three choice models.
#[derive(Resource)]
pub struct ChoiceModels {
    stone: Handle<Mesh>,
    stone_mat: Handle<StandardMaterial>,
    sheet: Handle<Mesh>,
    sheet_mat: Handle<StandardMaterial>,
    blade: Handle<Mesh>,
    blade_mat: Handle<StandardMaterial>,
}

/// Root entity of a displayed choice. Spins while on stage.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChoiceModel(pub Choice);

impl ChoiceModels {
    pub fn new(meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) -> Self {
        Self {
            stone: meshes.add(Sphere::new(0.8).mesh().uv(32, 18)),
            stone_mat: materials.add(StandardMaterial {
                base_color: Color::srgb_u8(0x88, 0x88, 0x88),
                perceptual_roughness: 0.8,
                metallic: 0.2,
                ..default()
            }),
            sheet: meshes.add(Cuboid::new(1.2, 0.1, 1.2)),
            sheet_mat: materials.add(StandardMaterial {
                base_color: Color::WHITE,
                perceptual_roughness: 0.5,
                metallic: 0.1,
                ..default()
            }),
            blade: meshes.add(Cylinder::new(0.1, 1.5)),
            blade_mat: materials.add(StandardMaterial {
                base_color: Color::srgb_u8(0xcc, 0xcc, 0xcc),
                perceptual_roughness: 0.3,
                metallic: 0.8,
                ..default()
            }),
        }
    }

    pub fn spawn(&self, parent: &mut ChildBuilder, choice: Choice) {
        match choice {
            Choice::Rock => {
                parent.spawn((
                    PbrBundle {
                        mesh: self.stone.clone(),
                        material: self.stone_mat.clone(),
                        ..default()
                    },
                    ChoiceModel(choice),
                ));
            }
            Choice::Paper => {
                parent.spawn((
                    PbrBundle {
                        mesh: self.sheet.clone(),
                        material: self.sheet_mat.clone(),
                        ..default()
                    },
                    ChoiceModel(choice),
                ));
            }
            Choice::Scissors => {
                parent
                    .spawn((SpatialBundle::default(), ChoiceModel(choice)))
                    .with_children(|blades| {
                        for (x, angle) in [(0.2, FRAC_PI_4), (-0.2, -FRAC_PI_4)] {
                            blades.spawn(PbrBundle {
                                mesh: self.blade.clone(),
                                material: self.blade_mat.clone(),
                                transform: Transform::from_xyz(x, 0.0, 0.0)
                                    .with_rotation(Quat::from_rotation_z(angle)),
                                ..default()
                            });
                        }
                    });
            }
        }
    }
}

use bevy::prelude::*;

use crate::components::{CameraRig, CapsuleBody, PlayerController};
use crate::systems::camera_height;

/// Populate the demo world: a flat ground plane, some pillars for spatial
/// reference while walking, and lighting.
pub fn setup_world(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground plane
    let ground_mesh = meshes.add(Plane3d::default().mesh().size(200.0, 200.0));
    let ground_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.55, 0.3),
        perceptual_roughness: 0.95,
        ..default()
    });
    commands.spawn((
        Mesh3d(ground_mesh),
        MeshMaterial3d(ground_material),
        Transform::IDENTITY,
    ));

    // A ring of pillars so movement and look changes are visible
    let pillar_mesh = meshes.add(Cuboid::new(1.0, 4.0, 1.0));
    let pillar_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.6, 0.6, 0.65),
        ..default()
    });
    for i in 0..8 {
        let angle = i as f32 / 8.0 * std::f32::consts::TAU;
        commands.spawn((
            Mesh3d(pillar_mesh.clone()),
            MeshMaterial3d(pillar_material.clone()),
            Transform::from_xyz(angle.cos() * 12.0, 2.0, angle.sin() * 12.0),
        ));
    }

    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.9, 0.95, 1.0),
        brightness: 300.0,
    });
    commands.insert_resource(ClearColor(Color::srgb(0.5, 0.7, 0.95)));
}

/// Spawn the character: a capsule body entity carrying the controller state,
/// with the camera rig as a child so the scene graph owns the rig's lifetime.
pub fn spawn_player(commands: &mut Commands) {
    let body = CapsuleBody::default();
    let rig_height = camera_height(body.half_height());
    let rest_height = body.half_height();

    commands
        .spawn((
            PlayerController::default(),
            body,
            Transform::from_xyz(0.0, rest_height, 0.0),
            Visibility::default(),
        ))
        .with_children(|parent| {
            parent.spawn((
                Camera3d::default(),
                CameraRig,
                Transform::from_xyz(0.0, rig_height, 0.0),
            ));
        });
}

/// Startup wrapper around `spawn_player`.
pub fn spawn_initial_player(mut commands: Commands) {
    spawn_player(&mut commands);
}

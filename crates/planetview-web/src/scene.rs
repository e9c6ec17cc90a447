//! Scene setup - camera, lights and the optional debug cube

use bevy::prelude::*;

use crate::app::Settings;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_scene);
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Marker for the unlit cube used to check camera and light placement
#[derive(Component)]
pub struct DebugCube;

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
) {
    let camera = &settings.camera;

    // Y-up, looking at the model at the origin
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            near: camera.near,
            far: camera.far,
            ..default()
        }),
        Transform::from_translation(Vec3::from_array(camera.position)).looking_at(Vec3::ZERO, Vec3::Y),
        // Soft grey fill (0x404040)
        AmbientLight {
            color: Color::srgb_u8(0x40, 0x40, 0x40),
            brightness: 400.0,
            ..default()
        },
        MainCamera,
    ));

    // White key light from the upper front right
    commands.spawn((
        DirectionalLight {
            color: Color::WHITE,
            illuminance: 4000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(5.0, 5.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    if settings.debug_cube {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(0.0, 1.0, 0.0),
                unlit: true,
                ..default()
            })),
            Transform::from_translation(Vec3::ZERO),
            DebugCube,
        ));
    }
}

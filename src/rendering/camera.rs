use bevy::prelude::*;

use crate::core::config::SceneConfig;

/// Marker for the camera whose frustum defines the pointer plane.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct SceneCamera;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera);
    }
}

fn setup_camera(mut commands: Commands, cfg: Res<SceneConfig>) {
    let cam = &cfg.camera;
    commands.spawn((
        Name::new("SceneCamera"),
        SceneCamera,
        Camera3d::default(),
        Projection::from(PerspectiveProjection {
            fov: cam.fov_degrees.to_radians(),
            near: cam.near,
            far: cam.far,
            ..default()
        }),
        Transform::from_translation(cam.position()).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

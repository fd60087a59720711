use bevy::prelude::*;

use crate::core::config::SceneConfig;

pub struct LightingPlugin;

impl Plugin for LightingPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_lighting);
    }
}

fn setup_lighting(mut commands: Commands, cfg: Res<SceneConfig>) {
    let l = &cfg.lighting;
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: l.ambient_brightness,
        ..default()
    });
    if l.key_illuminance > 0.0 {
        commands.spawn((
            Name::new("KeyLight"),
            DirectionalLight {
                illuminance: l.key_illuminance,
                ..default()
            },
            Transform::from_xyz(0.0, 0.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
        ));
    }
    if l.rim_illuminance > 0.0 {
        let [r, g, b] = l.rim_color;
        commands.spawn((
            Name::new("RimLight"),
            DirectionalLight {
                illuminance: l.rim_illuminance,
                color: Color::srgb(r, g, b),
                ..default()
            },
            Transform::from_translation(Vec3::from_array(l.rim_position)).looking_at(Vec3::ZERO, Vec3::Y),
        ));
    }
}

//! Built-in scene presets. Files under `assets/config/` layer on top of these.

use super::config::*;

impl SceneConfig {
    pub fn spheres() -> Self {
        Self {
            window: WindowConfig {
                title: "Field Scenes - spheres".into(),
                ..Default::default()
            },
            pointer: PointerConfig {
                critically_damped: true,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    pub fn metaballs() -> Self {
        Self {
            window: WindowConfig {
                title: "Field Scenes - metaballs".into(),
                ..Default::default()
            },
            camera: CameraConfig {
                position: [0.0, 0.0, 5.0],
                fov_degrees: 25.0,
                near: 0.1,
                far: 100.0,
            },
            physics: PhysicsConfig {
                gravity: [0.0, 2.0, 0.0],
            },
            field: FieldConfig {
                enabled: true,
                strength: -0.05,
            },
            bodies: BodySetConfig {
                count: 6,
                spread: 0.0,
                positions: vec![
                    [1.0, 1.0, 0.5],
                    [-1.0, -1.0, -0.5],
                    [2.0, 2.0, 0.5],
                    [-2.0, -2.0, -0.5],
                    [3.0, 3.0, 0.5],
                    [-3.0, -3.0, -0.5],
                ],
                colors: vec![
                    [1.0, 0.0, 0.0],     // red
                    [0.0, 0.0, 1.0],     // blue
                    [0.0, 0.502, 0.0],   // green
                    [1.0, 0.647, 0.0],   // orange
                    [1.0, 0.412, 0.706], // hotpink
                    [0.498, 1.0, 0.831], // aquamarine
                ],
                collider_radius: 0.1,
                visual_radius: 0.3,
                linear_damping: 4.0,
                angular_damping: 0.95,
                seed: None,
            },
            pointer: PointerConfig {
                enabled: true,
                smoothing_time: 0.0,
                critically_damped: false,
                max_speed: None,
                collider_radius: 0.1,
                visual_radius: 0.35,
                color: [1.0, 1.0, 1.0],
            },
            lighting: LightingConfig {
                ambient_brightness: 1_000.0,
                key_illuminance: 3_000.0,
                rim_illuminance: 30_000.0,
                rim_color: [0.502, 0.0, 0.502],
                rim_position: [-10.0, -10.0, -10.0],
            },
            debug: DebugConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3;

    #[test]
    fn presets_validate_clean() {
        for kind in SceneKind::ALL {
            let warnings = kind.preset().validate();
            assert!(warnings.is_empty(), "{}: {warnings:?}", kind.name());
        }
    }

    #[test]
    fn spheres_preset_matches_scene() {
        let cfg = SceneConfig::spheres();
        assert_eq!(cfg.body_count(), 15);
        assert_eq!(cfg.field.strength, -400.0);
        assert_eq!(cfg.bodies.linear_damping, 0.65);
        assert_eq!(cfg.bodies.angular_damping, 0.95);
        assert_eq!(cfg.pointer.smoothing_time, 0.1);
    }

    #[test]
    fn only_spheres_uses_the_spring() {
        assert!(!PointerConfig::default().critically_damped);
        assert!(!SceneConfig::default().pointer.critically_damped);
        assert!(SceneConfig::spheres().pointer.critically_damped);
        assert!(!SceneConfig::metaballs().pointer.critically_damped);
    }

    #[test]
    fn metaballs_preset_uses_fixed_positions() {
        let cfg = SceneConfig::metaballs();
        assert_eq!(cfg.body_count(), 6);
        let positions = cfg.body_positions();
        assert_eq!(positions[0], Vec3::new(1.0, 1.0, 0.5));
        assert_eq!(positions[5], Vec3::new(-3.0, -3.0, -0.5));
        assert_eq!(cfg.body_color(2), [0.0, 0.502, 0.0]);
        assert_eq!(cfg.pointer.smoothing_time, 0.0);
    }

    #[test]
    fn seeded_spread_is_reproducible_and_bounded() {
        let mut cfg = SceneConfig::spheres();
        cfg.bodies.seed = Some(42);
        let a = cfg.body_positions();
        let b = cfg.body_positions();
        assert_eq!(a, b);
        assert_eq!(a.len(), 15);
        for p in a {
            assert!(p.abs().max_element() <= 5.0, "{p} outside spread");
        }
    }

    #[test]
    fn validate_flags_outward_field_and_bad_pointer() {
        let mut cfg = SceneConfig::spheres();
        cfg.field.strength = 10.0;
        cfg.pointer.max_speed = Some(0.0);
        let joined = cfg.validate().join("\n");
        assert!(joined.contains("field.strength"), "{joined}");
        assert!(joined.contains("pointer.max_speed"), "{joined}");
    }

    #[test]
    fn body_colors_cycle() {
        let mut cfg = SceneConfig::spheres();
        assert_eq!(cfg.body_color(3), [1.0, 1.0, 1.0]);
        cfg.bodies.colors = vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        assert_eq!(cfg.body_color(3), [0.0, 1.0, 0.0]);
    }

    #[test]
    fn non_finite_spread_collapses_to_origin() {
        for spread in [f32::INFINITY, f32::NAN] {
            let mut cfg = SceneConfig::spheres();
            cfg.bodies.seed = Some(7);
            cfg.bodies.spread = spread;
            let joined = cfg.validate().join("\n");
            assert!(joined.contains("bodies.spread"), "{joined}");
            let positions = cfg.body_positions();
            assert_eq!(positions.len(), 15);
            assert!(positions.iter().all(|p| *p == Vec3::ZERO), "{positions:?}");
        }
    }
}

use bevy::prelude::*;

use crate::core::components::BodyHandle;
use crate::core::frame::BodyCommand;

/// Positions closer to the origin than this get no impulse (direction undefined).
pub const FIELD_EPSILON: f32 = 1e-6;

/// Stateless per-body impulse along the body's position vector.
///
/// Each frame a body at `p` receives `normalize(p) * strength * dt`; a negative
/// strength pulls toward the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadialField {
    pub strength: f32,
}

impl RadialField {
    pub fn new(strength: f32) -> Self {
        Self { strength }
    }

    /// Impulse for a body at `position` over a frame of `dt` seconds. `None` for
    /// degenerate input (body at the origin, non-finite position, or `dt <= 0`).
    pub fn impulse(&self, position: Vec3, dt: f32) -> Option<Vec3> {
        if !(dt > 0.0 && dt.is_finite()) || !position.is_finite() {
            return None;
        }
        let len = position.length();
        if len < FIELD_EPSILON {
            return None;
        }
        let impulse = position / len * (self.strength * dt);
        impulse.is_finite().then_some(impulse)
    }

    /// One `ApplyImpulse` per body with a well-defined direction.
    pub fn commands<I>(&self, bodies: I, dt: f32) -> Vec<BodyCommand>
    where
        I: IntoIterator<Item = (BodyHandle, Vec3)>,
    {
        bodies
            .into_iter()
            .filter_map(|(body, position)| {
                self.impulse(position, dt)
                    .map(|impulse| BodyCommand::ApplyImpulse { body, impulse })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn pulls_toward_origin_with_scaled_magnitude() {
        let field = RadialField::new(-400.0);
        let impulse = field.impulse(Vec3::new(2.0, 0.0, 0.0), 0.01).unwrap();
        assert_relative_eq!(impulse.x, -4.0, epsilon = 1e-5);
        assert_eq!(impulse.y, 0.0);
        assert_eq!(impulse.z, 0.0);
    }

    #[test]
    fn origin_yields_no_impulse() {
        let field = RadialField::new(-400.0);
        assert_eq!(field.impulse(Vec3::ZERO, 0.016), None);
        assert_eq!(field.impulse(Vec3::splat(1e-8), 0.016), None);
    }

    #[test]
    fn impulse_is_antiparallel_with_fixed_magnitude() {
        let field = RadialField::new(-0.05);
        let dt = 0.0127;
        for p in [
            Vec3::new(1.0, 1.0, 0.5),
            Vec3::new(-3.0, -3.0, -0.5),
            Vec3::new(0.0, 7.0, -2.0),
            Vec3::new(1e4, -2e3, 5.0),
        ] {
            let impulse = field.impulse(p, dt).unwrap();
            assert_relative_eq!(impulse.length(), 0.05 * dt, max_relative = 1e-4);
            // Toward origin: anti-parallel to p.
            assert_relative_eq!(impulse.normalize().dot(p.normalize()), -1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn impulse_scales_linearly_with_dt() {
        let field = RadialField::new(-400.0);
        let p = Vec3::new(3.0, -4.0, 1.0);
        let a = field.impulse(p, 0.01).unwrap();
        let b = field.impulse(p, 0.03).unwrap();
        assert_relative_eq!(b.length(), a.length() * 3.0, max_relative = 1e-5);
    }

    #[test]
    fn positive_strength_pushes_outward() {
        let field = RadialField::new(2.0);
        let impulse = field.impulse(Vec3::new(0.0, -5.0, 0.0), 0.5).unwrap();
        assert!(impulse.y < 0.0);
        assert_relative_eq!(impulse.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn invalid_dt_or_position_is_skipped() {
        let field = RadialField::new(-400.0);
        let p = Vec3::X;
        assert_eq!(field.impulse(p, 0.0), None);
        assert_eq!(field.impulse(p, -0.1), None);
        assert_eq!(field.impulse(p, f32::NAN), None);
        assert_eq!(field.impulse(Vec3::new(f32::NAN, 1.0, 0.0), 0.01), None);
        assert_eq!(field.impulse(Vec3::new(f32::INFINITY, 0.0, 0.0), 0.01), None);
    }

    #[test]
    fn commands_skip_degenerate_bodies() {
        let field = RadialField::new(-1.0);
        let bodies = [
            (BodyHandle(0), Vec3::X),
            (BodyHandle(1), Vec3::ZERO),
            (BodyHandle(2), Vec3::Y * 4.0),
        ];
        let cmds = field.commands(bodies, 0.5);
        assert_eq!(cmds.len(), 2);
        assert_eq!(
            cmds[1],
            BodyCommand::ApplyImpulse { body: BodyHandle(2), impulse: Vec3::new(0.0, -0.5, 0.0) }
        );
    }
}

//! Pointer tracking: map normalized pointer coordinates onto the z = 0 plane and
//! ease a persistent position toward that target.

use bevy::prelude::*;

use crate::core::frame::FrameContext;

/// Spring mode snaps once this close to the target.
pub const SNAP_EPSILON: f32 = 1e-3;

/// World-space target on the z = 0 plane for a pointer at `ndc` (`[-1, 1]` per axis).
pub fn pointer_target(ndc: Vec2, viewport: Vec2) -> Vec3 {
    Vec3::new(ndc.x * viewport.x * 0.5, ndc.y * viewport.y * 0.5, 0.0)
}

/// How the tracked position approaches its target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Smoothing {
    /// Jump straight to the target every frame.
    Snap,
    /// `current += (target - current) * (1 - exp(-dt / time_constant))`.
    Exponential { time_constant: f32 },
    /// Critically damped spring with velocity state; overshoot is clamped away.
    SmoothDamp { smooth_time: f32 },
}

impl Smoothing {
    /// Exponential decay unless `spring` is set; a non-positive time snaps.
    pub fn from_time(time: f32, spring: bool) -> Self {
        if !(time > 0.0) {
            Smoothing::Snap
        } else if spring {
            Smoothing::SmoothDamp { smooth_time: time }
        } else {
            Smoothing::Exponential { time_constant: time }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointerTracker {
    pub smoothing: Smoothing,
    /// World units per second; infinite means unbounded.
    pub max_speed: f32,
    position: Option<Vec3>,
    velocity: Vec3,
    target: Option<Vec3>,
}

impl PointerTracker {
    pub fn new(smoothing: Smoothing) -> Self {
        Self {
            smoothing,
            max_speed: f32::INFINITY,
            position: None,
            velocity: Vec3::ZERO,
            target: None,
        }
    }

    pub fn with_max_speed(mut self, max_speed: f32) -> Self {
        self.max_speed = max_speed.max(0.0);
        self
    }

    /// Smoothed position, `None` until the first target was seen.
    pub fn position(&self) -> Option<Vec3> {
        self.position
    }

    /// Most recent target.
    pub fn target(&self) -> Option<Vec3> {
        self.target
    }

    pub fn reset(&mut self) {
        self.position = None;
        self.velocity = Vec3::ZERO;
        self.target = None;
    }

    /// Advance one frame and return the position the kinematic body should take.
    ///
    /// A fresh target is derived from the frame's pointer each time one is present;
    /// without a pointer the tracker keeps easing toward the last target. The very
    /// first target is adopted as-is so frame one shows no lag.
    pub fn update(&mut self, frame: &FrameContext) -> Option<Vec3> {
        if let Some(ndc) = frame.pointer {
            let target = pointer_target(ndc, frame.viewport);
            if target.is_finite() {
                self.target = Some(target);
            }
        }
        let target = self.target?;
        let Some(current) = self.position else {
            self.position = Some(target);
            self.velocity = Vec3::ZERO;
            return Some(target);
        };
        let dt = frame.dt;
        if !(dt > 0.0 && dt.is_finite()) {
            return Some(current);
        }
        let next = self.step(current, target, dt);
        self.position = Some(next);
        Some(next)
    }

    fn step(&mut self, current: Vec3, target: Vec3, dt: f32) -> Vec3 {
        let max_step = self.max_speed * dt;
        match self.smoothing {
            Smoothing::Snap => limit_step(current, target, max_step),
            Smoothing::Exponential { time_constant } => {
                let alpha = if time_constant > 0.0 {
                    1.0 - (-dt / time_constant).exp()
                } else {
                    1.0
                };
                limit_step(current, current + (target - current) * alpha, max_step)
            }
            Smoothing::SmoothDamp { smooth_time } => {
                let mut out = current;
                for axis in 0..3 {
                    out[axis] = smooth_damp(
                        current[axis],
                        target[axis],
                        &mut self.velocity[axis],
                        smooth_time,
                        dt,
                        self.max_speed,
                    );
                }
                out
            }
        }
    }
}

fn limit_step(from: Vec3, to: Vec3, max_step: f32) -> Vec3 {
    if !max_step.is_finite() {
        return to;
    }
    let delta = to - from;
    let len = delta.length();
    if len > max_step && len > 0.0 {
        from + delta * (max_step / len)
    } else {
        to
    }
}

/// One axis of the critically damped spring. `velocity` persists between calls.
fn smooth_damp(
    current: f32,
    target: f32,
    velocity: &mut f32,
    smooth_time: f32,
    dt: f32,
    max_speed: f32,
) -> f32 {
    if (current - target).abs() <= SNAP_EPSILON {
        *velocity = 0.0;
        return target;
    }
    let smooth_time = (smooth_time * 0.5).max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    // Pade-style approximation of exp(-x), stable for large x.
    let decay = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);
    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);
    let clamped_target = current - change;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * decay;
    let output = clamped_target + (change + temp) * decay;
    if (target - current > 0.0) == (output > target) {
        *velocity = 0.0;
        return target;
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn frame(dt: f32, ndc: Option<Vec2>) -> FrameContext {
        FrameContext::new(dt, ndc, Vec2::new(20.0, 10.0))
    }

    #[test]
    fn target_maps_right_edge() {
        let t = pointer_target(Vec2::new(1.0, 0.0), Vec2::new(20.0, 10.0));
        assert_eq!(t, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn target_mapping_is_monotone_and_spans_viewport() {
        let viewport = Vec2::new(20.0, 10.0);
        let mut prev = f32::NEG_INFINITY;
        for i in 0..=20 {
            let n = -1.0 + i as f32 * 0.1;
            let t = pointer_target(Vec2::new(n, n), viewport);
            assert!(t.x > prev);
            assert_relative_eq!(t.y, n * 5.0, epsilon = 1e-5);
            assert_eq!(t.z, 0.0);
            prev = t.x;
        }
        assert_eq!(pointer_target(Vec2::NEG_ONE, viewport), Vec3::new(-10.0, -5.0, 0.0));
    }

    #[test]
    fn first_frame_adopts_target() {
        let mut tracker = PointerTracker::new(Smoothing::Exponential { time_constant: 0.1 });
        let pos = tracker.update(&frame(0.016, Some(Vec2::new(0.5, -0.5)))).unwrap();
        assert_eq!(pos, Vec3::new(5.0, -2.5, 0.0));
    }

    #[test]
    fn nothing_before_first_pointer() {
        let mut tracker = PointerTracker::new(Smoothing::Snap);
        assert_eq!(tracker.update(&frame(0.016, None)), None);
        assert_eq!(tracker.position(), None);
    }

    #[test]
    fn exponential_converges_without_overshoot() {
        let mut tracker = PointerTracker::new(Smoothing::Exponential { time_constant: 0.1 });
        tracker.update(&frame(0.016, Some(Vec2::new(-1.0, -1.0))));
        let target = Vec3::new(10.0, 5.0, 0.0);
        let mut prev = f32::INFINITY;
        for _ in 0..200 {
            let pos = tracker.update(&frame(0.016, Some(Vec2::ONE))).unwrap();
            let d = pos.distance(target);
            assert!(d <= prev + 1e-6, "distance grew: {d} > {prev}");
            assert!(pos.x <= target.x + 1e-5 && pos.y <= target.y + 1e-5, "overshoot at {pos}");
            prev = d;
        }
        assert!(prev < 1e-3, "did not converge: {prev}");
    }

    #[test]
    fn exponential_step_matches_decay_formula() {
        let mut tracker = PointerTracker::new(Smoothing::Exponential { time_constant: 0.1 });
        tracker.update(&frame(0.016, Some(Vec2::ZERO)));
        let pos = tracker.update(&frame(0.05, Some(Vec2::new(1.0, 0.0)))).unwrap();
        let expected = 10.0 * (1.0 - (-0.5f32).exp());
        assert_relative_eq!(pos.x, expected, epsilon = 1e-4);
    }

    #[test]
    fn smooth_damp_converges_monotonically() {
        for dt in [0.004, 0.016, 0.1] {
            let mut tracker = PointerTracker::new(Smoothing::SmoothDamp { smooth_time: 0.1 });
            tracker.update(&frame(dt, Some(Vec2::ZERO)));
            let target = Vec3::new(10.0, 0.0, 0.0);
            let mut prev = f32::INFINITY;
            for _ in 0..500 {
                let pos = tracker.update(&frame(dt, Some(Vec2::new(1.0, 0.0)))).unwrap();
                let d = pos.distance(target);
                assert!(d <= prev + 1e-5, "dt={dt}: distance grew {d} > {prev}");
                assert!(pos.x <= target.x + 1e-5, "dt={dt}: overshoot {pos}");
                prev = d;
            }
            assert!(prev < 1e-3, "dt={dt}: did not converge ({prev})");
        }
    }

    #[test]
    fn keeps_easing_toward_last_target_when_pointer_leaves() {
        let mut tracker = PointerTracker::new(Smoothing::Exponential { time_constant: 0.1 });
        tracker.update(&frame(0.016, Some(Vec2::ZERO)));
        let a = tracker.update(&frame(0.016, Some(Vec2::new(1.0, 0.0)))).unwrap();
        let b = tracker.update(&frame(0.016, None)).unwrap();
        assert!(b.x > a.x);
        assert_eq!(tracker.target(), Some(Vec3::new(10.0, 0.0, 0.0)));
    }

    #[test]
    fn snap_follows_immediately_and_respects_max_speed() {
        let mut tracker = PointerTracker::new(Smoothing::Snap);
        tracker.update(&frame(0.1, Some(Vec2::ZERO)));
        let pos = tracker.update(&frame(0.1, Some(Vec2::new(1.0, 0.0)))).unwrap();
        assert_eq!(pos, Vec3::new(10.0, 0.0, 0.0));

        let mut limited = PointerTracker::new(Smoothing::Snap).with_max_speed(20.0);
        limited.update(&frame(0.1, Some(Vec2::ZERO)));
        let pos = limited.update(&frame(0.1, Some(Vec2::new(1.0, 0.0)))).unwrap();
        assert_relative_eq!(pos.x, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn zero_dt_holds_position() {
        let mut tracker = PointerTracker::new(Smoothing::Exponential { time_constant: 0.1 });
        tracker.update(&frame(0.016, Some(Vec2::ZERO)));
        let pos = tracker.update(&frame(0.0, Some(Vec2::ONE))).unwrap();
        assert_eq!(pos, Vec3::ZERO);
    }

    #[test]
    fn reset_forgets_state() {
        let mut tracker = PointerTracker::new(Smoothing::Snap);
        tracker.update(&frame(0.016, Some(Vec2::ONE)));
        tracker.reset();
        assert_eq!(tracker.position(), None);
        assert_eq!(tracker.update(&frame(0.016, None)), None);
    }

    #[test]
    fn smoothing_from_time() {
        assert_eq!(Smoothing::from_time(0.0, true), Smoothing::Snap);
        assert_eq!(Smoothing::from_time(0.1, true), Smoothing::SmoothDamp { smooth_time: 0.1 });
        assert_eq!(
            Smoothing::from_time(0.2, false),
            Smoothing::Exponential { time_constant: 0.2 }
        );
    }
}

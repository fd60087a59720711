use bevy::prelude::*;

use crate::core::components::BodyHandle;

/// Everything a frame update needs from the outside world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Pointer in normalized device coordinates (`[-1, 1]` per axis, +y up).
    /// `None` while no pointer is over the window.
    pub pointer: Option<Vec2>,
    /// Visible world extents (width, height) on the z = 0 plane.
    pub viewport: Vec2,
}

impl FrameContext {
    pub fn new(dt: f32, pointer: Option<Vec2>, viewport: Vec2) -> Self {
        Self { dt, pointer, viewport }
    }
}

/// Instruction for the physics backend produced by one frame update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyCommand {
    /// Accumulate a linear impulse on a dynamic body.
    ApplyImpulse { body: BodyHandle, impulse: Vec3 },
    /// Move a kinematic body to `translation` on the next step.
    SetNextKinematicTranslation { body: BodyHandle, translation: Vec3 },
}

impl BodyCommand {
    pub fn body(&self) -> BodyHandle {
        match *self {
            BodyCommand::ApplyImpulse { body, .. } => body,
            BodyCommand::SetNextKinematicTranslation { body, .. } => body,
        }
    }
}

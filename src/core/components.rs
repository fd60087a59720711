use bevy::prelude::*;

/// Dense index addressing a simulated body. Field bodies occupy `0..count`,
/// the pointer body takes the next slot.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u32);

impl BodyHandle {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Marker for dynamic bodies driven by the radial field.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct FieldBody;

/// Marker for the kinematic body following the pointer.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PointerBody;


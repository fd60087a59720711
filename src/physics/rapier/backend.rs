//! Seam between frame updates and whatever owns the rigid bodies.
//!
//! Frame logic only ever produces [`BodyCommand`]s addressed by [`BodyHandle`];
//! a backend resolves handles and forwards the commands to the engine.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::components::BodyHandle;
use crate::core::frame::BodyCommand;
use crate::physics::bodies::body_set::BodySet;

pub trait PhysicsBackend {
    /// Current world translation, `None` if the handle does not resolve.
    fn translation(&self, body: BodyHandle) -> Option<Vec3>;
    /// Accumulate a linear impulse on a dynamic body. Returns false when unresolved.
    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec3) -> bool;
    /// Place a kinematic body at `translation` on the next step. Returns false when unresolved.
    fn set_next_kinematic_translation(&mut self, body: BodyHandle, translation: Vec3) -> bool;
}

/// Forward a batch of commands; returns the handles that did not resolve, in
/// command order. Reporting them is left to the caller.
pub fn apply_commands<B: PhysicsBackend + ?Sized>(backend: &mut B, commands: &[BodyCommand]) -> Vec<BodyHandle> {
    let mut unresolved = Vec::new();
    for cmd in commands {
        let ok = match *cmd {
            BodyCommand::ApplyImpulse { body, impulse } => backend.apply_impulse(body, impulse),
            BodyCommand::SetNextKinematicTranslation { body, translation } => {
                backend.set_next_kinematic_translation(body, translation)
            }
        };
        if !ok {
            unresolved.push(cmd.body());
        }
    }
    unresolved
}

pub type BodyQueryData = (&'static mut Transform, Option<&'static mut ExternalImpulse>);

/// Backend over the Bevy world: impulses accumulate into `ExternalImpulse`
/// (Rapier consumes and resets it each step) and kinematic targets are written
/// to `Transform`, which bevy_rapier forwards as the next kinematic position of
/// `KinematicPositionBased` bodies.
pub struct RapierBodies<'a, 'w, 's> {
    set: &'a BodySet,
    bodies: &'a mut Query<'w, 's, BodyQueryData, With<BodyHandle>>,
}

impl<'a, 'w, 's> RapierBodies<'a, 'w, 's> {
    pub fn new(set: &'a BodySet, bodies: &'a mut Query<'w, 's, BodyQueryData, With<BodyHandle>>) -> Self {
        Self { set, bodies }
    }
}

impl PhysicsBackend for RapierBodies<'_, '_, '_> {
    fn translation(&self, body: BodyHandle) -> Option<Vec3> {
        let entity = self.set.entity(body)?;
        self.bodies.get(entity).ok().map(|(tf, _)| tf.translation)
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec3) -> bool {
        let Some(entity) = self.set.entity(body) else {
            return false;
        };
        match self.bodies.get_mut(entity) {
            Ok((_, Some(mut ext))) => {
                ext.impulse += impulse;
                true
            }
            _ => false,
        }
    }

    fn set_next_kinematic_translation(&mut self, body: BodyHandle, translation: Vec3) -> bool {
        let Some(entity) = self.set.entity(body) else {
            return false;
        };
        match self.bodies.get_mut(entity) {
            Ok((mut tf, _)) => {
                tf.translation = translation;
                true
            }
            Err(_) => false,
        }
    }
}

/// In-memory backend: positions are whatever the caller puts in, commands are
/// recorded. Useful for headless runs of the frame logic.
#[derive(Debug, Default, Clone)]
pub struct RecordingBackend {
    pub positions: HashMap<BodyHandle, Vec3>,
    pub impulses: HashMap<BodyHandle, Vec3>,
    pub kinematic_targets: HashMap<BodyHandle, Vec3>,
    pub log: Vec<BodyCommand>,
}

impl RecordingBackend {
    pub fn with_positions<I: IntoIterator<Item = (BodyHandle, Vec3)>>(bodies: I) -> Self {
        Self {
            positions: bodies.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Total impulse accumulated on `body` so far.
    pub fn impulse(&self, body: BodyHandle) -> Vec3 {
        self.impulses.get(&body).copied().unwrap_or(Vec3::ZERO)
    }
}

impl PhysicsBackend for RecordingBackend {
    fn translation(&self, body: BodyHandle) -> Option<Vec3> {
        self.positions.get(&body).copied()
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec3) -> bool {
        if !self.positions.contains_key(&body) {
            return false;
        }
        *self.impulses.entry(body).or_default() += impulse;
        self.log.push(BodyCommand::ApplyImpulse { body, impulse });
        true
    }

    fn set_next_kinematic_translation(&mut self, body: BodyHandle, translation: Vec3) -> bool {
        if !self.positions.contains_key(&body) {
            return false;
        }
        self.kinematic_targets.insert(body, translation);
        self.log.push(BodyCommand::SetNextKinematicTranslation { body, translation });
        true
    }
}

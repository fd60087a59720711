//! Frame update for one scene: radial impulses for every field body plus the
//! pointer body's next kinematic translation.

use std::collections::HashSet;

use bevy::prelude::*;

use crate::core::components::BodyHandle;
use crate::core::config::SceneConfig;
use crate::core::frame::{BodyCommand, FrameContext};
use crate::interaction::pointer::tracker::{PointerTracker, Smoothing};
use crate::physics::field::radial_field::RadialField;
use crate::physics::rapier::backend::{apply_commands, PhysicsBackend};

/// Summary of the last driven frame.
#[derive(Resource, Debug, Default, Clone, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub dt: f32,
    /// Impulses submitted this frame.
    pub impulses: usize,
    /// Mean distance of field bodies from the origin.
    pub mean_distance: f32,
    pub pointer: Option<Vec3>,
    /// Handles that failed to resolve for the first time this frame.
    pub newly_missing: usize,
}

#[derive(Resource, Debug, Clone)]
pub struct SceneController {
    pub field: Option<RadialField>,
    pub tracker: Option<PointerTracker>,
    pub pointer_body: BodyHandle,
    /// Handles already reported as unresolved; each is logged once.
    missing: HashSet<BodyHandle>,
}

impl SceneController {
    pub fn new(field: Option<RadialField>, tracker: Option<PointerTracker>, pointer_body: BodyHandle) -> Self {
        Self {
            field,
            tracker,
            pointer_body,
            missing: HashSet::new(),
        }
    }

    /// Handles that have failed to resolve at least once.
    pub fn missing_bodies(&self) -> &HashSet<BodyHandle> {
        &self.missing
    }

    /// Record an unresolved handle; true (and one `debug!` line) the first time only.
    fn report_missing(&mut self, body: BodyHandle) -> bool {
        if !self.missing.insert(body) {
            return false;
        }
        debug!(body = body.0, "body handle unresolved; skipping it");
        true
    }

    pub fn from_config(cfg: &SceneConfig) -> Self {
        let field = cfg
            .field
            .enabled
            .then(|| RadialField::new(cfg.field.strength));
        let tracker = cfg.pointer.enabled.then(|| {
            let p = &cfg.pointer;
            let tracker = PointerTracker::new(Smoothing::from_time(p.smoothing_time, p.critically_damped));
            match p.max_speed {
                Some(max) => tracker.with_max_speed(max),
                None => tracker,
            }
        });
        Self::new(field, tracker, BodyHandle(cfg.body_count() as u32))
    }

    /// Commands for one frame given the current field body positions.
    ///
    /// Impulses come first (one per body with a defined direction), followed by
    /// at most one kinematic translation for the pointer body. A viewport with no
    /// area is treated as "no pointer" so the tracker never latches onto (0, 0, 0)
    /// before the camera is known.
    pub fn update<I>(&mut self, frame: &FrameContext, bodies: I) -> Vec<BodyCommand>
    where
        I: IntoIterator<Item = (BodyHandle, Vec3)>,
    {
        let mut commands = match &self.field {
            Some(field) => field.commands(bodies, frame.dt),
            None => Vec::new(),
        };
        if let Some(tracker) = self.tracker.as_mut() {
            let usable_viewport = frame.viewport.x > 0.0 && frame.viewport.y > 0.0;
            let frame = FrameContext {
                pointer: frame.pointer.filter(|_| usable_viewport),
                ..*frame
            };
            if let Some(translation) = tracker.update(&frame) {
                commands.push(BodyCommand::SetNextKinematicTranslation {
                    body: self.pointer_body,
                    translation,
                });
            }
        }
        commands
    }

    /// Read positions from `backend`, run [`Self::update`] and forward the result.
    pub fn drive<B, I>(&mut self, backend: &mut B, bodies: I, frame: &FrameContext) -> FrameReport
    where
        B: PhysicsBackend + ?Sized,
        I: IntoIterator<Item = BodyHandle>,
    {
        let mut newly_missing = 0;
        let mut positions: Vec<(BodyHandle, Vec3)> = Vec::new();
        for handle in bodies {
            match backend.translation(handle) {
                Some(p) => positions.push((handle, p)),
                None => newly_missing += usize::from(self.report_missing(handle)),
            }
        }
        let mean_distance = if positions.is_empty() {
            0.0
        } else {
            positions.iter().map(|(_, p)| p.length()).sum::<f32>() / positions.len() as f32
        };
        let commands = self.update(frame, positions);
        for handle in apply_commands(backend, &commands) {
            newly_missing += usize::from(self.report_missing(handle));
        }
        let impulses = commands
            .iter()
            .filter(|c| matches!(c, BodyCommand::ApplyImpulse { .. }))
            .count();
        FrameReport {
            frame: 0,
            dt: frame.dt,
            impulses,
            mean_distance,
            pointer: self.tracker.as_ref().and_then(|t| t.position()),
            newly_missing,
        }
    }
}

//! Central system ordering labels to make update sequence explicit.
//! Stages (high-level):
//! 1. FrameInput (pointer sampling: cursor -> normalized coords + viewport extents)
//! 2. PrePhysics (radial impulses + next kinematic translation before Rapier)
//! 3. Diagnostics (stats / logging, read-only)
//! 4. Rapier (handled by plugin in PostUpdate)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct FrameInputSet; // per-frame input snapshot

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct PrePhysicsSet; // impulses and kinematic targets submitted before physics step

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub struct DiagnosticsSet; // read-only observers of the frame's submitted commands

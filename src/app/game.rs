// This file is part of Field Scenes.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::app::controller::{FrameReport, SceneController};
use crate::core::components::BodyHandle;
use crate::core::config::SceneConfig;
use crate::core::frame::FrameContext;
use crate::core::system::system_order::{DiagnosticsSet, FrameInputSet, PrePhysicsSet};
use crate::debug::DebugPlugin;
use crate::interaction::pointer::pointer_input::{PointerInput, PointerInputPlugin};
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::physics::bodies::body_set::{BodySet, BodySpawnPlugin};
use crate::physics::rapier::backend::{BodyQueryData, RapierBodies};
use crate::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use crate::rendering::camera::CameraPlugin;
use crate::rendering::lighting::LightingPlugin;

/// Frame logic without windowing, rendering or the Rapier step: spawns the body
/// pool and drives it from `PointerInput` every frame. Expects a `SceneConfig`
/// resource; inserts the spheres preset otherwise.
pub struct FieldCorePlugin;

impl Plugin for FieldCorePlugin {
    fn build(&self, app: &mut App) {
        if !app.world().contains_resource::<SceneConfig>() {
            app.insert_resource(SceneConfig::spheres());
        }
        let controller = SceneController::from_config(app.world().resource::<SceneConfig>());
        app.insert_resource(controller)
            .init_resource::<FrameReport>()
            .init_resource::<PointerInput>()
            .configure_sets(
                Update,
                (
                    FrameInputSet,
                    PrePhysicsSet.after(FrameInputSet),
                    DiagnosticsSet.after(PrePhysicsSet),
                ),
            )
            .add_plugins(BodySpawnPlugin)
            .add_systems(Startup, log_config_warnings)
            .add_systems(Update, drive_scene.in_set(PrePhysicsSet));
    }
}

/// Full interactive scene: core frame logic plus Rapier, camera, lights,
/// pointer sampling and session helpers.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            FieldCorePlugin,
            PhysicsSetupPlugin,
            CameraPlugin,
            LightingPlugin,
            PointerInputPlugin,
            AutoClosePlugin,
            DebugPlugin,
        ));
    }
}

fn log_config_warnings(cfg: Res<SceneConfig>) {
    for warning in cfg.validate() {
        warn!("config: {warning}");
    }
}

/// Run the scene controller against the live bodies for this frame.
pub fn drive_scene(
    time: Res<Time>,
    input: Res<PointerInput>,
    set: Option<Res<BodySet>>,
    mut controller: ResMut<SceneController>,
    mut report: ResMut<FrameReport>,
    mut bodies: Query<BodyQueryData, With<BodyHandle>>,
) {
    let Some(set) = set else {
        return;
    };
    let frame = FrameContext::new(time.delta_secs(), input.normalized, input.viewport);
    let mut backend = RapierBodies::new(&set, &mut bodies);
    let next = controller.drive(&mut backend, set.field_handles(), &frame);
    *report = FrameReport {
        frame: report.frame + 1,
        ..next
    };
}

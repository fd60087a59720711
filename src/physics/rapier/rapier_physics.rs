use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::core::config::SceneConfig;

pub struct PhysicsSetupPlugin; // our wrapper to configure Rapier for the scene

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((RapierPhysicsPlugin::<NoUserData>::default(),))
            .add_systems(Startup, configure_gravity);
        let debug_render = app
            .world()
            .get_resource::<SceneConfig>()
            .is_some_and(|cfg| cfg.debug.rapier_debug);
        if debug_render {
            app.add_plugins(RapierDebugRenderPlugin::default());
        }
    }
}

fn configure_gravity(mut q_cfg: Query<&mut RapierConfiguration>, cfg: Res<SceneConfig>) {
    // RapierConfiguration lives on the default context entity, spawned in PreStartup.
    let gravity = Vec3::from_array(cfg.physics.gravity);
    if let Ok(mut rapier_cfg) = q_cfg.single_mut() {
        rapier_cfg.gravity = gravity;
        info!(?gravity, "Rapier gravity configured");
    } else {
        warn!("no Rapier context found; world gravity left at default");
    }
}

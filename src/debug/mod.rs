//! Debug module: feature gated field statistics logging.
//! Built only when compiled with `--features debug` (on by default).

#[cfg(feature = "debug")]
mod logging;

#[cfg(feature = "debug")]
pub use logging::StatsLogState;

use bevy::prelude::*;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    #[cfg(feature = "debug")]
    fn build(&self, app: &mut App) {
        use crate::core::system::system_order::DiagnosticsSet;
        app.init_resource::<StatsLogState>().add_systems(
            Update,
            logging::field_stats_logging_system.in_set(DiagnosticsSet),
        );
    }

    #[cfg(not(feature = "debug"))]
    fn build(&self, _app: &mut App) {}
}

use bevy::prelude::*;

use crate::app::controller::FrameReport;
use crate::core::components::{FieldBody, PointerBody};
use crate::core::config::SceneConfig;

const LOG_TARGET: &str = "field_scenes::stats";

#[derive(Resource, Debug, Default)]
pub struct StatsLogState {
    pub time_accum: f32,
    pub lines: u64,
}

impl StatsLogState {
    /// Accumulate `dt`; true once per elapsed `interval`.
    pub fn tick(&mut self, dt: f32, interval: f32) -> bool {
        self.time_accum += dt;
        if self.time_accum >= interval.max(1e-3) {
            self.time_accum = 0.0;
            self.lines += 1;
            true
        } else {
            false
        }
    }
}

/// Body count and farthest distance from the origin.
pub fn field_extent<'a>(translations: impl IntoIterator<Item = &'a Vec3>) -> (usize, f32) {
    translations
        .into_iter()
        .fold((0, 0.0_f32), |(n, max), p| (n + 1, max.max(p.length())))
}

fn fmt_vec(p: Option<Vec3>) -> String {
    p.map(|p| format!("({:.2}, {:.2}, {:.2})", p.x, p.y, p.z))
        .unwrap_or_else(|| "-".into())
}

pub fn field_stats_logging_system(
    time: Res<Time>,
    cfg: Res<SceneConfig>,
    report: Res<FrameReport>,
    mut state: ResMut<StatsLogState>,
    field_q: Query<&Transform, With<FieldBody>>,
    pointer_q: Query<&Transform, With<PointerBody>>,
) {
    if !state.tick(time.delta_secs(), cfg.debug.log_interval) {
        return;
    }
    let (bodies, max_dist) = field_extent(field_q.iter().map(|tf| &tf.translation));
    let pointer_body = pointer_q.iter().next().map(|tf| tf.translation);
    info!(
        target: LOG_TARGET,
        "FIELD frame={} t={:.3}s dt_ms={:.1} bodies={} impulses={} mean_dist={:.3} max_dist={:.3} pointer={} pointer_body={}",
        report.frame,
        time.elapsed_secs(),
        report.dt * 1000.0,
        bodies,
        report.impulses,
        report.mean_distance,
        max_dist,
        fmt_vec(report.pointer),
        fmt_vec(pointer_body)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    #[test]
    fn tick_fires_once_per_interval() {
        let mut state = StatsLogState::default();
        let fired: Vec<bool> = (0..6).map(|_| state.tick(0.5, 1.0)).collect();
        assert_eq!(fired, vec![false, true, false, true, false, true]);
        assert_eq!(state.lines, 3);
    }

    #[test]
    fn extent_counts_bodies_and_tracks_farthest() {
        let points = [Vec3::new(3.0, 4.0, 0.0), Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0)];
        assert_eq!(field_extent(&points), (3, 5.0));
        assert_eq!(field_extent(std::iter::empty()), (0, 0.0));
    }

    #[test]
    fn stats_system_runs_over_marked_bodies() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(SceneConfig::default())
            .init_resource::<FrameReport>()
            .init_resource::<StatsLogState>()
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(16)))
            .add_systems(Update, field_stats_logging_system);
        app.world_mut().spawn((FieldBody, Transform::from_xyz(1.0, 0.0, 0.0)));
        app.world_mut().spawn((PointerBody, Transform::default()));
        // A zero interval clamps to 1 ms; the first frame has dt = 0.
        app.world_mut().resource_mut::<SceneConfig>().debug.log_interval = 0.0;
        app.update();
        assert_eq!(app.world().resource::<StatsLogState>().lines, 0);
        app.update();
        assert_eq!(app.world().resource::<StatsLogState>().lines, 1);
    }
}

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::core::system::system_order::FrameInputSet;
use crate::rendering::camera::SceneCamera;

/// Per-frame pointer snapshot consumed by the scene driver.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    /// Normalized device coordinates, +y up. `None` while the pointer is outside the window.
    pub normalized: Option<Vec2>,
    /// Visible world extents on the z = 0 plane.
    pub viewport: Vec2,
}

impl Default for PointerInput {
    fn default() -> Self {
        Self {
            normalized: None,
            viewport: Vec2::ZERO,
        }
    }
}

pub struct PointerInputPlugin;

impl Plugin for PointerInputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerInput>()
            .add_systems(Update, sample_pointer_input.in_set(FrameInputSet));
    }
}

/// Window position (logical pixels, origin top-left, y down) to `[-1, 1]` NDC with y up.
pub fn normalize_cursor(cursor: Vec2, window_size: Vec2) -> Option<Vec2> {
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        cursor.x / window_size.x * 2.0 - 1.0,
        1.0 - cursor.y / window_size.y * 2.0,
    ))
}

/// Width and height visible at `distance` in front of a perspective camera.
pub fn viewport_extents(distance: f32, fov_y: f32, aspect: f32) -> Vec2 {
    let height = 2.0 * distance * (fov_y * 0.5).tan();
    Vec2::new(height * aspect, height)
}

fn sample_pointer_input(
    windows: Query<&Window, With<PrimaryWindow>>,
    touches: Res<Touches>,
    camera_q: Query<(&Projection, &GlobalTransform), With<SceneCamera>>,
    mut input: ResMut<PointerInput>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = Vec2::new(window.width(), window.height());
    // A touch wins over the mouse cursor, like a single primary pointer.
    let screen = touches
        .iter()
        .next()
        .map(|t| t.position())
        .or_else(|| window.cursor_position());
    input.normalized = screen.and_then(|p| normalize_cursor(p, size));

    let Ok((projection, cam_tf)) = camera_q.single() else {
        return;
    };
    let Projection::Perspective(persp) = projection else {
        return;
    };
    // Extents measured at the origin plane the camera looks at.
    let distance = cam_tf.translation().length();
    input.viewport = viewport_extents(distance, persp.fov, size.x / size.y.max(1.0));
}

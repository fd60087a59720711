pub mod app;
pub mod core;
pub mod debug;
pub mod interaction;
pub mod physics;
pub mod rendering;

// Curated re-exports
pub use crate::app::controller::SceneController;
pub use crate::app::game::ScenePlugin;
pub use crate::core::components::{BodyHandle, FieldBody, PointerBody};
pub use crate::core::config::{SceneConfig, SceneKind};
pub use crate::core::frame::{BodyCommand, FrameContext};
pub use crate::interaction::pointer::tracker::{pointer_target, PointerTracker, Smoothing};
pub use crate::physics::field::radial_field::RadialField;

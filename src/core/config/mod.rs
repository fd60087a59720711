pub mod config;
mod presets;

pub use config::{
    BodySetConfig, CameraConfig, DebugConfig, FieldConfig, LightingConfig, PhysicsConfig,
    PointerConfig, SceneConfig, SceneKind, WindowConfig,
};

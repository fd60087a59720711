pub mod camera;
pub mod lighting;

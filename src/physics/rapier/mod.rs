pub mod backend;
pub mod rapier_physics;

pub mod bodies;
pub mod field;
pub mod rapier;

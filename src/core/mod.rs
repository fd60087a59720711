pub mod components;
pub mod config;
pub mod frame;
pub mod system;

pub mod controller;
pub mod game;

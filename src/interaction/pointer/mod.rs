pub mod pointer_input;
pub mod tracker;

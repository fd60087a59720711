pub mod pointer;
pub mod session;

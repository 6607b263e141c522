pub mod error;
pub mod generation;
pub mod period;
pub mod session;

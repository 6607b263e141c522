pub mod use_generation;
pub mod use_session;

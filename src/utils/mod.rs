//! Logging and timing helpers

pub mod logger;
pub mod timer;

//! Logging setup and timestamp formatting for the build wrapper.
mod logger;
pub use logger::*;

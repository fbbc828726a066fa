//! Command surface.
//!
//! This module provides the command chain parser, the [`Session`] that runs
//! a chain against one store, and per-batch statistics.

pub mod commands;
pub mod session;
pub mod statistics;

// Re-export public API
pub use commands::{parse_commands, Command};
pub use session::Session;
pub use statistics::BatchStats;

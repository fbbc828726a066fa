//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (defaults, markers, timeouts)
//! - CLI option types and parsing

mod constants;
mod types;

pub use constants::*;
pub use types::{LogFormat, LogLevel, Opt};

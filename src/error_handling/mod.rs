//! Error handling.
//!
//! Errors are split by the layer that raises them:
//! - **Initialization**: logger and DNS resolver setup
//! - **Store**: reading, serializing and atomically replacing the store file
//! - **Command**: malformed command chains
//! - **DNS / WHOIS**: lookups against external services
//!
//! DNS failures never leave the resolution engine as errors. They are turned
//! into `DEAD` classifications there. Only store and command errors end a run.

mod types;

// Re-export public API
pub use types::{CommandError, DnsError, InitializationError, StoreError, WhoisError};

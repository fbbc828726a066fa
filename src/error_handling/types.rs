//! Error type definitions.

use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the DNS resolver.
    #[error("DNS resolver initialization error: {0}")]
    DnsResolverError(String),
}

/// Error types for store persistence.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The store file exists but cannot be read.
    #[error("Cannot read store file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The store file is not a valid store document.
    #[error("Cannot parse store file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The snapshot cannot be serialized.
    #[error("Cannot serialize store: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The temporary file or the backup cannot be written.
    #[error("Cannot write store file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The temporary file cannot be moved over the store file.
    #[error("Cannot replace store file {}: {source}", path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: tempfile::PersistError,
    },
}

/// Error types for command chain parsing.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Command '{0}' expects an argument")]
    MissingArgument(String),

    #[error("Cannot load domains as '{0}'")]
    UnknownClassification(String),

    #[error("No commands given")]
    Empty,
}

/// Error types for DNS lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DnsError {
    /// A host name has no usable address.
    #[error("Host {host} does not resolve: {reason}")]
    Unresolvable { host: String, reason: String },
}

/// Error types for WHOIS queries.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WhoisError {
    #[error("Failed to create WHOIS client: {0}")]
    Client(String),

    #[error("WHOIS lookup for {domain} failed: {reason}")]
    Lookup { domain: String, reason: String },

    #[error("WHOIS lookup for {domain} timed out")]
    Timeout { domain: String },
}

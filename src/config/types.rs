//! Configuration types and CLI options.

use std::path::PathBuf;

use structopt::StructOpt;
use strum::VariantNames;
use strum_macros::{EnumString, VariantNames};

use crate::config::constants::{DEFAULT_DB_PATH, DNS_TIMEOUT_SECS, STDIO_MARKER, WHOIS_TIMEOUT_SECS};

/// Logging level for the application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: One JSON object per line for machine parsing
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumString, VariantNames)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogFormat {
    Plain,
    Json,
}

/// Command-line options.
///
/// Everything after the options is a command chain executed left to right,
/// e.g. `fakedomain load-disposable list.txt classify new.txt`.
#[derive(Debug, Clone, StructOpt)]
#[structopt(
    name = "fakedomain",
    about = "Classifies mail domains by cross-referencing their MX infrastructure"
)]
pub struct Opt {
    /// Store file (JSON)
    #[structopt(long = "db", parse(from_os_str), default_value = DEFAULT_DB_PATH)]
    pub db: PathBuf,

    /// Initial report destination, `-` for standard output
    #[structopt(long = "out", default_value = STDIO_MARKER)]
    pub out: String,

    /// Log level
    #[structopt(
        long = "log-level",
        default_value = "info",
        possible_values = LogLevel::VARIANTS,
        case_insensitive = true
    )]
    pub log_level: LogLevel,

    /// Log format
    #[structopt(
        long = "log-format",
        default_value = "plain",
        possible_values = LogFormat::VARIANTS,
        case_insensitive = true
    )]
    pub log_format: LogFormat,

    /// DNS query timeout in seconds
    #[structopt(long = "dns-timeout-secs", default_value = "5")]
    pub dns_timeout_secs: u64,

    /// WHOIS lookup timeout in seconds
    #[structopt(long = "whois-timeout-secs", default_value = "10")]
    pub whois_timeout_secs: u64,

    /// Command chain (query, classify, load, load-disposable, load-regular,
    /// load-alias, load-dead, reset, dump-disposables, use-db, load-db,
    /// store-db, out, whois)
    #[structopt(name = "COMMAND")]
    pub commands: Vec<String>,
}

impl Opt {
    /// DNS timeout, falling back to the default when zero.
    pub fn dns_timeout(&self) -> std::time::Duration {
        let secs = if self.dns_timeout_secs == 0 {
            DNS_TIMEOUT_SECS
        } else {
            self.dns_timeout_secs
        };
        std::time::Duration::from_secs(secs)
    }

    /// WHOIS timeout, falling back to the default when zero.
    pub fn whois_timeout(&self) -> std::time::Duration {
        let secs = if self.whois_timeout_secs == 0 {
            WHOIS_TIMEOUT_SECS
        } else {
            self.whois_timeout_secs
        };
        std::time::Duration::from_secs(secs)
    }
}

//! Configuration constants.

/// Store file used when `--db` is not given.
pub const DEFAULT_DB_PATH: &str = "./fakedomain.json";

/// File name meaning standard input (for batches) or standard output (for reports).
pub const STDIO_MARKER: &str = "-";

/// Prefix of a service context line in a classified batch file.
pub const SERVICE_MARKER: char = '#';

// Network operation timeouts
/// DNS query timeout in seconds
pub const DNS_TIMEOUT_SECS: u64 = 5;
/// DNS attempts per query
pub const DNS_ATTEMPTS: usize = 2;
/// WHOIS lookup timeout in seconds
pub const WHOIS_TIMEOUT_SECS: u64 = 10;

/// Raw WHOIS field holding the registrant organization.
pub const WHOIS_ORGANIZATION_KEY: &str = "registrant organization";

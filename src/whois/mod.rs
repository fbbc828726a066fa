//! WHOIS registrant lookup.
//!
//! Lookups go through [`WhoisGateway`]; [`ServiceWhois`] is the production
//! implementation. Failures never escape [`lookup_organization`]; they are
//! logged and reported as `-`.

mod client;
mod parse;
mod types;

use std::future::Future;

use log::warn;

use crate::error_handling::WhoisError;

// Re-export public API
pub use client::ServiceWhois;
pub use parse::parse_whois;
pub use types::WhoisRecord;

/// Fetches WHOIS records.
pub trait WhoisGateway {
    /// Looks `domain` up and returns its WHOIS record.
    fn lookup(&self, domain: &str) -> impl Future<Output = Result<WhoisRecord, WhoisError>>;
}

/// Registrant organization of `domain`, or `-` if unknown.
pub async fn lookup_organization<G: WhoisGateway>(gateway: &G, domain: &str) -> String {
    match gateway.lookup(domain).await {
        Ok(record) => record.registrant_organization().unwrap_or("-").to_string(),
        Err(e) => {
            warn!("WHOIS lookup failed for {}: {}", domain, e);
            "-".to_string()
        }
    }
}

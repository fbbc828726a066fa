//! DNS gateway.
//!
//! The resolution engine needs exactly two lookups, captured by the
//! [`DnsGateway`] trait:
//! - MX targets of a domain (or "no MX record")
//! - addresses of a host name (or "unresolvable")
//!
//! [`SystemDns`] answers them with `trust-dns-resolver`; [`StaticDns`] answers
//! them from fixed tables and counts the queries it receives.

mod records;
mod resolution;
mod static_dns;

use std::future::Future;

use trust_dns_resolver::TokioAsyncResolver;

use crate::error_handling::DnsError;

// Re-export public API
pub use records::{lookup_mx_records, normalize_exchange};
pub use resolution::resolve_host_addresses;
pub use static_dns::StaticDns;

/// The two DNS capabilities the resolution engine depends on.
pub trait DnsGateway {
    /// Returns the MX target host names of `domain`, or `None` if the domain
    /// has no MX record.
    fn lookup_mx(&self, domain: &str) -> impl Future<Output = Option<Vec<String>>>;

    /// Returns the addresses `host` resolves to.
    ///
    /// # Errors
    ///
    /// Returns `DnsError::Unresolvable` if the host has no address.
    fn resolve_addresses(&self, host: &str)
        -> impl Future<Output = Result<Vec<String>, DnsError>>;
}

/// Gateway backed by the system's DNS servers.
pub struct SystemDns {
    resolver: TokioAsyncResolver,
}

impl SystemDns {
    pub fn new(resolver: TokioAsyncResolver) -> Self {
        SystemDns { resolver }
    }
}

impl DnsGateway for SystemDns {
    async fn lookup_mx(&self, domain: &str) -> Option<Vec<String>> {
        lookup_mx_records(domain, &self.resolver).await
    }

    async fn resolve_addresses(&self, host: &str) -> Result<Vec<String>, DnsError> {
        resolve_host_addresses(host, &self.resolver).await
    }
}

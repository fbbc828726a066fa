//! Table-driven DNS gateway.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error_handling::DnsError;

use super::DnsGateway;

/// Answers DNS queries from fixed tables.
///
/// Domains without an MX entry have no MX record; hosts without an address
/// entry are unresolvable. Every query is counted.
#[derive(Debug, Default)]
pub struct StaticDns {
    mx: HashMap<String, Vec<String>>,
    addresses: HashMap<String, Vec<String>>,
    mx_queries: AtomicUsize,
    address_queries: AtomicUsize,
}

impl StaticDns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds MX targets for a domain.
    pub fn with_mx(mut self, domain: &str, targets: &[&str]) -> Self {
        self.mx.insert(
            domain.to_string(),
            targets.iter().map(|t| t.to_string()).collect(),
        );
        self
    }

    /// Makes a host resolvable to the given addresses.
    pub fn with_addresses(mut self, host: &str, addresses: &[&str]) -> Self {
        self.addresses.insert(
            host.to_string(),
            addresses.iter().map(|a| a.to_string()).collect(),
        );
        self
    }

    pub fn mx_queries(&self) -> usize {
        self.mx_queries.load(Ordering::SeqCst)
    }

    pub fn address_queries(&self) -> usize {
        self.address_queries.load(Ordering::SeqCst)
    }

    pub fn total_queries(&self) -> usize {
        self.mx_queries() + self.address_queries()
    }
}

impl DnsGateway for StaticDns {
    async fn lookup_mx(&self, domain: &str) -> Option<Vec<String>> {
        self.mx_queries.fetch_add(1, Ordering::SeqCst);
        self.mx.get(domain).filter(|targets| !targets.is_empty()).cloned()
    }

    async fn resolve_addresses(&self, host: &str) -> Result<Vec<String>, DnsError> {
        self.address_queries.fetch_add(1, Ordering::SeqCst);
        match self.addresses.get(host) {
            Some(addresses) if !addresses.is_empty() => Ok(addresses.clone()),
            _ => Err(DnsError::Unresolvable {
                host: host.to_string(),
                reason: "no records found".to_string(),
            }),
        }
    }
}

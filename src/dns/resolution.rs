//! Host name to address resolution.

use log::debug;
use trust_dns_resolver::TokioAsyncResolver;

use crate::error_handling::DnsError;

/// Resolves a host name to all of its IP addresses (A and AAAA).
///
/// # Errors
///
/// Returns `DnsError::Unresolvable` if the lookup fails or yields no address.
pub async fn resolve_host_addresses(
    host: &str,
    resolver: &TokioAsyncResolver,
) -> Result<Vec<String>, DnsError> {
    let response = resolver.lookup_ip(host).await.map_err(|e| {
        debug!("Failed to resolve {host}: {e}");
        DnsError::Unresolvable {
            host: host.to_string(),
            reason: e.to_string(),
        }
    })?;

    let mut addresses: Vec<String> = Vec::new();
    for ip in response.iter() {
        let ip = ip.to_string();
        if !addresses.contains(&ip) {
            addresses.push(ip);
        }
    }

    if addresses.is_empty() {
        return Err(DnsError::Unresolvable {
            host: host.to_string(),
            reason: "no addresses found".to_string(),
        });
    }
    Ok(addresses)
}

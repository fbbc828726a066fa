//! MX record queries.

use log::debug;
use trust_dns_resolver::TokioAsyncResolver;

/// Normalizes an MX exchange name: no trailing root dot, lowercase.
pub fn normalize_exchange(exchange: &str) -> String {
    exchange.trim_end_matches('.').to_ascii_lowercase()
}

/// Queries MX (mail exchange) records for a domain.
///
/// # Returns
///
/// The exchange host names ordered by preference (lower first), or `None` if
/// the lookup fails or yields no usable record. A failed lookup is treated
/// the same as a missing record: the domain then acts as its own mail server.
pub async fn lookup_mx_records(domain: &str, resolver: &TokioAsyncResolver) -> Option<Vec<String>> {
    match resolver.mx_lookup(domain).await {
        Ok(lookup) => {
            let mut records: Vec<(u16, String)> = lookup
                .iter()
                .map(|mx| (mx.preference(), normalize_exchange(&mx.exchange().to_utf8())))
                .filter(|(_, exchange)| !exchange.is_empty())
                .collect();
            records.sort_by_key(|(preference, _)| *preference);

            let mut targets: Vec<String> = Vec::with_capacity(records.len());
            for (_, exchange) in records {
                if !targets.contains(&exchange) {
                    targets.push(exchange);
                }
            }

            if targets.is_empty() {
                None
            } else {
                Some(targets)
            }
        }
        Err(e) => {
            debug!("No MX records for {domain}: {e}");
            None
        }
    }
}

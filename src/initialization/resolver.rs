//! DNS resolver initialization.

use std::time::Duration;

use log::debug;
use trust_dns_resolver::config::{ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

use crate::config::DNS_ATTEMPTS;
use crate::dns::SystemDns;
use crate::error_handling::InitializationError;

/// Initializes the DNS gateway used for MX and address lookups.
///
/// Uses the default upstream configuration with a bounded per-query timeout
/// and a small retry count, so a silent name server marks a host as
/// unresolvable instead of stalling the batch.
///
/// # Errors
///
/// Returns `InitializationError::DnsResolverError` if `timeout` is zero.
pub fn init_resolver(timeout: Duration) -> Result<SystemDns, InitializationError> {
    if timeout.is_zero() {
        return Err(InitializationError::DnsResolverError(
            "DNS timeout must be positive".to_string(),
        ));
    }

    let mut opts = ResolverOpts::default();
    opts.timeout = timeout;
    opts.attempts = DNS_ATTEMPTS;
    // Names are always fully qualified; never append search domains.
    opts.ndots = 0;

    debug!("DNS resolver: timeout {:?}, {} attempts", timeout, DNS_ATTEMPTS);
    Ok(SystemDns::new(TokioAsyncResolver::tokio(
        ResolverConfig::default(),
        opts,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_resolver() {
        assert!(init_resolver(Duration::from_secs(3)).is_ok());
    }

    #[tokio::test]
    async fn test_init_resolver_rejects_zero_timeout() {
        let result = init_resolver(Duration::ZERO);
        assert!(matches!(
            result,
            Err(InitializationError::DnsResolverError(_))
        ));
    }
}

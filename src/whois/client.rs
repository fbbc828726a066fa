//! WHOIS gateway backed by the whois-service client.

use std::time::Duration;

use log::{debug, info};
use whois_service::WhoisClient;

use super::parse::convert_response;
use super::types::WhoisRecord;
use super::WhoisGateway;
use crate::error_handling::WhoisError;

/// Looks domains up through [`WhoisClient`], bounded by a timeout.
///
/// The client picks the registry and follows registrar referrals itself.
#[derive(Debug, Clone)]
pub struct ServiceWhois {
    timeout: Duration,
}

impl ServiceWhois {
    pub fn new(timeout: Duration) -> Self {
        ServiceWhois { timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl WhoisGateway for ServiceWhois {
    async fn lookup(&self, domain: &str) -> Result<WhoisRecord, WhoisError> {
        debug!("Starting WHOIS lookup for domain: {}", domain);

        // Fresh client per lookup; it is lightweight.
        let client = WhoisClient::new()
            .await
            .map_err(|e| WhoisError::Client(e.to_string()))?;

        let response = tokio::time::timeout(self.timeout, client.lookup(domain))
            .await
            .map_err(|_| WhoisError::Timeout {
                domain: domain.to_string(),
            })?
            .map_err(|e| WhoisError::Lookup {
                domain: domain.to_string(),
                reason: e.to_string(),
            })?;

        info!("WHOIS lookup successful for {}", domain);
        Ok(convert_response(&response))
    }
}

//! Domain and mail-server records.

use std::collections::BTreeSet;
use std::fmt;

use crate::classification::{Classification, Heuristic};

/// Everything known about one mail domain.
///
/// The mail-server list is fixed when the domain is first resolved. Only the
/// classification, heuristic and service fields change afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainRecord {
    pub classification: Classification,
    pub heuristic: Heuristic,
    /// Mail servers in resolution order, without duplicates.
    pub mail_servers: Vec<String>,
    /// The single service this domain belongs to.
    pub service: Option<String>,
    /// Sorted candidates when more than one service matched. Never set
    /// together with `service`.
    pub potential_services: Vec<String>,
}

impl DomainRecord {
    pub fn new(classification: Classification, service: Option<String>) -> Self {
        DomainRecord {
            classification,
            service,
            ..Default::default()
        }
    }

    /// Appends a mail server unless already present.
    pub fn add_mail_server(&mut self, name: &str) {
        if !self.mail_servers.iter().any(|mx| mx == name) {
            self.mail_servers.push(name.to_string());
        }
    }

    pub fn is_dead(&self) -> bool {
        self.classification == Classification::Dead
    }

    pub fn mark_dead(&mut self, heuristic: Heuristic) {
        self.classification = Classification::Dead;
        self.heuristic = heuristic;
    }

    /// Assigns the service candidates found for this domain.
    ///
    /// One candidate becomes `service`; several become the sorted
    /// `potential_services` list; none leaves both unset.
    pub fn assign_services(&mut self, candidates: BTreeSet<String>) {
        self.service = None;
        self.potential_services.clear();
        if candidates.len() == 1 {
            self.service = candidates.into_iter().next();
        } else {
            self.potential_services = candidates.into_iter().collect();
        }
    }
}

impl fmt::Display for DomainRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.classification, self.heuristic)?;
        if let Some(service) = &self.service {
            write!(f, " service={service}")?;
        } else if !self.potential_services.is_empty() {
            write!(f, " potential-services=[{}]", self.potential_services.join(", "))?;
        }
        write!(f, " mx=[{}]", self.mail_servers.join(", "))
    }
}

/// A mail server: its resolved addresses and the aggregate classification of
/// the domains using it.
///
/// The addresses are resolved once and cached forever. The classification is
/// derived by the aggregation pass and is not accepted as input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MailServerRecord {
    /// Addresses in resolution order, without duplicates.
    pub addresses: Vec<String>,
    classification: Classification,
}

impl MailServerRecord {
    pub fn new(addresses: Vec<String>) -> Self {
        let mut record = MailServerRecord::default();
        for address in addresses {
            if !record.addresses.contains(&address) {
                record.addresses.push(address);
            }
        }
        record
    }

    /// Restores a previously aggregated record from a stored snapshot.
    pub(crate) fn restored(addresses: Vec<String>, classification: Classification) -> Self {
        MailServerRecord {
            classification,
            ..MailServerRecord::new(addresses)
        }
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }

    pub(crate) fn reset_classification(&mut self) {
        self.classification = Classification::Unknown;
    }

    pub(crate) fn fold_classification(&mut self, domain: Classification) {
        self.classification = self.classification.combine(domain);
    }
}

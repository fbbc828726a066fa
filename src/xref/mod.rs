//! Cross-reference index.
//!
//! Lookup tables derived from the current store and used to guess the
//! classification of a newly resolved domain:
//! - address -> classification folded from the mail servers using it
//! - mail server -> services of the domains using it
//! - address -> services of the domains whose mail servers use it
//!
//! The index is a pure function of the store and is rebuilt for every guess,
//! never patched incrementally.

use std::collections::{BTreeSet, HashMap};

use crate::classification::{Classification, Heuristic};
use crate::store::{DomainRecord, DomainStore};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XRefIndex {
    pub address_classification: HashMap<String, Classification>,
    pub service_by_mx: HashMap<String, BTreeSet<String>>,
    pub service_by_address: HashMap<String, BTreeSet<String>>,
}

impl XRefIndex {
    pub fn build(store: &DomainStore) -> Self {
        let mut index = XRefIndex::default();

        for (_, server) in store.mail_servers() {
            for address in &server.addresses {
                let entry = index
                    .address_classification
                    .entry(address.clone())
                    .or_default();
                *entry = entry.combine(server.classification());
            }
        }

        for (_, domain) in store.domains() {
            let Some(service) = &domain.service else {
                continue;
            };

            for mx in &domain.mail_servers {
                index
                    .service_by_mx
                    .entry(mx.clone())
                    .or_default()
                    .insert(service.clone());

                let Some(server) = store.mail_server(mx) else {
                    continue;
                };
                for address in &server.addresses {
                    index
                        .service_by_address
                        .entry(address.clone())
                        .or_default()
                        .insert(service.clone());
                }
            }
        }

        index
    }

    pub fn address_classification(&self, address: &str) -> Classification {
        self.address_classification
            .get(address)
            .copied()
            .unwrap_or_default()
    }

    /// Collects the evidence reachable from a set of mail servers.
    pub fn guess(&self, store: &DomainStore, mail_servers: &[String]) -> Guess {
        let mut guess = Guess::default();

        for mx in mail_servers {
            let Some(server) = store.mail_server(mx) else {
                continue;
            };
            guess.mx = guess.mx.any_disposable(server.classification());

            for address in &server.addresses {
                guess.address = guess
                    .address
                    .any_disposable(self.address_classification(address));
                if let Some(services) = self.service_by_address.get(address) {
                    guess.address_services.extend(services.iter().cloned());
                }
            }

            if let Some(services) = self.service_by_mx.get(mx) {
                guess.mx_services.extend(services.iter().cloned());
            }
        }

        guess
    }
}

/// Classification evidence for one domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Guess {
    /// Folded classification of the domain's mail servers.
    pub mx: Classification,
    /// Folded classification of the addresses of those mail servers.
    pub address: Classification,
    pub mx_services: BTreeSet<String>,
    pub address_services: BTreeSet<String>,
}

impl Guess {
    /// Applies the guess to a record.
    ///
    /// Mail-server evidence wins over address evidence. Without evidence the
    /// record keeps its classification, and its heuristic is cleared unless
    /// the record is dead.
    pub fn apply(self, record: &mut DomainRecord) {
        if !self.mx.is_unknown() {
            record.classification = self.mx;
            record.heuristic = Heuristic::Mx;
            record.assign_services(self.mx_services);
        } else if !self.address.is_unknown() {
            record.classification = self.address;
            record.heuristic = Heuristic::Ip;
            record.assign_services(self.address_services);
        } else if !record.is_dead() {
            record.heuristic = Heuristic::None;
        }
    }
}

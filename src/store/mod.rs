//! Domain store: the single source of truth for resolved domains and mail servers.
//!
//! Records are created lazily on first resolution and never re-resolved. The
//! store is an explicit value passed to every operation; persistence goes
//! through a [`StoreBackend`].

mod persist;
mod record;

use std::collections::HashMap;

use crate::classification::Classification;

pub use persist::{backup_path, JsonFileStore, StoreBackend};
pub use record::{DomainRecord, MailServerRecord};

/// Normalizes a domain or host name: surrounding whitespace removed, lowercase.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// In-memory mapping of domain names and mail-server names to their records.
///
/// Every mail server referenced by a domain record is present in the
/// mail-server map before the domain record is inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainStore {
    domains: HashMap<String, DomainRecord>,
    mail_servers: HashMap<String, MailServerRecord>,
}

impl DomainStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain(&self, name: &str) -> Option<&DomainRecord> {
        self.domains.get(name)
    }

    pub fn contains_domain(&self, name: &str) -> bool {
        self.domains.contains_key(name)
    }

    /// Stores a completed domain record.
    pub fn insert_domain(&mut self, name: impl Into<String>, record: DomainRecord) {
        debug_assert!(
            record
                .mail_servers
                .iter()
                .all(|mx| self.mail_servers.contains_key(mx)),
            "domain references an unknown mail server"
        );
        self.domains.insert(name.into(), record);
    }

    pub fn mail_server(&self, name: &str) -> Option<&MailServerRecord> {
        self.mail_servers.get(name)
    }

    pub fn contains_mail_server(&self, name: &str) -> bool {
        self.mail_servers.contains_key(name)
    }

    pub fn insert_mail_server(&mut self, name: impl Into<String>, record: MailServerRecord) {
        self.mail_servers.insert(name.into(), record);
    }

    pub fn domains(&self) -> impl Iterator<Item = (&String, &DomainRecord)> {
        self.domains.iter()
    }

    pub fn mail_servers(&self) -> impl Iterator<Item = (&String, &MailServerRecord)> {
        self.mail_servers.iter()
    }

    /// Borrows the domain map and the mutable mail-server map at the same time.
    pub(crate) fn split_mut(
        &mut self,
    ) -> (
        &HashMap<String, DomainRecord>,
        &mut HashMap<String, MailServerRecord>,
    ) {
        (&self.domains, &mut self.mail_servers)
    }

    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    pub fn mail_server_count(&self) -> usize {
        self.mail_servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty() && self.mail_servers.is_empty()
    }

    /// Drops every record.
    pub fn reset(&mut self) {
        self.domains.clear();
        self.mail_servers.clear();
    }

    /// Sorted names of all domains classified `DISPOSABLE`.
    pub fn disposables(&self) -> Vec<String> {
        let mut result: Vec<String> = self
            .domains
            .iter()
            .filter(|(_, record)| record.classification == Classification::Disposable)
            .map(|(name, _)| name.clone())
            .collect();
        result.sort();
        result
    }
}

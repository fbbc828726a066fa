//! WHOIS data structures.

use std::collections::HashMap;

use crate::config::WHOIS_ORGANIZATION_KEY;

/// One WHOIS answer.
///
/// Holds the fields the WHOIS client parsed itself plus the `key: value`
/// pairs of the raw answer text, keyed by lower-cased name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhoisRecord {
    registrar: Option<String>,
    registrant: Option<String>,
    fields: HashMap<String, String>,
}

impl WhoisRecord {
    pub(crate) fn from_fields(fields: HashMap<String, String>) -> Self {
        WhoisRecord {
            fields,
            ..Default::default()
        }
    }

    pub(crate) fn with_registrar(mut self, registrar: Option<String>) -> Self {
        self.registrar = registrar;
        self
    }

    pub(crate) fn with_registrant(mut self, registrant: Option<String>) -> Self {
        self.registrant = registrant;
        self
    }

    /// Looks a raw answer field up by its case-insensitive name.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(&key.to_lowercase()).map(String::as_str)
    }

    pub fn registrar(&self) -> Option<&str> {
        non_empty(self.registrar.as_deref())
    }

    /// Registrant as parsed by the client, else the raw
    /// `Registrant Organization` field.
    pub fn registrant_organization(&self) -> Option<&str> {
        non_empty(self.registrant.as_deref())
            .or_else(|| non_empty(self.get(WHOIS_ORGANIZATION_KEY)))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.registrar.is_none() && self.registrant.is_none()
    }

    /// Number of raw answer fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

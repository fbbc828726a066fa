//! Snapshot document types.
//!
//! The snapshot is both the persisted store format and the report format.
//! `domains` and `mailServers` carry the normalized data; `services` and
//! `hosts` are projections rebuilt on every export.

use serde::{Deserialize, Serialize};

use crate::classification::{Classification, Heuristic};

/// A fully denormalized, sorted view of a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub domains: Vec<Domain>,
    #[serde(default)]
    pub mail_servers: Vec<MailServer>,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub hosts: Vec<Host>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub name: String,
    #[serde(default)]
    pub classification: Classification,
    #[serde(default)]
    pub heuristic: Heuristic,
    #[serde(default)]
    pub mail_servers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub potential_services: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MailServer {
    pub name: String,
    #[serde(default)]
    pub classification: Classification,
    #[serde(default)]
    pub addresses: Vec<String>,
    /// Services whose domains use this server (derived).
    #[serde(default)]
    pub services: Vec<String>,
    /// Domains using this server (derived).
    #[serde(default)]
    pub domains: Vec<String>,
}

/// A provider inferred from the domains assigned to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub name: String,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub mail_servers: Vec<String>,
    #[serde(default)]
    pub addresses: Vec<String>,
}

/// Per-address summary of who uses it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub address: String,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub domains: Vec<String>,
    #[serde(default)]
    pub mail_servers: Vec<String>,
}

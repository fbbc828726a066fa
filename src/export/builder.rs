//! Builds snapshots from a store and restores stores from snapshots.

use std::collections::{BTreeMap, BTreeSet};

use log::warn;

use crate::store::{DomainRecord, DomainStore, MailServerRecord};

use super::types::{Domain, Host, MailServer, Service, Snapshot};

#[derive(Default)]
struct ServiceSets<'a> {
    domains: BTreeSet<&'a str>,
    mail_servers: BTreeSet<&'a str>,
    addresses: BTreeSet<&'a str>,
}

#[derive(Default)]
struct HostSets<'a> {
    services: BTreeSet<&'a str>,
    domains: BTreeSet<&'a str>,
    mail_servers: BTreeSet<&'a str>,
}

fn sorted<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Builds the denormalized snapshot of a store.
///
/// All lists are deduplicated and sorted, so the same store always yields
/// the same snapshot.
pub fn build_snapshot(store: &DomainStore) -> Snapshot {
    let mut services: BTreeMap<&str, ServiceSets> = BTreeMap::new();
    let mut services_by_mx: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();
    let mut domains_by_mx: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

    for (name, record) in store.domains() {
        let assigned = record
            .service
            .iter()
            .chain(record.potential_services.iter());
        for service_name in assigned {
            let service = services.entry(service_name.as_str()).or_default();
            service.domains.insert(name.as_str());

            for mx in &record.mail_servers {
                service.mail_servers.insert(mx.as_str());
                if let Some(server) = store.mail_server(mx) {
                    service
                        .addresses
                        .extend(server.addresses.iter().map(String::as_str));
                }
                services_by_mx
                    .entry(mx.as_str())
                    .or_default()
                    .insert(service_name.as_str());
            }
        }

        for mx in &record.mail_servers {
            domains_by_mx
                .entry(mx.as_str())
                .or_default()
                .insert(name.as_str());
        }
    }

    let mut hosts: BTreeMap<&str, HostSets> = BTreeMap::new();
    let mut mail_servers = Vec::with_capacity(store.mail_server_count());
    for (name, server) in store.mail_servers() {
        let server_services = services_by_mx.get(name.as_str());
        let server_domains = domains_by_mx.get(name.as_str());

        for address in &server.addresses {
            let host = hosts.entry(address.as_str()).or_default();
            host.mail_servers.insert(name.as_str());
            host.services.extend(server_services.into_iter().flatten());
            host.domains.extend(server_domains.into_iter().flatten());
        }

        mail_servers.push(MailServer {
            name: name.clone(),
            classification: server.classification(),
            addresses: sorted(server.addresses.iter().map(String::as_str)),
            services: sorted(server_services.into_iter().flatten().copied()),
            domains: sorted(server_domains.into_iter().flatten().copied()),
        });
    }
    mail_servers.sort_by(|x, y| x.name.cmp(&y.name));

    let mut domains: Vec<Domain> = store
        .domains()
        .map(|(name, record)| Domain {
            name: name.clone(),
            classification: record.classification,
            heuristic: record.heuristic,
            mail_servers: sorted(record.mail_servers.iter().map(String::as_str)),
            service: record.service.clone(),
            potential_services: sorted(record.potential_services.iter().map(String::as_str)),
        })
        .collect();
    domains.sort_by(|x, y| x.name.cmp(&y.name));

    let services = services
        .into_iter()
        .map(|(name, sets)| Service {
            name: name.to_string(),
            domains: sorted(sets.domains),
            mail_servers: sorted(sets.mail_servers),
            addresses: sorted(sets.addresses),
        })
        .collect();

    let hosts = hosts
        .into_iter()
        .map(|(address, sets)| Host {
            address: address.to_string(),
            services: sorted(sets.services),
            domains: sorted(sets.domains),
            mail_servers: sorted(sets.mail_servers),
        })
        .collect();

    Snapshot {
        domains,
        mail_servers,
        services,
        hosts,
    }
}

impl Snapshot {
    /// Restores the normalized store from a snapshot.
    ///
    /// Only `domains` and `mailServers` are read; the projections are
    /// ignored. A domain referring to a mail server missing from the
    /// snapshot gets an empty mail-server record.
    pub fn into_store(self) -> DomainStore {
        let mut store = DomainStore::new();
        for server in self.mail_servers {
            store.insert_mail_server(
                server.name,
                MailServerRecord::restored(server.addresses, server.classification),
            );
        }

        for domain in self.domains {
            let mut record = DomainRecord::new(domain.classification, domain.service);
            record.heuristic = domain.heuristic;
            record.potential_services = domain.potential_services;
            for mx in &domain.mail_servers {
                if !store.contains_mail_server(mx) {
                    warn!(
                        "Domain {} refers to unknown mail server {mx}, adding it without addresses",
                        domain.name
                    );
                    store.insert_mail_server(mx.as_str(), MailServerRecord::default());
                }
                record.add_mail_server(mx);
            }
            store.insert_domain(domain.name, record);
        }
        store
    }
}

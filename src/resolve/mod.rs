//! Resolution engine.
//!
//! Turns a domain name into a [`DomainRecord`] by querying DNS once:
//! 1. A domain already in the store is returned as stored, without DNS traffic.
//! 2. MX targets are looked up; a domain without MX record is its own mail server.
//! 3. Each new mail server is resolved to its addresses once and cached.
//! 4. A domain with no resolvable mail server is `DEAD`.
//! 5. Otherwise ([`resolve`] only) the classification is guessed from the
//!    mail servers and addresses it shares with known domains.

use log::debug;

use crate::classification::{Classification, Heuristic};
use crate::dns::{normalize_exchange, DnsGateway};
use crate::error_handling::DnsError;
use crate::store::{normalize_name, DomainRecord, DomainStore, MailServerRecord};
use crate::xref::XRefIndex;

/// Resolves a domain and guesses its classification.
///
/// The result is memoized in the store: resolving the same name again
/// returns the stored record without querying DNS.
pub async fn resolve<G: DnsGateway>(store: &mut DomainStore, dns: &G, domain: &str) -> DomainRecord {
    let name = normalize_name(domain);
    if let Some(existing) = store.domain(&name) {
        return existing.clone();
    }

    let mut record = DomainRecord::new(Classification::Unknown, None);
    fill_from_dns(store, dns, &name, &mut record).await;

    if !record.is_dead() {
        let index = XRefIndex::build(store);
        index.guess(store, &record.mail_servers).apply(&mut record);
    }

    store.insert_domain(name, record.clone());
    record
}

/// Enters a domain with an authoritative classification and service.
///
/// A known domain is left untouched. A new one is filled from DNS without
/// guessing; an unresolvable domain still ends up `DEAD`.
pub async fn enter<G: DnsGateway>(
    store: &mut DomainStore,
    dns: &G,
    domain: &str,
    service: Option<String>,
    classification: Classification,
) -> DomainRecord {
    let name = normalize_name(domain);
    if let Some(existing) = store.domain(&name) {
        return existing.clone();
    }

    let mut record = DomainRecord::new(classification, service);
    fill_from_dns(store, dns, &name, &mut record).await;

    store.insert_domain(name, record.clone());
    record
}

async fn fill_from_dns<G: DnsGateway>(
    store: &mut DomainStore,
    dns: &G,
    domain: &str,
    record: &mut DomainRecord,
) {
    match dns.lookup_mx(domain).await {
        None => {
            if let Err(e) = register_mail_server(store, dns, record, domain).await {
                debug!("{domain} has no MX record and does not resolve: {e}");
                record.mark_dead(Heuristic::NoFallbackMx);
            }
        }
        Some(targets) => {
            let mut alive = false;
            for target in targets {
                let target = normalize_exchange(target.trim());
                match register_mail_server(store, dns, record, &target).await {
                    Ok(()) => alive = true,
                    Err(e) => debug!("Ignoring MX {target} of {domain}: {e}"),
                }
            }
            if !alive {
                record.mark_dead(Heuristic::NoResolvableMx);
            }
        }
    }
}

/// Adds a mail server to a domain record, resolving it first if it is new.
///
/// Known mail servers are reused without a DNS query. An unresolvable new
/// host leaves the store and the record unchanged.
async fn register_mail_server<G: DnsGateway>(
    store: &mut DomainStore,
    dns: &G,
    record: &mut DomainRecord,
    host: &str,
) -> Result<(), DnsError> {
    if !store.contains_mail_server(host) {
        let addresses = dns.resolve_addresses(host).await?;
        store.insert_mail_server(host, MailServerRecord::new(addresses));
    }
    record.add_mail_server(host);
    Ok(())
}

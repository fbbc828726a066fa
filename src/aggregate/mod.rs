//! Aggregation pass.
//!
//! Mail-server classifications are a pure function of the classifications
//! of the domains using them. They are recomputed over the whole store in two
//! phases (reset, then fold), so the result does not depend on the order in
//! which domains were added or edited.

use log::{debug, warn};

use crate::classification::Classification;
use crate::store::DomainStore;

/// Recomputes every mail server's classification from the domains using it.
pub fn update_classifications(store: &mut DomainStore) {
    let (domains, mail_servers) = store.split_mut();

    for server in mail_servers.values_mut() {
        server.reset_classification();
    }

    for (name, domain) in domains {
        for mx in &domain.mail_servers {
            match mail_servers.get_mut(mx) {
                Some(server) => server.fold_classification(domain.classification),
                None => warn!("Domain {name} refers to unknown mail server {mx}"),
            }
        }
    }

    debug!(
        "Aggregated {} mail servers, {} classified",
        mail_servers.len(),
        mail_servers
            .values()
            .filter(|server| server.classification() != Classification::Unknown)
            .count()
    );
}

//! Export of the store as a denormalized snapshot.
//!
//! The snapshot adds two projections to the normalized store:
//! - **services**: domains, mail servers and addresses per inferred provider
//! - **hosts**: services, domains and mail servers per address
//!
//! Both are rebuilt from scratch on every export and every list is sorted,
//! so exporting an unchanged store is byte-for-byte reproducible.

mod builder;
mod types;
mod writer;

pub use builder::build_snapshot;
pub use types::{Domain, Host, MailServer, Service, Snapshot};
pub(crate) use writer::IgnoreBrokenPipe;
pub use writer::{open_output, snapshot_to_vec, write_snapshot};

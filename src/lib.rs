//! fakedomain library: MX-based classification of mail domains.
//!
//! Domains are resolved to their mail servers and addresses once, and
//! classifications known for some domains (disposable, regular, alias, dead)
//! are propagated to new domains sharing that infrastructure. The store can
//! be exported as a deterministic snapshot with per-service and per-address
//! cross references.
//!
//! # Example
//!
//! ```no_run
//! use fakedomain::{resolve, update_classifications, Classification, DomainStore, StaticDns};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let dns = StaticDns::new()
//!     .with_mx("temp.io", &["mx.temp.io"])
//!     .with_mx("trash.io", &["mx.temp.io"])
//!     .with_addresses("mx.temp.io", &["10.0.0.1"]);
//!
//! let mut store = DomainStore::new();
//! fakedomain::enter(&mut store, &dns, "temp.io", None, Classification::Disposable).await;
//! update_classifications(&mut store);
//!
//! let record = resolve(&mut store, &dns, "trash.io").await;
//! assert_eq!(record.classification, Classification::Disposable);
//! # }
//! ```
//!
//! # Requirements
//!
//! Lookups are async and need a Tokio runtime; a current-thread runtime is
//! enough since batches are processed one line at a time.

pub mod aggregate;
pub mod app;
pub mod batch;
pub mod classification;
pub mod config;
pub mod dns;
pub mod error_handling;
pub mod export;
pub mod initialization;
pub mod resolve;
pub mod store;
pub mod whois;
pub mod xref;

// Re-export public API
pub use aggregate::update_classifications;
pub use app::{parse_commands, Command, Session};
pub use classification::{Classification, Heuristic};
pub use config::{LogFormat, LogLevel, Opt};
pub use dns::{DnsGateway, StaticDns, SystemDns};
pub use error_handling::{CommandError, DnsError, InitializationError, StoreError, WhoisError};
pub use export::{build_snapshot, Snapshot};
pub use resolve::{enter, resolve};
pub use store::{DomainRecord, DomainStore, JsonFileStore, MailServerRecord, StoreBackend};
pub use whois::{ServiceWhois, WhoisGateway, WhoisRecord};

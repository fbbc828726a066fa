//! Command session: one store, executed against a command chain.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::{debug, info, warn};

use crate::aggregate::update_classifications;
use crate::batch::{plain_domain, LineSource, ServiceContext};
use crate::classification::Classification;
use crate::config::STDIO_MARKER;
use crate::dns::DnsGateway;
use crate::export::{build_snapshot, open_output, write_snapshot, IgnoreBrokenPipe};
use crate::resolve::{enter, resolve};
use crate::store::{normalize_name, DomainStore, JsonFileStore, StoreBackend};
use crate::whois::{lookup_organization, WhoisGateway};

use super::commands::Command;
use super::statistics::BatchStats;

/// State shared by the commands of one chain.
///
/// The store is loaded when the session opens. Commands that change it mark
/// the session dirty; [`Session::run`] saves a dirty store once the chain
/// is done.
pub struct Session<D, W> {
    store: DomainStore,
    backend: JsonFileStore,
    dns: D,
    whois: W,
    out: String,
    report: Box<dyn Write>,
    dirty: bool,
}

impl<D: DnsGateway, W: WhoisGateway> Session<D, W> {
    /// Opens a session on the store at `db`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store file exists but cannot be read.
    pub fn open(db: impl Into<PathBuf>, dns: D, whois: W) -> Result<Self> {
        let backend = JsonFileStore::new(db);
        let store = backend
            .load()
            .with_context(|| format!("Failed to load store {}", backend.path().display()))?;
        Ok(Session {
            store,
            backend,
            dns,
            whois,
            out: STDIO_MARKER.to_string(),
            report: Box::new(IgnoreBrokenPipe::new(io::stdout())),
            dirty: false,
        })
    }

    /// Sets the initial export destination (`-` for stdout).
    pub fn with_out(mut self, out: impl Into<String>) -> Self {
        self.out = out.into();
        self
    }

    /// Sends query results, disposable dumps and WHOIS lines to `report`
    /// instead of stdout.
    pub fn with_report(mut self, report: Box<dyn Write>) -> Self {
        self.report = report;
        self
    }

    pub fn store(&self) -> &DomainStore {
        &self.store
    }

    pub fn db_path(&self) -> &std::path::Path {
        self.backend.path()
    }

    /// Whether the store holds changes not yet written.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Executes `commands` left to right, then saves a dirty store.
    ///
    /// # Errors
    ///
    /// Stops at the first failing command. Store I/O failures, unreadable
    /// batch files and report write failures are errors; DNS and WHOIS
    /// failures are not.
    pub async fn run(&mut self, commands: &[Command]) -> Result<()> {
        for command in commands {
            debug!("Running {}", command);
            self.execute(command)
                .await
                .with_context(|| format!("Command '{}' failed", command))?;
        }

        if self.dirty {
            self.store_db()?;
        }
        Ok(())
    }

    /// Executes one command.
    pub async fn execute(&mut self, command: &Command) -> Result<()> {
        match command {
            Command::Query(domain) => self.query(domain).await,
            Command::Classify(file) => self.classify(file).await,
            Command::Load(file) => self.load(file).await,
            Command::LoadClassified {
                classification,
                file,
            } => self.load_classified(file, *classification).await,
            Command::Reset => {
                self.reset();
                Ok(())
            }
            Command::DumpDisposables => self.dump_disposables(),
            Command::UseDb(path) => self.use_db(path.clone()),
            Command::LoadDb => self.load_db(),
            Command::StoreDb => self.store_db(),
            Command::Out(path) => {
                self.out = path.clone();
                Ok(())
            }
            Command::Whois(file) => self.whois(file).await,
        }
    }

    /// Resolves one domain and reports its record.
    pub async fn query(&mut self, domain: &str) -> Result<()> {
        let name = normalize_name(domain);
        if name.is_empty() {
            warn!("Skipping empty domain name {:?}", domain);
            return Ok(());
        }
        let was_known = self.store.contains_domain(&name);
        let record = resolve(&mut self.store, &self.dns, &name).await;
        self.dirty |= !was_known;

        writeln!(self.report, "{}: {}", name, record)?;
        self.report.flush()?;
        Ok(())
    }

    /// Resolves a batch into the store and writes a standalone report of
    /// just those domains to the current destination.
    pub async fn classify(&mut self, file: &str) -> Result<()> {
        let mut lines = LineSource::open(file).await?;
        let mut stats = BatchStats::new();
        let mut batch = Vec::new();

        while let Some(line) = lines.next_line().await? {
            stats.line();
            let Some(domain) = plain_domain(&line) else {
                stats.skip();
                continue;
            };

            let was_known = self.store.contains_domain(&domain);
            let record = resolve(&mut self.store, &self.dns, &domain).await;
            self.dirty |= !was_known;
            info!("{}: {}", domain, record);
            stats.record(&record, was_known);
            batch.push(domain);
        }
        stats.log_summary(&format!("classify {}", file));

        let mut scratch = self.scratch_store(&batch);
        update_classifications(&mut scratch);

        let snapshot = build_snapshot(&scratch);
        let writer = open_output(&self.out)
            .with_context(|| format!("Failed to open report destination {}", self.out))?;
        write_snapshot(writer, &snapshot)?;
        info!(
            "Wrote classification of {} domains to {}",
            scratch.domain_count(),
            self.out
        );
        Ok(())
    }

    /// Copies `domains` and the mail servers they use into a fresh store.
    fn scratch_store(&self, domains: &[String]) -> DomainStore {
        let mut scratch = DomainStore::new();
        for name in domains {
            let Some(record) = self.store.domain(name) else {
                continue;
            };
            for mx in &record.mail_servers {
                if let Some(server) = self.store.mail_server(mx) {
                    scratch.insert_mail_server(mx.clone(), server.clone());
                }
            }
            scratch.insert_domain(name.clone(), record.clone());
        }
        scratch
    }

    /// Resolves a batch into the store, guessing classifications.
    pub async fn load(&mut self, file: &str) -> Result<()> {
        let mut lines = LineSource::open(file).await?;
        let mut stats = BatchStats::new();

        while let Some(line) = lines.next_line().await? {
            stats.line();
            let Some(domain) = plain_domain(&line) else {
                stats.skip();
                continue;
            };

            let was_known = self.store.contains_domain(&domain);
            let record = resolve(&mut self.store, &self.dns, &domain).await;
            info!("{}: {}", domain, record);
            stats.record(&record, was_known);
        }

        update_classifications(&mut self.store);
        self.dirty = true;
        stats.log_summary(&format!("load {}", file));
        Ok(())
    }

    /// Enters a batch of domains with a known classification, then saves.
    ///
    /// The store is aggregated and saved even if reading the batch fails
    /// part-way, so the domains entered so far are kept.
    pub async fn load_classified(
        &mut self,
        file: &str,
        classification: Classification,
    ) -> Result<()> {
        let mut stats = BatchStats::new();
        let outcome = self
            .enter_batch(file, classification, &mut stats)
            .await;

        update_classifications(&mut self.store);
        self.dirty = true;
        stats.log_summary(&format!(
            "load-{} {}",
            classification.as_ref().to_ascii_lowercase(),
            file
        ));
        self.store_db()?;
        outcome
    }

    async fn enter_batch(
        &mut self,
        file: &str,
        classification: Classification,
        stats: &mut BatchStats,
    ) -> Result<()> {
        let mut lines = LineSource::open(file).await?;
        let mut context = ServiceContext::new();

        while let Some(line) = lines.next_line().await? {
            stats.line();
            let Some(entry) = context.feed(&line) else {
                stats.skip();
                continue;
            };

            let was_known = self.store.contains_domain(&entry.domain);
            let record = enter(
                &mut self.store,
                &self.dns,
                &entry.domain,
                entry.service,
                classification,
            )
            .await;
            if !was_known {
                info!("{}: {}", entry.domain, record);
            }
            stats.record(&record, was_known);
        }
        Ok(())
    }

    /// Drops every domain and mail server.
    pub fn reset(&mut self) {
        info!(
            "Resetting store ({} domains, {} mail servers)",
            self.store.domain_count(),
            self.store.mail_server_count()
        );
        self.store.reset();
        self.dirty = true;
    }

    /// Reports all disposable domains, one per line, sorted.
    pub fn dump_disposables(&mut self) -> Result<()> {
        for domain in self.store.disposables() {
            writeln!(self.report, "{}", domain)?;
        }
        self.report.flush()?;
        Ok(())
    }

    /// Switches the store file without reading it.
    ///
    /// A dirty store is first written to the file it came from.
    pub fn use_db(&mut self, path: PathBuf) -> Result<()> {
        if self.dirty {
            self.store_db()?;
        }
        info!("Using store {}", path.display());
        self.backend = JsonFileStore::new(path);
        Ok(())
    }

    /// Replaces the in-memory store with the store file's content.
    pub fn load_db(&mut self) -> Result<()> {
        self.store = self
            .backend
            .load()
            .with_context(|| format!("Failed to load store {}", self.backend.path().display()))?;
        self.dirty = false;
        Ok(())
    }

    /// Writes the store file.
    pub fn store_db(&mut self) -> Result<()> {
        self.backend
            .save(&self.store)
            .with_context(|| format!("Failed to save store {}", self.backend.path().display()))?;
        self.dirty = false;
        Ok(())
    }

    /// Reports `domain<TAB>registrant organization` for every domain of a batch.
    pub async fn whois(&mut self, file: &str) -> Result<()> {
        let mut lines = LineSource::open(file).await?;
        while let Some(line) = lines.next_line().await? {
            let Some(domain) = plain_domain(&line) else {
                continue;
            };
            let organization = lookup_organization(&self.whois, &domain).await;
            writeln!(self.report, "{}\t{}", domain, organization)?;
        }
        self.report.flush()?;
        Ok(())
    }
}

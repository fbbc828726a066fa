//! Batch input.
//!
//! Batches are newline-delimited domain lists read from a file or, for the
//! name `-`, from standard input. Two line grammars exist:
//! - plain lists (`classify`, `load`, `whois`): `#` lines and blank lines are
//!   skipped, every other line is one domain;
//! - classified lists (`load-<classification>`): a `#` line sets the service
//!   of the domains that follow (`#` alone clears it), a blank line also
//!   clears it.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

use crate::config::{SERVICE_MARKER, STDIO_MARKER};
use crate::store::normalize_name;

/// Lines of a batch input.
pub enum LineSource {
    /// Lines from a file
    File(Lines<BufReader<tokio::fs::File>>),
    /// Lines from stdin
    Stdin(Lines<BufReader<tokio::io::Stdin>>),
}

impl LineSource {
    /// Opens `name`, or standard input for `-`.
    pub async fn open(name: &str) -> Result<Self> {
        if name == STDIO_MARKER {
            return Ok(LineSource::Stdin(BufReader::new(tokio::io::stdin()).lines()));
        }
        let file = tokio::fs::File::open(Path::new(name))
            .await
            .with_context(|| format!("Failed to open batch file {}", name))?;
        Ok(LineSource::File(BufReader::new(file).lines()))
    }

    /// Returns `Ok(None)` at end of input.
    pub async fn next_line(&mut self) -> std::io::Result<Option<String>> {
        match self {
            LineSource::File(lines) => lines.next_line().await,
            LineSource::Stdin(lines) => lines.next_line().await,
        }
    }
}

/// Domain named by a plain-list line, if any.
pub fn plain_domain(line: &str) -> Option<String> {
    if line.starts_with(SERVICE_MARKER) {
        return None;
    }
    let domain = normalize_name(line);
    (!domain.is_empty()).then_some(domain)
}

/// One domain of a classified list together with its service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEntry {
    pub domain: String,
    pub service: Option<String>,
}

/// Tracks the current service while reading a classified list.
#[derive(Debug, Default)]
pub struct ServiceContext {
    current: Option<String>,
}

impl ServiceContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Consumes one line; returns the domain it names, if any.
    pub fn feed(&mut self, line: &str) -> Option<ServiceEntry> {
        if let Some(service) = line.strip_prefix(SERVICE_MARKER) {
            let service = service.trim();
            self.current = (!service.is_empty()).then(|| service.to_string());
            return None;
        }

        let domain = normalize_name(line);
        if domain.is_empty() {
            self.current = None;
            return None;
        }

        Some(ServiceEntry {
            domain,
            service: self.current.clone(),
        })
    }
}

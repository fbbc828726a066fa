//! Batch statistics.

use std::collections::HashMap;

use log::info;
use strum::IntoEnumIterator;

use crate::classification::Classification;
use crate::store::DomainRecord;

/// Counters for one batch.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchStats {
    /// Lines read from the input
    pub lines: usize,
    /// Comment, service and blank lines
    pub skipped: usize,
    /// Domains already in the store before the batch
    pub known: usize,
    /// Domains resolved from DNS during the batch
    pub resolved: usize,
    by_classification: HashMap<Classification, usize>,
}

impl BatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self) {
        self.lines += 1;
    }

    pub fn skip(&mut self) {
        self.skipped += 1;
    }

    /// Counts a processed domain under its resulting classification.
    pub fn record(&mut self, record: &DomainRecord, was_known: bool) {
        if was_known {
            self.known += 1;
        } else {
            self.resolved += 1;
        }
        *self
            .by_classification
            .entry(record.classification)
            .or_insert(0) += 1;
    }

    pub fn count(&self, classification: Classification) -> usize {
        self.by_classification
            .get(&classification)
            .copied()
            .unwrap_or(0)
    }

    pub fn domains(&self) -> usize {
        self.known + self.resolved
    }

    /// Logs the counters, one line per classification seen.
    pub fn log_summary(&self, batch: &str) {
        info!(
            "{}: {} lines, {} skipped, {} domains ({} known, {} resolved)",
            batch,
            self.lines,
            self.skipped,
            self.domains(),
            self.known,
            self.resolved
        );
        for classification in Classification::iter() {
            let count = self.count(classification);
            if count > 0 {
                info!("   {}: {}", classification, count);
            }
        }
    }
}

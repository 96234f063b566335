//! Aggregation model: per-user endpoint windows + global sequence counts.
//!
//! For every accepted record:
//! 1) get-or-insert the user's window and push the endpoint to its front
//! 2) once the window is full, snapshot it as a key and bump its count
//! 3) move `max_sequence` only when a key's count is strictly greater, so the
//!    earliest key to reach the top count keeps the title on ties
//!
//! The aggregator never prints. Skipped lines and leader changes are reported
//! through an `IngestObserver` the caller may plug in.

pub mod key;
pub mod result;
pub mod window;

pub use key::SequenceKey;
pub use result::{AggregationResult, FrequencyTable};
pub use window::UserWindow;

use crate::config::AggregatorConfig;
use crate::log::{LogRecord, ParseError, parse_line};
use std::collections::BTreeMap;

/// Diagnostics hook. Every method has a no-op default.
pub trait IngestObserver {
    /// `line_no` is 1-based over everything ingested so far.
    fn on_skip(&mut self, _line_no: u64, _error: &ParseError) {}

    fn on_new_max(&mut self, _key: &SequenceKey, _count: u64) {}
}

impl IngestObserver for () {}

impl<O: IngestObserver + ?Sized> IngestObserver for &mut O {
    fn on_skip(&mut self, line_no: u64, error: &ParseError) {
        (**self).on_skip(line_no, error)
    }

    fn on_new_max(&mut self, key: &SequenceKey, count: u64) {
        (**self).on_new_max(key, count)
    }
}

#[derive(Debug)]
pub struct SequenceAggregator<O = ()> {
    config: AggregatorConfig,
    user_windows: BTreeMap<String, UserWindow>,
    frequency_table: FrequencyTable,
    max_sequence: Option<SequenceKey>,
    records: u64,
    skipped: u64,
    observer: O,
}

impl SequenceAggregator<()> {
    pub fn new(config: AggregatorConfig) -> Self {
        Self::with_observer(config, ())
    }
}

impl<O: IngestObserver> SequenceAggregator<O> {
    pub fn with_observer(config: AggregatorConfig, observer: O) -> Self {
        Self {
            config,
            user_windows: BTreeMap::new(),
            frequency_table: FrequencyTable::new(),
            max_sequence: None,
            records: 0,
            skipped: 0,
            observer,
        }
    }

    /// Apply one parsed record.
    pub fn update(&mut self, record: &LogRecord) {
        self.records += 1;

        let seqlen = self.config.seqlen;
        let window = self
            .user_windows
            .entry(record.user().to_string())
            .or_insert_with(|| UserWindow::new(seqlen));
        window.push(record.endpoint().to_string());

        let Some(key) = window.key(self.config.order) else {
            return;
        };

        let count = {
            let c = self.frequency_table.entry(key.clone()).or_insert(0);
            *c += 1;
            *c
        };

        let leads = match &self.max_sequence {
            None => true,
            Some(max) => count > self.frequency_table.get(max).copied().unwrap_or(0),
        };
        if leads {
            self.observer.on_new_max(&key, count);
            self.max_sequence = Some(key);
        }
    }

    /// Parse and apply one raw line. A malformed line is counted, reported to
    /// the observer, and otherwise leaves the state untouched.
    pub fn ingest_line(&mut self, line: impl AsRef<[u8]>) -> Result<(), ParseError> {
        match parse_line(line, &self.config.delimiter) {
            Ok(record) => {
                self.update(&record);
                Ok(())
            }
            Err(err) => {
                self.skipped += 1;
                let line_no = self.records + self.skipped;
                self.observer.on_skip(line_no, &err);
                Err(err)
            }
        }
    }

    /// Consume `source` to exhaustion. Unbounded sources are fine as long as
    /// the caller bounds them (e.g. `Iterator::take`).
    pub fn ingest<I>(mut self, source: I) -> AggregationResult
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        for line in source {
            let _ = self.ingest_line(line);
        }
        self.finish()
    }

    pub fn ingest_records<I>(mut self, records: I) -> AggregationResult
    where
        I: IntoIterator<Item = LogRecord>,
    {
        for record in records {
            self.update(&record);
        }
        self.finish()
    }

    /// Running view of the state so far.
    pub fn snapshot(&self) -> AggregationResult {
        AggregationResult {
            user_windows: self.user_windows.clone(),
            frequency_table: self.frequency_table.clone(),
            max_sequence: self.max_sequence.clone(),
            records: self.records,
            skipped: self.skipped,
        }
    }

    pub fn finish(self) -> AggregationResult {
        AggregationResult {
            user_windows: self.user_windows,
            frequency_table: self.frequency_table,
            max_sequence: self.max_sequence,
            records: self.records,
            skipped: self.skipped,
        }
    }
}

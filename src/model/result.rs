use crate::model::{SequenceKey, UserWindow};
use std::collections::BTreeMap;

/// Global count of how often each sequence key was observed.
pub type FrequencyTable = BTreeMap<SequenceKey, u64>;

/// Outcome of an aggregation run (or a snapshot of one in progress).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AggregationResult {
    pub user_windows: BTreeMap<String, UserWindow>,
    pub frequency_table: FrequencyTable,

    /// Earliest key to reach the highest count; `None` until any window fills.
    pub max_sequence: Option<SequenceKey>,

    /// Lines accepted into the aggregation.
    pub records: u64,

    /// Lines rejected by the parser.
    pub skipped: u64,
}

impl AggregationResult {
    pub fn count(&self, key: &SequenceKey) -> u64 {
        self.frequency_table.get(key).copied().unwrap_or(0)
    }

    pub fn max_count(&self) -> u64 {
        self.max_sequence.as_ref().map(|k| self.count(k)).unwrap_or(0)
    }

    /// The winning sequence and its count, or `None` when no user visited
    /// enough endpoints (insufficient data, not an error).
    pub fn winner(&self) -> Option<(&SequenceKey, u64)> {
        self.max_sequence.as_ref().map(|k| (k, self.count(k)))
    }

    /// Up to `n` keys ranked by count desc, then key asc.
    pub fn top(&self, n: usize) -> Vec<(&SequenceKey, u64)> {
        let mut ranked: Vec<(&SequenceKey, u64)> =
            self.frequency_table.iter().map(|(k, c)| (k, *c)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(n);
        ranked
    }

    pub fn lines_seen(&self) -> u64 {
        self.records + self.skipped
    }
}

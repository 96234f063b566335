use crate::config::{AggregatorConfig, KeyOrder};
use crate::model::{AggregationResult, SequenceKey};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceView {
    pub endpoints: Vec<String>,
    pub count: u64,
}

impl SequenceView {
    fn new(key: &SequenceKey, count: u64) -> Self {
        Self {
            endpoints: key.endpoints().to_vec(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TotalsView {
    pub lines: u64,
    pub records: u64,
    pub skipped: u64,
    pub users: usize,
    pub distinct_sequences: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportView {
    pub seqlen: usize,
    pub order: KeyOrder,
    pub totals: TotalsView,

    /// None means insufficient data: no user filled a window.
    pub winner: Option<SequenceView>,

    /// Ranked by count desc, then endpoints asc. Empty unless requested.
    pub top: Vec<SequenceView>,
}

pub fn build_report_view(
    result: &AggregationResult,
    config: &AggregatorConfig,
    top_n: usize,
) -> ReportView {
    ReportView {
        seqlen: config.seqlen.get(),
        order: config.order,
        totals: TotalsView {
            lines: result.lines_seen(),
            records: result.records,
            skipped: result.skipped,
            users: result.user_windows.len(),
            distinct_sequences: result.frequency_table.len(),
        },
        winner: result.winner().map(|(k, c)| SequenceView::new(k, c)),
        top: result
            .top(top_n)
            .into_iter()
            .map(|(k, c)| SequenceView::new(k, c))
            .collect(),
    }
}

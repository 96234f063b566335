//! Reporting: turn an `AggregationResult` into console text or JSON.

pub mod json;
pub mod text;
pub mod view;

pub use json::render_json_report;
pub use text::render_text_report;
pub use view::{ReportView, SequenceView, TotalsView, build_report_view};

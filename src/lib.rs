//! Streaming detection of the most frequent endpoint sequence visited by a
//! single user in an access log.
//!
//! raw line -> `log::parse_line` -> `LogRecord` -> `model::SequenceAggregator`
//! -> `AggregationResult` -> `render`

pub mod config;
pub mod diagnostics;
pub mod generate;
pub mod log;
pub mod model;
pub mod render;

pub type Result<T> = anyhow::Result<T>;

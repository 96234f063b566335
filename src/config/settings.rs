//! Aggregator settings.
//!
//! JSON shape (every field optional):
//! {
//!   "seqlen": 3,                  // endpoints per tracked sequence
//!   "delimiter": " : ",           // field separator
//!   "delimiter_regex": false,     // treat delimiter as a regex
//!   "order": "chronological"      // or "most-recent-first"
//! }
//!
//! CLI flags are layered on top with `RawConfig::merge`, then the result is
//! validated once with `validate_and_build` before any line is read.

use crate::Result;
use crate::config::Delimiter;
use crate::config::delimiter::DEFAULT_DELIMITER;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroUsize;
use thiserror::Error;

pub const DEFAULT_SEQLEN: NonZeroUsize = NonZeroUsize::new(3).unwrap();

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("seqlen must be a positive integer, got {0}")]
    NonPositiveSeqlen(i64),

    #[error("seqlen {0} does not fit in memory on this platform")]
    SeqlenTooLarge(i64),

    #[error("delimiter cannot be empty")]
    EmptyDelimiter,

    #[error("invalid delimiter pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("delimiter pattern {0:?} matches the empty string")]
    PatternMatchesEmpty(String),

    #[error("malformed rate must be within [0, 1], got {0}")]
    InvalidMalformedRate(f64),

    #[error("delimiter {0:?} can occur inside a generated field")]
    DelimiterInFields(String),
}

/// Which physical order of a window forms its sequence key.
///
/// Windows insert at the front (most recent first). `Chronological` reads
/// them back to front, so visiting /a then /b then /c yields (/a, /b, /c).
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum KeyOrder {
    #[default]
    Chronological,
    MostRecentFirst,
}

/// Raw settings as they appear in a config file or on the command line.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawConfig {
    pub seqlen: Option<i64>,
    pub delimiter: Option<String>,
    pub delimiter_regex: Option<bool>,
    pub order: Option<KeyOrder>,
}

impl RawConfig {
    pub fn from_json_file(path: &str) -> Result<Self> {
        let text =
            fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
        serde_json::from_str(&text).with_context(|| format!("parse config file {}", path))
    }

    /// Layer `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: RawConfig) -> RawConfig {
        RawConfig {
            seqlen: overrides.seqlen.or(self.seqlen),
            delimiter: overrides.delimiter.or(self.delimiter),
            delimiter_regex: overrides.delimiter_regex.or(self.delimiter_regex),
            order: overrides.order.or(self.order),
        }
    }

    pub fn validate_and_build(&self) -> std::result::Result<AggregatorConfig, ConfigError> {
        let seqlen = match self.seqlen {
            None => DEFAULT_SEQLEN,
            Some(n) if n <= 0 => return Err(ConfigError::NonPositiveSeqlen(n)),
            Some(n) => usize::try_from(n)
                .ok()
                .and_then(NonZeroUsize::new)
                .ok_or(ConfigError::SeqlenTooLarge(n))?,
        };

        let raw_delimiter = self.delimiter.as_deref().unwrap_or(DEFAULT_DELIMITER);
        let delimiter = if self.delimiter_regex.unwrap_or(false) {
            Delimiter::pattern(raw_delimiter)?
        } else {
            Delimiter::literal(raw_delimiter)?
        };

        Ok(AggregatorConfig {
            seqlen,
            delimiter,
            order: self.order.unwrap_or_default(),
        })
    }
}

/// Validated configuration; an aggregator built from it cannot fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorConfig {
    pub seqlen: NonZeroUsize,
    pub delimiter: Delimiter,
    pub order: KeyOrder,
}

impl AggregatorConfig {
    pub fn new(seqlen: i64) -> std::result::Result<Self, ConfigError> {
        RawConfig {
            seqlen: Some(seqlen),
            ..RawConfig::default()
        }
        .validate_and_build()
    }

    pub fn with_order(mut self, order: KeyOrder) -> Self {
        self.order = order;
        self
    }
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            seqlen: DEFAULT_SEQLEN,
            delimiter: Delimiter::default(),
            order: KeyOrder::default(),
        }
    }
}

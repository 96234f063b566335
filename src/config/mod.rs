//! Configuration layer: serde-friendly raw settings + validated in-memory config.
//!
//! Kept separate from parsing and aggregation. It owns:
//! - Delimiter (literal or regex field separator)
//! - KeyOrder (how a window is read into a sequence key)
//! - RawConfig / AggregatorConfig (JSON file + CLI overrides, validated eagerly)

pub mod delimiter;
pub mod settings;

pub use delimiter::Delimiter;
pub use settings::{AggregatorConfig, ConfigError, KeyOrder, RawConfig};

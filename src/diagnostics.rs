//! Logging setup and the tracing-backed ingest observer.

use crate::log::ParseError;
use crate::model::{IngestObserver, SequenceKey};

use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Install a stderr fmt subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: u8) -> crate::Result<()> {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Forwards aggregation diagnostics to `tracing` and counts leader changes.
#[derive(Debug, Default)]
pub struct TracingObserver {
    pub leader_changes: u64,
}

impl IngestObserver for TracingObserver {
    fn on_skip(&mut self, line_no: u64, error: &ParseError) {
        warn!(line = line_no, reason = %error.kind, "skipping malformed log line");
    }

    fn on_new_max(&mut self, key: &SequenceKey, count: u64) {
        self.leader_changes += 1;
        debug!(sequence = %key, count, "new most frequent sequence");
    }
}

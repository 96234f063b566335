//! Synthetic access-log source for demos and tests.
//!
//! Emits lines shaped like `17:44:31.000123 : Eric Idle : /home : GET : 200`,
//! optionally salted with malformed entries (wrong field counts, invalid
//! UTF-8) so the parser's failure path gets exercised.

use crate::config::ConfigError;
use crate::config::delimiter::DEFAULT_DELIMITER;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::thread;
use std::time::Duration;

pub const USERS: [&str; 7] = [
    "Graham Chapman",
    "John Cleese",
    "Eric Idle",
    "Terry Gilliam",
    "Michael Palin",
    "Terry Jones",
    "Ian Davidson",
];

pub const ENDPOINTS: [&str; 7] = [
    "/",
    "/login",
    "/auth",
    "/home",
    "/account",
    "/logout",
    "/register",
];

const METHODS: [&str; 4] = ["GET", "POST", "PUT", "DELETE"];
const STATUS_CODES: [u16; 6] = [200, 201, 204, 302, 404, 500];

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Lines to emit; `None` runs forever.
    pub count: Option<u64>,
    pub seed: Option<u64>,
    /// Probability in [0, 1] that a line is replaced by a malformed one.
    pub malformed_rate: f64,
    /// Sleep before each line.
    pub pace: Option<Duration>,
    pub delimiter: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            count: Some(1000),
            seed: None,
            malformed_rate: 0.0,
            pace: None,
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

pub struct LogLineGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    emitted: u64,
}

impl LogLineGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        if !(0.0..=1.0).contains(&config.malformed_rate) {
            return Err(ConfigError::InvalidMalformedRate(config.malformed_rate));
        }
        if config.delimiter.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        if may_occur_in_fields(&config.delimiter) {
            return Err(ConfigError::DelimiterInFields(config.delimiter));
        }
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            config,
            rng,
            emitted: 0,
        })
    }

    fn pick<T: Copy>(&mut self, pool: &[T]) -> T {
        pool[self.rng.random_range(0..pool.len())]
    }

    fn well_formed(&mut self) -> Vec<u8> {
        let timestamp = chrono::Local::now().format("%H:%M:%S%.6f").to_string();
        let user = self.pick(&USERS);
        let endpoint = self.pick(&ENDPOINTS);
        let method = self.pick(&METHODS);
        let status = self.pick(&STATUS_CODES).to_string();
        [timestamp.as_str(), user, endpoint, method, status.as_str()]
            .join(self.config.delimiter.as_str())
            .into_bytes()
    }

    fn malformed(&mut self) -> Vec<u8> {
        match self.rng.random_range(0..3) {
            // Too few fields.
            0 => {
                let user = self.pick(&USERS);
                let endpoint = self.pick(&ENDPOINTS);
                ["00:00:00.000000", user, endpoint]
                    .join(self.config.delimiter.as_str())
                    .into_bytes()
            }
            1 => {
                let mut line = self.well_formed();
                line.extend_from_slice(self.config.delimiter.as_bytes());
                line.extend_from_slice(b"extra");
                line
            }
            // Not text at all.
            _ => vec![0xff, 0xfe, 0xfd],
        }
    }
}

/// A delimiter found inside a user, endpoint, method or status, or made only
/// of timestamp characters, would change the field count of generated lines.
fn may_occur_in_fields(delimiter: &str) -> bool {
    let in_timestamp = delimiter
        .chars()
        .all(|c| c.is_ascii_digit() || c == ':' || c == '.');
    in_timestamp
        || USERS
            .iter()
            .chain(&ENDPOINTS)
            .chain(&METHODS)
            .any(|field| field.contains(delimiter))
        || STATUS_CODES
            .iter()
            .any(|code| code.to_string().contains(delimiter))
}

impl Iterator for LogLineGenerator {
    type Item = Vec<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.config.count.is_some_and(|n| self.emitted >= n) {
            return None;
        }
        if let Some(pace) = self.config.pace {
            thread::sleep(pace);
        }
        self.emitted += 1;

        let line = if self.rng.random_bool(self.config.malformed_rate) {
            self.malformed()
        } else {
            self.well_formed()
        };
        Some(line)
    }
}

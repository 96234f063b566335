//! Field separator used to split a log line.
//!
//! Example line with the default delimiter " : ":
//! 17:44:31.000123 : John Cleese : /login : GET : 200

use crate::config::ConfigError;
use regex::Regex;
use std::fmt;

pub const DEFAULT_DELIMITER: &str = " : ";

#[derive(Debug, Clone)]
pub enum Delimiter {
    Literal(String),
    Pattern(Regex),
}

impl Delimiter {
    pub fn literal(s: impl Into<String>) -> Result<Self, ConfigError> {
        let s = s.into();
        if s.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        Ok(Self::Literal(s))
    }

    /// Compile `pattern` as a regex separator. Patterns that can match the
    /// empty string are rejected, since they would split between every char.
    pub fn pattern(pattern: &str) -> Result<Self, ConfigError> {
        if pattern.is_empty() {
            return Err(ConfigError::EmptyDelimiter);
        }
        let re = Regex::new(pattern).map_err(|source| ConfigError::InvalidPattern {
            pattern: pattern.to_string(),
            source,
        })?;
        if re.is_match("") {
            return Err(ConfigError::PatternMatchesEmpty(pattern.to_string()));
        }
        Ok(Self::Pattern(re))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Literal(s) => s,
            Self::Pattern(re) => re.as_str(),
        }
    }

    pub fn is_pattern(&self) -> bool {
        matches!(self, Self::Pattern(_))
    }

    pub fn split<'a>(&self, line: &'a str) -> Vec<&'a str> {
        match self {
            Self::Literal(s) => line.split(s.as_str()).collect(),
            Self::Pattern(re) => re.split(line).collect(),
        }
    }
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::Literal(DEFAULT_DELIMITER.to_string())
    }
}

impl PartialEq for Delimiter {
    fn eq(&self, other: &Self) -> bool {
        self.is_pattern() == other.is_pattern() && self.as_str() == other.as_str()
    }
}

impl Eq for Delimiter {}

impl fmt::Display for Delimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(s) => write!(f, "{:?}", s),
            Self::Pattern(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

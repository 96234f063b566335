use crate::Result;
use crate::config::Delimiter;
use crate::log::row::{LogRecord, Method};

use anyhow::Context;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    #[error("expected 5 fields, found {found}")]
    MalformedLine { found: usize },

    #[error("line is not valid UTF-8 text")]
    NotText,

    #[error("unknown method {0:?}")]
    UnknownMethod(String),

    #[error("invalid status code {0:?}")]
    InvalidStatus(String),

    #[error("empty {0} field")]
    EmptyField(&'static str),
}

/// A line that could not become a `LogRecord`. Always recoverable: the
/// aggregator counts it and moves on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed log line: {kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
}

impl From<ParseErrorKind> for ParseError {
    fn from(kind: ParseErrorKind) -> Self {
        Self { kind }
    }
}

/// Parse one raw line into a `LogRecord`.
///
/// Expected fields, in order, separated by `delimiter`:
/// timestamp  user  endpoint  method  status
///
/// Example (delimiter " : "):
/// 17:44:31.000123 : Terry Jones : /account : POST : 201
pub fn parse_line(
    line: impl AsRef<[u8]>,
    delimiter: &Delimiter,
) -> std::result::Result<LogRecord, ParseError> {
    let text = std::str::from_utf8(line.as_ref()).map_err(|_| ParseErrorKind::NotText)?;
    let text = text.trim_end_matches(['\r', '\n']);

    let fields = delimiter.split(text);
    let [timestamp, user, endpoint, method, status] = fields[..] else {
        return Err(ParseErrorKind::MalformedLine {
            found: fields.len(),
        }
        .into());
    };

    let method =
        Method::from_token(method).ok_or_else(|| ParseErrorKind::UnknownMethod(method.into()))?;
    let status_code: u16 = status
        .trim()
        .parse()
        .map_err(|_| ParseErrorKind::InvalidStatus(status.into()))?;

    Ok(LogRecord::new(timestamp, user, endpoint, method, status_code)?)
}

/// Open a log source for line-by-line reading; "-" means stdin.
pub fn open_log(path: &str) -> Result<Box<dyn BufRead>> {
    if path == "-" {
        return Ok(Box::new(BufReader::new(io::stdin())));
    }
    let file = File::open(path).with_context(|| format!("open log file {}", path))?;
    Ok(Box::new(BufReader::new(file)))
}

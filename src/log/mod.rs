//! Access-log records and the line parser.

pub mod parse;
pub mod row;

pub use parse::{ParseError, ParseErrorKind, open_log, parse_line};
pub use row::{LogRecord, Method};

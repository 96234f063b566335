use crate::log::ParseErrorKind;
use std::fmt;

/// HTTP method of an access-log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub const ALL: [Method; 4] = [Method::Get, Method::Post, Method::Put, Method::Delete];

    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }

    /// Methods are matched exactly; "get" is not a method.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == token)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single access-log line, e.g.
/// `17:44:31.000123 : John Cleese : /login : GET : 200`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    timestamp: String,
    user: String,
    endpoint: String,
    method: Method,
    status_code: u16,
}

impl LogRecord {
    /// User and endpoint must be non-empty; they key the aggregation.
    pub fn new(
        timestamp: impl Into<String>,
        user: impl Into<String>,
        endpoint: impl Into<String>,
        method: Method,
        status_code: u16,
    ) -> Result<Self, ParseErrorKind> {
        let user = user.into();
        let endpoint = endpoint.into();
        if user.is_empty() {
            return Err(ParseErrorKind::EmptyField("user"));
        }
        if endpoint.is_empty() {
            return Err(ParseErrorKind::EmptyField("endpoint"));
        }
        Ok(Self {
            timestamp: timestamp.into(),
            user,
            endpoint,
            method,
            status_code,
        })
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn status_code(&self) -> u16 {
        self.status_code
    }
}

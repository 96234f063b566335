//! Sequence key: an ordered tuple of endpoints.
//!
//! Example: visiting /login, /auth, /home (seqlen 3, chronological order)
//! => SequenceKey(vec!["/login", "/auth", "/home"])
//!
//! Ordering is derived so keys can live in a BTreeMap and reports are stable.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SequenceKey(pub Vec<String>);

impl SequenceKey {
    pub fn endpoints(&self) -> &[String] {
        &self.0
    }
}

impl<S: Into<String>> FromIterator<S> for SequenceKey {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for SequenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" -> "))
    }
}

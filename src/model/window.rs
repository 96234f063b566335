use crate::config::KeyOrder;
use crate::model::SequenceKey;

use std::collections::VecDeque;
use std::num::NonZeroUsize;

/// Most recent endpoints visited by one user.
///
/// New visits go to the front; once `capacity` entries are held, each push
/// evicts the oldest entry from the back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserWindow {
    capacity: NonZeroUsize,
    entries: VecDeque<String>,
}

impl UserWindow {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity.get()),
        }
    }

    /// Record a visit. Returns the evicted endpoint, if any.
    pub fn push(&mut self, endpoint: String) -> Option<String> {
        let evicted = if self.is_full() {
            self.entries.pop_back()
        } else {
            None
        };
        self.entries.push_front(endpoint);
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity.get()
    }

    /// Most recent first.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Snapshot the window as a key; `None` until the window is full.
    pub fn key(&self, order: KeyOrder) -> Option<SequenceKey> {
        if !self.is_full() {
            return None;
        }
        let key: SequenceKey = match order {
            KeyOrder::Chronological => self.iter().rev().collect(),
            KeyOrder::MostRecentFirst => self.iter().collect(),
        };
        Some(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn window(cap: usize, visits: &[&str]) -> UserWindow {
        let mut w = UserWindow::new(NonZeroUsize::new(cap).unwrap());
        for v in visits {
            w.push(v.to_string());
        }
        w
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut w = window(3, &[]);
        for (i, e) in ["/a", "/b", "/c", "/d", "/e"].iter().enumerate() {
            let evicted = w.push(e.to_string());
            assert!(w.len() <= 3);
            assert_eq!(evicted.is_some(), i >= 3);
        }
        assert_eq!(w.iter().collect::<Vec<_>>(), vec!["/e", "/d", "/c"]);
    }

    #[test]
    fn key_requires_full_window() {
        assert_eq!(window(3, &["/a", "/b"]).key(KeyOrder::Chronological), None);
    }

    #[test]
    fn key_order_is_a_parameter() {
        let w = window(3, &["/a", "/b", "/c", "/d"]);
        assert_eq!(
            w.key(KeyOrder::Chronological),
            Some(SequenceKey::from_iter(["/b", "/c", "/d"]))
        );
        assert_eq!(
            w.key(KeyOrder::MostRecentFirst),
            Some(SequenceKey::from_iter(["/d", "/c", "/b"]))
        );
    }

    #[test]
    fn key_derivation_is_idempotent() {
        let w = window(2, &["/x", "/y"]);
        assert_eq!(w.key(KeyOrder::Chronological), w.key(KeyOrder::Chronological));
        assert_eq!(w.len(), 2);
    }
}

//! Deduplicated collection of located messages.
//!
//! ## Learning: Maps as Sets
//!
//! A `HashMap<Key, Value>` where the key is derived from the value gives
//! set semantics without requiring `Hash` on the value itself. Inserting
//! an already-present key is a no-op, which makes `insert` idempotent.

use std::collections::HashMap;
use std::collections::hash_map::Values;

use crate::{Category, LocatedMessage, Message, MessageKey, TextLocation};

/// An unordered set of `LocatedMessage`, keyed by full value.
///
/// Iteration order is unspecified. Use `sorted()` when a stable order
/// is needed for display.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticSet {
    entries: HashMap<MessageKey, LocatedMessage>,
}

impl DiagnosticSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a message at a location.
    ///
    /// Returns true if the set grew, false if an identical entry existed.
    pub fn insert(&mut self, location: TextLocation, message: Message) -> bool {
        self.insert_located(LocatedMessage::new(location, message))
    }

    /// Inserts an already anchored message.
    pub fn insert_located(&mut self, located: LocatedMessage) -> bool {
        let key = located.key();
        if self.entries.contains_key(&key) {
            return false;
        }
        self.entries.insert(key, located);
        true
    }

    /// Removes a message at a location.
    ///
    /// Returns true if an entry was removed.
    pub fn remove(&mut self, location: TextLocation, message: Message) -> bool {
        self.remove_located(&LocatedMessage::new(location, message))
    }

    /// Removes an anchored message.
    pub fn remove_located(&mut self, located: &LocatedMessage) -> bool {
        self.entries.remove(&located.key()).is_some()
    }

    /// Returns true if an identical entry is present.
    pub fn contains(&self, located: &LocatedMessage) -> bool {
        self.entries.contains_key(&located.key())
    }

    /// Iterates over all entries in unspecified order.
    ///
    /// Each call starts a fresh pass over the current contents.
    pub fn all(&self) -> Values<'_, MessageKey, LocatedMessage> {
        self.entries.values()
    }

    /// Iterates over entries anchored on a line (1-indexed).
    pub fn on_line(&self, line: usize) -> impl Iterator<Item = &LocatedMessage> {
        self.entries.values().filter(move |m| m.is_on_line(line))
    }

    /// Iterates over entries anchored exactly at a location.
    pub fn at(&self, location: TextLocation) -> impl Iterator<Item = &LocatedMessage> {
        self.entries
            .values()
            .filter(move |m| m.location == location)
    }

    /// Returns all entries ordered by location, then by key.
    pub fn sorted(&self) -> Vec<&LocatedMessage> {
        let mut entries: Vec<(&MessageKey, &LocatedMessage)> = self.entries.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter().map(|(_, m)| m).collect()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the set has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Tallies entries per category.
    pub fn counts(&self) -> CategoryCounts {
        let mut counts = CategoryCounts::default();
        for located in self.entries.values() {
            match located.entity.category() {
                Category::Live => counts.live += 1,
                Category::Error => counts.errors += 1,
                Category::Warning => counts.warnings += 1,
                Category::Informational => counts.informational += 1,
            }
        }
        counts
    }
}

impl PartialEq for DiagnosticSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.entries.keys().all(|k| other.entries.contains_key(k))
    }
}

impl Eq for DiagnosticSet {}

impl<'a> IntoIterator for &'a DiagnosticSet {
    type Item = &'a LocatedMessage;
    type IntoIter = Values<'a, MessageKey, LocatedMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.all()
    }
}

impl Extend<LocatedMessage> for DiagnosticSet {
    fn extend<I: IntoIterator<Item = LocatedMessage>>(&mut self, iter: I) {
        for located in iter {
            self.insert_located(located);
        }
    }
}

impl FromIterator<LocatedMessage> for DiagnosticSet {
    fn from_iter<I: IntoIterator<Item = LocatedMessage>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

/// Per-category entry counts, for status lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CategoryCounts {
    pub live: usize,
    pub errors: usize,
    pub warnings: usize,
    pub informational: usize,
}

impl CategoryCounts {
    pub fn total(&self) -> usize {
        self.live + self.errors + self.warnings + self.informational
    }
}

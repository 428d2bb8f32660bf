//! Append-only transcript of expression/result pairs.
//!
//! A [`Transcript`] is an immutable snapshot: [`Transcript::append`] returns a
//! new snapshot and leaves the receiver untouched, so an observer holding the
//! previous snapshot can tell whether anything changed with
//! [`Transcript::same_snapshot`].

use std::fmt::{self, Write as _};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::core::pipeline::ERROR_PREFIX;

/// Identifier of a transcript entry, used for stable list rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(u64);

impl EntryId {
    /// Wraps a raw id
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw id value
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues entry ids from the wall clock in milliseconds.
///
/// Two submissions inside the same millisecond (or a clock that steps
/// backwards) still get distinct, increasing ids.
#[derive(Debug, Default, Clone)]
pub struct EntryIdClock {
    last: Option<u64>,
}

impl EntryIdClock {
    /// Creates a clock that has not issued any id yet
    #[must_use]
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Issues the next id
    pub fn next_id(&mut self) -> EntryId {
        self.next_from(Self::now_millis())
    }

    /// Issues the next id given the current time in milliseconds
    pub fn next_from(&mut self, now_millis: u64) -> EntryId {
        let id = match self.last {
            Some(last) if now_millis <= last => last + 1,
            _ => now_millis,
        };
        self.last = Some(id);
        EntryId(id)
    }

    fn now_millis() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

/// One expression/result pair. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptEntry {
    id: EntryId,
    expression: String,
    result: String,
}

impl TranscriptEntry {
    /// Creates a new entry
    #[must_use]
    pub fn new(id: EntryId, expression: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            id,
            expression: expression.into(),
            result: result.into(),
        }
    }

    /// Entry id
    #[must_use]
    pub const fn id(&self) -> EntryId {
        self.id
    }

    /// The raw expression exactly as submitted
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// The display text of the result
    #[must_use]
    pub fn result(&self) -> &str {
        &self.result
    }

    /// Returns true if the result is an error line
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.result.starts_with(ERROR_PREFIX)
    }
}

/// Ordered, append-only sequence of entries
#[derive(Debug, Clone)]
pub struct Transcript {
    entries: Arc<[TranscriptEntry]>,
}

impl Default for Transcript {
    fn default() -> Self {
        Self {
            entries: Arc::new([]),
        }
    }
}

impl Transcript {
    /// Creates an empty transcript
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new snapshot with `entry` at the end
    #[must_use]
    pub fn append(&self, entry: TranscriptEntry) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.extend_from_slice(&self.entries);
        entries.push(entry);
        Self {
            entries: entries.into(),
        }
    }

    /// All entries in submission order
    #[must_use]
    pub fn all(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The newest entry
    #[must_use]
    pub fn last(&self) -> Option<&TranscriptEntry> {
        self.entries.last()
    }

    /// Iterates entries oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, TranscriptEntry> {
        self.entries.iter()
    }

    /// Returns true if both handles refer to the same snapshot
    #[must_use]
    pub fn same_snapshot(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.entries, &b.entries)
    }

    /// Serializes the entries as a JSON array
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&*self.entries)
    }

    /// Renders the transcript the way a terminal session would show it
    #[must_use]
    pub fn export_formatted(&self) -> String {
        let mut out = String::new();
        for entry in self.iter() {
            let _ = writeln!(out, ">>> {}", entry.expression);
            let _ = writeln!(out, "{}", entry.result);
        }
        out
    }
}

impl From<Vec<TranscriptEntry>> for Transcript {
    fn from(entries: Vec<TranscriptEntry>) -> Self {
        Self {
            entries: entries.into(),
        }
    }
}

impl<'a> IntoIterator for &'a Transcript {
    type Item = &'a TranscriptEntry;
    type IntoIter = std::slice::Iter<'a, TranscriptEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

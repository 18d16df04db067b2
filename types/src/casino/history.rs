use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{collections::VecDeque, fmt};

use super::{reel_line, Symbol, HISTORY_CAP};

/// Which game produced a history entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Slot,
    // Older saves tag the risk event as "rr".
    #[serde(alias = "rr")]
    Risk,
}

/// One resolved economic event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub change: i64,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Milliseconds since the unix epoch.
    pub ts: u64,
}

impl HistoryEntry {
    pub fn slot(symbols: &[Symbol], payout: u64, ts: u64) -> Self {
        Self {
            text: reel_line(symbols),
            change: i64::try_from(payout).unwrap_or(i64::MAX),
            kind: EntryKind::Slot,
            ts,
        }
    }

    pub fn risk(text: impl Into<String>, change: i64, ts: u64) -> Self {
        Self {
            text: text.into(),
            change,
            kind: EntryKind::Risk,
            ts,
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.change > 0 {
            write!(f, "{} +{}", self.text, self.change)
        } else {
            write!(f, "{} {}", self.text, self.change)
        }
    }
}

/// Bounded, chronologically ordered record of economic events.
///
/// Entries are kept oldest first. Once more than [HISTORY_CAP] entries have been
/// appended, the oldest ones are evicted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    cap: usize,
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::with_cap(HISTORY_CAP)
    }
}

impl HistoryLog {
    pub fn with_cap(cap: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(cap.min(HISTORY_CAP)),
            cap,
        }
    }

    /// Builds a log from stored entries (oldest first), keeping only the newest `cap`.
    pub fn from_entries(entries: Vec<HistoryEntry>, cap: usize) -> Self {
        let mut log = Self::with_cap(cap);
        log.entries.extend(entries);
        log.truncate();
        log
    }

    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        self.truncate();
    }

    fn truncate(&mut self) {
        while self.entries.len() > self.cap {
            self.entries.pop_front();
        }
    }

    /// All entries, oldest first.
    pub fn all(&self) -> impl DoubleEndedIterator<Item = &HistoryEntry> + ExactSizeIterator {
        self.entries.iter()
    }

    /// All entries, newest first (display order).
    pub fn newest_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for HistoryLog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.iter())
    }
}

impl<'de> Deserialize<'de> for HistoryLog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = Vec::<HistoryEntry>::deserialize(deserializer)?;
        Ok(Self::from_entries(entries, HISTORY_CAP))
    }
}

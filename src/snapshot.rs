// src/snapshot.rs

//! Dependency snapshots and staleness evaluation.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fingerprint::{self, FingerprintMode, ModTime};

/// One recorded dependency: a traced path plus both of its fingerprints.
///
/// `None` is the "file unreadable at fingerprint time" sentinel. The
/// staleness walk never matches it against anything (not even another
/// unreadable result), so a previously-unreadable file always reads as
/// changed. The derived `PartialEq` is structural and only serves
/// round-trip comparisons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyEntry {
    pub path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified: Option<ModTime>,
}

/// The ordered dependency set recorded for one traced execution.
///
/// Entries are insertion-ordered by first occurrence in the trace; the
/// recorder guarantees each path appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: Vec<DependencyEntry>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: DependencyEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[DependencyEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// True iff every entry's fresh fingerprint under `mode` matches the
/// stored one.
///
/// Short-circuits on the first stale entry, in stored order. A stored
/// `None` sentinel never matches, and neither does a fresh `Unreadable`.
/// An empty snapshot is vacuously up to date; "never recorded at all"
/// is the cache's tri-state lookup, not an empty snapshot.
pub fn is_up_to_date(snapshot: &Snapshot, mode: FingerprintMode) -> bool {
    for entry in snapshot.entries() {
        let fresh_matches = match mode {
            FingerprintMode::Content => {
                match (&entry.content, fingerprint::content_hash(&entry.path)) {
                    (Some(stored), Ok(fresh)) => *stored == fresh,
                    _ => false,
                }
            }
            FingerprintMode::ModTime => {
                match (entry.modified, fingerprint::mod_time(&entry.path)) {
                    (Some(stored), Ok(fresh)) => stored == fresh,
                    _ => false,
                }
            }
        };

        if !fresh_matches {
            debug!(path = ?entry.path, "stale dependency");
            return false;
        }
    }
    true
}

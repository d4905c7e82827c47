//! # History Log
//!
//! Linear snapshot history with a movable cursor.
//!
//! ## Design
//!
//! - Every committed change records a full snapshot of the root sequence
//! - Snapshots are shared (`Arc`) and never mutated after capture
//! - Undo/redo/jump only move the cursor; they never record anything
//! - Committing while the cursor is not at the tail discards the redo future
//! - Committing a tree equal to the snapshot at the cursor records nothing
//!
//! ```text
//! entries: [s0] [s1] [s2] [s3]
//!                     ^ cursor      undo → s1, redo → s3
//! commit(s4) here  →  [s0] [s1] [s2] [s4]
//! ```

use chrono::{DateTime, Utc};
use pagecraft_document::Element;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Shared, immutable copy of the root sequence
pub type Snapshot = Arc<Vec<Element>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HistoryConfig {
    /// Maximum retained entries (0 = unlimited)
    pub max_entries: usize,
}

/// One recorded state
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub id: u64,
    pub snapshot: Snapshot,
    pub timestamp: DateTime<Utc>,
}

/// Display label for the entry at `index`
pub fn entry_label(index: usize) -> String {
    if index == 0 {
        "Initial State".to_string()
    } else {
        format!("Change {index}")
    }
}

/// Linear undo/redo history
#[derive(Debug, Default)]
pub struct HistoryLog {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    config: HistoryConfig,
    next_id: u64,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::with_config(HistoryConfig::default())
    }

    pub fn with_config(config: HistoryConfig) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            config,
            next_id: 0,
        }
    }

    /// Record `snapshot` as the newest state
    ///
    /// Returns false when it equals the snapshot at the cursor and nothing
    /// was recorded.
    pub fn commit(&mut self, snapshot: Snapshot) -> bool {
        if let Some(current) = self.current() {
            if Arc::ptr_eq(current, &snapshot) || **current == *snapshot {
                debug!(cursor = self.cursor, "Snapshot unchanged, not recorded");
                return false;
            }
        }

        if !self.entries.is_empty() {
            let discarded = self.entries.len() - (self.cursor + 1);
            if discarded > 0 {
                debug!(discarded, "Discarding redo future");
            }
            self.entries.truncate(self.cursor + 1);
        }

        self.entries.push(HistoryEntry {
            id: self.next_id,
            snapshot,
            timestamp: Utc::now(),
        });
        self.next_id += 1;
        self.cursor = self.entries.len() - 1;
        self.evict();

        true
    }

    /// Drop the oldest entries past the retention cap
    fn evict(&mut self) {
        let max = self.config.max_entries;
        if max > 0 && self.entries.len() > max {
            let excess = self.entries.len() - max;
            self.entries.drain(..excess);
            self.cursor = self.cursor.saturating_sub(excess);
            debug!(evicted = excess, "History retention cap reached");
        }
    }

    /// Step back one entry
    pub fn undo(&mut self) -> Option<Snapshot> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.current().cloned()
    }

    /// Step forward one entry
    pub fn redo(&mut self) -> Option<Snapshot> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        self.current().cloned()
    }

    /// Move the cursor to `index`; `None` when out of range
    pub fn jump_to(&mut self, index: usize) -> Option<Snapshot> {
        if index >= self.entries.len() {
            debug!(index, len = self.entries.len(), "History jump out of range");
            return None;
        }
        self.cursor = index;
        self.current().cloned()
    }

    /// Snapshot at the cursor
    pub fn current(&self) -> Option<&Snapshot> {
        self.entries.get(self.cursor).map(|entry| &entry.snapshot)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn config(&self) -> HistoryConfig {
        self.config
    }

    /// Forget every entry
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }
}

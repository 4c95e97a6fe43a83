//! Navigation history for a single tab
//!
//! Classic browser semantics: appending after going back drops the forward
//! branch. Entries are stored behind an `Arc` so readers can hold a
//! [`HistorySnapshot`] while the owning tab keeps appending; writes copy the
//! list only when a snapshot is still alive.

use embedded_browser_core::NavigationEntry;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Ordered (title, url) list with a current position
#[derive(Debug, Clone, Default)]
pub struct NavigationHistory {
    entries: Arc<Vec<NavigationEntry>>,
    /// -1 when empty, otherwise within `0..entries.len()`
    index: isize,
}

/// Immutable view of the history at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub entries: Vec<NavigationEntry>,
    pub index: isize,
}

impl NavigationHistory {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Vec::new()),
            index: -1,
        }
    }

    /// Record a visit
    ///
    /// Returns false when `url` repeats the last entry (redundant load
    /// events), otherwise truncates any forward entries and appends.
    pub fn append(&mut self, title: &str, url: &str) -> bool {
        if self.entries.last().is_some_and(|last| last.url == url) {
            return false;
        }

        let keep = (self.index + 1) as usize;
        let entries = Arc::make_mut(&mut self.entries);
        entries.truncate(keep);
        entries.push(NavigationEntry::new(title, url));
        self.index = entries.len() as isize - 1;
        true
    }

    /// Step back one entry, `None` when already at the start
    pub fn back(&mut self) -> Option<&NavigationEntry> {
        if !self.can_go_back() {
            return None;
        }
        self.index -= 1;
        self.current()
    }

    /// Step forward one entry, `None` when already at the tail
    pub fn forward(&mut self) -> Option<&NavigationEntry> {
        if !self.can_go_forward() {
            return None;
        }
        self.index += 1;
        self.current()
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len() as isize
    }

    pub fn current(&self) -> Option<&NavigationEntry> {
        usize::try_from(self.index).ok().and_then(|i| self.entries.get(i))
    }

    pub fn entries(&self) -> &[NavigationEntry] {
        &self.entries
    }

    pub fn index(&self) -> isize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shared handle to the current entry list, no copy
    pub fn shared_entries(&self) -> Arc<Vec<NavigationEntry>> {
        self.entries.clone()
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            entries: self.entries.as_ref().clone(),
            index: self.index,
        }
    }
}

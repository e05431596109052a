//! The capped, newest-first calculation history.

use std::error::Error;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use tracing::{debug, warn};

use super::backend::{HistoryBackend, PersistenceError};
use super::entry::HistoryEntry;

/// Maximum number of entries kept.
pub const HISTORY_LIMIT: usize = 50;

/// Ordered history backed by durable storage.
///
/// The in-memory list is authoritative for the session. Storage failures
/// are logged and otherwise ignored so the calculator keeps working.
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    backend: Box<dyn HistoryBackend>,
}

impl HistoryStore {
    /// Create a store and load whatever the backend holds.
    pub fn open(backend: impl HistoryBackend + 'static) -> Self {
        let mut store = Self {
            entries: Vec::new(),
            backend: Box::new(backend),
        };
        store.entries = store.load();
        store
    }

    /// Read persisted history.
    ///
    /// Absent, unreadable or corrupt storage all yield an empty list.
    pub fn load(&self) -> Vec<HistoryEntry> {
        match self.try_load() {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = &e as &dyn Error, "Starting with empty history");
                Vec::new()
            }
        }
    }

    fn try_load(&self) -> Result<Vec<HistoryEntry>, PersistenceError> {
        let Some(contents) = self.backend.read()? else {
            return Ok(Vec::new());
        };
        let mut entries: Vec<HistoryEntry> =
            serde_json::from_str(&contents).map_err(PersistenceError::Corrupt)?;
        entries.truncate(HISTORY_LIMIT);
        debug!(count = entries.len(), "Loaded history");
        Ok(entries)
    }

    /// Record a calculation as the newest entry.
    pub fn append(
        &mut self,
        expression: impl Into<String>,
        result: impl Into<String>,
    ) -> HistoryEntry {
        let entry = HistoryEntry::new(expression, result);
        self.entries.insert(0, entry.clone());
        self.entries.truncate(HISTORY_LIMIT);

        if let Err(e) = self.persist() {
            warn!(error = &e as &dyn Error, "History kept for this session only");
        }
        entry
    }

    /// Drop every entry, in memory and in storage.
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.backend.remove() {
            warn!(error = &e as &dyn Error, "Failed to clear stored history");
        }
    }

    /// The expression and result of an entry, for copying back into the
    /// calculator.
    pub fn recall(entry: &HistoryEntry) -> (String, String) {
        let (expression, result) = entry.recall();
        (expression.to_string(), result.to_string())
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Fuzzy-filter entries by expression and result, best match first.
    ///
    /// Returns each match with its position in [`entries`](Self::entries)
    /// so it can be recalled by index. An empty query matches everything
    /// in history order.
    pub fn search(&self, query: &str) -> Vec<(usize, &HistoryEntry)> {
        let query = query.trim();
        if query.is_empty() {
            return self.entries.iter().enumerate().collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(usize, i64)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(idx, entry)| {
                let haystack = format!("{} = {}", entry.expression, entry.result);
                matcher.fuzzy_match(&haystack, query).map(|score| (idx, score))
            })
            .collect();

        // Higher score first; ties keep recency order.
        scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored
            .into_iter()
            .map(|(idx, _)| (idx, &self.entries[idx]))
            .collect()
    }

    fn persist(&mut self) -> Result<(), PersistenceError> {
        let json = serde_json::to_string(&self.entries).map_err(PersistenceError::Serialize)?;
        self.backend.write(&json)
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("entries", &self.entries)
            .finish_non_exhaustive()
    }
}

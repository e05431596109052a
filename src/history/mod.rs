//! Calculation history.
//!
//! Entries are kept newest first, capped at [`HISTORY_LIMIT`], and written
//! through a [`HistoryBackend`] after every change.

mod backend;
mod entry;
mod store;

pub use backend::{
    HISTORY_FILE_NAME, HistoryBackend, JsonFileBackend, MemoryBackend, PersistenceError,
    default_history_path,
};
pub use entry::HistoryEntry;
pub use store::{HISTORY_LIMIT, HistoryStore};

//! foyeajx-notes: the note collection and its persistence.
//!
//! The collection is saved and loaded as a single JSON array. Undo history is never
//! persisted; only each note's current content is.

pub mod export;
pub mod persist;
pub mod store;

pub use export::{export_file_name, export_html, EXPORT_EXT};
pub use persist::{load_notes, save_notes};
pub use store::{NoteStore, StoreError};

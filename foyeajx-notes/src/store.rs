//! The note collection behind the dashboard.
//!
//! Notes are kept newest first. Saving a note that is already present replaces it
//! in place; saving a new one puts it at the front.

use foyeajx_core::Note;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteStore {
    notes: Vec<Note>,
}

impl NoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_notes(notes: Vec<Note>) -> Self {
        Self { notes }
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Note> {
        self.notes.iter()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Insert or replace a note. Returns true if it was new.
    pub fn upsert(&mut self, note: Note) -> bool {
        match self.notes.iter_mut().find(|n| n.id == note.id) {
            Some(existing) => {
                debug!(note_id = %note.id, "replacing existing note");
                *existing = note;
                false
            }
            None => {
                info!(note_id = %note.id, "adding new note");
                self.notes.insert(0, note);
                true
            }
        }
    }

    pub fn remove(&mut self, id: &str) -> Result<Note, StoreError> {
        let pos = self.position(id)?;
        info!(note_id = id, "removing note");
        Ok(self.notes.remove(pos))
    }

    /// Flip the pinned flag. Returns the new value.
    pub fn toggle_pin(&mut self, id: &str) -> Result<bool, StoreError> {
        let note = self.get_mut(id)?;
        note.is_pinned = !note.is_pinned;
        debug!(note_id = id, pinned = note.is_pinned, "toggled pin");
        Ok(note.is_pinned)
    }

    /// Flip the starred flag. Returns the new value.
    pub fn toggle_star(&mut self, id: &str) -> Result<bool, StoreError> {
        let note = self.get_mut(id)?;
        note.is_starred = !note.is_starred;
        debug!(note_id = id, starred = note.is_starred, "toggled star");
        Ok(note.is_starred)
    }

    pub fn add_image(&mut self, id: &str, data_url: impl Into<String>) -> Result<(), StoreError> {
        self.get_mut(id)?.images.push(data_url.into());
        Ok(())
    }

    pub fn remove_image(&mut self, id: &str, index: usize) -> Result<String, StoreError> {
        let note = self.get_mut(id)?;
        if index >= note.images.len() {
            return Err(StoreError::ImageOutOfRange {
                note_id: id.to_string(),
                index,
                len: note.images.len(),
            });
        }
        Ok(note.images.remove(index))
    }

    /// Notes whose title or content contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&Note> {
        let query = query.trim();
        if query.is_empty() {
            return self.notes.iter().collect();
        }
        self.notes.iter().filter(|n| n.matches(query)).collect()
    }

    pub fn starred(&self) -> Vec<&Note> {
        self.notes.iter().filter(|n| n.is_starred).collect()
    }

    /// Dashboard order: pinned notes first, otherwise stored order.
    pub fn pinned_first(&self) -> Vec<&Note> {
        let mut ordered: Vec<&Note> = self.notes.iter().collect();
        ordered.sort_by_key(|n| !n.is_pinned);
        ordered
    }

    fn position(&self, id: &str) -> Result<usize, StoreError> {
        self.notes.iter().position(|n| n.id == id).ok_or_else(|| {
            warn!(note_id = id, "note not found");
            StoreError::UnknownNote {
                note_id: id.to_string(),
            }
        })
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Note, StoreError> {
        let pos = self.position(id)?;
        Ok(&mut self.notes[pos])
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("unknown note_id: {note_id}")]
    UnknownNote { note_id: String },

    #[error("note {note_id} has {len} images, no image at index {index}")]
    ImageOutOfRange {
        note_id: String,
        index: usize,
        len: usize,
    },
}

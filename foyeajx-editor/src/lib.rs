//! foyeajx-editor: the editing session for foyeajX Note.
//!
//! `editor::History` keeps the undo log for the open note, `editor::EditingSession`
//! keeps the note, its document surface and that log in step.

pub mod editor;
pub mod logging;

pub use editor::{
    Clock, DocumentSurface, EditingSession, History, InlineStyle, ManualClock, MemoryDocument,
    Selection, SystemClock,
};

//! foyeajx-core: shared note model for foyeajX Note.
//!
//! Design rules:
//! - A note's `content` is an opaque serialized rich-text string; nothing here parses it
//!   beyond `text::to_plain_text`.
//! - Formatting changes are pure: a patch merged into a state yields a new state.
//! - All structs are serializable so the note collection can be written as one JSON blob.

pub mod config;
pub mod language;
pub mod note;
pub mod text;

pub use config::{AppConfig, ConfigError, HistoryConfig};
pub use language::{language_by_code, Language, LANGUAGES};
pub use note::{Alignment, FormattingPatch, FormattingState, Note, DEFAULT_FONT_SIZE};
pub use text::to_plain_text;

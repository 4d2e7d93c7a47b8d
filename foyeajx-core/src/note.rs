//! The note aggregate and its formatting record.

use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Font size a fresh note starts with.
pub const DEFAULT_FONT_SIZE: u32 = 17;

/// Paragraph alignment for the editor surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Formatting toggles stored alongside a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormattingState {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub font_size: u32,
    pub alignment: Alignment,
}

impl Default for FormattingState {
    fn default() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            font_size: DEFAULT_FONT_SIZE,
            alignment: Alignment::Left,
        }
    }
}

/// Sparse formatting change (the assistant's `applyFormatting` arguments map to this).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FormattingPatch {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
    pub font_size: Option<u32>,
    pub alignment: Option<Alignment>,
}

impl FormattingPatch {
    /// Merge this patch over `state`. Fields left as `None` keep their current value.
    pub fn apply(&self, state: &FormattingState) -> FormattingState {
        FormattingState {
            bold: self.bold.unwrap_or(state.bold),
            italic: self.italic.unwrap_or(state.italic),
            underline: self.underline.unwrap_or(state.underline),
            font_size: self.font_size.unwrap_or(state.font_size),
            alignment: self.alignment.unwrap_or(state.alignment),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// A single note as persisted in the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    /// Serialized rich-text markup owned by the editor surface.
    pub content: String,
    /// Display date, e.g. `18 OCT`.
    pub date: String,
    /// Attached images as data URLs.
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub is_pinned: bool,
    #[serde(default)]
    pub is_starred: bool,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub formatting: FormattingState,
}

fn default_language() -> String {
    "en".to_string()
}

impl Note {
    /// Create an empty, unsaved note stamped with today's date.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: String::new(),
            content: String::new(),
            date: display_date(),
            images: vec![],
            is_pinned: false,
            is_starred: false,
            language: default_language(),
            formatting: FormattingState::default(),
        }
    }

    /// Builder-style helper for tests and imports.
    pub fn with_content(mut self, title: impl Into<String>, content: impl Into<String>) -> Self {
        self.title = title.into();
        self.content = content.into();
        self
    }

    /// Nothing worth saving: no title and no content.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.content.is_empty()
    }

    /// Case-insensitive match over title or raw content.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.content.to_lowercase().contains(&query)
    }
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}

// Day without padding plus upper-cased month abbreviation.
fn display_date() -> String {
    Local::now().format("%-d %b").to_string().to_uppercase()
}

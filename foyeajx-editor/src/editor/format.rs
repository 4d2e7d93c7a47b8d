//! Inline formatting as a pure content transform.
//!
//! Instead of toggling styles on a live selection, a style is applied to a byte
//! range of the markup and the new markup is returned.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    pub fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn cursor(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    pub fn is_cursor(self) -> bool {
        self.start == self.end
    }

    pub fn clamp(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
}

impl InlineStyle {
    pub fn tag(self) -> &'static str {
        match self {
            InlineStyle::Bold => "b",
            InlineStyle::Italic => "i",
            InlineStyle::Underline => "u",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("selection {start}..{end} is outside content of length {len}")]
    InvalidRange { start: usize, end: usize, len: usize },

    #[error("selection boundary {pos} is not on a character boundary")]
    NotCharBoundary { pos: usize },
}

/// Wrap `selection` of `content` in the tag for `style`.
///
/// An empty selection leaves the content unchanged.
pub fn apply_inline_style(
    content: &str,
    selection: Selection,
    style: InlineStyle,
) -> Result<String, FormatError> {
    let Selection { start, end } = Selection::new(selection.start, selection.end);
    if end > content.len() {
        return Err(FormatError::InvalidRange {
            start,
            end,
            len: content.len(),
        });
    }
    for pos in [start, end] {
        if !content.is_char_boundary(pos) {
            return Err(FormatError::NotCharBoundary { pos });
        }
    }
    if start == end {
        return Ok(content.to_string());
    }

    let tag = style.tag();
    let mut out = String::with_capacity(content.len() + 2 * tag.len() + 5);
    out.push_str(&content[..start]);
    out.push('<');
    out.push_str(tag);
    out.push('>');
    out.push_str(&content[start..end]);
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
    out.push_str(&content[end..]);
    Ok(out)
}

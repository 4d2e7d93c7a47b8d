//! Export a note's markup as a standalone `.html` file.

use anyhow::Context;
use foyeajx_core::Note;
use std::fs;
use std::path::{Path, PathBuf};

/// File extension used for exported notes.
pub const EXPORT_EXT: &str = "html";

/// `"{title}.html"`, or `"note.html"` for an untitled note.
/// Characters that cannot appear in a file name are replaced with `_`.
pub fn export_file_name(note: &Note) -> String {
    let title = note.title.trim();
    let stem = if title.is_empty() { "note" } else { title };
    let stem: String = stem
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    format!("{stem}.{EXPORT_EXT}")
}

/// Write the note's raw content into `dir` and return the written path.
pub fn export_html(note: &Note, dir: impl AsRef<Path>) -> anyhow::Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).with_context(|| format!("create export dir: {}", dir.display()))?;

    let path = dir.join(export_file_name(note));
    fs::write(&path, &note.content)
        .with_context(|| format!("write export file: {}", path.display()))?;
    tracing::info!(note_id = %note.id, path = %path.display(), "note exported");
    Ok(path)
}

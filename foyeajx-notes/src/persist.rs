//! Load/save the whole note collection as one JSON document.

use anyhow::Context;
use std::fs;
use std::path::Path;

use crate::NoteStore;

/// Save the collection to disk as pretty JSON.
pub fn save_notes(path: impl AsRef<Path>, store: &NoteStore) -> anyhow::Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        // fs::write does not create directories
        fs::create_dir_all(parent)
            .with_context(|| format!("create parent dir: {}", parent.display()))?;
    }

    let json = serde_json::to_string_pretty(store).context("serialize notes to json")?;
    fs::write(path, json).with_context(|| format!("write notes file: {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = store.len(), "notes saved");
    Ok(())
}

/// Load the collection. A file that does not exist yet is an empty collection.
pub fn load_notes(path: impl AsRef<Path>) -> anyhow::Result<NoteStore> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::info!(path = %path.display(), "no notes file yet, starting empty");
        return Ok(NoteStore::new());
    }

    let data =
        fs::read_to_string(path).with_context(|| format!("read notes file: {}", path.display()))?;
    let store: NoteStore = serde_json::from_str(&data).context("parse notes json")?;
    tracing::debug!(path = %path.display(), count = store.len(), "notes loaded");
    Ok(store)
}

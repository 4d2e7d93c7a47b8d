// The editable surface a session reads from and writes snapshots back into.
// Hosts implement `DocumentSurface` over their real widget; `MemoryDocument` is the
// headless version used by tests and batch tools.

use tracing::trace;

pub trait DocumentSurface {
    /// Full serialized content right now.
    fn content(&self) -> String;

    fn set_content(&mut self, content: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryDocument {
    content: String,
    revision: u64,
}

impl MemoryDocument {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            revision: 0,
        }
    }

    /// Simulate the user typing at the end of the document.
    pub fn type_text(&mut self, text: &str) {
        self.content.push_str(text);
        self.revision += 1;
        trace!(revision = self.revision, "typed into document");
    }

    /// Bumped on every change, typed or written.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl DocumentSurface for MemoryDocument {
    fn content(&self) -> String {
        self.content.clone()
    }

    fn set_content(&mut self, content: &str) {
        if self.content != content {
            self.content = content.to_string();
            self.revision += 1;
        }
    }
}

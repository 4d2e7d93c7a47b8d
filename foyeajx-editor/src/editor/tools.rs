// Content edits applied on the user's or the assistant's behalf.
// Each tool maps the current markup to new markup; the session records the result
// as its own undoable step.

use tracing::trace;

pub trait Tool {
    fn apply(&self, content: &str) -> String;

    fn name(&self) -> &str;
}

#[derive(Debug, Clone)]
pub struct Replace {
    pub content: String,
}

impl Replace {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl Tool for Replace {
    fn apply(&self, _content: &str) -> String {
        trace!(len = self.content.len(), "replacing content");
        self.content.clone()
    }

    fn name(&self) -> &str {
        "Replace"
    }
}

#[derive(Debug, Clone)]
pub struct Append {
    pub text: String,
}

impl Append {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Tool for Append {
    fn apply(&self, content: &str) -> String {
        trace!(len = self.text.len(), "appending content");
        format!("{content}{}", self.text)
    }

    fn name(&self) -> &str {
        "Append"
    }
}

/// Appends dictated text, separated from existing content by one space.
#[derive(Debug, Clone)]
pub struct AppendTranscript {
    pub transcript: String,
}

impl AppendTranscript {
    pub fn new(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
        }
    }
}

impl Tool for AppendTranscript {
    fn apply(&self, content: &str) -> String {
        let transcript = self.transcript.trim();
        if content.is_empty() {
            transcript.to_string()
        } else if content.ends_with(' ') {
            format!("{content}{transcript}")
        } else {
            format!("{content} {transcript}")
        }
    }

    fn name(&self) -> &str {
        "AppendTranscript"
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Clear;

impl Tool for Clear {
    fn apply(&self, _content: &str) -> String {
        String::new()
    }

    fn name(&self) -> &str {
        "Clear"
    }
}

//! Conversation state for the assistant panel.
//!
//! The log belongs to one note: it opens with the welcome message and starts over
//! whenever the panel is pointed at a different note.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::SpeechAudio;

pub const WELCOME_MESSAGE: &str = "Welcome to foyeajX Intelligent Insight. I am synced with \
your notepad functions. I speak both English and Bengali (বাংলা). How shall we proceed?";

/// Shown in the panel when a chat request fails.
pub const INTERRUPTED_MESSAGE: &str = "The neural link was interrupted. Please try re-sending.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Local>,
}

impl ChatMessage {
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Local::now(),
        }
    }
}

/// Result of one chat turn: the text shown, plus narration when auto-speak is on.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
    pub text: String,
    pub speech: Option<SpeechAudio>,
}

#[derive(Debug, Clone)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
    auto_speak: bool,
    error: Option<String>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage::new(ChatRole::Assistant, WELCOME_MESSAGE)],
            auto_speak: false,
            error: None,
        }
    }

    /// Back to just the welcome message. Auto-speak is a panel preference and survives.
    pub fn reset(&mut self) {
        self.messages.clear();
        self.messages.push(ChatMessage::new(ChatRole::Assistant, WELCOME_MESSAGE));
        self.error = None;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    pub fn push_user(&mut self, text: impl Into<String>) {
        self.error = None;
        self.messages.push(ChatMessage::new(ChatRole::User, text));
    }

    pub fn push_assistant(&mut self, text: impl Into<String>) {
        self.messages.push(ChatMessage::new(ChatRole::Assistant, text));
    }

    pub fn auto_speak(&self) -> bool {
        self.auto_speak
    }

    pub fn set_auto_speak(&mut self, on: bool) {
        self.auto_speak = on;
    }

    /// Flip auto-speak. Returns the new value.
    pub fn toggle_auto_speak(&mut self) -> bool {
        self.auto_speak = !self.auto_speak;
        self.auto_speak
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new()
    }
}

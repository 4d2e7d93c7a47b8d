// This defines the boundary between foyeajX Note and the hosted generative model.
// The model itself lives behind `NoteAssistant`; this crate only owns the shapes
// that cross the boundary and turns the model's function calls into typed tool calls.

use foyeajx_core::FormattingPatch;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

pub mod art;
pub mod chat;

pub use art::{art_style_by_label, prompt_fallback, ArtStyle, ART_STYLES, PROMPT_FALLBACK_CHARS};
pub use chat::{ChatLog, ChatMessage, ChatRole, ChatTurn, INTERRUPTED_MESSAGE, WELCOME_MESSAGE};

/// Shown when the model acted through tools but sent no text.
pub const DEFAULT_REPLY: &str = "Synced and updated.";

/// Recorded audio handed to the transcriber, base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioClip {
    pub mime_type: String,
    pub data: String,
}

/// Synthesized narration: raw 16-bit mono PCM, base64 encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpeechAudio {
    pub sample_rate: u32,
    pub data: String,
}

/// Binary payload returned inline by the model (generated images).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: Option<String>,
    pub data: String,
}

impl InlineData {
    /// `data:` URL suitable for storing in `Note::images`.
    pub fn to_data_url(&self) -> String {
        let mime = self.mime_type.as_deref().unwrap_or("image/png");
        format!("data:{};base64,{}", mime, self.data)
    }
}

/// A function call exactly as the model emitted it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

/// How `updateNoteContent` combines with the existing content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMode {
    #[default]
    Replace,
    Append,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct UpdateNoteContentArgs {
    new_content: String,
    #[serde(default)]
    mode: UpdateMode,
}

/// Validated tool call the editor knows how to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    UpdateNoteContent { new_content: String, mode: UpdateMode },
    ApplyFormatting(FormattingPatch),
}

impl ToolCall {
    pub const UPDATE_NOTE_CONTENT: &'static str = "updateNoteContent";
    pub const APPLY_FORMATTING: &'static str = "applyFormatting";

    pub fn name(&self) -> &'static str {
        match self {
            ToolCall::UpdateNoteContent { .. } => Self::UPDATE_NOTE_CONTENT,
            ToolCall::ApplyFormatting(_) => Self::APPLY_FORMATTING,
        }
    }
}

impl TryFrom<FunctionCall> for ToolCall {
    type Error = AiError;

    fn try_from(call: FunctionCall) -> Result<Self, Self::Error> {
        match call.name.as_str() {
            Self::UPDATE_NOTE_CONTENT => {
                let args: UpdateNoteContentArgs = parse_args(&call)?;
                Ok(ToolCall::UpdateNoteContent {
                    new_content: args.new_content,
                    mode: args.mode,
                })
            }
            Self::APPLY_FORMATTING => Ok(ToolCall::ApplyFormatting(parse_args(&call)?)),
            other => Err(AiError::UnknownTool {
                name: other.to_string(),
            }),
        }
    }
}

fn parse_args<T: DeserializeOwned>(call: &FunctionCall) -> Result<T, AiError> {
    T::deserialize(&call.args)
        .map_err(|e| AiError::MalformedResponse(format!("{}: {}", call.name, e)))
}

/// One assistant turn: optional text plus any function calls to run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub text: Option<String>,
    #[serde(default)]
    pub function_calls: Vec<FunctionCall>,
}

impl ChatReply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            function_calls: vec![],
        }
    }

    pub fn display_text(&self) -> &str {
        match self.text.as_deref() {
            Some(t) if !t.trim().is_empty() => t,
            _ => DEFAULT_REPLY,
        }
    }
}

/// Which long-running assistant action is in flight, for the status indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AiProcess {
    Translating,
    Transcribing,
    Summarizing,
    SynthesizingVoice,
    GeneratingArt,
}

impl AiProcess {
    pub fn label(&self) -> &'static str {
        match self {
            AiProcess::Translating => "Translating",
            AiProcess::Transcribing => "Transcribing",
            AiProcess::Summarizing => "Summarizing",
            AiProcess::SynthesizingVoice => "Synthesizing Voice",
            AiProcess::GeneratingArt => "Generating Art",
        }
    }
}

impl fmt::Display for AiProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The hosted model, as seen by the rest of the app.
///
/// Implementations own transport, prompts and model choice. Inputs are plain text
/// (see `foyeajx_core::to_plain_text`) except for chat context, which callers may pass raw.
pub trait NoteAssistant {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, AiError>;

    fn transcribe(&self, audio: &AudioClip, language_name: &str) -> Result<String, AiError>;

    fn summarize(&self, text: &str) -> Result<String, AiError>;

    fn speak(&self, text: &str) -> Result<SpeechAudio, AiError>;

    /// Turn note content into a descriptive prompt for `generate_image`.
    fn suggest_image_prompt(&self, note_text: &str) -> Result<String, AiError>;

    fn generate_image(&self, prompt: &str) -> Result<InlineData, AiError>;

    fn chat(&self, message: &str, note_context: &str) -> Result<ChatReply, AiError>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AiError {
    #[error("assistant request failed: {0}")]
    Transport(String),

    #[error("assistant returned an empty response")]
    EmptyResponse,

    #[error("malformed assistant response: {0}")]
    MalformedResponse(String),

    #[error("unknown tool: {name}")]
    UnknownTool { name: String },
}

//! One note open in the editor.
//!
//! The session owns the note being edited, the document surface showing it, and the
//! undo history for it. Every path that changes content goes through here so the
//! document, the note and the history never disagree.

use foyeajx_ai::{
    prompt_fallback, AiError, AiProcess, ArtStyle, AudioClip, ChatLog, ChatTurn, NoteAssistant,
    SpeechAudio, ToolCall, UpdateMode, INTERRUPTED_MESSAGE,
};
use foyeajx_core::{to_plain_text, FormattingPatch, HistoryConfig, Language, Note};
use foyeajx_notes::NoteStore;
use tracing::{debug, info, warn};

use super::clock::{Clock, SystemClock};
use super::document::DocumentSurface;
use super::format::{apply_inline_style, FormatError, InlineStyle, Selection};
use super::history::History;
use super::tools::{Append, AppendTranscript, Clear, Replace, Tool};

/// Returned to the assistant after each tool call.
pub const TOOL_CONTENT_UPDATED: &str = "Note updated.";
pub const TOOL_FORMATTING_APPLIED: &str = "Applied.";
pub const TOOL_REJECTED: &str = "Command error.";

pub struct EditingSession<D: DocumentSurface, C: Clock = SystemClock> {
    note: Note,
    document: D,
    history: History<C>,
    active_process: Option<AiProcess>,
    chat: ChatLog,
}

impl<D: DocumentSurface> EditingSession<D, SystemClock> {
    pub fn new(note: Note, document: D, config: HistoryConfig) -> Self {
        Self::open(note, document, config, SystemClock)
    }
}

impl<D: DocumentSurface, C: Clock> EditingSession<D, C> {
    /// Load `note` into `document` and seed the history with its content.
    pub fn open(note: Note, mut document: D, config: HistoryConfig, clock: C) -> Self {
        info!(note_id = %note.id, "opening note");
        document.set_content(&note.content);
        let mut history = History::with_clock(config, clock);
        history.reset(note.content.clone());
        Self {
            note,
            document,
            history,
            active_process: None,
            chat: ChatLog::new(),
        }
    }

    /// Point the session at another note. History only survives if it is the same note.
    /// Returns true if the history was reset.
    pub fn switch_to(&mut self, note: Note) -> bool {
        if note.id == self.note.id {
            debug!(note_id = %note.id, "already editing note");
            return false;
        }
        info!(from = %self.note.id, to = %note.id, "switching note, history discarded");
        self.document.set_content(&note.content);
        self.history.reset(note.content.clone());
        self.note = note;
        self.active_process = None;
        self.chat.reset();
        true
    }

    pub fn note(&self) -> &Note {
        &self.note
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    /// Direct access for hosts whose widget needs it; call `on_input` after typing.
    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn history(&self) -> &History<C> {
        &self.history
    }

    pub fn active_process(&self) -> Option<AiProcess> {
        self.active_process
    }

    pub fn chat(&self) -> &ChatLog {
        &self.chat
    }

    /// For panel preferences such as auto-speak.
    pub fn chat_mut(&mut self) -> &mut ChatLog {
        &mut self.chat
    }

    /// The document changed under the user's hands. Coalesced through the debounce window.
    pub fn on_input(&mut self) {
        let content = self.document.content();
        self.note.content = content.clone();
        self.history.record(content, false);
    }

    /// Give the history a chance to commit a finished burst of typing.
    pub fn poll(&mut self) -> bool {
        self.history.poll()
    }

    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.restore(&snapshot);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.restore(&snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Run a content tool and record the result as its own step.
    pub fn apply_tool(&mut self, tool: &dyn Tool) {
        let current = self.document.content();
        let next = tool.apply(&current);
        debug!(tool = tool.name(), "applying tool");
        self.write(next);
    }

    pub fn clear(&mut self) {
        self.apply_tool(&Clear);
    }

    pub fn replace_content(&mut self, content: impl Into<String>) {
        self.apply_tool(&Replace::new(content));
    }

    pub fn append_transcript(&mut self, transcript: &str) {
        if transcript.trim().is_empty() {
            return;
        }
        self.apply_tool(&AppendTranscript::new(transcript));
    }

    /// Wrap a range of the markup in an inline style, as one undoable step.
    pub fn apply_inline_style(
        &mut self,
        selection: Selection,
        style: InlineStyle,
    ) -> Result<(), FormatError> {
        let current = self.document.content();
        let next = apply_inline_style(&current, selection, style)?;
        self.write(next);
        Ok(())
    }

    /// Formatting toggles live on the note, not in the content history.
    pub fn apply_formatting(&mut self, patch: &FormattingPatch) {
        self.note.formatting = patch.apply(&self.note.formatting);
        debug!(formatting = ?self.note.formatting, "formatting updated");
    }

    /// Run an assistant tool call and return the acknowledgement sent back to it.
    pub fn execute_tool(&mut self, call: &ToolCall) -> &'static str {
        match call {
            ToolCall::UpdateNoteContent { new_content, mode } => {
                match mode {
                    UpdateMode::Replace => self.apply_tool(&Replace::new(new_content.as_str())),
                    UpdateMode::Append => self.apply_tool(&Append::new(new_content.as_str())),
                }
                TOOL_CONTENT_UPDATED
            }
            ToolCall::ApplyFormatting(patch) => {
                self.apply_formatting(patch);
                TOOL_FORMATTING_APPLIED
            }
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.note.title = title.into();
    }

    pub fn add_image(&mut self, data_url: impl Into<String>) {
        self.note.images.push(data_url.into());
    }

    pub fn remove_image(&mut self, index: usize) -> Option<String> {
        if index < self.note.images.len() {
            Some(self.note.images.remove(index))
        } else {
            None
        }
    }

    /// Replace the note with its translation and tag it with the target language.
    pub fn translate_with(
        &mut self,
        assistant: &dyn NoteAssistant,
        language: &Language,
    ) -> Result<(), AiError> {
        let text = self.plain_text();
        if text.trim().is_empty() {
            return Ok(());
        }
        let translated = self.with_process(AiProcess::Translating, |_| {
            non_empty(assistant.translate(&text, language.name)?)
        })?;
        self.replace_content(translated);
        self.note.language = language.code.to_string();
        Ok(())
    }

    /// Append a dictated clip to the end of the note.
    pub fn transcribe_with(
        &mut self,
        assistant: &dyn NoteAssistant,
        audio: &AudioClip,
        language: &Language,
    ) -> Result<(), AiError> {
        let transcript = self.with_process(AiProcess::Transcribing, |_| {
            assistant.transcribe(audio, language.native)
        })?;
        self.append_transcript(&transcript);
        Ok(())
    }

    /// Summaries are shown to the user, not written into the note.
    pub fn summarize_with(&mut self, assistant: &dyn NoteAssistant) -> Result<String, AiError> {
        let text = self.plain_text();
        if text.trim().is_empty() {
            return Ok(String::new());
        }
        self.with_process(AiProcess::Summarizing, |_| non_empty(assistant.summarize(&text)?))
    }

    pub fn speak_with(
        &mut self,
        assistant: &dyn NoteAssistant,
    ) -> Result<Option<SpeechAudio>, AiError> {
        let text = self.plain_text();
        if text.trim().is_empty() {
            return Ok(None);
        }
        self.with_process(AiProcess::SynthesizingVoice, |_| assistant.speak(&text).map(Some))
    }

    /// Ask the assistant to describe the note as an image prompt. When that fails,
    /// the start of the note stands in. `None` for an empty note.
    pub fn suggest_image_prompt_or_fallback(
        &mut self,
        assistant: &dyn NoteAssistant,
    ) -> Option<String> {
        let text = self.plain_text();
        if text.trim().is_empty() {
            return None;
        }
        match assistant.suggest_image_prompt(&text) {
            Ok(prompt) if !prompt.trim().is_empty() => Some(prompt.trim().to_string()),
            Ok(_) => Some(prompt_fallback(&text)),
            Err(e) => {
                warn!(error = %e, "image prompt suggestion failed, using note text");
                Some(prompt_fallback(&text))
            }
        }
    }

    /// Generate an image from a hand-written prompt, optionally styled, and attach it.
    /// Returns the attached data URL, or `None` for an empty prompt.
    pub fn generate_image_with(
        &mut self,
        assistant: &dyn NoteAssistant,
        prompt: &str,
        style: Option<&ArtStyle>,
    ) -> Result<Option<String>, AiError> {
        if prompt.trim().is_empty() {
            return Ok(None);
        }
        let prompt = match style {
            Some(style) => style.apply(prompt),
            None => prompt.to_string(),
        };
        self.attach_generated_image(assistant, &prompt).map(Some)
    }

    /// Generate an image using the note's own text as the prompt.
    pub fn generate_image_from_note_with(
        &mut self,
        assistant: &dyn NoteAssistant,
    ) -> Result<Option<String>, AiError> {
        let text = self.plain_text();
        if text.trim().is_empty() {
            return Ok(None);
        }
        self.attach_generated_image(assistant, &text).map(Some)
    }

    /// Send a chat message with the note as context and run any tools the reply asks for.
    ///
    /// Both turns are kept in the chat log. With auto-speak on, the reply is narrated too;
    /// a narration failure is reported in the log but does not fail the turn.
    pub fn chat_with(
        &mut self,
        assistant: &dyn NoteAssistant,
        message: &str,
    ) -> Result<ChatTurn, AiError> {
        let message = message.trim();
        if message.is_empty() {
            return Ok(ChatTurn {
                text: String::new(),
                speech: None,
            });
        }
        let context = self.plain_text();
        self.chat.push_user(message);

        let reply = match assistant.chat(message, &context) {
            Ok(reply) => reply,
            Err(e) => {
                warn!(error = %e, "chat request failed");
                self.chat.set_error(INTERRUPTED_MESSAGE);
                return Err(e);
            }
        };

        for call in reply.function_calls.iter().cloned() {
            let name = call.name.clone();
            match ToolCall::try_from(call) {
                Ok(tool) => {
                    let ack = self.execute_tool(&tool);
                    debug!(tool = %name, ack, "assistant tool executed");
                }
                Err(e) => {
                    warn!(tool = %name, error = %e, ack = TOOL_REJECTED, "assistant tool rejected")
                }
            }
        }

        let text = reply.display_text().to_string();
        self.chat.push_assistant(text.clone());

        let speech = if self.chat.auto_speak() {
            match assistant.speak(&text) {
                Ok(audio) => Some(audio),
                Err(e) => {
                    warn!(error = %e, "auto-speak failed");
                    self.chat.set_error(INTERRUPTED_MESSAGE);
                    None
                }
            }
        } else {
            None
        };
        Ok(ChatTurn { text, speech })
    }

    /// Write the note back into the collection, blank or not ("Save Changes").
    /// Returns true if the note was new to the store.
    pub fn save_into(&mut self, store: &mut NoteStore) -> bool {
        self.history.flush();
        self.note.content = self.document.content();
        store.upsert(self.note.clone())
    }

    /// Leave the editor: save unless the note is blank. Returns true if the store was touched.
    pub fn close_into(&mut self, store: &mut NoteStore) -> bool {
        self.history.flush();
        self.note.content = self.document.content();
        if self.note.is_blank() {
            debug!(note_id = %self.note.id, "blank note not saved");
            return false;
        }
        self.save_into(store);
        true
    }

    /// Close the session, keeping only the note.
    pub fn into_note(mut self) -> Note {
        self.note.content = self.document.content();
        self.note
    }

    fn plain_text(&self) -> String {
        to_plain_text(&self.document.content())
    }

    fn restore(&mut self, snapshot: &str) {
        self.document.set_content(snapshot);
        self.note.content = snapshot.to_string();
    }

    fn write(&mut self, content: String) {
        self.document.set_content(&content);
        self.note.content = content.clone();
        self.history.record(content, true);
    }

    fn attach_generated_image(
        &mut self,
        assistant: &dyn NoteAssistant,
        prompt: &str,
    ) -> Result<String, AiError> {
        let data_url = self.with_process(AiProcess::GeneratingArt, |_| {
            Ok(assistant.generate_image(prompt)?.to_data_url())
        })?;
        self.add_image(data_url.clone());
        Ok(data_url)
    }

    // The status indicator is cleared on every path; failures leave the note untouched.
    fn with_process<T>(
        &mut self,
        process: AiProcess,
        f: impl FnOnce(&mut Self) -> Result<T, AiError>,
    ) -> Result<T, AiError> {
        self.active_process = Some(process);
        debug!(process = %process, "assistant request started");
        let result = f(self);
        self.active_process = None;
        if let Err(e) = &result {
            warn!(process = %process, error = %e, "assistant request failed");
        }
        result
    }
}

fn non_empty(text: String) -> Result<String, AiError> {
    if text.trim().is_empty() {
        Err(AiError::EmptyResponse)
    } else {
        Ok(text)
    }
}

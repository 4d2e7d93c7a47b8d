use std::cell::RefCell;

use foyeajx_ai::{
    art_style_by_label, AiError, AiProcess, AudioClip, ChatReply, ChatRole, FunctionCall,
    InlineData, NoteAssistant, SpeechAudio, ToolCall, UpdateMode, INTERRUPTED_MESSAGE,
    WELCOME_MESSAGE,
};
use foyeajx_core::{language_by_code, Alignment, FormattingPatch, HistoryConfig, Note};
use foyeajx_editor::editor::session::{TOOL_CONTENT_UPDATED, TOOL_FORMATTING_APPLIED};
use foyeajx_editor::{
    DocumentSurface, EditingSession, InlineStyle, ManualClock, MemoryDocument, Selection,
};
use foyeajx_notes::NoteStore;
use serde_json::json;

type Session = EditingSession<MemoryDocument, ManualClock>;

fn open(note: Note) -> (Session, ManualClock) {
    let clock = ManualClock::new();
    let session = EditingSession::open(
        note,
        MemoryDocument::default(),
        HistoryConfig::default(),
        clock.clone(),
    );
    (session, clock)
}

/// Scripted assistant: answers from canned values and remembers what it was asked.
#[derive(Default)]
struct ScriptedAssistant {
    fail: bool,
    /// Fail only the calls whose recorded tag starts with this, e.g. `"prompt:"`.
    fail_only: Option<&'static str>,
    reply: ChatReply,
    seen: RefCell<Vec<String>>,
}

impl ScriptedAssistant {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn check(&self, what: String) -> Result<(), AiError> {
        let fail = self.fail || self.fail_only.is_some_and(|p| what.starts_with(p));
        self.seen.borrow_mut().push(what);
        if fail {
            Err(AiError::Transport("offline".into()))
        } else {
            Ok(())
        }
    }
}

impl NoteAssistant for ScriptedAssistant {
    fn translate(&self, text: &str, target_language: &str) -> Result<String, AiError> {
        self.check(format!("translate:{target_language}:{text}"))?;
        Ok(format!("[{target_language}] {text}"))
    }

    fn transcribe(&self, audio: &AudioClip, language_name: &str) -> Result<String, AiError> {
        self.check(format!("transcribe:{language_name}:{}", audio.mime_type))?;
        Ok("spoken words".into())
    }

    fn summarize(&self, text: &str) -> Result<String, AiError> {
        self.check(format!("summarize:{text}"))?;
        Ok("short".into())
    }

    fn speak(&self, text: &str) -> Result<SpeechAudio, AiError> {
        self.check(format!("speak:{text}"))?;
        Ok(SpeechAudio {
            sample_rate: 24000,
            data: "AAAA".into(),
        })
    }

    fn suggest_image_prompt(&self, note_text: &str) -> Result<String, AiError> {
        self.check(format!("prompt:{note_text}"))?;
        Ok("a quiet harbor at dawn".into())
    }

    fn generate_image(&self, prompt: &str) -> Result<InlineData, AiError> {
        self.check(format!("image:{prompt}"))?;
        Ok(InlineData {
            mime_type: None,
            data: "SU1H".into(),
        })
    }

    fn chat(&self, message: &str, note_context: &str) -> Result<ChatReply, AiError> {
        self.check(format!("chat:{message}|{note_context}"))?;
        Ok(self.reply.clone())
    }
}

#[test]
fn typing_then_undo_restores_document_and_note() {
    let (mut s, clock) = open(Note::new().with_content("t", "Hello"));
    assert_eq!(s.document().content(), "Hello");

    s.document_mut().type_text(" world");
    s.on_input();
    clock.advance_ms(1000);
    assert!(s.poll());

    s.document_mut().type_text("!");
    s.on_input();
    assert_eq!(s.note().content, "Hello world!");

    assert!(s.undo());
    assert_eq!(s.document().content(), "Hello world");
    assert_eq!(s.note().content, "Hello world");
    assert!(s.undo());
    assert_eq!(s.document().content(), "Hello");
    assert!(!s.undo());

    assert!(s.redo());
    assert!(s.redo());
    assert_eq!(s.note().content, "Hello world!");
    assert!(!s.redo());
}

#[test]
fn transcript_is_its_own_step_even_mid_typing() {
    let (mut s, clock) = open(Note::new().with_content("t", "Dear diary"));
    s.document_mut().type_text(",");
    s.on_input();

    s.append_transcript("today was calm");
    assert_eq!(s.document().content(), "Dear diary, today was calm");

    clock.advance_ms(5000);
    assert!(!s.poll());
    let log: Vec<_> = s.history().snapshots().collect();
    assert_eq!(log, ["Dear diary", "Dear diary, today was calm"]);

    assert!(s.undo());
    assert_eq!(s.document().content(), "Dear diary");
}

#[test]
fn clear_is_undoable() {
    let (mut s, _) = open(Note::new().with_content("t", "<p>keep me</p>"));
    s.clear();
    assert_eq!(s.document().content(), "");
    assert!(s.can_undo());
    s.undo();
    assert_eq!(s.note().content, "<p>keep me</p>");
}

#[test]
fn inline_style_is_recorded() {
    let (mut s, _) = open(Note::new().with_content("t", "make this bold"));
    s.apply_inline_style(Selection::new(10, 14), InlineStyle::Bold).unwrap();
    assert_eq!(s.document().content(), "make this <b>bold</b>");
    assert!(s
        .apply_inline_style(Selection::new(0, 999), InlineStyle::Italic)
        .is_err());
    assert_eq!(s.history().len(), 2);
}

#[test]
fn switching_notes_discards_history() {
    let first = Note::new().with_content("first", "one");
    let first_again = first.clone();
    let (mut s, _) = open(first);
    s.replace_content("one edited");
    assert!(s.can_undo());

    assert!(!s.switch_to(first_again));
    assert!(s.can_undo());

    assert!(s.switch_to(Note::new().with_content("second", "two")));
    assert_eq!(s.document().content(), "two");
    assert!(!s.can_undo());
    assert_eq!(s.history().len(), 1);
}

#[test]
fn execute_tool_replace_append_and_formatting() {
    let (mut s, _) = open(Note::new().with_content("t", "<p>a</p>"));

    let ack = s.execute_tool(&ToolCall::UpdateNoteContent {
        new_content: "<p>b</p>".into(),
        mode: UpdateMode::Append,
    });
    assert_eq!(ack, TOOL_CONTENT_UPDATED);
    assert_eq!(s.document().content(), "<p>a</p><p>b</p>");

    s.execute_tool(&ToolCall::UpdateNoteContent {
        new_content: "<p>fresh</p>".into(),
        mode: UpdateMode::Replace,
    });
    assert_eq!(s.note().content, "<p>fresh</p>");

    let ack = s.execute_tool(&ToolCall::ApplyFormatting(FormattingPatch {
        underline: Some(true),
        alignment: Some(Alignment::Right),
        ..FormattingPatch::default()
    }));
    assert_eq!(ack, TOOL_FORMATTING_APPLIED);
    assert!(s.note().formatting.underline);
    assert_eq!(s.note().formatting.alignment, Alignment::Right);
    // formatting does not touch the content log
    assert_eq!(s.history().len(), 3);
}

#[test]
fn chat_runs_tool_calls_and_skips_bad_ones() {
    let assistant = ScriptedAssistant {
        reply: ChatReply {
            text: None,
            function_calls: vec![
                FunctionCall {
                    name: "updateNoteContent".into(),
                    args: json!({ "newContent": " <p>Fixed.</p>", "mode": "append" }),
                },
                FunctionCall {
                    name: "launchRockets".into(),
                    args: json!({}),
                },
                FunctionCall {
                    name: "applyFormatting".into(),
                    args: json!({ "bold": true }),
                },
            ],
        },
        ..ScriptedAssistant::default()
    };
    let (mut s, _) = open(Note::new().with_content("t", "<p>draft</p>"));

    let turn = s.chat_with(&assistant, "  fix grammar ").unwrap();
    assert_eq!(turn.text, "Synced and updated.");
    assert_eq!(turn.speech, None);
    assert_eq!(s.document().content(), "<p>draft</p> <p>Fixed.</p>");
    assert!(s.note().formatting.bold);
    assert_eq!(s.active_process(), None);
    assert_eq!(assistant.seen.borrow()[0], "chat:fix grammar|draft");

    assert!(s.undo());
    assert_eq!(s.document().content(), "<p>draft</p>");
}

#[test]
fn translate_replaces_content_and_sets_language() {
    let assistant = ScriptedAssistant::default();
    let (mut s, _) = open(Note::new().with_content("t", "<b>good</b> morning"));
    let bn = language_by_code("bn").unwrap();

    s.translate_with(&assistant, bn).unwrap();
    assert_eq!(s.document().content(), "[Bangladesh] good morning");
    assert_eq!(s.note().language, "bn");
    assert!(s.undo());
    assert_eq!(s.document().content(), "<b>good</b> morning");
}

#[test]
fn failed_request_leaves_note_untouched() {
    let assistant = ScriptedAssistant::failing();
    let (mut s, _) = open(Note::new().with_content("t", "original"));
    let fr = language_by_code("fr").unwrap();

    let err = s.translate_with(&assistant, fr).unwrap_err();
    assert_eq!(err, AiError::Transport("offline".into()));
    assert_eq!(s.document().content(), "original");
    assert_eq!(s.note().language, "en");
    assert_eq!(s.active_process(), None);
    assert_eq!(s.history().len(), 1);

    let clip = AudioClip {
        mime_type: "audio/webm".into(),
        data: "AAAA".into(),
    };
    assert!(s.transcribe_with(&assistant, &clip, fr).is_err());
    assert!(s.generate_image_from_note_with(&assistant).is_err());
    assert!(s.generate_image_with(&assistant, "boats", None).is_err());
    assert!(s.note().images.is_empty());
    assert_eq!(s.history().len(), 1);
}

#[test]
fn empty_note_skips_the_assistant() {
    let assistant = ScriptedAssistant::default();
    let (mut s, _) = open(Note::new());
    let en = language_by_code("en").unwrap();

    s.translate_with(&assistant, en).unwrap();
    assert_eq!(s.summarize_with(&assistant).unwrap(), "");
    assert_eq!(s.speak_with(&assistant).unwrap(), None);
    assert!(assistant.seen.borrow().is_empty());
}

#[test]
fn dictation_summary_speech_and_image() {
    let assistant = ScriptedAssistant::default();
    let (mut s, _) = open(Note::new().with_content("t", "notes"));
    let ja = language_by_code("ja").unwrap();
    let clip = AudioClip {
        mime_type: "audio/webm".into(),
        data: "AAAA".into(),
    };

    s.transcribe_with(&assistant, &clip, ja).unwrap();
    assert_eq!(s.document().content(), "notes spoken words");

    assert_eq!(s.summarize_with(&assistant).unwrap(), "short");
    assert_eq!(s.speak_with(&assistant).unwrap().unwrap().sample_rate, 24000);

    let url = s.generate_image_from_note_with(&assistant).unwrap().unwrap();
    assert_eq!(url, "data:image/png;base64,SU1H");
    assert_eq!(s.note().images, vec![url]);

    let seen = assistant.seen.borrow();
    assert_eq!(seen[0], "transcribe:日本語:audio/webm");
    assert_eq!(seen.last().unwrap(), "image:notes spoken words");
    assert!(!seen.iter().any(|c| c.starts_with("prompt:")));
}

#[test]
fn manual_prompt_takes_style_suffix() {
    let assistant = ScriptedAssistant::default();
    let (mut s, _) = open(Note::new().with_content("t", "ignored"));
    let style = art_style_by_label("Cyberpunk").unwrap();

    s.generate_image_with(&assistant, "a city", Some(style))
        .unwrap()
        .unwrap();
    s.generate_image_with(&assistant, "a lake", None)
        .unwrap()
        .unwrap();
    assert_eq!(s.generate_image_with(&assistant, "   ", Some(style)), Ok(None));

    let seen = assistant.seen.borrow();
    assert_eq!(
        seen[0],
        "image:a city , cyberpunk style, neon lights, highly detailed, futuristic"
    );
    assert_eq!(seen[1], "image:a lake");
    assert_eq!(seen.len(), 2);
    assert_eq!(s.note().images.len(), 2);
    assert_eq!(s.active_process(), None);
}

#[test]
fn prompt_suggestion_falls_back_to_note_start() {
    let long = "word ".repeat(40);
    let (mut s, _) = open(Note::new().with_content("t", long.clone()));

    let ok = ScriptedAssistant::default();
    assert_eq!(
        s.suggest_image_prompt_or_fallback(&ok).as_deref(),
        Some("a quiet harbor at dawn")
    );

    let broken = ScriptedAssistant {
        fail_only: Some("prompt:"),
        ..ScriptedAssistant::default()
    };
    let fallback = s.suggest_image_prompt_or_fallback(&broken).unwrap();
    assert_eq!(fallback, long[..100]);

    let url = s
        .generate_image_with(&broken, &fallback, None)
        .unwrap()
        .unwrap();
    assert_eq!(s.note().images, vec![url]);

    let (mut empty, _) = open(Note::new());
    assert_eq!(empty.suggest_image_prompt_or_fallback(&ok), None);
}

#[test]
fn chat_log_keeps_turns_until_note_switch() {
    let assistant = ScriptedAssistant {
        reply: ChatReply::text("Here is an idea."),
        ..ScriptedAssistant::default()
    };
    let (mut s, _) = open(Note::new().with_content("t", "plans"));
    assert_eq!(s.chat().len(), 1);
    assert_eq!(s.chat().messages()[0].text, WELCOME_MESSAGE);

    s.chat_with(&assistant, "first").unwrap();
    s.chat_with(&assistant, "second").unwrap();
    let roles: Vec<_> = s.chat().messages().iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        [
            ChatRole::Assistant,
            ChatRole::User,
            ChatRole::Assistant,
            ChatRole::User,
            ChatRole::Assistant
        ]
    );
    assert_eq!(s.chat().messages()[3].text, "second");
    assert_eq!(s.chat().last().unwrap().text, "Here is an idea.");

    s.chat_mut().set_auto_speak(true);
    let same = s.note().clone();
    assert!(!s.switch_to(same));
    assert_eq!(s.chat().len(), 5);

    assert!(s.switch_to(Note::new().with_content("other", "x")));
    assert_eq!(s.chat().len(), 1);
    assert_eq!(s.chat().messages()[0].text, WELCOME_MESSAGE);
    assert!(s.chat().auto_speak());
}

#[test]
fn auto_speak_narrates_reply() {
    let assistant = ScriptedAssistant {
        reply: ChatReply::text("Done."),
        ..ScriptedAssistant::default()
    };
    let (mut s, _) = open(Note::new().with_content("t", "body"));

    assert_eq!(s.chat_with(&assistant, "hi").unwrap().speech, None);
    assert!(s.chat_mut().toggle_auto_speak());
    let turn = s.chat_with(&assistant, "again").unwrap();
    assert_eq!(turn.speech.unwrap().sample_rate, 24000);
    assert_eq!(assistant.seen.borrow().last().unwrap(), "speak:Done.");

    let mute = ScriptedAssistant {
        reply: ChatReply::text("Done."),
        fail_only: Some("speak:"),
        ..ScriptedAssistant::default()
    };
    let turn = s.chat_with(&mute, "once more").unwrap();
    assert_eq!(turn.text, "Done.");
    assert_eq!(turn.speech, None);
    assert_eq!(s.chat().error(), Some(INTERRUPTED_MESSAGE));
}

#[test]
fn failed_chat_keeps_user_turn_and_flags_error() {
    let (mut s, _) = open(Note::new().with_content("t", "body"));
    let err = s
        .chat_with(&ScriptedAssistant::failing(), "hello?")
        .unwrap_err();
    assert_eq!(err, AiError::Transport("offline".into()));
    assert_eq!(s.chat().len(), 2);
    assert_eq!(s.chat().last().unwrap().role, ChatRole::User);
    assert_eq!(s.chat().error(), Some(INTERRUPTED_MESSAGE));
    assert_eq!(s.document().content(), "body");
}

#[test]
fn save_flushes_pending_typing() {
    let mut store = NoteStore::new();
    let (mut s, _) = open(Note::new().with_content("title", "body"));
    s.document_mut().type_text(" more");
    s.on_input();
    assert!(s.save_into(&mut store));

    let id = s.note().id.clone();
    assert_eq!(store.get(&id).unwrap().content, "body more");
    assert!(!s.history().has_pending());
    assert_eq!(s.history().len(), 2);

    s.set_title("renamed");
    assert!(!s.save_into(&mut store));
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(&id).unwrap().title, "renamed");

    let note = s.into_note();
    assert_eq!(note.content, "body more");
}

#[test]
fn explicit_save_keeps_blank_note_but_closing_skips_it() {
    let mut store = NoteStore::new();

    let (mut leaving, _) = open(Note::new());
    assert!(!leaving.close_into(&mut store));
    assert!(store.is_empty());

    let (mut saving, _) = open(Note::new());
    assert!(saving.save_into(&mut store));
    assert_eq!(store.len(), 1);

    let (mut typed, _) = open(Note::new());
    typed.document_mut().type_text("hi");
    typed.on_input();
    assert!(typed.close_into(&mut store));
    assert_eq!(store.len(), 2);
    assert_eq!(store.iter().next().unwrap().content, "hi");
}

#[test]
fn active_process_labels() {
    assert_eq!(AiProcess::SynthesizingVoice.to_string(), "Synthesizing Voice");
    assert_eq!(AiProcess::GeneratingArt.to_string(), "Generating Art");
}

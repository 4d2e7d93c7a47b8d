// Prompt shaping for image generation: style presets for hand-written prompts and
// the fallback used when the model cannot suggest a prompt from the note.

use serde::Serialize;

/// How much note text stands in for a suggested prompt when suggestion fails.
pub const PROMPT_FALLBACK_CHARS: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArtStyle {
    pub label: &'static str,
    /// Appended to the prompt after a space; starts with its own comma.
    pub suffix: &'static str,
}

impl ArtStyle {
    pub fn apply(&self, prompt: &str) -> String {
        format!("{} {}", prompt, self.suffix)
    }
}

pub const ART_STYLES: &[ArtStyle] = &[
    ArtStyle {
        label: "Cyberpunk",
        suffix: ", cyberpunk style, neon lights, highly detailed, futuristic",
    },
    ArtStyle {
        label: "Watercolor",
        suffix: ", soft watercolor painting, artistic brushstrokes, dreamy",
    },
    ArtStyle {
        label: "3D Render",
        suffix: ", Octane render, 3D character style, cinematic lighting, cute",
    },
    ArtStyle {
        label: "Minimalist",
        suffix: ", minimalist flat vector art, clean lines, simple colors",
    },
    ArtStyle {
        label: "Oil Painting",
        suffix: ", classic oil painting on canvas, heavy texture, masterpiece",
    },
];

pub fn art_style_by_label(label: &str) -> Option<&'static ArtStyle> {
    ART_STYLES.iter().find(|s| s.label == label)
}

/// The first `PROMPT_FALLBACK_CHARS` characters of the note text.
pub fn prompt_fallback(note_text: &str) -> String {
    note_text.chars().take(PROMPT_FALLBACK_CHARS).collect()
}

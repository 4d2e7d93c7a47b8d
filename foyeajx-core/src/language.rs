//! Languages offered for translation and dictation.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    /// Tag stored on the note, e.g. `bn`.
    pub code: &'static str,
    /// Region label shown in pickers and passed to the translator.
    pub name: &'static str,
    /// Endonym, passed to the transcriber.
    pub native: &'static str,
    pub icon: &'static str,
}

pub const LANGUAGES: &[Language] = &[
    Language {
        code: "en",
        name: "USA / UK",
        native: "English",
        icon: "🇺🇸",
    },
    Language {
        code: "bn",
        name: "Bangladesh",
        native: "বাংলা",
        icon: "🇧🇩",
    },
    Language {
        code: "ja",
        name: "Japan",
        native: "日本語",
        icon: "🇯🇵",
    },
    Language {
        code: "zh",
        name: "China",
        native: "中文",
        icon: "🇨🇳",
    },
    Language {
        code: "ur",
        name: "Pakistan",
        native: "اردو",
        icon: "🇵🇰",
    },
    Language {
        code: "ar",
        name: "Saudi Arabia",
        native: "العربية",
        icon: "🇸🇦",
    },
    Language {
        code: "fr",
        name: "France",
        native: "Français",
        icon: "🇫🇷",
    },
    Language {
        code: "de",
        name: "Germany",
        native: "Deutsch",
        icon: "🇩🇪",
    },
    Language {
        code: "es",
        name: "Spain",
        native: "Español",
        icon: "🇪🇸",
    },
    Language {
        code: "it",
        name: "Italy",
        native: "Italiano",
        icon: "🇮🇹",
    },
    Language {
        code: "ko",
        name: "South Korea",
        native: "한국어",
        icon: "🇰🇷",
    },
    Language {
        code: "tr",
        name: "Turkey",
        native: "Türkçe",
        icon: "🇹🇷",
    },
];

pub fn language_by_code(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code))
}

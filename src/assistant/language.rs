//! The enumerated set of languages a topic can be asked about or answered in.

use std::fmt;

use crate::error::{AssistError, Result};
use crate::ui::Style;

/// A supported language: ISO 639-1 code plus the English name used in prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

const fn lang(code: &'static str, name: &'static str) -> Language {
    Language { code, name }
}

pub const LANGUAGES: &[Language] = &[
    lang("ar", "Arabic"),
    lang("bn", "Bengali"),
    lang("zh", "Chinese"),
    lang("cs", "Czech"),
    lang("da", "Danish"),
    lang("nl", "Dutch"),
    lang("en", "English"),
    lang("fi", "Finnish"),
    lang("fr", "French"),
    lang("de", "German"),
    lang("el", "Greek"),
    lang("he", "Hebrew"),
    lang("hi", "Hindi"),
    lang("hu", "Hungarian"),
    lang("id", "Indonesian"),
    lang("it", "Italian"),
    lang("ja", "Japanese"),
    lang("ko", "Korean"),
    lang("la", "Latin"),
    lang("no", "Norwegian"),
    lang("fa", "Persian"),
    lang("pl", "Polish"),
    lang("pt", "Portuguese"),
    lang("ro", "Romanian"),
    lang("ru", "Russian"),
    lang("es", "Spanish"),
    lang("sw", "Swahili"),
    lang("sv", "Swedish"),
    lang("th", "Thai"),
    lang("tr", "Turkish"),
    lang("uk", "Ukrainian"),
    lang("ur", "Urdu"),
    lang("vi", "Vietnamese"),
];

pub const DEFAULT_SOURCE: Language = lang("es", "Spanish");
pub const DEFAULT_TARGET: Language = lang("en", "English");

/// Looks a language up by exact code (`ja`) or case-insensitive name (`japanese`).
pub fn find_language(input: &str) -> Option<Language> {
    let input = input.trim();
    LANGUAGES
        .iter()
        .find(|l| l.code == input || l.name.eq_ignore_ascii_case(input))
        .copied()
}

/// Resolves user input to a supported language.
///
/// # Errors
///
/// Returns a validation error naming the input if it is not in [`LANGUAGES`].
pub fn validate_language(input: &str) -> Result<Language> {
    find_language(input).ok_or_else(|| {
        AssistError::Validation(format!(
            "Invalid language: '{input}'\n\n\
             Use a name or ISO 639-1 code: Spanish, en, ja, fr, ...\n\
             Run 'langassist languages' to see all supported languages."
        ))
    })
}

/// Prints all supported languages to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported languages"));
    for language in LANGUAGES {
        println!(
            "  {:3} {}",
            Style::code(language.code),
            Style::secondary(language.name)
        );
    }
}

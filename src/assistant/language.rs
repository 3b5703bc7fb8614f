//! Supported answer languages.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ui::Style;

/// A language an answer can be displayed in.
///
/// `English` is the native language of the book; the other two are
/// translation targets accepted by the translate endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    Pashto,
    Dari,
}

impl Language {
    /// All languages in display order.
    pub const ALL: [Self; 3] = [Self::English, Self::Pashto, Self::Dari];

    /// The wire code sent to the translate endpoint.
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Pashto => "pashto",
            Self::Dari => "dari",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Pashto => "Pashto",
            Self::Dari => "Dari",
        }
    }

    /// Returns `true` for the language the book is written in.
    pub const fn is_native(self) -> bool {
        matches!(self, Self::English)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code() == s)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Invalid language code: '{s}'\n\n\
                     Valid language codes: {}\n\
                     Run 'docent languages' to see all supported codes.",
                    Self::ALL.map(Self::code).join(", ")
                )
            })
    }
}

/// Prints all supported language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported languages"));
    for lang in Language::ALL {
        let marker = if lang.is_native() {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        };
        println!(
            "  {:7} {}{marker}",
            Style::code(lang.code()),
            Style::secondary(lang.label())
        );
    }
}

/// Validates that the given language code is supported.
///
/// # Errors
///
/// Returns an error if the language code is not in the supported list.
pub fn validate_language(code: &str) -> Result<Language> {
    code.parse()
}

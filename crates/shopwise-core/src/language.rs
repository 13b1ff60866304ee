//! Output languages and the native/fallback split.
//!
//! Only a subset of [`Language`] is translated directly. Every other
//! language is served through [`Language::FALLBACK`] and the result is
//! marked with [`FALLBACK_MARKER`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseLanguageError;

/// Prefix placed on text translated through the fallback language.
pub const FALLBACK_MARKER: &str = "[Translated via Hindi] ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Hindi,
    Tamil,
    Telugu,
    Kannada,
    Malayalam,
    Marathi,
    Bengali,
    Gujarati,
    Punjabi,
    Odia,
}

impl Language {
    pub const ALL: [Language; 11] = [
        Language::English,
        Language::Hindi,
        Language::Tamil,
        Language::Telugu,
        Language::Kannada,
        Language::Malayalam,
        Language::Marathi,
        Language::Bengali,
        Language::Gujarati,
        Language::Punjabi,
        Language::Odia,
    ];

    /// Substitute for languages without native support.
    pub const FALLBACK: Language = Language::Hindi;

    /// ISO 639-1 code.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Tamil => "ta",
            Language::Telugu => "te",
            Language::Kannada => "kn",
            Language::Malayalam => "ml",
            Language::Marathi => "mr",
            Language::Bengali => "bn",
            Language::Gujarati => "gu",
            Language::Punjabi => "pa",
            Language::Odia => "or",
        }
    }

    /// English name, as used in prompts.
    pub fn name(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Hindi => "Hindi",
            Language::Tamil => "Tamil",
            Language::Telugu => "Telugu",
            Language::Kannada => "Kannada",
            Language::Malayalam => "Malayalam",
            Language::Marathi => "Marathi",
            Language::Bengali => "Bengali",
            Language::Gujarati => "Gujarati",
            Language::Punjabi => "Punjabi",
            Language::Odia => "Odia",
        }
    }

    pub fn is_natively_supported(self) -> bool {
        matches!(
            self,
            Language::English
                | Language::Hindi
                | Language::Tamil
                | Language::Telugu
                | Language::Kannada
                | Language::Malayalam
        )
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = ParseLanguageError;

    /// Accepts the English name or the ISO 639-1 code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Language::ALL
            .iter()
            .copied()
            .find(|lang| lang.code() == wanted || lang.name().to_lowercase() == wanted)
            .ok_or_else(|| ParseLanguageError(s.to_string()))
    }
}

//! Text normalization shared by skill matching and similarity scoring

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;
use unicode_segmentation::UnicodeSegmentation;

/// Lowercase, newline-free text in which every character is either a
/// word character or whitespace.
///
/// "Lowercase" means `str::to_lowercase` was applied. Uppercase characters
/// without a lowercase mapping, such as the mathematical alphanumerics
/// (U+1D400 `𝐀`), pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }

    /// Whitespace-delimited words, in order, duplicates kept
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split_whitespace()
    }

    /// Leading slice of at most `max_chars` grapheme clusters
    pub fn snippet(&self, max_chars: usize) -> &str {
        match self.0.grapheme_indices(true).nth(max_chars) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct TextNormalizer {
    newline_regex: Regex,
    non_word_regex: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        let newline_regex = Regex::new(r"\r\n|\n|\r").expect("Invalid newline regex");

        // Replaced with a space, not deleted: "co-operative" -> "co operative"
        let non_word_regex = Regex::new(r"[^\w\s]").expect("Invalid non-word regex");

        Self {
            newline_regex,
            non_word_regex,
        }
    }

    pub fn normalize(&self, text: &str) -> NormalizedText {
        let lowered = text.to_lowercase();
        let single_line = self.newline_regex.replace_all(&lowered, " ");
        let cleaned = self.non_word_regex.replace_all(&single_line, " ");
        NormalizedText(cleaned.into_owned())
    }
}

/// Normalize with a process-wide normalizer
pub fn normalize(text: &str) -> NormalizedText {
    static NORMALIZER: OnceLock<TextNormalizer> = OnceLock::new();
    NORMALIZER.get_or_init(TextNormalizer::new).normalize(text)
}

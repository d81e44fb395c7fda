//! Per-character annotations from the analysis service
//!
//! The wire shape is owned by the backend; field names here match its JSON
//! exactly (`character_analysis` entries of the `/analyze` response).

use serde::{Deserialize, Serialize};

/// One rendered character with its reading and meaning.
///
/// The stream is flat and ordered, one entry per rendered character
/// including punctuation. The optional word fields are present when the
/// backend's word segmentation assigned the character to a multi-character
/// word; `is_word_end` drives word-group aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterAnnotation {
    /// The character as rendered.
    pub character: String,
    /// Pinyin reading (or the character itself for non-Chinese input).
    pub pinyin: String,
    /// Default per-character meaning, used as the translation fallback.
    pub meaning: String,
    /// The complete word this character belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,
    /// Position within the word (0 = first character).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_position: Option<usize>,
    /// Total character length of the word.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word_length: Option<usize>,
    /// True for the first character of a word.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_word_start: Option<bool>,
    /// True for the last character of a word.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_word_end: Option<bool>,
}

impl CharacterAnnotation {
    /// True when this annotation closes the word it belongs to.
    pub fn closes_word(&self) -> bool {
        self.is_word_end == Some(true)
    }
}

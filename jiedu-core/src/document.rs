//! Document and resolved-sentence types

use crate::segmenter;
use serde::{Deserialize, Serialize};

/// A loaded text together with its canonical sentence list.
///
/// The sentence list is derived once at construction and never mutated;
/// loading new text replaces the document wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable identifier for the document.
    pub id: String,
    /// Display title.
    pub title: String,
    /// The raw text exactly as submitted.
    pub raw_content: String,
    sentences: Vec<String>,
}

impl Document {
    /// Build a document, deriving the canonical sentence list from the raw
    /// text. Text that segments to zero sentences is valid; navigation is
    /// simply empty.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        raw_content: impl Into<String>,
    ) -> Self {
        let raw_content = raw_content.into();
        let sentences = segmenter::segment(&raw_content);
        Self {
            id: id.into(),
            title: title.into(),
            raw_content,
            sentences,
        }
    }

    /// The canonical sentence list, in source order.
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Number of canonical sentences.
    pub fn sentence_count(&self) -> usize {
        self.sentences.len()
    }

    /// Length of the raw content in characters.
    pub fn char_len(&self) -> usize {
        crate::text::char_len(&self.raw_content)
    }

    /// True when the raw content is empty.
    pub fn is_empty(&self) -> bool {
        self.raw_content.is_empty()
    }
}

/// A sentence selection, either reconciled against the canonical list or
/// ad-hoc (free-form user-selected text).
///
/// `canonical_index` is `None` for ad-hoc selections; such text is still
/// valid for analysis but not navigable. `offset` is the character offset
/// of the text in the document's raw content, best-effort: it is used only
/// for highlighting and for seeding the next boundary search, and may be
/// stale when the same sentence text recurs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSentence {
    /// The selected text, trimmed.
    pub text: String,
    /// Index into the canonical sentence list, when the text matches an
    /// entry under whitespace-normalized equality.
    pub canonical_index: Option<usize>,
    /// Character offset of the text in the raw content, when known.
    pub offset: Option<usize>,
}

impl ResolvedSentence {
    /// The sentinel returned when nothing could be resolved.
    pub fn unresolved() -> Self {
        Self {
            text: String::new(),
            canonical_index: None,
            offset: None,
        }
    }

    /// A free-form selection that bypassed the canonical list.
    pub fn ad_hoc(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            canonical_index: None,
            offset: None,
        }
    }

    /// True when any text was resolved.
    pub fn is_resolved(&self) -> bool {
        !self.text.is_empty()
    }

    /// True when the selection matches a canonical sentence.
    pub fn is_canonical(&self) -> bool {
        self.canonical_index.is_some()
    }
}

impl Default for ResolvedSentence {
    fn default() -> Self {
        Self::unresolved()
    }
}

//! Word-group aggregation
//!
//! Turns the flat per-character annotation stream into word-level groups
//! and maintains the bidirectional index between the full display ordering
//! (punctuation rendered in place) and the punctuation-free content
//! ordering used for cross-view anchors.

use crate::annotation::CharacterAnnotation;
use serde::{Deserialize, Serialize};

/// CJK and ASCII punctuation treated as non-content.
const PUNCTUATION: &[char] = &[
    '。', '！', '？', '、', '，', '；', '：', '「', '」', '『', '』', '（', '）', '《', '》',
    '〈', '〉', '【', '】', '…', '—', '·', '～', '\u{201C}', '\u{201D}', '\u{2018}',
    '\u{2019}', '.', ',', '!', '?', ';', ':', '(', ')', '"', '\'', '-',
];

/// True for punctuation and whitespace characters.
pub fn is_punctuation(ch: char) -> bool {
    ch.is_whitespace() || PUNCTUATION.contains(&ch)
}

/// A run of consecutive annotations forming one word (or punctuation run).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordGroup {
    /// The characters of the group, in stream order.
    pub characters: Vec<CharacterAnnotation>,
    /// True when the group holds no content characters; such groups render
    /// in place but carry no content index.
    pub is_punctuation_only: bool,
}

impl WordGroup {
    /// Concatenated character text of the group.
    pub fn text(&self) -> String {
        self.characters.iter().map(|c| c.character.as_str()).collect()
    }

    /// The word this group stands for: the backend-assigned word of its
    /// first character when present, else the concatenated text.
    pub fn word(&self) -> String {
        self.characters
            .first()
            .and_then(|c| c.word.clone())
            .unwrap_or_else(|| self.text())
    }

    /// Pinyin of the group, characters joined with spaces.
    pub fn pinyin(&self) -> String {
        self.characters
            .iter()
            .map(|c| c.pinyin.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Per-character default meanings, joined; the translation fallback.
    pub fn fallback_meaning(&self) -> String {
        self.characters
            .iter()
            .map(|c| c.meaning.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// The aggregated groups of one analysis result, with the anchor mapping
/// between display order and content order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordGroups {
    groups: Vec<WordGroup>,
    content_of_group: Vec<Option<usize>>,
    group_of_content: Vec<usize>,
}

impl WordGroups {
    /// Aggregate a flat annotation stream.
    ///
    /// A group closes when its most recent character has `is_word_end`
    /// set, or at the end of the stream. The concatenation of all group
    /// characters reconstructs the input exactly.
    pub fn from_annotations(annotations: &[CharacterAnnotation]) -> Self {
        let mut groups = Vec::new();
        let mut current: Vec<CharacterAnnotation> = Vec::new();

        for (i, annotation) in annotations.iter().enumerate() {
            current.push(annotation.clone());
            if annotation.closes_word() || i == annotations.len() - 1 {
                groups.push(close_group(std::mem::take(&mut current)));
            }
        }

        let mut content_of_group = Vec::with_capacity(groups.len());
        let mut group_of_content = Vec::new();
        for (index, group) in groups.iter().enumerate() {
            if group.is_punctuation_only {
                content_of_group.push(None);
            } else {
                content_of_group.push(Some(group_of_content.len()));
                group_of_content.push(index);
            }
        }

        Self {
            groups,
            content_of_group,
            group_of_content,
        }
    }

    /// All groups in display order.
    pub fn groups(&self) -> &[WordGroup] {
        &self.groups
    }

    /// Number of groups in display order.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// True when no groups were produced.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of content groups.
    pub fn content_len(&self) -> usize {
        self.group_of_content.len()
    }

    /// Content index of a display group; `None` for punctuation-only
    /// groups and out-of-range indices.
    pub fn content_index_of(&self, group_index: usize) -> Option<usize> {
        self.content_of_group.get(group_index).copied().flatten()
    }

    /// Display index of a content group; `None` out of range.
    pub fn group_index_of_content(&self, content_index: usize) -> Option<usize> {
        self.group_of_content.get(content_index).copied()
    }

    /// Content groups with their display indices, in order.
    pub fn content_groups(&self) -> impl Iterator<Item = (usize, &WordGroup)> {
        self.group_of_content.iter().map(|&i| (i, &self.groups[i]))
    }
}

fn close_group(characters: Vec<CharacterAnnotation>) -> WordGroup {
    let is_punctuation_only = characters
        .iter()
        .all(|c| c.character.chars().all(is_punctuation));
    WordGroup {
        characters,
        is_punctuation_only,
    }
}

//! Selection highlighting
//!
//! Computes the before/highlight/after split used to render the current
//! selection inside the continuous-text view, and maps logical character
//! offsets to rendering-node-relative positions for native text selection.

use crate::document::ResolvedSentence;
use crate::text;
use serde::{Deserialize, Serialize};

/// Three-way text split around the highlighted selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSplit {
    /// Text before the highlight.
    pub before: String,
    /// The highlighted text (empty when nothing could be located).
    pub highlighted: String,
    /// Text after the highlight.
    pub after: String,
}

impl HighlightSplit {
    fn none(raw: &str) -> Self {
        Self {
            before: raw.to_string(),
            highlighted: String::new(),
            after: String::new(),
        }
    }
}

/// Split raw content around a resolved selection.
///
/// The resolved offset is validated against the content first; a stale
/// offset falls back to the first global occurrence of the text. Text
/// that is absent entirely produces a no-highlight split (the whole
/// content as `before`), never an error.
pub fn split_for_highlight(raw: &str, resolved: &ResolvedSentence) -> HighlightSplit {
    if resolved.text.is_empty() {
        return HighlightSplit::none(raw);
    }
    let len = text::char_len(&resolved.text);

    let start = resolved
        .offset
        .filter(|&o| text::char_substring(raw, o, len).as_deref() == Some(resolved.text.as_str()))
        .or_else(|| text::find_from(raw, &resolved.text, 0));

    match start {
        Some(o) => {
            let chars: Vec<char> = raw.chars().collect();
            HighlightSplit {
                before: chars[..o].iter().collect(),
                highlighted: chars[o..o + len].iter().collect(),
                after: chars[o + len..].iter().collect(),
            }
        }
        None => HighlightSplit::none(raw),
    }
}

/// A selection expressed relative to one rendering node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSelection {
    /// Index of the node in text-accumulation order.
    pub node_index: usize,
    /// Selection start within the node, in characters.
    pub start: usize,
    /// Selection end within the node, in characters (exclusive).
    pub end: usize,
}

/// Map a logical character span onto the rendering nodes.
///
/// `nodes` is the rendered text in accumulation order. When the span
/// crosses a node boundary, only the portion inside the first node holding
/// the start is selected; callers accept this as a known limitation rather
/// than stitching selections across nodes. Returns `None` when the start
/// offset lies past the accumulated text.
pub fn selection_in_nodes(nodes: &[&str], start: usize, len: usize) -> Option<NodeSelection> {
    let mut accumulated = 0;
    for (node_index, node) in nodes.iter().enumerate() {
        let node_len = text::char_len(node);
        if start < accumulated + node_len {
            let local_start = start - accumulated;
            let local_end = (local_start + len).min(node_len);
            return Some(NodeSelection {
                node_index,
                start: local_start,
                end: local_end,
            });
        }
        accumulated += node_len;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::ResolvedSentence;

    fn resolved(text: &str, offset: Option<usize>) -> ResolvedSentence {
        ResolvedSentence {
            text: text.to_string(),
            canonical_index: None,
            offset,
        }
    }

    const RAW: &str = "第一句。第二句。第三句。";

    #[test]
    fn valid_offset_splits_in_place() {
        let split = split_for_highlight(RAW, &resolved("第二句。", Some(4)));
        assert_eq!(split.before, "第一句。");
        assert_eq!(split.highlighted, "第二句。");
        assert_eq!(split.after, "第三句。");
    }

    #[test]
    fn stale_offset_falls_back_to_substring_search() {
        // Offset points at the wrong place; the text is still present.
        let split = split_for_highlight(RAW, &resolved("第二句。", Some(2)));
        assert_eq!(split.before, "第一句。");
        assert_eq!(split.highlighted, "第二句。");
        assert_eq!(split.after, "第三句。");
    }

    #[test]
    fn missing_offset_searches_from_the_start() {
        let split = split_for_highlight(RAW, &resolved("第三句。", None));
        assert_eq!(split.before, "第一句。第二句。");
        assert_eq!(split.highlighted, "第三句。");
        assert_eq!(split.after, "");
    }

    #[test]
    fn absent_text_renders_no_highlight() {
        let split = split_for_highlight(RAW, &resolved("不存在的句子", Some(0)));
        assert_eq!(split.before, RAW);
        assert_eq!(split.highlighted, "");
        assert_eq!(split.after, "");
    }

    #[test]
    fn empty_selection_renders_no_highlight() {
        let split = split_for_highlight(RAW, &ResolvedSentence::unresolved());
        assert_eq!(split.before, RAW);
        assert_eq!(split.highlighted, "");
    }

    #[test]
    fn duplicate_text_honors_the_resolved_offset() {
        let raw = "氣功。中間。氣功。";
        let split = split_for_highlight(raw, &resolved("氣功。", Some(6)));
        assert_eq!(split.before, "氣功。中間。");
        assert_eq!(split.highlighted, "氣功。");
        assert_eq!(split.after, "");
    }

    #[test]
    fn node_mapping_locates_the_containing_node() {
        let nodes = ["第一段", "第二段落", "尾"];
        let sel = selection_in_nodes(&nodes, 4, 2).unwrap();
        assert_eq!(sel.node_index, 1);
        assert_eq!(sel.start, 1);
        assert_eq!(sel.end, 3);
    }

    #[test]
    fn node_mapping_clamps_span_to_the_first_node() {
        // Known limitation: a span crossing into the next node selects
        // only the portion available in the node holding the start.
        let nodes = ["第一段", "第二段落"];
        let sel = selection_in_nodes(&nodes, 1, 10).unwrap();
        assert_eq!(sel.node_index, 0);
        assert_eq!(sel.start, 1);
        assert_eq!(sel.end, 3);
    }

    #[test]
    fn node_mapping_past_the_end_is_none() {
        let nodes = ["短", "文"];
        assert_eq!(selection_in_nodes(&nodes, 2, 1), None);
        assert_eq!(selection_in_nodes(&[], 0, 1), None);
    }
}

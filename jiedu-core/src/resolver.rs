//! Position resolution and canonical reconciliation
//!
//! The canonical sentence list and the boundaries derived from a pointer
//! click are two sources of truth that can disagree; this module keeps the
//! ad-hoc search and the reconciliation step separate so each heuristic
//! stays auditable. Given a character offset into the raw text it derives
//! the sentence around it, then reconciles the result against the
//! document's canonical list. Forward and backward navigation recompute
//! offsets incrementally so repeated sentence text resolves to the
//! occurrence the user is actually looking at.

use crate::document::{Document, ResolvedSentence};
use crate::segmenter::is_terminator;
use crate::text;

/// Candidates shorter than this are treated as a sign that the ad-hoc
/// boundary search under- or over-shot (e.g. landed inside a multi-line
/// run) and are reconciled against the canonical list by containment.
pub const MIN_CANDIDATE_CHARS: usize = 4;

/// Slack, in characters, on each side of the click when searching for a
/// sentence occurrence near it before falling back to the first global
/// occurrence.
const OFFSET_SEARCH_SLACK: usize = 16;

/// Characters taken on each side of the click as local context when the
/// ad-hoc candidate is empty.
const CONTEXT_RADIUS: usize = 2;

/// Resolve the sentence around an arbitrary character offset.
///
/// Offsets outside the document are clamped; an empty document yields the
/// unresolved sentinel. Text that matches no canonical sentence comes back
/// with `canonical_index: None` (still valid for analysis, not navigable).
pub fn resolve_at_offset(doc: &Document, click_offset: usize) -> ResolvedSentence {
    let chars: Vec<char> = doc.raw_content.chars().collect();
    if chars.is_empty() {
        return ResolvedSentence::unresolved();
    }
    let click = click_offset.min(chars.len());

    // Start boundary: just past the nearest terminator or line break
    // behind the click, else the start of the text.
    let mut start = 0;
    for j in (0..click).rev() {
        if is_terminator(chars[j]) || chars[j] == '\n' {
            start = j + 1;
            break;
        }
    }

    // End boundary: just past the nearest terminator ahead, or just
    // before a line break (hard stop, not part of the sentence).
    let mut end = chars.len();
    for (j, &ch) in chars.iter().enumerate().skip(click) {
        if is_terminator(ch) {
            end = j + 1;
            break;
        }
        if ch == '\n' {
            end = j;
            break;
        }
    }
    let end = end.max(start);

    let (candidate_start, candidate) = trimmed_span(&chars, start, end);

    if text::char_len(&candidate) < MIN_CANDIDATE_CHARS {
        if let Some(rescued) = rescue_short_candidate(doc, &chars, click, &candidate) {
            return rescued;
        }
    }

    if let Some(resolved) = reconcile_exact(doc, &candidate, click) {
        return resolved;
    }

    if candidate.is_empty() {
        return ResolvedSentence::unresolved();
    }
    ResolvedSentence {
        text: candidate,
        canonical_index: None,
        offset: Some(candidate_start),
    }
}

/// Resolve a canonical sentence by list index, recomputing its offset by
/// replaying accumulation from the start of the document. Out-of-range
/// indices yield the unresolved sentinel.
pub fn resolve_index(doc: &Document, index: usize) -> ResolvedSentence {
    let sentences = doc.sentences();
    if index >= sentences.len() {
        return ResolvedSentence::unresolved();
    }

    let mut pos = 0;
    let mut offset = None;
    for (i, sentence) in sentences[..=index].iter().enumerate() {
        let found = text::find_from(&doc.raw_content, sentence, pos);
        if i == index {
            offset = found.or_else(|| text::find_from(&doc.raw_content, sentence, 0));
        } else if let Some(f) = found {
            pos = f + text::char_len(sentence);
        }
    }

    ResolvedSentence {
        text: sentences[index].clone(),
        canonical_index: Some(index),
        offset,
    }
}

/// Advance to the next canonical sentence.
///
/// The new offset is found by searching just past the current offset, so
/// repeated identical sentence text resolves to the next occurrence rather
/// than snapping back to the first. No-op at the last sentence or for a
/// non-canonical selection.
pub fn resolve_forward(doc: &Document, current: &ResolvedSentence) -> ResolvedSentence {
    let Some(index) = current.canonical_index else {
        return current.clone();
    };
    let sentences = doc.sentences();
    if index + 1 >= sentences.len() {
        return current.clone();
    }

    let next = &sentences[index + 1];
    let search_from = current.offset.map_or(0, |o| o + 1);
    let offset = text::find_from(&doc.raw_content, next, search_from)
        .or_else(|| text::find_from(&doc.raw_content, next, 0));

    ResolvedSentence {
        text: next.clone(),
        canonical_index: Some(index + 1),
        offset,
    }
}

/// Step back to the previous canonical sentence.
///
/// Backward search cannot reuse the current offset as an anchor, so the
/// offset is recomputed by forward replay through all preceding canonical
/// sentences. No-op at index 0 or for a non-canonical selection.
pub fn resolve_backward(doc: &Document, current: &ResolvedSentence) -> ResolvedSentence {
    let Some(index) = current.canonical_index else {
        return current.clone();
    };
    if index == 0 {
        return current.clone();
    }
    resolve_index(doc, index - 1)
}

/// Trim a character span, returning the offset of the first retained
/// character together with the trimmed text.
fn trimmed_span(chars: &[char], start: usize, end: usize) -> (usize, String) {
    let mut s = start;
    let mut e = end;
    while s < e && chars[s].is_whitespace() {
        s += 1;
    }
    while e > s && chars[e - 1].is_whitespace() {
        e -= 1;
    }
    (s, chars[s..e].iter().collect())
}

/// Exact reconciliation: match the candidate against the canonical list
/// under whitespace normalization, disambiguating duplicate sentence text
/// by the occurrence nearest to the click.
fn reconcile_exact(doc: &Document, candidate: &str, click: usize) -> Option<ResolvedSentence> {
    let normalized = text::normalize_ws(candidate);
    if normalized.is_empty() {
        return None;
    }
    let sentences = doc.sentences();
    let matching: Vec<usize> = sentences
        .iter()
        .enumerate()
        .filter(|(_, s)| text::normalize_ws(s) == normalized)
        .map(|(i, _)| i)
        .collect();
    let first = *matching.first()?;
    let sentence = &sentences[first];

    let offset = text::find_in_window(&doc.raw_content, sentence, click, OFFSET_SEARCH_SLACK)
        .or_else(|| text::find_from(&doc.raw_content, sentence, 0));

    // Duplicate sentence text: the k-th occurrence in the raw content
    // corresponds to the k-th duplicate in the canonical list.
    let index = match (matching.len(), offset) {
        (1, _) | (_, None) => first,
        (_, Some(off)) => {
            let ordinal = occurrence_ordinal(&doc.raw_content, sentence, off);
            *matching.get(ordinal).unwrap_or(&first)
        }
    };

    Some(ResolvedSentence {
        text: sentences[index].clone(),
        canonical_index: Some(index),
        offset,
    })
}

/// Containment rescue for implausibly short candidates: pick the canonical
/// sentence whose normalized form contains the local click context,
/// preferring the occurrence nearest to the click.
fn rescue_short_candidate(
    doc: &Document,
    chars: &[char],
    click: usize,
    candidate: &str,
) -> Option<ResolvedSentence> {
    let mut contexts = Vec::new();
    if candidate.is_empty() {
        let before: String = chars[click.saturating_sub(CONTEXT_RADIUS)..click.min(chars.len())]
            .iter()
            .collect();
        let after: String = chars[click.min(chars.len())..(click + CONTEXT_RADIUS).min(chars.len())]
            .iter()
            .collect();
        contexts.push(before.trim().to_string());
        contexts.push(after.trim().to_string());
    } else {
        contexts.push(candidate.to_string());
    }

    let mut best: Option<(usize, usize, usize)> = None; // (distance, index, offset)
    for context in &contexts {
        let normalized = text::normalize_ws(context);
        if normalized.is_empty() {
            continue;
        }
        for (index, sentence) in doc.sentences().iter().enumerate() {
            if !text::normalize_ws(sentence).contains(&normalized) {
                continue;
            }
            if let Some((distance, offset)) =
                nearest_occurrence(&doc.raw_content, sentence, click)
            {
                if best.map_or(true, |(d, _, _)| distance < d) {
                    best = Some((distance, index, offset));
                }
            }
        }
    }

    best.map(|(_, index, offset)| ResolvedSentence {
        text: doc.sentences()[index].clone(),
        canonical_index: Some(index),
        offset: Some(offset),
    })
}

/// Occurrence of `needle` whose span is closest to `offset`, with its
/// distance. Scans the whole haystack.
fn nearest_occurrence(haystack: &str, needle: &str, offset: usize) -> Option<(usize, usize)> {
    let len = text::char_len(needle);
    let mut best: Option<(usize, usize)> = None;
    let mut pos = 0;
    while let Some(found) = text::find_from(haystack, needle, pos) {
        let distance = text::occurrence_distance(found, len, offset);
        if best.map_or(true, |(d, _)| distance < d) {
            best = Some((distance, found));
        }
        pos = found + 1;
    }
    best
}

/// Ordinal of the occurrence starting at `offset` among all occurrences of
/// `needle`, counting non-overlapping matches from the start.
fn occurrence_ordinal(haystack: &str, needle: &str, offset: usize) -> usize {
    let len = text::char_len(needle);
    let mut ordinal = 0;
    let mut pos = 0;
    while let Some(found) = text::find_from(haystack, needle, pos) {
        if found >= offset {
            break;
        }
        ordinal += 1;
        pos = found + len;
    }
    ordinal
}

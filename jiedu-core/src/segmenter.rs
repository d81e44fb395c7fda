//! Sentence segmentation
//!
//! Splits raw CJK prose into sentence-like units. The resulting list is the
//! single source of truth for navigation and for validating ad-hoc
//! selections, so the rules are deliberately simple and deterministic:
//!
//! - `。` (U+3002), `！` (U+FF01) and `？` (U+FF1F) end a sentence; the
//!   mark stays with the preceding text.
//! - Any line break ends the current unit and is discarded, so headings and
//!   short lines on their own line become separate units. Runs of breaks
//!   (paragraph boundaries) contribute nothing extra because empty pieces
//!   are dropped.

/// Sentence-final punctuation marks.
pub const SENTENCE_TERMINATORS: [char; 3] = ['。', '！', '？'];

/// True for characters that end a sentence.
pub fn is_terminator(ch: char) -> bool {
    SENTENCE_TERMINATORS.contains(&ch)
}

/// Split raw text into ordered, trimmed, non-empty sentence units.
///
/// Every unit is a verbatim contiguous substring of the input once its
/// edge whitespace is stripped, and units appear in source order.
pub fn segment(raw: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut current = String::new();

    for ch in raw.chars() {
        if is_terminator(ch) {
            current.push(ch);
            flush(&mut sentences, &mut current);
        } else if ch == '\n' {
            flush(&mut sentences, &mut current);
        } else {
            current.push(ch);
        }
    }
    flush(&mut sentences, &mut current);

    sentences
}

fn flush(sentences: &mut Vec<String>, current: &mut String) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed.to_string());
    }
    current.clear();
}

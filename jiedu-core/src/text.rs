//! Character-offset helpers
//!
//! All public offsets in this crate count characters, not bytes, because
//! they originate from pointer positions in rendered text. These helpers
//! bridge between `&str` and character-indexed operations.

/// Number of characters in a string.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Substring by character offset and length.
///
/// Returns `None` when the requested span extends past the end of the text.
pub fn char_substring(s: &str, start: usize, len: usize) -> Option<String> {
    let chars: Vec<char> = s.chars().collect();
    let end = start.checked_add(len)?;
    if end > chars.len() {
        return None;
    }
    Some(chars[start..end].iter().collect())
}

/// First occurrence of `needle` in `haystack` at or after the character
/// offset `start`, as a character offset.
pub fn find_from(haystack: &str, needle: &str, start: usize) -> Option<usize> {
    if needle.is_empty() {
        return None;
    }
    let hay: Vec<char> = haystack.chars().collect();
    let ndl: Vec<char> = needle.chars().collect();
    if ndl.len() > hay.len() {
        return None;
    }
    let last = hay.len() - ndl.len();
    (start..=last).find(|&i| hay[i..i + ndl.len()] == ndl[..])
}

/// Occurrence of `needle` nearest to the character offset `center`,
/// restricted to a window of `slack` characters on each side of the
/// needle-sized span around `center`.
///
/// Used to disambiguate repeated sentence text: the occurrence the user
/// actually clicked is the one closest to the click.
pub fn find_in_window(haystack: &str, needle: &str, center: usize, slack: usize) -> Option<usize> {
    let ndl_len = char_len(needle);
    if ndl_len == 0 {
        return None;
    }
    let window_start = center.saturating_sub(ndl_len + slack);
    let window_end = center + ndl_len + slack;

    let mut best: Option<usize> = None;
    let mut pos = window_start;
    while let Some(found) = find_from(haystack, needle, pos) {
        if found > window_end {
            break;
        }
        match best {
            Some(b) if occurrence_distance(b, ndl_len, center) <= occurrence_distance(found, ndl_len, center) => {}
            _ => best = Some(found),
        }
        pos = found + 1;
    }
    best
}

/// Distance between a character offset and an occurrence span.
///
/// Zero when the offset falls inside the span.
pub fn occurrence_distance(occurrence: usize, len: usize, offset: usize) -> usize {
    if offset < occurrence {
        occurrence - offset
    } else if offset >= occurrence + len {
        offset - (occurrence + len - 1)
    } else {
        0
    }
}

/// Collapse internal whitespace runs to single spaces and trim the edges.
///
/// Canonical sentences and ad-hoc candidates are compared under this
/// normalization so that line breaks inside a rendered sentence do not
/// defeat the match.
pub fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_len_counts_characters_not_bytes() {
        assert_eq!(char_len("氣功"), 2);
        assert_eq!(char_len(""), 0);
        assert_eq!(char_len("ab氣"), 3);
    }

    #[test]
    fn char_substring_by_character_offsets() {
        assert_eq!(char_substring("真善忍", 1, 2).as_deref(), Some("善忍"));
        assert_eq!(char_substring("真善忍", 0, 3).as_deref(), Some("真善忍"));
        assert_eq!(char_substring("真善忍", 2, 2), None);
    }

    #[test]
    fn find_from_skips_earlier_occurrences() {
        let text = "氣功好。氣功妙。";
        assert_eq!(find_from(text, "氣功", 0), Some(0));
        assert_eq!(find_from(text, "氣功", 1), Some(4));
        assert_eq!(find_from(text, "氣功", 5), None);
        assert_eq!(find_from(text, "", 0), None);
    }

    #[test]
    fn find_in_window_prefers_nearest_occurrence() {
        let text = "氣功好。別的話。氣功妙。";
        // Click inside the second occurrence resolves to it, not the first.
        assert_eq!(find_in_window(text, "氣功", 9, 16), Some(8));
        // Click inside the first occurrence resolves to the first.
        assert_eq!(find_in_window(text, "氣功", 1, 16), Some(0));
    }

    #[test]
    fn find_in_window_misses_outside_window() {
        let text = "x".repeat(100) + "氣功";
        assert_eq!(find_in_window(&text, "氣功", 0, 16), None);
        assert_eq!(find_in_window(&text, "氣功", 101, 16), Some(100));
    }

    #[test]
    fn normalize_collapses_internal_whitespace() {
        assert_eq!(normalize_ws("  真正 往\n高層次  上帶人 "), "真正 往 高層次 上帶人");
        assert_eq!(normalize_ws("氣功"), "氣功");
        assert_eq!(normalize_ws("   \n "), "");
    }

    #[test]
    fn occurrence_distance_zero_inside_span() {
        assert_eq!(occurrence_distance(4, 2, 4), 0);
        assert_eq!(occurrence_distance(4, 2, 5), 0);
        assert_eq!(occurrence_distance(4, 2, 6), 1);
        assert_eq!(occurrence_distance(4, 2, 2), 2);
    }
}

//! Property tests for segmentation and word grouping

use jiedu_core::annotation::CharacterAnnotation;
use jiedu_core::{segment, WordGroups};
use proptest::prelude::*;

/// Characters mixing CJK prose, terminators, breaks and Latin filler.
fn text_char() -> impl Strategy<Value = char> {
    prop::sample::select(vec![
        '真', '善', '忍', '氣', '功', '是', '修', '煉', '好', '壞', '人', '、', '，',
        '。', '！', '？', '\n', ' ', 'a', 'b', '1',
    ])
}

fn raw_text() -> impl Strategy<Value = String> {
    prop::collection::vec(text_char(), 0..200).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn sentences_are_trimmed_ordered_substrings(raw in raw_text()) {
        let sentences = segment(&raw);
        let mut search_from = 0;
        for sentence in &sentences {
            prop_assert!(!sentence.is_empty());
            prop_assert_eq!(sentence.trim(), sentence.as_str());
            let found = raw[search_from..].find(sentence.as_str());
            prop_assert!(found.is_some(), "sentence {} not found in order", sentence);
            search_from += found.unwrap() + sentence.len();
        }
    }

    #[test]
    fn no_sentence_contains_an_internal_boundary(raw in raw_text()) {
        for sentence in segment(&raw) {
            prop_assert!(!sentence.contains('\n'));
            let chars: Vec<char> = sentence.chars().collect();
            for &ch in &chars[..chars.len() - 1] {
                prop_assert!(!matches!(ch, '。' | '！' | '？'));
            }
        }
    }

    #[test]
    fn segmentation_is_deterministic(raw in raw_text()) {
        prop_assert_eq!(segment(&raw), segment(&raw));
    }
}

fn annotation_stream() -> impl Strategy<Value = Vec<CharacterAnnotation>> {
    prop::collection::vec((text_char(), any::<bool>()), 0..60).prop_map(|pairs| {
        pairs
            .into_iter()
            .map(|(ch, ends)| CharacterAnnotation {
                character: ch.to_string(),
                pinyin: ch.to_string(),
                meaning: ch.to_string(),
                word: None,
                word_position: None,
                word_length: None,
                is_word_start: None,
                is_word_end: Some(ends),
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn groups_reconstruct_the_annotation_stream(annotations in annotation_stream()) {
        let groups = WordGroups::from_annotations(&annotations);
        let rebuilt: Vec<&CharacterAnnotation> = groups
            .groups()
            .iter()
            .flat_map(|g| g.characters.iter())
            .collect();
        let original: Vec<&CharacterAnnotation> = annotations.iter().collect();
        prop_assert_eq!(rebuilt, original);
    }

    #[test]
    fn content_index_mapping_is_total_and_inverse(annotations in annotation_stream()) {
        let groups = WordGroups::from_annotations(&annotations);
        let mut seen = 0;
        for (group_index, group) in groups.groups().iter().enumerate() {
            match groups.content_index_of(group_index) {
                Some(content) => {
                    prop_assert!(!group.is_punctuation_only);
                    prop_assert_eq!(content, seen);
                    prop_assert_eq!(groups.group_index_of_content(content), Some(group_index));
                    seen += 1;
                }
                None => prop_assert!(group.is_punctuation_only),
            }
        }
        prop_assert_eq!(seen, groups.content_len());
    }
}

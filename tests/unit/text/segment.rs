use super::*;

fn displays(units: &[Unit]) -> Vec<&str> {
    units.iter().map(|u| u.display.as_str()).collect()
}

#[test]
fn empty_text_yields_nothing() {
    assert!(segment("", Granularity::Char).is_empty());
    assert!(segment("", Granularity::Word).is_empty());
    assert!(segment_lines("", Granularity::Char).is_empty());
}

#[test]
fn chars_replace_spaces_with_nbsp() {
    let units = segment("Hi yo", Granularity::Char);
    assert_eq!(displays(&units), vec!["H", "i", "\u{a0}", "y", "o"]);
    assert_eq!(units[2].kind, UnitKind::Space);
    assert_eq!(units[2].original, " ");
    assert!(units.iter().enumerate().all(|(i, u)| u.index == i));
}

#[test]
fn glyphs_of_one_word_share_a_word_index() {
    let units = segment("ab cd", Granularity::Char);
    let words: Vec<usize> = units.iter().map(|u| u.word).collect();
    assert_eq!(words, vec![0, 0, 0, 1, 1]);
}

#[test]
fn grapheme_clusters_stay_whole() {
    let units = segment("e\u{301}👍🏽", Granularity::Char);
    assert_eq!(units.len(), 2);
    assert_eq!(units[0].original, "e\u{301}");
    assert_eq!(units[1].original, "👍🏽");
}

#[test]
fn words_keep_punctuation_attached() {
    let units = segment("Hello, big  world", Granularity::Word);
    assert_eq!(
        displays(&units),
        vec!["Hello,", "\u{a0}", "big", "\u{a0}", "\u{a0}", "world"]
    );
    let kinds: Vec<UnitKind> = units.iter().map(|u| u.kind).collect();
    assert_eq!(
        kinds,
        vec![
            UnitKind::Word,
            UnitKind::Space,
            UnitKind::Word,
            UnitKind::Space,
            UnitKind::Space,
            UnitKind::Word,
        ]
    );
    assert_eq!(units[5].word, 2);
}

#[test]
fn any_whitespace_is_its_own_unit() {
    let units = segment("a\tb\u{3000}c", Granularity::Char);
    let kinds: Vec<UnitKind> = units.iter().map(|u| u.kind).collect();
    assert_eq!(
        kinds,
        vec![
            UnitKind::Glyph,
            UnitKind::Space,
            UnitKind::Glyph,
            UnitKind::Space,
            UnitKind::Glyph,
        ]
    );
    assert_eq!(units[1].display, "\t");
    assert_eq!(units[4].word, 2);

    let words = segment("one\ttwo", Granularity::Word);
    assert_eq!(displays(&words), vec!["one", "\t", "two"]);
    assert_eq!(words[1].kind, UnitKind::Space);
    assert_eq!(words[2].word, 1);
}

#[test]
fn lines_continue_indices() {
    let lines = segment_lines("ab\ncd", Granularity::Char);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].index, 1);
    let idx: Vec<usize> = lines[1].units.iter().map(|u| u.index).collect();
    assert_eq!(idx, vec![2, 3]);
    assert_eq!(lines[1].units[0].word, 1);
}

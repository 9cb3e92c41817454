use unicode_segmentation::UnicodeSegmentation;

/// Non-breaking space substituted for every space so split text keeps its width.
pub const NBSP: char = '\u{00A0}';

/// How finely text is split.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// One unit per grapheme cluster.
    Char,
    /// One unit per word.
    Word,
}

/// Kind of a [`Unit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    /// A single character of a word.
    Glyph,
    /// A whole word.
    Word,
    /// A single whitespace grapheme.
    Space,
}

/// One animatable piece of text.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Unit {
    /// Position in the output sequence.
    pub index: usize,
    /// Index of the word this unit belongs to (spaces carry the index of the preceding word).
    pub word: usize,
    /// Unit kind.
    pub kind: UnitKind,
    /// Source text of the unit.
    pub original: String,
    /// Text to display (spaces become [`NBSP`]).
    pub display: String,
}

impl Unit {
    /// Whether the unit is a space.
    pub fn is_space(&self) -> bool {
        self.kind == UnitKind::Space
    }
}

/// One line of split text.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Line {
    /// Line number.
    pub index: usize,
    /// Units of the line; indices continue across lines.
    pub units: Vec<Unit>,
}

/// Split `text` into units.
///
/// Every whitespace grapheme (tabs and ideographic spaces included) becomes its own
/// [`UnitKind::Space`] unit. Glyph units of one word share a
/// `word` index so a layout can keep them on one line.
pub fn segment(text: &str, granularity: Granularity) -> Vec<Unit> {
    let mut out = Vec::new();
    let mut word = 0;
    push_units(text, granularity, &mut out, &mut word);
    out
}

/// Split `text` into lines on `\n`, then each line into units.
pub fn segment_lines(text: &str, granularity: Granularity) -> Vec<Line> {
    if text.is_empty() {
        return Vec::new();
    }
    let mut word = 0;
    let mut next_index = 0;
    text.split('\n')
        .enumerate()
        .map(|(index, line)| {
            let mut units = Vec::new();
            push_units(line, granularity, &mut units, &mut word);
            for u in &mut units {
                u.index += next_index;
            }
            next_index += units.len();
            Line { index, units }
        })
        .collect()
}

fn push_units(text: &str, granularity: Granularity, out: &mut Vec<Unit>, word: &mut usize) {
    let mut in_word = false;

    match granularity {
        Granularity::Char => {
            for g in text.graphemes(true) {
                if is_blank(g) {
                    if in_word {
                        *word += 1;
                        in_word = false;
                    }
                    push(out, UnitKind::Space, g, word.saturating_sub(1));
                } else {
                    in_word = true;
                    push(out, UnitKind::Glyph, g, *word);
                }
            }
        }
        Granularity::Word => {
            for piece in text.split_word_bounds() {
                if is_blank(piece) {
                    for g in piece.graphemes(true) {
                        if in_word {
                            *word += 1;
                            in_word = false;
                        }
                        push(out, UnitKind::Space, g, word.saturating_sub(1));
                    }
                } else if in_word {
                    // Punctuation and similar bounds stay attached to the current word.
                    if let Some(last) = out.last_mut() {
                        last.original.push_str(piece);
                        last.display.push_str(piece);
                    }
                } else {
                    in_word = true;
                    push(out, UnitKind::Word, piece, *word);
                }
            }
        }
    }
    if in_word {
        *word += 1;
    }
}

fn is_blank(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_whitespace)
}

fn push(out: &mut Vec<Unit>, kind: UnitKind, original: &str, word: usize) {
    let display = if kind == UnitKind::Space {
        original.replace(' ', &NBSP.to_string())
    } else {
        original.to_owned()
    };
    out.push(Unit {
        index: out.len(),
        word,
        kind,
        original: original.to_owned(),
        display,
    });
}

#[cfg(test)]
#[path = "../../tests/unit/text/segment.rs"]
mod tests;

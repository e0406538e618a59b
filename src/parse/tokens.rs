//! Lossless text-run segmentation
//!
//! Splits one text run into alternating whitespace and word segments
//! and classifies each word as chord or prose. Segmentation is
//! lossless: concatenating the segments reproduces the input exactly,
//! whitespace and punctuation included. No state crosses runs.

use serde::{Deserialize, Serialize};

use crate::models::chord::ChordToken;
use crate::parse::grammar::parse_chord;

/// One segment of a text run, with its byte span in the original run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,

    /// Byte offset of the segment start in the run.
    pub start: usize,

    /// Byte offset one past the segment end.
    pub end: usize,

    /// Parsed chord when the segment is a chord word.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chord: Option<ChordToken>,
}

impl Segment {
    pub fn is_chord(&self) -> bool {
        self.chord.is_some()
    }

    /// Whether this segment is a word (as opposed to whitespace).
    pub fn is_word(&self) -> bool {
        self.text.chars().next().is_some_and(|c| !c.is_whitespace())
    }
}

/// Segment a text run. Words are maximal runs of non-whitespace; a
/// word is a chord segment iff the whole word parses under the chord
/// grammar.
pub fn tokenize(run: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_whitespace = None;

    for (offset, ch) in run.char_indices() {
        let whitespace = ch.is_whitespace();
        match in_whitespace {
            Some(previous) if previous == whitespace => {}
            Some(_) => {
                segments.push(make_segment(run, start, offset));
                start = offset;
                in_whitespace = Some(whitespace);
            }
            None => in_whitespace = Some(whitespace),
        }
    }

    if !run.is_empty() {
        segments.push(make_segment(run, start, run.len()));
    }

    segments
}

fn make_segment(run: &str, start: usize, end: usize) -> Segment {
    let text = &run[start..end];
    let chord = match text.chars().next() {
        Some(c) if !c.is_whitespace() => parse_chord(text),
        _ => None,
    };
    Segment {
        text: text.to_string(),
        start,
        end,
        chord,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concat(segments: &[Segment]) -> String {
        segments.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_lossless_segmentation() {
        for run in [
            "C G Am F",
            "  leading and trailing  ",
            "Csus4 to G/B",
            "line one\nline two\t tabbed",
            "",
            "   ",
            "word",
        ] {
            assert_eq!(concat(&tokenize(run)), run, "lossless failed for {:?}", run);
        }
    }

    #[test]
    fn test_spans_cover_run() {
        let run = "C  G/B \n Am";
        let segments = tokenize(run);
        let mut cursor = 0;
        for segment in &segments {
            assert_eq!(segment.start, cursor);
            assert_eq!(&run[segment.start..segment.end], segment.text);
            cursor = segment.end;
        }
        assert_eq!(cursor, run.len());
    }

    #[test]
    fn test_chord_classification() {
        let segments = tokenize("Csus4 to G/B");
        let words: Vec<&Segment> = segments.iter().filter(|s| s.is_word()).collect();
        assert_eq!(words.len(), 3);
        assert!(words[0].is_chord());
        assert!(!words[1].is_chord());
        assert!(words[2].is_chord());
    }

    #[test]
    fn test_prose_only_run() {
        let segments = tokenize("just a verse about grace");
        assert!(segments.iter().all(|s| !s.is_chord()));
    }

    #[test]
    fn test_bare_article_ambiguity() {
        // Uppercase "A" matches the grammar in isolation and is kept as
        // a chord; the engine does no natural-language disambiguation.
        let segments = tokenize("A song");
        assert!(segments[0].is_chord());
        assert!(!segments[2].is_chord());
    }

    #[test]
    fn test_unicode_prose() {
        let run = "Pripev: Em  C  G  D\u{0301}";
        let segments = tokenize(run);
        assert_eq!(concat(&segments), run);
        assert!(segments.iter().any(|s| s.is_chord()));
    }
}

//! Chord token model
//!
//! A chord token is the parsed form of a single chord word found in a
//! lyric line: a root note, an optional quality suffix drawn from a
//! closed set, and an optional slash-bass note. Tokens are transient:
//! the tokenizer derives them from a text run and the transposer
//! renders them straight back to strings.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The seven note letters a chord root or bass can start with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteLetter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
}

impl NoteLetter {
    /// Match an uppercase root letter. Lowercase letters are prose:
    /// chord charts write roots uppercase, and accepting "a" would
    /// swallow far more English text than the documented bare-"A" case.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(NoteLetter::A),
            'B' => Some(NoteLetter::B),
            'C' => Some(NoteLetter::C),
            'D' => Some(NoteLetter::D),
            'E' => Some(NoteLetter::E),
            'F' => Some(NoteLetter::F),
            'G' => Some(NoteLetter::G),
            _ => None,
        }
    }

    /// Pitch class of the natural (unaltered) letter.
    pub fn natural_pitch_class(&self) -> u8 {
        match self {
            NoteLetter::C => 0,
            NoteLetter::D => 2,
            NoteLetter::E => 4,
            NoteLetter::F => 5,
            NoteLetter::G => 7,
            NoteLetter::A => 9,
            NoteLetter::B => 11,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            NoteLetter::A => 'A',
            NoteLetter::B => 'B',
            NoteLetter::C => 'C',
            NoteLetter::D => 'D',
            NoteLetter::E => 'E',
            NoteLetter::F => 'F',
            NoteLetter::G => 'G',
        }
    }
}

/// Accidental applied to a note letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    /// Symbol as written in chord charts.
    pub fn symbol(&self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }

    /// Semitone offset from the natural letter.
    pub fn semitone_offset(&self) -> i8 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}

/// A spelled note name as it appeared in the source text (letter plus
/// accidental). Keeps the original spelling so a token can be shown
/// back unchanged; transposition re-spells from the pitch class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteName {
    pub letter: NoteLetter,
    pub accidental: Accidental,
}

impl NoteName {
    pub fn new(letter: NoteLetter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    /// Pitch class 0-11 of this spelling.
    pub fn pitch_class(&self) -> u8 {
        (self.letter.natural_pitch_class() as i8 + self.accidental.semitone_offset())
            .rem_euclid(12) as u8
    }
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter.as_char(), self.accidental.symbol())
    }
}

/// The closed set of supported quality suffixes. A chord word's suffix
/// must decompose into a sequence of these (longest match first) or the
/// word is left as prose. This replaces implicit third-party suffix
/// matching with an explicit contract.
pub const QUALITY_SUFFIXES: [&str; 13] = [
    "m", "maj7", "m7", "7", "dim", "aug", "sus2", "sus4", "add9", "6", "9", "11", "13",
];

/// Suffixes ordered longest-first so greedy decomposition prefers
/// "maj7" over "m", "m7" over "m", and so on.
static SUFFIXES_LONGEST_FIRST: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut suffixes = QUALITY_SUFFIXES.to_vec();
    suffixes.sort_by_key(|s| std::cmp::Reverse(s.len()));
    suffixes
});

/// Whether `suffix` is a valid quality: empty, or a greedy longest-match
/// concatenation of supported suffixes ("m7", "7sus4", "madd9", "69").
pub fn quality_is_valid(suffix: &str) -> bool {
    let mut rest = suffix;
    'decompose: while !rest.is_empty() {
        for candidate in SUFFIXES_LONGEST_FIRST.iter() {
            if let Some(tail) = rest.strip_prefix(candidate) {
                rest = tail;
                continue 'decompose;
            }
        }
        return false;
    }
    true
}

/// A chord as parsed from one whitespace-delimited word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordToken {
    /// Root note as written in the source.
    pub root: NoteName,

    /// Quality suffix, copied verbatim through transposition. Empty for
    /// a plain major triad.
    pub quality: String,

    /// Bass note of a slash chord, if any.
    pub bass: Option<NoteName>,
}

impl ChordToken {
    pub fn new(root: NoteName, quality: impl Into<String>, bass: Option<NoteName>) -> Self {
        Self {
            root,
            quality: quality.into(),
            bass,
        }
    }

    /// Whether the quality marks a minor chord ("m", "m7", "madd9"...),
    /// as opposed to "maj7" where the m belongs to "major".
    pub fn is_minor(&self) -> bool {
        self.quality.starts_with('m') && !self.quality.starts_with("maj")
    }
}

impl fmt::Display for ChordToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.quality)?;
        if let Some(bass) = &self.bass {
            write!(f, "/{}", bass)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(letter: NoteLetter, accidental: Accidental) -> NoteName {
        NoteName::new(letter, accidental)
    }

    #[test]
    fn test_pitch_classes() {
        assert_eq!(note(NoteLetter::C, Accidental::Natural).pitch_class(), 0);
        assert_eq!(note(NoteLetter::F, Accidental::Sharp).pitch_class(), 6);
        assert_eq!(note(NoteLetter::B, Accidental::Flat).pitch_class(), 10);
        // Wraparound at the octave edges
        assert_eq!(note(NoteLetter::C, Accidental::Flat).pitch_class(), 11);
        assert_eq!(note(NoteLetter::B, Accidental::Sharp).pitch_class(), 0);
    }

    #[test]
    fn test_quality_decomposition() {
        assert!(quality_is_valid(""));
        assert!(quality_is_valid("m"));
        assert!(quality_is_valid("maj7"));
        assert!(quality_is_valid("m7"));
        assert!(quality_is_valid("7sus4"));
        assert!(quality_is_valid("madd9"));
        assert!(quality_is_valid("69"));
        assert!(quality_is_valid("dim"));
    }

    #[test]
    fn test_quality_rejections() {
        assert!(!quality_is_valid("major"));
        assert!(!quality_is_valid("min"));
        assert!(!quality_is_valid("m7b5"));
        assert!(!quality_is_valid("x"));
        assert!(!quality_is_valid("sus"));
    }

    #[test]
    fn test_minor_detection() {
        let root = note(NoteLetter::A, Accidental::Natural);
        assert!(ChordToken::new(root, "m", None).is_minor());
        assert!(ChordToken::new(root, "m7", None).is_minor());
        assert!(!ChordToken::new(root, "maj7", None).is_minor());
        assert!(!ChordToken::new(root, "", None).is_minor());
    }

    #[test]
    fn test_display() {
        let token = ChordToken::new(
            note(NoteLetter::G, Accidental::Natural),
            "",
            Some(note(NoteLetter::B, Accidental::Natural)),
        );
        assert_eq!(token.to_string(), "G/B");

        let token = ChordToken::new(note(NoteLetter::C, Accidental::Sharp), "m7", None);
        assert_eq!(token.to_string(), "C#m7");
    }
}

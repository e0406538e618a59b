//! Chord word grammar
//!
//! A candidate word is a chord when the whole word matches
//! `RootLetter[#|b]? Quality* (/ BassLetter[#|b]?)?` with the quality
//! drawn from the closed suffix set. Matching is all-or-nothing over
//! the word: "Cmaj7" parses as one chord, never as "C" plus stray
//! "maj7" text, and a word with any leftover character is prose.

use crate::models::chord::{quality_is_valid, Accidental, ChordToken, NoteLetter, NoteName};

/// Parse a whole word as a chord. Returns `None` when any part of the
/// word falls outside the grammar.
pub fn parse_chord(word: &str) -> Option<ChordToken> {
    let (root, rest) = parse_note_name(word)?;

    let (quality, bass_part) = match rest.find('/') {
        Some(slash) => (&rest[..slash], Some(&rest[slash + 1..])),
        None => (rest, None),
    };

    if !quality_is_valid(quality) {
        return None;
    }

    let bass = match bass_part {
        Some(part) => {
            let (note, tail) = parse_note_name(part)?;
            if !tail.is_empty() {
                return None;
            }
            Some(note)
        }
        None => None,
    };

    Some(ChordToken::new(root, quality, bass))
}

/// Parse a leading note name (uppercase letter, optional # or b) and
/// return it with the unconsumed tail.
fn parse_note_name(input: &str) -> Option<(NoteName, &str)> {
    let mut chars = input.chars();
    let letter = NoteLetter::from_char(chars.next()?)?;
    let rest = chars.as_str();

    let (accidental, rest) = match rest.bytes().next() {
        Some(b'#') => (Accidental::Sharp, &rest[1..]),
        Some(b'b') => (Accidental::Flat, &rest[1..]),
        _ => (Accidental::Natural, rest),
    };

    Some((NoteName::new(letter, accidental), rest))
}

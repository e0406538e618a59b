//! Chord transposition
//!
//! Interval arithmetic over pitch classes: root and bass of a token
//! shift by the semitone delta and are re-spelled for the target key,
//! the quality suffix passes through verbatim. Transposition never
//! changes chord quality.

use crate::models::chord::{quality_is_valid, ChordToken};
use crate::models::key::{semitone_distance, Key};
use crate::parse::tokens::{tokenize, Segment};
use crate::transpose::errors::LeafError;
use crate::transpose::spelling::spell_pitch_class;

/// Transpose one chord token by `delta` semitones, spelled for
/// `target`. Fails instead of panicking when the token carries a
/// quality outside the supported set (possible for hand-built tokens;
/// the tokenizer never produces one).
pub fn transpose_chord(token: &ChordToken, delta: i8, target: Key) -> Result<String, LeafError> {
    if !quality_is_valid(&token.quality) {
        return Err(LeafError::UnsupportedQuality(token.quality.clone()));
    }

    let root = shift_pitch_class(token.root.pitch_class(), delta);
    let mut rendered = String::from(spell_pitch_class(root, target));
    rendered.push_str(&token.quality);

    if let Some(bass) = &token.bass {
        let bass = shift_pitch_class(bass.pitch_class(), delta);
        rendered.push('/');
        rendered.push_str(spell_pitch_class(bass, target));
    }

    Ok(rendered)
}

/// Transpose a plain text run between two keys. Chord words are
/// rewritten, everything else stays byte-identical.
pub fn transpose_text(text: &str, from: Key, to: Key) -> Result<String, LeafError> {
    let delta = semitone_distance(from, to);
    rewrite_segments(&tokenize(text), |token| transpose_chord(token, delta, to))
}

/// Rebuild a run from its segments, rendering each chord segment
/// through `render` and keeping all other segments untouched.
pub(crate) fn rewrite_segments(
    segments: &[Segment],
    render: impl Fn(&ChordToken) -> Result<String, LeafError>,
) -> Result<String, LeafError> {
    let mut rewritten = String::new();
    for segment in segments {
        match &segment.chord {
            Some(token) => rewritten.push_str(&render(token)?),
            None => rewritten.push_str(&segment.text),
        }
    }
    Ok(rewritten)
}

fn shift_pitch_class(pitch_class: u8, delta: i8) -> u8 {
    (pitch_class as i16 + delta as i16).rem_euclid(12) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chord::{Accidental, NoteLetter, NoteName};
    use crate::parse::grammar::parse_chord;

    fn key(s: &str) -> Key {
        s.parse().unwrap()
    }

    #[test]
    fn test_whole_tone_up() {
        assert_eq!(
            transpose_text("C G Am F", key("C"), key("D")).unwrap(),
            "D A Bm G"
        );
    }

    #[test]
    fn test_slash_chord_into_flat_key() {
        assert_eq!(
            transpose_text("Csus4 to G/B", key("C"), key("Eb")).unwrap(),
            "Ebsus4 to Bb/D"
        );
    }

    #[test]
    fn test_quality_passes_through_verbatim() {
        let token = parse_chord("Am7").unwrap();
        assert_eq!(transpose_chord(&token, 2, key("D")).unwrap(), "Bm7");

        let token = parse_chord("Cmaj7").unwrap();
        assert_eq!(transpose_chord(&token, 1, key("Db")).unwrap(), "Dbmaj7");
    }

    #[test]
    fn test_respelling_follows_target_not_source() {
        // Sharp-spelled source lands on flat names in a flat key
        let token = parse_chord("F#").unwrap();
        assert_eq!(transpose_chord(&token, 0, key("Eb")).unwrap(), "Gb");
        // ...and stays sharp in a sharp key
        assert_eq!(transpose_chord(&token, 0, key("E")).unwrap(), "F#");
    }

    #[test]
    fn test_downward_delta_wraps() {
        let token = parse_chord("C").unwrap();
        assert_eq!(transpose_chord(&token, -2, key("Bb")).unwrap(), "Bb");
    }

    #[test]
    fn test_identity_transposition() {
        let run = "C  G/B\nAm7 F";
        assert_eq!(transpose_text(run, key("C"), key("C")).unwrap(), run);
    }

    #[test]
    fn test_prose_untouched() {
        let run = "just a verse about grace";
        assert_eq!(transpose_text(run, key("C"), key("D")).unwrap(), run);
    }

    #[test]
    fn test_round_trip_for_chord_content() {
        let run = "C G/B Am F#dim";
        let there = transpose_text(run, key("C"), key("Ab")).unwrap();
        let back = transpose_text(&there, key("Ab"), key("C")).unwrap();
        assert_eq!(back, run);
    }

    #[test]
    fn test_unsupported_quality_fails() {
        let token = ChordToken::new(
            NoteName::new(NoteLetter::C, Accidental::Natural),
            "weird",
            None,
        );
        assert_eq!(
            transpose_chord(&token, 2, key("D")),
            Err(LeafError::UnsupportedQuality("weird".to_string()))
        );
    }
}

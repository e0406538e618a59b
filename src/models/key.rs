/// Musical key representation (tonic pitch class + mode)
///
/// A key is the pair of a tonic pitch class (0-11, C = 0) and a mode
/// (major or minor). Enharmonic spelling is not stored: parsing maps
/// every accepted spelling onto one pitch class, and rendering picks
/// the canonical spelling from a fixed convention table per mode
/// (e.g. pitch class 6 renders as "F#" major / "F#m" minor).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a key string does not match the accepted grammar.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyParseError {
    #[error("invalid key format: '{0}'. Expected a tonic letter A-G, an optional # or b, and an optional trailing m for minor")]
    InvalidKeyFormat(String),
}

/// Mode of a key. Transposition preserves chord quality, so the mode
/// only affects canonical spelling and key-signature conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Major,
    Minor,
}

/// Canonical tonic spelling for major keys, indexed by pitch class.
const MAJOR_TONIC_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "F#", "G", "Ab", "A", "Bb", "B",
];

/// Canonical tonic spelling for minor keys, indexed by pitch class.
const MINOR_TONIC_NAMES: [&str; 12] = [
    "C", "C#", "D", "Eb", "E", "F", "F#", "G", "G#", "A", "Bb", "B",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    /// Tonic pitch class, 0-11 with C = 0.
    pub pitch_class: u8,

    /// Major or minor.
    pub mode: Mode,
}

impl Key {
    /// Create a key from a pitch class (normalized mod 12) and mode.
    pub fn new(pitch_class: u8, mode: Mode) -> Self {
        Self {
            pitch_class: pitch_class % 12,
            mode,
        }
    }

    /// Canonical string form of this key, e.g. "Eb", "F#m".
    pub fn canonical_name(&self) -> String {
        match self.mode {
            Mode::Major => MAJOR_TONIC_NAMES[self.pitch_class as usize].to_string(),
            Mode::Minor => format!("{}m", MINOR_TONIC_NAMES[self.pitch_class as usize]),
        }
    }

    /// Whether chromatic pitches in this key are conventionally spelled
    /// with flats. Minor keys follow their relative major's signature.
    pub fn prefers_flats(&self) -> bool {
        match self.mode {
            // Flat-signature majors: Db, Eb, F, Ab, Bb
            Mode::Major => matches!(self.pitch_class, 1 | 3 | 5 | 8 | 10),
            // Flat-signature minors: Cm, Dm, Ebm, Fm, Gm, Bbm
            Mode::Minor => matches!(self.pitch_class, 0 | 2 | 3 | 5 | 7 | 10),
        }
    }

    /// Relative major of this key (identity for major keys).
    pub fn relative_major(&self) -> Key {
        match self.mode {
            Mode::Major => *self,
            Mode::Minor => Key::new((self.pitch_class + 3) % 12, Mode::Major),
        }
    }
}

/// Shortest signed semitone delta from `a`'s tonic to `b`'s tonic.
///
/// The result is in the range [-5, 6]; the tritone resolves upward.
/// Mode never contributes: transposition preserves chord quality, it
/// does not reinterpret the major/minor context of the song.
pub fn semitone_distance(a: Key, b: Key) -> i8 {
    let mut delta = (b.pitch_class as i8 - a.pitch_class as i8).rem_euclid(12);
    if delta > 6 {
        delta -= 12;
    }
    delta
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

impl FromStr for Key {
    type Err = KeyParseError;

    /// Parse forms like "C", "Bb", "F#m", "Ebm".
    ///
    /// The tonic letter is case-normalized; the accidental must be a
    /// literal `#`/`b` (Unicode `♯`/`♭` are accepted on input); a
    /// trailing lowercase `m` directly after the tonic denotes minor.
    /// Any leftover character is an error, never silently dropped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || KeyParseError::InvalidKeyFormat(s.to_string());

        let mut chars = s.chars();
        let letter = chars.next().ok_or_else(invalid)?;
        let natural = match letter.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return Err(invalid()),
        };

        let mut rest = chars.as_str();
        let offset: i8 = match rest.chars().next() {
            Some(c @ ('#' | '\u{266F}')) => {
                rest = &rest[c.len_utf8()..];
                1
            }
            Some(c @ ('b' | '\u{266D}')) => {
                rest = &rest[c.len_utf8()..];
                -1
            }
            _ => 0,
        };

        let mode = match rest {
            "" => Mode::Major,
            "m" => Mode::Minor,
            _ => return Err(invalid()),
        };

        let pitch_class = (natural + offset).rem_euclid(12) as u8;
        Ok(Key::new(pitch_class, mode))
    }
}

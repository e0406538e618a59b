//! Enharmonic spelling tables
//!
//! A transposed pitch class is re-spelled for the target key: flat-key
//! signatures get flat names, everything else sharp names. The same
//! tables back the Nashville degree rendering, which is always spelled
//! flat-side per chart convention.

use crate::models::key::Key;

/// Chromatic note names in sharp spelling, indexed by pitch class.
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Chromatic note names in flat spelling, indexed by pitch class.
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Nashville degree names relative to a tonic, indexed by semitone
/// offset from the tonic.
pub const NASHVILLE_DEGREES: [&str; 12] = [
    "1", "b2", "2", "b3", "3", "4", "b5", "5", "b6", "6", "b7", "7",
];

/// Spell a pitch class using the enharmonic convention of `target`.
pub fn spell_pitch_class(pitch_class: u8, target: Key) -> &'static str {
    let names = if target.prefers_flats() {
        &FLAT_NAMES
    } else {
        &SHARP_NAMES
    };
    names[(pitch_class % 12) as usize]
}

/// Degree name of a pitch class relative to `key`'s tonic.
pub fn nashville_degree(pitch_class: u8, key: Key) -> &'static str {
    let offset = (pitch_class as i8 - key.pitch_class as i8).rem_euclid(12);
    NASHVILLE_DEGREES[offset as usize]
}

//! Nashville Number System rendering
//!
//! Renders chords as scale-degree numbers relative to the song's key
//! ("C F G" in C becomes "1 4 5"), the notation bands use to play a
//! chart in any key without rewriting it. Quality suffixes and slash
//! basses carry over unchanged; prose stays byte-identical. Same
//! key-inference and per-leaf isolation semantics as key-to-key
//! transposition.

use crate::models::chord::{quality_is_valid, ChordToken};
use crate::models::document::Node;
use crate::models::key::Key;
use crate::parse::tokens::tokenize;
use crate::transpose::chord_transpose::rewrite_segments;
use crate::transpose::errors::{LeafError, TransposeError};
use crate::transpose::spelling::nashville_degree;
use crate::transpose::walker::{
    guess_key_from_document, rewrite_tree, DiagnosticSink, TransposeOptions, TransposeOutcome,
};

/// Render one chord token as a Nashville number relative to `key`.
pub fn nashville_chord(token: &ChordToken, key: Key) -> Result<String, LeafError> {
    if !quality_is_valid(&token.quality) {
        return Err(LeafError::UnsupportedQuality(token.quality.clone()));
    }

    let mut rendered = String::from(nashville_degree(token.root.pitch_class(), key));
    rendered.push_str(&token.quality);

    if let Some(bass) = &token.bass {
        rendered.push('/');
        rendered.push_str(nashville_degree(bass.pitch_class(), key));
    }

    Ok(rendered)
}

/// Render a plain text run as Nashville numbers relative to `key`.
pub fn nashville_text(text: &str, key: Key) -> Result<String, LeafError> {
    rewrite_segments(&tokenize(text), |token| nashville_chord(token, key))
}

/// Render every chord in a document as Nashville numbers. The key is
/// the supplied one or, failing that, the first-chord inference used
/// by key-to-key transposition.
pub fn nashville_document(
    root: &Node,
    from: Option<Key>,
) -> Result<TransposeOutcome, TransposeError> {
    nashville_document_with(root, from, &TransposeOptions::default(), None)
}

/// [`nashville_document`] with explicit options and diagnostic sink.
pub fn nashville_document_with(
    root: &Node,
    from: Option<Key>,
    options: &TransposeOptions,
    sink: Option<DiagnosticSink<'_>>,
) -> Result<TransposeOutcome, TransposeError> {
    let (source_key, key_inferred) = match from {
        Some(key) => (key, false),
        None => (
            guess_key_from_document(root).ok_or(TransposeError::UnresolvedSourceKey)?,
            true,
        ),
    };

    let (document, stats) = rewrite_tree(
        root,
        &|token: &ChordToken| nashville_chord(token, source_key),
        options,
        sink,
    );

    Ok(TransposeOutcome {
        document,
        report: stats.into_report(source_key, key_inferred),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> Key {
        s.parse().unwrap()
    }

    #[test]
    fn test_basic_degrees() {
        assert_eq!(nashville_text("C F G", key("C")).unwrap(), "1 4 5");
        assert_eq!(nashville_text("G C D", key("G")).unwrap(), "1 4 5");
    }

    #[test]
    fn test_quality_and_bass_preserved() {
        assert_eq!(nashville_text("Am G/B", key("C")).unwrap(), "6m 5/7");
        assert_eq!(nashville_text("Cmaj7", key("C")).unwrap(), "1maj7");
    }

    #[test]
    fn test_chromatic_degrees_spelled_flat() {
        assert_eq!(nashville_text("Bb Eb", key("C")).unwrap(), "b7 b3");
    }

    #[test]
    fn test_prose_untouched() {
        assert_eq!(
            nashville_text("Chorus: C F", key("C")).unwrap(),
            "Chorus: 1 4"
        );
    }

    #[test]
    fn test_document_with_inference() {
        let doc = Node::element("p", vec![Node::text("G C D")]);
        let outcome = nashville_document(&doc, None).unwrap();
        assert!(outcome.report.key_inferred);
        assert_eq!(outcome.report.source_key, key("G"));
        assert_eq!(
            outcome.document,
            Node::element("p", vec![Node::text("1 4 5")])
        );
    }

    #[test]
    fn test_chordless_document_fails() {
        let doc = Node::element("p", vec![Node::text("spoken intro")]);
        assert_eq!(
            nashville_document(&doc, None),
            Err(TransposeError::UnresolvedSourceKey)
        );
    }
}

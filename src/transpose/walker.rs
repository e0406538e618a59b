//! Structured-document walker
//!
//! Walks a lyric document pre-order, depth-first, left-to-right, and
//! rewrites every chord token found in its text leaves. The walk is
//! functional: the input tree is never mutated, a transformed copy
//! comes back with identical shape and attributes.
//!
//! Failure handling follows two tiers. A leaf whose rewrite fails
//! keeps its original text and the walk continues; the failure is
//! counted in the report and forwarded to the caller's diagnostic
//! sink if one was injected. Only an unresolvable source key fails
//! the whole call, with no partial result.

use serde::{Deserialize, Serialize};

use crate::models::chord::ChordToken;
use crate::models::document::Node;
use crate::models::key::{semitone_distance, Key, Mode};
use crate::parse::tokens::tokenize;
use crate::transpose::chord_transpose::{rewrite_segments, transpose_chord};
use crate::transpose::errors::{LeafError, TransposeError};

/// Caller-injected hook invoked once per failed leaf. Replaces any
/// ambient logging inside the engine.
pub type DiagnosticSink<'a> = &'a mut dyn FnMut(&LeafFailure);

/// Tuning knobs for the walk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransposeOptions {
    /// Minimum fraction of chord words per leaf for the leaf to be
    /// rewritten. 0.0 disables the heuristic and rewrites every leaf
    /// containing chords. Guards prose lines that happen to contain a
    /// chord-shaped word (verse numbering, the article "A").
    pub chord_ratio_threshold: f32,
}

impl Default for TransposeOptions {
    fn default() -> Self {
        Self {
            chord_ratio_threshold: 0.0,
        }
    }
}

/// One leaf the walker had to leave untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeafFailure {
    /// Index of the leaf in document order (pre-order, 0-based).
    pub leaf_index: usize,

    /// Original leaf text, retained in the output document.
    pub text: String,

    /// Human-readable failure reason.
    pub reason: String,
}

/// Outcome metadata for a document-level operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransposeReport {
    /// The key the rewrite was computed from.
    pub source_key: Key,

    /// True when `source_key` was inferred from the first chord token
    /// rather than supplied by the caller. Inference is best-effort,
    /// not key detection; callers should surface the distinction.
    pub key_inferred: bool,

    /// Text leaves visited.
    pub leaves_visited: usize,

    /// Text leaves whose content actually changed.
    pub leaves_transposed: usize,

    /// Leaves left untouched because their rewrite failed.
    pub failed_leaves: Vec<LeafFailure>,
}

/// A transformed document plus its report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransposeOutcome {
    pub document: Node,
    pub report: TransposeReport,
}

/// Transpose every chord in `root` from `from` to `to`.
///
/// When `from` is `None` the source key is inferred from the first
/// chord token in document order; if the document contains no chord at
/// all the call fails with [`TransposeError::UnresolvedSourceKey`] and
/// the caller falls back to displaying the original document.
pub fn transpose_document(
    root: &Node,
    from: Option<Key>,
    to: Key,
) -> Result<TransposeOutcome, TransposeError> {
    transpose_document_with(root, from, to, &TransposeOptions::default(), None)
}

/// [`transpose_document`] with explicit options and an optional
/// per-leaf diagnostic sink.
pub fn transpose_document_with(
    root: &Node,
    from: Option<Key>,
    to: Key,
    options: &TransposeOptions,
    sink: Option<DiagnosticSink<'_>>,
) -> Result<TransposeOutcome, TransposeError> {
    let (source_key, key_inferred) = resolve_source_key(root, from)?;
    let delta = semitone_distance(source_key, to);

    let (document, stats) = rewrite_tree(
        root,
        &|token: &ChordToken| transpose_chord(token, delta, to),
        options,
        sink,
    );

    Ok(TransposeOutcome {
        document,
        report: stats.into_report(source_key, key_inferred),
    })
}

/// Take the first chord token of `text`, at face value, as a key:
/// its root is the tonic, a minor quality makes the key minor.
pub fn guess_key_from_text(text: &str) -> Option<Key> {
    tokenize(text)
        .iter()
        .find_map(|segment| segment.chord.as_ref())
        .map(|token| {
            let mode = if token.is_minor() {
                Mode::Minor
            } else {
                Mode::Major
            };
            Key::new(token.root.pitch_class(), mode)
        })
}

/// First-chord key guess over a whole document, in document order.
pub fn guess_key_from_document(root: &Node) -> Option<Key> {
    let mut found = None;
    root.for_each_text(&mut |text| {
        if found.is_none() {
            found = guess_key_from_text(text);
        }
    });
    found
}

fn resolve_source_key(root: &Node, from: Option<Key>) -> Result<(Key, bool), TransposeError> {
    match from {
        Some(key) => Ok((key, false)),
        None => guess_key_from_document(root)
            .map(|key| (key, true))
            .ok_or(TransposeError::UnresolvedSourceKey),
    }
}

#[derive(Default)]
pub(crate) struct WalkStats {
    pub leaves_visited: usize,
    pub leaves_transposed: usize,
    pub failed_leaves: Vec<LeafFailure>,
}

impl WalkStats {
    pub(crate) fn into_report(self, source_key: Key, key_inferred: bool) -> TransposeReport {
        TransposeReport {
            source_key,
            key_inferred,
            leaves_visited: self.leaves_visited,
            leaves_transposed: self.leaves_transposed,
            failed_leaves: self.failed_leaves,
        }
    }
}

/// Shared rewrite machinery for the key and Nashville renderers.
pub(crate) fn rewrite_tree<F>(
    root: &Node,
    render: &F,
    options: &TransposeOptions,
    mut sink: Option<DiagnosticSink<'_>>,
) -> (Node, WalkStats)
where
    F: Fn(&ChordToken) -> Result<String, LeafError>,
{
    let mut stats = WalkStats::default();
    let document = visit(root, render, options, &mut sink, &mut stats);
    (document, stats)
}

fn visit<F>(
    node: &Node,
    render: &F,
    options: &TransposeOptions,
    sink: &mut Option<DiagnosticSink<'_>>,
    stats: &mut WalkStats,
) -> Node
where
    F: Fn(&ChordToken) -> Result<String, LeafError>,
{
    match node {
        Node::Element {
            tag,
            attrs,
            children,
        } => Node::Element {
            tag: tag.clone(),
            attrs: attrs.clone(),
            children: children
                .iter()
                .map(|child| visit(child, render, options, sink, stats))
                .collect(),
        },
        Node::Text { text } => {
            let leaf_index = stats.leaves_visited;
            stats.leaves_visited += 1;

            match rewrite_run(text, render, options) {
                Ok(Some(rewritten)) => {
                    if rewritten != *text {
                        stats.leaves_transposed += 1;
                    }
                    Node::Text { text: rewritten }
                }
                // Below the chord-ratio threshold: leaf kept as-is.
                Ok(None) => node.clone(),
                Err(err) => {
                    let failure = LeafFailure {
                        leaf_index,
                        text: text.clone(),
                        reason: err.to_string(),
                    };
                    if let Some(notify) = sink.as_mut() {
                        notify(&failure);
                    }
                    stats.failed_leaves.push(failure);
                    node.clone()
                }
            }
        }
    }
}

fn rewrite_run<F>(
    run: &str,
    render: &F,
    options: &TransposeOptions,
) -> Result<Option<String>, LeafError>
where
    F: Fn(&ChordToken) -> Result<String, LeafError>,
{
    let segments = tokenize(run);

    if options.chord_ratio_threshold > 0.0 {
        let words = segments.iter().filter(|s| s.is_word()).count();
        let chords = segments.iter().filter(|s| s.is_chord()).count();
        if words == 0 || (chords as f32) / (words as f32) < options.chord_ratio_threshold {
            return Ok(None);
        }
    }

    rewrite_segments(&segments, render).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> Key {
        s.parse().unwrap()
    }

    fn song() -> Node {
        Node::element(
            "div",
            vec![
                Node::element("p", vec![Node::text("C G Am F")]),
                Node::element("p", vec![Node::text("just a verse about grace")]),
            ],
        )
    }

    #[test]
    fn test_supplied_key_not_flagged_inferred() {
        let outcome = transpose_document(&song(), Some(key("C")), key("D")).unwrap();
        assert!(!outcome.report.key_inferred);
        assert_eq!(outcome.report.source_key, key("C"));
    }

    #[test]
    fn test_key_inference_uses_first_chord() {
        let outcome = transpose_document(&song(), None, key("D")).unwrap();
        assert!(outcome.report.key_inferred);
        assert_eq!(outcome.report.source_key, key("C"));
    }

    #[test]
    fn test_minor_first_chord_infers_minor_key() {
        let doc = Node::element("p", vec![Node::text("Am F C G")]);
        assert_eq!(guess_key_from_document(&doc), Some(key("Am")));
    }

    #[test]
    fn test_unresolvable_key_fails_whole_call() {
        let doc = Node::element("p", vec![Node::text("no chords in here")]);
        assert_eq!(
            transpose_document(&doc, None, key("D")),
            Err(TransposeError::UnresolvedSourceKey)
        );
    }

    #[test]
    fn test_chord_ratio_threshold_skips_prose_leaves() {
        // One chord-shaped word among five: below a 0.5 threshold.
        let doc = Node::element("p", vec![Node::text("A song about amazing grace")]);
        let options = TransposeOptions {
            chord_ratio_threshold: 0.5,
        };
        let outcome =
            transpose_document_with(&doc, Some(key("C")), key("D"), &options, None).unwrap();
        assert_eq!(
            outcome.document,
            Node::element("p", vec![Node::text("A song about amazing grace")])
        );
        assert_eq!(outcome.report.leaves_transposed, 0);
    }

    #[test]
    fn test_failed_leaf_is_isolated() {
        let doc = Node::element(
            "div",
            vec![
                Node::text("C G"),
                Node::text("Am F"),
                Node::text("D7 G"),
            ],
        );

        // Renderer that chokes on minor chords, standing in for an
        // internal invariant violation mid-walk.
        let render = |token: &ChordToken| {
            if token.is_minor() {
                Err(LeafError::UnsupportedQuality(token.quality.clone()))
            } else {
                transpose_chord(token, 2, key("D"))
            }
        };

        let mut seen = Vec::new();
        let mut sink = |failure: &LeafFailure| seen.push(failure.leaf_index);
        let (document, stats) = rewrite_tree(
            &doc,
            &render,
            &TransposeOptions::default(),
            Some(&mut sink),
        );

        assert_eq!(
            document,
            Node::element(
                "div",
                vec![
                    Node::text("D A"),
                    Node::text("Am F"), // failed leaf keeps original text
                    Node::text("E7 A"),
                ],
            )
        );
        assert_eq!(stats.leaves_visited, 3);
        assert_eq!(stats.leaves_transposed, 2);
        assert_eq!(stats.failed_leaves.len(), 1);
        assert_eq!(stats.failed_leaves[0].leaf_index, 1);
        assert_eq!(seen, vec![1]);
    }
}

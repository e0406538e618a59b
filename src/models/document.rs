//! Abstract lyric document tree
//!
//! The engine never walks a live rendering surface. The caller hands in
//! a plain tree of container elements and text leaves (the shape the
//! frontend derives from its styled lyric fragment), the engine returns
//! a transformed copy, and the caller applies it to whatever surface it
//! owns. Tree shape, node count, and attributes are never altered by
//! the engine; only text leaf content changes.

use serde::{Deserialize, Serialize};

/// One node of a lyric document: a container element with opaque
/// attributes, or a text leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    Element {
        /// Element tag, opaque to the engine.
        tag: String,

        /// Ordered attribute pairs, opaque to the engine and preserved
        /// byte-for-byte (ordered pairs rather than a map so the caller
        /// gets back exactly what it sent).
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        attrs: Vec<(String, String)>,

        #[serde(default)]
        children: Vec<Node>,
    },
    Text {
        text: String,
    },
}

impl Node {
    /// Text leaf constructor.
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    /// Element constructor without attributes.
    pub fn element(tag: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children,
        }
    }

    /// Element constructor with attributes.
    pub fn element_with_attrs(
        tag: impl Into<String>,
        attrs: Vec<(String, String)>,
        children: Vec<Node>,
    ) -> Self {
        Node::Element {
            tag: tag.into(),
            attrs,
            children,
        }
    }

    /// Total node count, containers included.
    pub fn node_count(&self) -> usize {
        match self {
            Node::Text { .. } => 1,
            Node::Element { children, .. } => {
                1 + children.iter().map(Node::node_count).sum::<usize>()
            }
        }
    }

    /// Visit every text leaf in pre-order, depth-first, left-to-right.
    /// This is the document order used for source-key inference.
    pub fn for_each_text<'a>(&'a self, visit: &mut impl FnMut(&'a str)) {
        match self {
            Node::Text { text } => visit(text),
            Node::Element { children, .. } => {
                for child in children {
                    child.for_each_text(visit);
                }
            }
        }
    }
}

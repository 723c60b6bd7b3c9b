//! Leaf/internal node model with cached aggregates
//!
//! Nodes are immutable once built and shared between buffer versions through
//! `Arc`. Children never point back at parents, so reference counting alone
//! reclaims them.

use bytecount::count as bytecount_count;
use std::sync::Arc;

/// Rope node - either a byte chunk or a pair of shared subtrees
#[derive(Debug)]
pub(crate) enum Node {
    Leaf {
        value: Box<[u8]>,
        newlines: usize,
    },
    Internal {
        left: Arc<Node>,
        right: Arc<Node>,
        /// Total length of the left subtree
        weight: usize,
        /// Total length of this subtree (`weight + right.len()`)
        len: usize,
        newlines: usize,
        height: usize,
    },
}

impl Node {
    /// Build a leaf holding its own copy of `bytes`
    pub(crate) fn leaf(bytes: &[u8]) -> Arc<Node> {
        Arc::new(Node::Leaf {
            newlines: bytecount_count(bytes, b'\n'),
            value: bytes.into(),
        })
    }

    /// Leaf for non-empty input, absent otherwise
    pub(crate) fn leaf_or_absent(bytes: &[u8]) -> Option<Arc<Node>> {
        (!bytes.is_empty()).then(|| Node::leaf(bytes))
    }

    /// Join two subtrees, computing aggregates from the children's caches
    pub(crate) fn internal(left: Arc<Node>, right: Arc<Node>) -> Node {
        let weight = left.len();
        Node::Internal {
            len: weight + right.len(),
            newlines: left.newlines() + right.newlines(),
            height: 1 + left.height().max(right.height()),
            weight,
            left,
            right,
        }
    }

    /// Leaf bytes; empty for internal nodes
    #[inline]
    pub(crate) fn value(&self) -> &[u8] {
        match self {
            Node::Leaf { value, .. } => &value[..],
            Node::Internal { .. } => &[],
        }
    }

    /// Leaf length, or length of the left subtree
    #[inline]
    pub(crate) fn weight(&self) -> usize {
        match self {
            Node::Leaf { value, .. } => value.len(),
            Node::Internal { weight, .. } => *weight,
        }
    }

    /// Total bytes under this node
    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            Node::Leaf { value, .. } => value.len(),
            Node::Internal { len, .. } => *len,
        }
    }

    #[inline]
    pub(crate) fn newlines(&self) -> usize {
        match self {
            Node::Leaf { newlines, .. } | Node::Internal { newlines, .. } => *newlines,
        }
    }

    /// Edges on the longest root-to-leaf path (0 for a leaf)
    #[inline]
    pub(crate) fn height(&self) -> usize {
        match self {
            Node::Leaf { .. } => 0,
            Node::Internal { height, .. } => *height,
        }
    }

    pub(crate) fn leaf_count(&self) -> usize {
        match self {
            Node::Leaf { .. } => 1,
            Node::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Byte at `pos`, descending the same way split does
    pub(crate) fn byte_at(&self, pos: usize) -> Option<u8> {
        let mut node = self;
        let mut pos = pos;
        loop {
            match node {
                Node::Leaf { value, .. } => return value.get(pos).copied(),
                Node::Internal {
                    left,
                    right,
                    weight,
                    ..
                } => {
                    if pos < *weight {
                        node = left.as_ref();
                    } else {
                        pos -= weight;
                        node = right.as_ref();
                    }
                }
            }
        }
    }
}

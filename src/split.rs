//! Dividing a subtree at a byte offset

use crate::concat::concat;
use crate::config::RopeConfig;
use crate::node::Node;
use std::sync::Arc;

pub(crate) type Parts = (Option<Arc<Node>>, Option<Arc<Node>>);

/// Split `node` so the left part holds exactly the first `i` bytes.
///
/// Either part is absent rather than an empty leaf when `i` is 0 or the
/// full length. Only nodes on the cut path are rebuilt; every subtree off the
/// path is shared with `node`. Caller guarantees `i <= node.len()`.
pub(crate) fn split(node: &Arc<Node>, i: usize, config: &RopeConfig) -> Parts {
    debug_assert!(
        i <= node.len(),
        "split offset {} exceeds node length {}",
        i,
        node.len()
    );

    if i == 0 {
        return (None, Some(Arc::clone(node)));
    }
    if i >= node.len() {
        return (Some(Arc::clone(node)), None);
    }

    match node.as_ref() {
        Node::Leaf { value, .. } => (
            Node::leaf_or_absent(&value[..i]),
            Node::leaf_or_absent(&value[i..]),
        ),
        Node::Internal {
            left,
            right,
            weight,
            ..
        } => {
            if i < *weight {
                let (ll, lr) = split(left, i, config);
                (ll, concat(lr, Some(Arc::clone(right)), config))
            } else {
                let (rl, rr) = split(right, i - weight, config);
                (concat(Some(Arc::clone(left)), rl, config), rr)
            }
        }
    }
}

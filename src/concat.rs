//! Joining subtrees

use crate::config::RopeConfig;
use crate::node::Node;
use crate::rebalance;
use std::sync::Arc;

/// Join two optional subtrees. An absent side is the identity, so
/// `concat(None, x) == x` and `concat(x, None) == x`.
///
/// The new internal node takes its aggregates from the children's caches
/// without walking them; the only extra work is the rebuild that kicks in
/// when the result is deeper than the configured bound.
pub(crate) fn concat(
    left: Option<Arc<Node>>,
    right: Option<Arc<Node>>,
    config: &RopeConfig,
) -> Option<Arc<Node>> {
    match (left, right) {
        (None, other) | (other, None) => other,
        (Some(left), Some(right)) => Some(join(left, right, config)),
    }
}

fn join(left: Arc<Node>, right: Arc<Node>, config: &RopeConfig) -> Arc<Node> {
    let node = Arc::new(Node::internal(left, right));
    if rebalance::exceeds_bound(&node, config) {
        rebalance::rebuild(node, config)
    } else {
        node
    }
}

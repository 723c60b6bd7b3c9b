//! Depth bounding for concatenated subtrees
//!
//! Plain split/concat never looks at shape, so a run of edits at one end
//! (typing at offset 0, say) grows a spine one node per edit. Every concat
//! therefore compares the new node's height with
//! `rebalance_factor * ceil(log2(len))` and, past it, rebuilds that subtree
//! from its leaves. This step is required for the O(log n) edit cost.
//!
//! The rebuild halves leaves by cumulative byte length, but only picks a cut
//! from the middle third of the leaf sequence. Each child then holds at most
//! two thirds of the leaves, which keeps a rebuilt subtree of `n` leaves
//! within `2 * ceil(log2(n))` levels, below the smallest bound the config
//! accepts.

use crate::config::RopeConfig;
use crate::node::Node;
use std::sync::Arc;
use tracing::trace;

/// Whether `node` is deeper than the configured bound for its length
#[inline]
pub(crate) fn exceeds_bound(node: &Node, config: &RopeConfig) -> bool {
    node.height() > config.max_height(node.len())
}

/// Rebuild `node` into a weight-balanced tree over the same bytes
pub(crate) fn rebuild(node: Arc<Node>, config: &RopeConfig) -> Arc<Node> {
    let mut leaves = Vec::with_capacity(node.leaf_count());
    collect_leaves(&node, &mut leaves);
    let collected = leaves.len();
    let leaves = coalesce(leaves, config.chunk_threshold());

    trace!(
        height = node.height(),
        bound = config.max_height(node.len()),
        len = node.len(),
        leaves = collected,
        merged_leaves = leaves.len(),
        "rebuilding subtree"
    );

    build_balanced(&leaves).unwrap_or(node)
}

/// In-order leaves under `node`, shared rather than copied
pub(crate) fn collect_leaves(node: &Arc<Node>, out: &mut Vec<Arc<Node>>) {
    match node.as_ref() {
        Node::Leaf { .. } => out.push(Arc::clone(node)),
        Node::Internal { left, right, .. } => {
            collect_leaves(left, out);
            collect_leaves(right, out);
        }
    }
}

/// Merge runs of adjacent leaves whose combined size fits in `threshold`.
/// Leaves that stay alone are reused as-is.
fn coalesce(leaves: Vec<Arc<Node>>, threshold: usize) -> Vec<Arc<Node>> {
    let mut out = Vec::with_capacity(leaves.len());
    let mut run: Vec<Arc<Node>> = Vec::new();
    let mut run_len = 0;

    for leaf in leaves {
        if !run.is_empty() && run_len + leaf.len() > threshold {
            out.push(merge_run(&mut run));
            run_len = 0;
        }
        run_len += leaf.len();
        run.push(leaf);
    }
    if !run.is_empty() {
        out.push(merge_run(&mut run));
    }
    out
}

fn merge_run(run: &mut Vec<Arc<Node>>) -> Arc<Node> {
    if run.len() == 1 {
        if let Some(leaf) = run.pop() {
            return leaf;
        }
    }
    let mut bytes = Vec::with_capacity(run.iter().map(|leaf| leaf.len()).sum());
    for leaf in run.drain(..) {
        bytes.extend_from_slice(leaf.value());
    }
    Node::leaf(&bytes)
}

/// Balanced tree over `leaves` in order; absent when there are none
pub(crate) fn build_balanced(leaves: &[Arc<Node>]) -> Option<Arc<Node>> {
    match leaves {
        [] => None,
        [leaf] => Some(Arc::clone(leaf)),
        _ => {
            let mid = split_index(leaves);
            let left = build_balanced(&leaves[..mid])?;
            let right = build_balanced(&leaves[mid..])?;
            Some(Arc::new(Node::internal(left, right)))
        }
    }
}

/// Cut point nearest half the bytes, restricted to the middle third.
/// Requires at least two leaves.
fn split_index(leaves: &[Arc<Node>]) -> usize {
    let n = leaves.len();
    let lo = (n / 3).max(1);
    let hi = (n - n / 3).min(n - 1);
    let total: usize = leaves.iter().map(|leaf| leaf.len()).sum();

    let mut prefix: usize = leaves[..lo].iter().map(|leaf| leaf.len()).sum();
    let mut best = lo;
    let mut best_distance = (2 * prefix).abs_diff(total);
    for (k, leaf) in leaves.iter().enumerate().take(hi).skip(lo) {
        prefix += leaf.len();
        let distance = (2 * prefix).abs_diff(total);
        if distance < best_distance {
            best = k + 1;
            best_distance = distance;
        }
    }
    best
}

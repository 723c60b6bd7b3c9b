//! Leaf construction policy for new text
//!
//! Input no longer than the chunk threshold becomes one leaf. Longer input is
//! cut into `ceil(len / threshold)` near-equal leaves and assembled into a
//! balanced subtree, so later splits inside it copy at most one chunk.

use crate::config::RopeConfig;
use crate::node::Node;
use crate::rebalance::build_balanced;
use std::sync::Arc;
use tracing::debug;

/// Longest UTF-8 sequence tail a boundary may move back over
const MAX_CONTINUATION: usize = 3;

/// Subtree holding a copy of `bytes`, absent for empty input
pub(crate) fn build(bytes: &[u8], config: &RopeConfig) -> Option<Arc<Node>> {
    let threshold = config.chunk_threshold();
    if bytes.len() <= threshold {
        return Node::leaf_or_absent(bytes);
    }

    let pieces = bytes.len().div_ceil(threshold);
    let target = bytes.len().div_ceil(pieces);

    let mut leaves = Vec::with_capacity(pieces + 1);
    let mut pos = 0;
    while pos < bytes.len() {
        let end = (pos + target).min(bytes.len());
        let end = char_boundary_before(bytes, pos, end);
        leaves.push(Node::leaf(&bytes[pos..end]));
        pos = end;
    }

    debug!(len = bytes.len(), leaves = leaves.len(), "pre-split text into leaves");
    build_balanced(&leaves)
}

/// Move `end` back so it does not cut a UTF-8 sequence, when that is possible
/// within a few bytes and still leaves a non-empty chunk. Arbitrary bytes keep
/// the original cut.
fn char_boundary_before(bytes: &[u8], start: usize, end: usize) -> usize {
    if end >= bytes.len() {
        return end;
    }
    let mut e = end;
    while e > start + 1 && end - e < MAX_CONTINUATION && is_continuation(bytes[e]) {
        e -= 1;
    }
    if is_continuation(bytes[e]) {
        end
    } else {
        e
    }
}

#[inline]
fn is_continuation(byte: u8) -> bool {
    (byte & 0b1100_0000) == 0b1000_0000
}

//! Full-tree invariant checks for tests and verification tooling

use crate::config::RopeConfig;
use crate::error::{InvariantKind, InvariantViolation};
use crate::node::Node;
use bytecount::count as bytecount_count;

/// Aggregates recomputed from the bytes underneath a node
struct Summary {
    len: usize,
    newlines: usize,
    height: usize,
}

/// Recompute every aggregate bottom-up and compare with the cached values
pub(crate) fn validate(root: &Node, config: &RopeConfig) -> Result<(), InvariantViolation> {
    check(root, config, 0).map(|_| ())
}

fn check(node: &Node, config: &RopeConfig, depth: usize) -> Result<Summary, InvariantViolation> {
    match node {
        Node::Leaf { value, newlines } => {
            if value.is_empty() {
                return Err(InvariantViolation::new(
                    InvariantKind::EmptyLeaf,
                    format!("empty leaf at depth {}", depth),
                ));
            }
            let counted = bytecount_count(value, b'\n');
            if counted != *newlines {
                return Err(InvariantViolation::new(
                    InvariantKind::Newlines,
                    format!(
                        "leaf at depth {} caches {} newlines, holds {}",
                        depth, newlines, counted
                    ),
                ));
            }
            Ok(Summary {
                len: value.len(),
                newlines: counted,
                height: 0,
            })
        }
        Node::Internal {
            left,
            right,
            len,
            newlines,
            height,
            ..
        } => {
            let l = check(left, config, depth + 1)?;
            let r = check(right, config, depth + 1)?;

            let weight = node.weight();
            if weight != l.len {
                return Err(InvariantViolation::new(
                    InvariantKind::Weight,
                    format!(
                        "node at depth {} has weight {}, left subtree holds {} bytes",
                        depth, weight, l.len
                    ),
                ));
            }
            if *len != l.len + r.len {
                return Err(InvariantViolation::new(
                    InvariantKind::Length,
                    format!(
                        "node at depth {} caches length {}, subtree holds {} bytes",
                        depth,
                        len,
                        l.len + r.len
                    ),
                ));
            }
            if *newlines != l.newlines + r.newlines {
                return Err(InvariantViolation::new(
                    InvariantKind::Newlines,
                    format!(
                        "node at depth {} caches {} newlines, subtree holds {}",
                        depth,
                        newlines,
                        l.newlines + r.newlines
                    ),
                ));
            }
            let computed = 1 + l.height.max(r.height);
            if *height != computed {
                return Err(InvariantViolation::new(
                    InvariantKind::Height,
                    format!(
                        "node at depth {} caches height {}, actual {}",
                        depth, height, computed
                    ),
                ));
            }
            let bound = config.max_height(*len);
            if computed > bound {
                return Err(InvariantViolation::new(
                    InvariantKind::Depth,
                    format!(
                        "node at depth {} has height {} over bound {} for {} bytes",
                        depth, computed, bound, len
                    ),
                ));
            }

            Ok(Summary {
                len: *len,
                newlines: *newlines,
                height: computed,
            })
        }
    }
}

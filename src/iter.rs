//! In-order traversal over leaf chunks

use crate::node::Node;

/// Leaf byte slices of a buffer, left to right
pub struct Chunks<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Chunks<'a> {
    pub(crate) fn new(root: Option<&'a Node>) -> Self {
        Self {
            stack: root.into_iter().collect(),
        }
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a [u8];

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            match node {
                Node::Leaf { value, .. } => return Some(&value[..]),
                Node::Internal { left, right, .. } => {
                    self.stack.push(right.as_ref());
                    self.stack.push(left.as_ref());
                }
            }
        }
        None
    }
}

/// Append bytes `start..end` of `node` to `out`, visiting only overlapping leaves
pub(crate) fn collect_range(node: &Node, start: usize, end: usize, out: &mut Vec<u8>) {
    if start >= end {
        return;
    }
    match node {
        Node::Leaf { value, .. } => {
            out.extend_from_slice(&value[start.min(value.len())..end.min(value.len())]);
        }
        Node::Internal {
            left,
            right,
            weight,
            ..
        } => {
            if start < *weight {
                collect_range(left, start, end.min(*weight), out);
            }
            if end > *weight {
                collect_range(right, start.saturating_sub(*weight), end - weight, out);
            }
        }
    }
}

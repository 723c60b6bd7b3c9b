//! Line lookups driven by cached newline counts
//!
//! Each descent picks a branch the way split does, accumulating a line or
//! byte count instead of building nodes, so every query is O(depth) plus one
//! leaf scan.

use crate::node::Node;
use bytecount::count as bytecount_count;
use memchr::{memchr, memchr_iter, memrchr};

/// Number of `'\n'` bytes before `offset`. Caller guarantees `offset <= len`.
pub(crate) fn line_of_offset(root: &Node, offset: usize) -> usize {
    let mut node = root;
    let mut offset = offset;
    let mut lines = 0;
    loop {
        match node {
            Node::Leaf { value, .. } => {
                return lines + bytecount_count(&value[..offset.min(value.len())], b'\n');
            }
            Node::Internal {
                left,
                right,
                weight,
                ..
            } => {
                if offset < *weight {
                    node = left.as_ref();
                } else {
                    lines += left.newlines();
                    offset -= weight;
                    node = right.as_ref();
                }
            }
        }
    }
}

/// Byte offset where `line` starts, or `None` past the last line
pub(crate) fn offset_of_line(root: &Node, line: usize) -> Option<usize> {
    if line == 0 {
        return Some(0);
    }
    if line > root.newlines() {
        return None;
    }

    // Find the `line`-th newline; the line starts right after it
    let mut node = root;
    let mut remaining = line;
    let mut base = 0;
    loop {
        match node {
            Node::Leaf { value, .. } => {
                let pos = memchr_iter(b'\n', value).nth(remaining - 1)?;
                return Some(base + pos + 1);
            }
            Node::Internal {
                left,
                right,
                weight,
                ..
            } => {
                if remaining <= left.newlines() {
                    node = left.as_ref();
                } else {
                    remaining -= left.newlines();
                    base += weight;
                    node = right.as_ref();
                }
            }
        }
    }
}

/// First `'\n'` at or after `from`, skipping subtrees without newlines
pub(crate) fn find_next_newline(node: &Node, from: usize) -> Option<usize> {
    if node.newlines() == 0 || from >= node.len() {
        return None;
    }
    match node {
        Node::Leaf { value, .. } => memchr(b'\n', &value[from..]).map(|pos| from + pos),
        Node::Internal {
            left,
            right,
            weight,
            ..
        } => {
            if from < *weight {
                if let Some(pos) = find_next_newline(left, from) {
                    return Some(pos);
                }
            }
            find_next_newline(right, from.saturating_sub(*weight)).map(|pos| pos + weight)
        }
    }
}

/// Last `'\n'` strictly before `before`
pub(crate) fn find_prev_newline(node: &Node, before: usize) -> Option<usize> {
    if node.newlines() == 0 || before == 0 {
        return None;
    }
    match node {
        Node::Leaf { value, .. } => memrchr(b'\n', &value[..before.min(value.len())]),
        Node::Internal {
            left,
            right,
            weight,
            ..
        } => {
            if before > *weight {
                if let Some(pos) = find_prev_newline(right, before - weight) {
                    return Some(pos + weight);
                }
            }
            find_prev_newline(left, before.min(*weight))
        }
    }
}

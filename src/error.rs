//! Error types for buffer operations, configuration and invariant checks

use std::fmt;
use thiserror::Error;

/// A position, range or line argument outside the valid bound of a buffer.
///
/// Reported as-is; offsets are never clamped. Since buffers are immutable a
/// failed call leaves the caller's buffer untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RangeError {
    #[error("position {pos} is outside buffer of length {len}")]
    Position { pos: usize, len: usize },

    #[error("range {start}..{end} is invalid for buffer of length {len}")]
    Range { start: usize, end: usize, len: usize },

    #[error("line {line} is outside buffer with {line_count} lines")]
    Line { line: usize, line_count: usize },
}

/// Which aggregate or structural rule a node broke
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantKind {
    /// Internal node weight differs from the length of its left subtree
    Weight,
    /// Cached newline count differs from the bytes underneath
    Newlines,
    /// Cached subtree length differs from the bytes underneath
    Length,
    /// Cached height differs from the children's heights
    Height,
    /// A zero-length leaf is reachable from the root
    EmptyLeaf,
    /// Subtree is deeper than the configured rebalance bound
    Depth,
}

impl fmt::Display for InvariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InvariantKind::Weight => "weight",
            InvariantKind::Newlines => "newlines",
            InvariantKind::Length => "length",
            InvariantKind::Height => "height",
            InvariantKind::EmptyLeaf => "empty leaf",
            InvariantKind::Depth => "depth",
        };
        f.write_str(name)
    }
}

/// Internal consistency failure found by [`crate::Buffer::validate`].
///
/// Never produced by normal operations; it exists so tests and verification
/// tooling can catch implementation bugs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} invariant violated: {detail}")]
pub struct InvariantViolation {
    pub kind: InvariantKind,
    pub detail: String,
}

impl InvariantViolation {
    pub(crate) fn new(kind: InvariantKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("chunk threshold must be at least 1 byte, got {0}")]
    ChunkThreshold(usize),

    #[error("rebalance factor must be at least 2, got {0}")]
    RebalanceFactor(u32),

    #[error("failed to parse rope config: {0}")]
    Parse(#[from] toml::de::Error),
}

//! Persistent rope buffer for editor documents
//!
//! The text lives in a binary tree of shared, immutable nodes. Leaves hold
//! byte chunks; internal nodes cache the length of their left subtree and
//! the newline count of everything below them. Every edit is a split at the
//! edit position followed by concatenation of the pieces, so an edit touches
//! O(log n) nodes and leaves the previous [`Buffer`] fully usable.
//!
//! ```
//! use rope_buffer::Buffer;
//!
//! let original = Buffer::from("hello");
//! let edited = original.insert(5, " world").unwrap();
//! assert_eq!(edited.to_bytes(), b"hello world");
//! assert_eq!(original.to_bytes(), b"hello");
//! ```

mod buffer;
mod chunk;
mod concat;
pub mod config;
mod edit;
pub mod error;
mod iter;
mod lines;
mod node;
mod rebalance;
mod split;
mod validate;

pub use buffer::Buffer;
pub use config::{RopeConfig, CHUNK_THRESHOLD, REBALANCE_FACTOR};
pub use edit::Edit;
pub use error::{ConfigError, InvariantKind, InvariantViolation, RangeError};
pub use iter::Chunks;

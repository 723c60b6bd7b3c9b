//! Persistent text buffer built on split and concat
//!
//! A [`Buffer`] is an immutable snapshot. Every edit returns a new buffer that
//! shares all untouched subtrees with the old one, so keeping earlier versions
//! around (for undo, or for readers on other threads) costs no copying.
//!
//! Offsets are raw byte offsets. Nothing here knows about UTF-8: an edit at an
//! offset inside a multi-byte sequence is accepted and produces bytes that may
//! no longer be valid text. Mapping characters or grapheme clusters to byte
//! offsets is up to the caller.

use crate::chunk;
use crate::concat::concat;
use crate::config::RopeConfig;
use crate::edit::Edit;
use crate::error::{InvariantViolation, RangeError};
use crate::iter::{collect_range, Chunks};
use crate::lines;
use crate::node::Node;
use crate::rebalance;
use crate::split::split;
use crate::validate;
use simdutf8::basic::{from_utf8, Utf8Error};
use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// Immutable rope over raw bytes
#[derive(Clone, Default)]
pub struct Buffer {
    /// `None` for empty text
    root: Option<Arc<Node>>,
    config: RopeConfig,
}

impl Buffer {
    /// Empty buffer with the default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer holding a copy of `bytes`, pre-split into balanced leaves when
    /// longer than the chunk threshold
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self::with_config(bytes, RopeConfig::default())
    }

    pub fn with_config(bytes: impl AsRef<[u8]>, config: RopeConfig) -> Self {
        Self {
            root: chunk::build(bytes.as_ref(), &config),
            config,
        }
    }

    fn derive(&self, root: Option<Arc<Node>>) -> Self {
        Self {
            root,
            config: self.config,
        }
    }

    pub fn config(&self) -> &RopeConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.len())
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Whole text as one contiguous byte vector. O(n); meant for export and
    /// debugging rather than the edit path.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        for chunk in self.chunks() {
            out.extend_from_slice(chunk);
        }
        out
    }

    /// Whole text as a `String`, failing if the bytes are not valid UTF-8
    pub fn to_text(&self) -> Result<String, Utf8Error> {
        let bytes = self.to_bytes();
        from_utf8(&bytes)?;
        // SAFETY: validated just above
        Ok(unsafe { String::from_utf8_unchecked(bytes) })
    }

    /// Leaf chunks in order
    pub fn chunks(&self) -> Chunks<'_> {
        Chunks::new(self.root.as_deref())
    }

    /// Bytes in `start..end`
    pub fn slice(&self, start: usize, end: usize) -> Result<Vec<u8>, RangeError> {
        self.check_range(start, end)?;
        let mut out = Vec::with_capacity(end - start);
        if let Some(root) = &self.root {
            collect_range(root, start, end, &mut out);
        }
        Ok(out)
    }

    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        self.root.as_ref().and_then(|root| root.byte_at(pos))
    }

    /// New buffer with `text` inserted before byte `pos`
    pub fn insert(&self, pos: usize, text: impl AsRef<[u8]>) -> Result<Buffer, RangeError> {
        self.check_pos(pos)?;
        let inserted = chunk::build(text.as_ref(), &self.config);
        if inserted.is_none() {
            return Ok(self.clone());
        }
        let (left, right) = self.split_root(pos);
        let joined = concat(concat(left, inserted, &self.config), right, &self.config);
        Ok(self.derive(joined))
    }

    /// New buffer without bytes `start..end`
    pub fn delete(&self, start: usize, end: usize) -> Result<Buffer, RangeError> {
        self.check_range(start, end)?;
        if start == end {
            return Ok(self.clone());
        }
        let (left, mid) = self.split_root(start);
        let right = match &mid {
            Some(mid) => split(mid, end - start, &self.config).1,
            None => None,
        };
        Ok(self.derive(concat(left, right, &self.config)))
    }

    /// New buffer with bytes `start..end` replaced by `text`
    pub fn replace(
        &self,
        start: usize,
        end: usize,
        text: impl AsRef<[u8]>,
    ) -> Result<Buffer, RangeError> {
        self.check_range(start, end)?;
        let (left, mid) = self.split_root(start);
        let right = match &mid {
            Some(mid) => split(mid, end - start, &self.config).1,
            None => None,
        };
        let inserted = chunk::build(text.as_ref(), &self.config);
        let joined = concat(concat(left, inserted, &self.config), right, &self.config);
        Ok(self.derive(joined))
    }

    /// Two buffers holding the bytes before and after `pos`
    pub fn split_at(&self, pos: usize) -> Result<(Buffer, Buffer), RangeError> {
        self.check_pos(pos)?;
        let (left, right) = self.split_root(pos);
        Ok((self.derive(left), self.derive(right)))
    }

    /// New buffer holding this text followed by `other`'s. The result keeps
    /// this buffer's config.
    pub fn append(&self, other: &Buffer) -> Buffer {
        let mut right = other.root.clone();
        // A looser depth bound on the other side would break ours
        if other.config.rebalance_factor() > self.config.rebalance_factor() {
            right = right.map(|root| rebalance::rebuild(root, &self.config));
        }
        self.derive(concat(self.root.clone(), right, &self.config))
    }

    pub fn apply(&self, edit: &Edit) -> Result<Buffer, RangeError> {
        match edit {
            Edit::Insert { pos, text } => self.insert(*pos, text),
            Edit::Delete { range } => self.delete(range.start, range.end),
            Edit::Replace { range, text } => self.replace(range.start, range.end, text),
        }
    }

    /// Apply edits in order, each against the result of the previous one
    pub fn apply_all(&self, edits: &[Edit]) -> Result<Buffer, RangeError> {
        edits
            .iter()
            .try_fold(self.clone(), |buffer, edit| buffer.apply(edit))
    }

    /// Number of lines: newlines + 1. An empty buffer has one empty line.
    pub fn line_count(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.newlines()) + 1
    }

    /// Zero-based line containing byte `offset`; `offset == len()` is valid
    pub fn line_of_offset(&self, offset: usize) -> Result<usize, RangeError> {
        self.check_pos(offset)?;
        Ok(self
            .root
            .as_ref()
            .map_or(0, |root| lines::line_of_offset(root, offset)))
    }

    /// Byte offset of the first byte of zero-based `line`
    pub fn offset_of_line(&self, line: usize) -> Result<usize, RangeError> {
        let line_count = self.line_count();
        let offset = match &self.root {
            None if line == 0 => Some(0),
            None => None,
            Some(root) => lines::offset_of_line(root, line),
        };
        offset.ok_or(RangeError::Line { line, line_count })
    }

    /// Byte range of `line`, excluding its trailing `'\n'`
    pub fn line(&self, line: usize) -> Result<Range<usize>, RangeError> {
        let start = self.offset_of_line(line)?;
        let end = if line + 1 < self.line_count() {
            self.offset_of_line(line + 1)? - 1
        } else {
            self.len()
        };
        Ok(start..end)
    }

    /// Offset of the first `'\n'` at or after `from`
    pub fn find_next_newline(&self, from: usize) -> Option<usize> {
        self.root
            .as_ref()
            .and_then(|root| lines::find_next_newline(root, from))
    }

    /// Offset of the last `'\n'` before `before`
    pub fn find_prev_newline(&self, before: usize) -> Option<usize> {
        self.root
            .as_ref()
            .and_then(|root| lines::find_prev_newline(root, before))
    }

    /// Height of the tree (0 for a single leaf or an empty buffer)
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.height())
    }

    pub fn leaf_count(&self) -> usize {
        self.root.as_ref().map_or(0, |root| root.leaf_count())
    }

    /// Walk the whole tree and check every cached aggregate against the bytes
    /// underneath, plus the configured depth bound. O(n).
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        match &self.root {
            Some(root) => validate::validate(root, &self.config),
            None => Ok(()),
        }
    }

    fn split_root(&self, pos: usize) -> (Option<Arc<Node>>, Option<Arc<Node>>) {
        match &self.root {
            Some(root) => split(root, pos, &self.config),
            None => (None, None),
        }
    }

    fn check_pos(&self, pos: usize) -> Result<(), RangeError> {
        let len = self.len();
        if pos > len {
            return Err(RangeError::Position { pos, len });
        }
        Ok(())
    }

    fn check_range(&self, start: usize, end: usize) -> Result<(), RangeError> {
        let len = self.len();
        if start > end || end > len {
            return Err(RangeError::Range { start, end, len });
        }
        Ok(())
    }
}

impl From<&str> for Buffer {
    fn from(text: &str) -> Self {
        Self::from_bytes(text)
    }
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self::from_bytes(bytes)
    }
}

impl PartialEq for Buffer {
    /// Compares text, not tree shape
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.chunks().flatten().eq(other.chunks().flatten())
    }
}

impl Eq for Buffer {}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("len", &self.len())
            .field("lines", &self.line_count())
            .field("depth", &self.depth())
            .field("leaves", &self.leaf_count())
            .finish()
    }
}

//! Edit values that can be recorded and replayed against a buffer

use std::ops::Range;

/// A single change to a buffer, in byte offsets of the buffer it applies to
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Edit {
    Insert { pos: usize, text: Vec<u8> },
    Delete { range: Range<usize> },
    Replace { range: Range<usize>, text: Vec<u8> },
}

impl Edit {
    pub fn insert(pos: usize, text: impl Into<Vec<u8>>) -> Self {
        Edit::Insert {
            pos,
            text: text.into(),
        }
    }

    pub fn delete(range: Range<usize>) -> Self {
        Edit::Delete { range }
    }

    pub fn replace(range: Range<usize>, text: impl Into<Vec<u8>>) -> Self {
        Edit::Replace {
            range,
            text: text.into(),
        }
    }

    /// Change in buffer length once applied
    pub fn len_delta(&self) -> isize {
        match self {
            Edit::Insert { text, .. } => text.len() as isize,
            Edit::Delete { range } => -(range.len() as isize),
            Edit::Replace { range, text } => text.len() as isize - range.len() as isize,
        }
    }
}

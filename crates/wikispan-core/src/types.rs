//! Core types for wikispan

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Represents a position in a scanned text span
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number in characters (0-indexed)
    pub column: usize,
    /// Byte offset from start
    pub offset: usize,
}

impl Position {
    /// Create a new position
    pub fn new(line: usize, column: usize, offset: usize) -> Self {
        Self {
            line,
            column,
            offset,
        }
    }

    /// Compute the line and column of a byte offset within `text`.
    ///
    /// Offsets past the end, or inside a multi-byte character, are clamped
    /// back to the nearest preceding character boundary.
    pub fn locate(text: &str, offset: usize) -> Self {
        let mut offset = offset.min(text.len());
        while !text.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &text[..offset];
        let line = before.matches('\n').count();
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count();
        Self::new(line, column, offset)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A half-open byte range in the scanned text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive)
    pub start: usize,
    /// End byte offset (exclusive)
    pub end: usize,
}

impl Span {
    /// Create a new span from start and end offsets
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "inverted span {}..{}", start, end);
        Self { start, end }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// The byte range covered by this span
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Move the span right by `base` bytes.
    pub fn shift(&self, base: usize) -> Self {
        Self::new(self.start + base, self.end + base)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Reference to a capture group, by index or by name.
///
/// In TOML this is written either as an integer (`Group = 2`) or as a
/// string (`Group = "target"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged, from = "RawGroupRef")]
pub enum GroupRef {
    /// Positional capture group (0 is the whole match)
    Index(usize),
    /// Named capture group
    Name(String),
}

impl From<usize> for GroupRef {
    fn from(index: usize) -> Self {
        GroupRef::Index(index)
    }
}

/// A group name made only of digits is an index; regex names cannot start
/// with a digit.
impl From<&str> for GroupRef {
    fn from(name: &str) -> Self {
        match name.parse::<usize>() {
            Ok(index) if name.bytes().all(|b| b.is_ascii_digit()) => GroupRef::Index(index),
            _ => GroupRef::Name(name.to_string()),
        }
    }
}

/// Wire form of [`GroupRef`] before digit-only names are normalized.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawGroupRef {
    Index(usize),
    Name(String),
}

impl From<RawGroupRef> for GroupRef {
    fn from(raw: RawGroupRef) -> Self {
        match raw {
            RawGroupRef::Index(index) => GroupRef::Index(index),
            RawGroupRef::Name(name) => GroupRef::from(name.as_str()),
        }
    }
}

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupRef::Index(i) => write!(f, "{}", i),
            GroupRef::Name(n) => write!(f, "{:?}", n),
        }
    }
}

//! Text locations for anchoring diagnostics.
//!
//! ## Learning: Validated Newtypes
//!
//! `TextLocation` keeps its fields private so that every value in the
//! program satisfies `line >= 1 && column >= 1`. The only ways to build
//! one either check (`new`) or repair (`clamped`) the input.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

use crate::{DiagnosticError, DiagnosticResult};

/// A point in a text buffer, independent of any file handle.
///
/// Both line and column are 1-indexed. Columns count characters, not bytes.
/// Deserialized values go through [`TextLocation::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawLocation")]
pub struct TextLocation {
    line: usize,
    column: usize,
}

impl TextLocation {
    /// The first character of the buffer.
    pub const START: TextLocation = TextLocation { line: 1, column: 1 };

    /// Creates a location, rejecting zero lines or columns.
    pub fn new(line: usize, column: usize) -> DiagnosticResult<Self> {
        if line == 0 || column == 0 {
            return Err(DiagnosticError::InvalidLocation { line, column });
        }
        Ok(Self { line, column })
    }

    /// Creates a location, raising zero lines or columns to 1.
    pub fn clamped(line: usize, column: usize) -> Self {
        Self {
            line: line.max(1),
            column: column.max(1),
        }
    }

    /// Converts from a 0-indexed line/column pair.
    pub fn from_zero_based(line: usize, column: usize) -> Self {
        Self {
            line: line + 1,
            column: column + 1,
        }
    }

    /// Returns the 0-indexed line/column pair.
    pub fn to_zero_based(self) -> (usize, usize) {
        (self.line - 1, self.column - 1)
    }

    /// Line number (1-indexed).
    pub fn line(&self) -> usize {
        self.line
    }

    /// Column number (1-indexed, in characters).
    pub fn column(&self) -> usize {
        self.column
    }
}

/// Unchecked wire form of a location.
#[derive(Deserialize)]
struct RawLocation {
    line: usize,
    column: usize,
}

impl TryFrom<RawLocation> for TextLocation {
    type Error = DiagnosticError;

    fn try_from(raw: RawLocation) -> DiagnosticResult<Self> {
        Self::new(raw.line, raw.column)
    }
}

impl Default for TextLocation {
    fn default() -> Self {
        Self::START
    }
}

impl PartialOrd for TextLocation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TextLocation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl fmt::Display for TextLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

//! Line/column positions and ranges.

use std::fmt;

/// A zero-based line and column in a source file.
///
/// Ordering is lexicographic: line first, then column.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    /// Start of file.
    pub const ZERO: Position = Position { line: 0, column: 0 };

    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Rendered one-based, the way editors show it.
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// A range of source text from `start` up to (not including) `ending`.
///
/// `ending` is inclusive for containment checks on positions that sit
/// exactly on the closing column of a node, matching how call ranges nest.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub start: Position,
    pub ending: Position,
}

impl Range {
    #[inline]
    pub const fn new(start: Position, ending: Position) -> Self {
        Range { start, ending }
    }

    /// Build a range from raw line/column numbers.
    #[inline]
    pub const fn from_coords(l1: u32, c1: u32, l2: u32, c2: u32) -> Self {
        Range {
            start: Position::new(l1, c1),
            ending: Position::new(l2, c2),
        }
    }

    /// Check if a position falls within this range (both ends inclusive).
    #[inline]
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.ending
    }

    /// Check if another range is fully contained within this one.
    #[inline]
    pub fn contains_range(&self, other: Range) -> bool {
        self.start <= other.start && other.ending <= self.ending
    }

    /// Check if the range covers no text.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.ending
    }
}

impl fmt::Debug for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.ending)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.ending)
    }
}

#[cfg(target_pointer_width = "64")]
mod size_asserts {
    use super::{Position, Range};
    crate::static_assert_size!(Position, 8);
    crate::static_assert_size!(Range, 16);
}

#[cfg(test)]
mod tests;

//! Text position type.
//!
//! All coordinates are **0-indexed**. Row 0 is the first line, column 0
//! is the first character. Columns count chars, not bytes and not
//! render columns — tab expansion lives in [`crate::row`].
//!
//! Display layers (status bar) convert to 1-indexed for the user; that
//! conversion never belongs here.

use std::fmt;

/// A position in a document: (row, column), both 0-indexed.
///
/// `col` is the char offset from the start of the row. A column equal
/// to the row's length is valid — it is the cursor-after-last-char
/// position used for appending.
///
/// # Ordering
///
/// Positions are ordered lexicographically: row first, then column.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// The origin — row 0, column 0.
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new position.
    #[inline]
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

// Natural ordering: row first, then column.
impl Ord for Position {
    #[inline]
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Pos({}:{})", self.row, self.col)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // 1-indexed for human display.
        write!(f, "{}:{}", self.row + 1, self.col + 1)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn zero_is_origin() {
        assert_eq!(Position::ZERO, Position::new(0, 0));
    }

    #[test]
    fn ordering_is_row_major() {
        assert!(Position::new(0, 5) < Position::new(1, 0));
        assert!(Position::new(2, 1) < Position::new(2, 3));
        assert!(Position::new(3, 0) > Position::new(2, 99));
    }

    #[test]
    fn display_is_one_indexed() {
        assert_eq!(Position::new(0, 0).to_string(), "1:1");
        assert_eq!(Position::new(9, 4).to_string(), "10:5");
    }
}

//! Cursor — logical position plus its render column.
//!
//! The cursor lives in *char* coordinates: `x` is a char column, `y` a
//! row index. `rx` is the derived render column, recomputed by the
//! viewport scroll pass; it differs from `x` only when tabs precede the
//! cursor on the current row.
//!
//! # Invariants
//!
//! - `0 ≤ y ≤ row_count` — the one-past-end row is the valid
//!   "appending past EOF" position.
//! - `0 ≤ x ≤ row_len(y)` whenever `y < row_count`.
//!
//! # Movement policy
//!
//! Left at column 0 wraps to the end of the previous row; Right at the
//! end of a row wraps to column 0 of the next (when one exists). Up and
//! Down keep the column, then clamp it to the destination row's length:
//! moving vertically never extends a shorter line. The clamp is policy,
//! not an accident.

use crate::document::Document;

/// A cursor movement direction (arrow keys).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The editing cursor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    /// Char column within row `y`.
    pub x: usize,
    /// Row index; may equal the row count (one past the last row).
    pub y: usize,
    /// Render column, derived from `x` by the scroll pass.
    pub rx: usize,
}

impl Cursor {
    /// A cursor at the document origin.
    #[must_use]
    pub const fn new() -> Self {
        Self { x: 0, y: 0, rx: 0 }
    }

    /// Move one step in `dir`, honouring the wrap and clamp policy.
    pub fn step(&mut self, doc: &Document, dir: Direction) {
        match dir {
            Direction::Left => {
                if self.x > 0 {
                    self.x -= 1;
                } else if self.y > 0 {
                    // Wrap to the end of the previous row.
                    self.y -= 1;
                    self.x = doc.row_len(self.y);
                }
            }
            Direction::Right => {
                if let Some(row) = doc.row(self.y) {
                    if self.x < row.len() {
                        self.x += 1;
                    } else if self.y + 1 < doc.row_count() {
                        // Wrap to the start of the next row.
                        self.y += 1;
                        self.x = 0;
                    }
                }
            }
            Direction::Up => {
                self.y = self.y.saturating_sub(1);
            }
            Direction::Down => {
                if self.y < doc.row_count() {
                    self.y += 1;
                }
            }
        }

        // Vertical moves may land on a shorter row; never extend it.
        self.x = self.x.min(doc.row_len(self.y));
    }

    /// Jump to the start of the current row (Home).
    pub fn line_home(&mut self) {
        self.x = 0;
    }

    /// Jump to the end of the current row (End) — clamped to the row's
    /// length, so End on the one-past-end line stays at column 0.
    pub fn line_end(&mut self, doc: &Document) {
        self.x = doc.row_len(self.y);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

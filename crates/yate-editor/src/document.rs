//! Document — the ordered row store.
//!
//! A `Document` owns a `Vec<Row>` (0-based line index), the backing
//! file path, and the dirty flag. Every structural edit the editor can
//! perform lives here: row insert/delete, char insert/delete with the
//! cross-line join, row split, and the serialization used by save.
//!
//! # Invariants
//!
//! - Row indices are always in `[0, row_count)`. An empty document
//!   (`row_count == 0`) is a valid state distinct from a document with
//!   one empty row.
//! - Every mutating operation raises the dirty flag; only
//!   [`mark_clean`](Document::mark_clean) (called after a successful
//!   save) lowers it.
//! - Structural edits invalidate positional references; callers receive
//!   the repositioned cursor from [`delete_char`](Document::delete_char)
//!   rather than keeping their own aliases.
//!
//! # Line terminators
//!
//! LF and CRLF terminators are stripped on load; a CR that is not part
//! of a terminator stays in the row as ordinary content.
//! [`to_text`](Document::to_text) appends the platform-default
//! terminator after **every** row, including the last — round-tripping
//! with the load behaviour.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::position::Position;
use crate::row::Row;

/// Line terminator written on save, regardless of what the file used
/// on load.
#[cfg(windows)]
pub const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
pub const LINE_ENDING: &str = "\n";

/// The open document: rows, backing path, dirty flag.
#[derive(Debug, Default)]
pub struct Document {
    rows: Vec<Row>,
    path: Option<PathBuf>,
    dirty: bool,
}

impl Document {
    // -- Construction -------------------------------------------------------

    /// Create an empty, untitled document (zero rows).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from text, stripping LF or CRLF per line.
    ///
    /// `"a\nb\n"` and `"a\nb"` both yield two rows; the empty string
    /// yields zero rows.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let rows = text
            .lines()
            .map(|line| Row::new(line.trim_end_matches('\r')))
            .collect();
        Self {
            rows,
            path: None,
            dirty: false,
        }
    }

    /// Load a document from a file. The document starts clean.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not UTF-8.
    pub fn open(path: &Path) -> io::Result<Self> {
        let text = fs::read_to_string(path)?;
        let mut doc = Self::from_text(&text);
        doc.path = Some(path.to_path_buf());
        Ok(doc)
    }

    // -- Metadata -----------------------------------------------------------

    /// The backing file path, if any. `None` means untitled.
    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Attach a file path (the save-as flow).
    pub fn set_path(&mut self, path: PathBuf) {
        self.path = Some(path);
    }

    /// True when the document has unsaved mutations.
    #[inline]
    #[must_use]
    pub const fn dirty(&self) -> bool {
        self.dirty
    }

    /// Lower the dirty flag after a successful save.
    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    // -- Row access ---------------------------------------------------------

    /// Number of rows.
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the document has no rows at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The row at `index`, or `None` past the end.
    #[inline]
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Char length of the row at `index`; 0 past the end (the valid
    /// one-past-end cursor line has no text).
    #[inline]
    #[must_use]
    pub fn row_len(&self, index: usize) -> usize {
        self.rows.get(index).map_or(0, Row::len)
    }

    // -- Structural edits ---------------------------------------------------

    /// Insert a row at `at` (clamped to `[0, row_count]`), shifting
    /// subsequent rows down.
    pub fn insert_row(&mut self, at: usize, text: &str) {
        let at = at.min(self.rows.len());
        self.rows.insert(at, Row::new(text));
        self.dirty = true;
    }

    /// Remove the row at `at`, shifting subsequent rows up. No-op if
    /// out of range.
    pub fn delete_row(&mut self, at: usize) {
        if at < self.rows.len() {
            self.rows.remove(at);
            self.dirty = true;
        }
    }

    /// Insert `ch` at `(row, col)`, `col` clamped to the row length.
    ///
    /// Typing on the one-past-end line extends the document: an empty
    /// row is appended first.
    pub fn insert_char(&mut self, row: usize, col: usize, ch: char) {
        debug_assert!(row <= self.rows.len(), "cursor row out of range");
        if row == self.rows.len() {
            self.rows.push(Row::new(""));
        }
        self.rows[row].insert_char(col, ch);
        self.dirty = true;
    }

    /// Delete the character left of `(row, col)`.
    ///
    /// Returns the repositioned cursor, or `None` when nothing was
    /// deleted: `row` past the last row, or `(0, 0)` — the document
    /// start is a hard boundary.
    ///
    /// At `col == 0` on any later row the entire row is appended to the
    /// previous row and removed (a join across the line boundary); the
    /// returned cursor sits at the former join point — the previous
    /// row's pre-join length.
    pub fn delete_char(&mut self, row: usize, col: usize) -> Option<Position> {
        if row >= self.rows.len() {
            return None;
        }
        if col == 0 && row == 0 {
            return None;
        }

        let new_pos = if col > 0 {
            self.rows[row].delete_char(col - 1);
            Position::new(row, col - 1)
        } else {
            let joined = self.rows.remove(row);
            let prev = &mut self.rows[row - 1];
            let join_col = prev.len();
            prev.append_str(joined.chars());
            Position::new(row - 1, join_col)
        };
        self.dirty = true;
        Some(new_pos)
    }

    /// Split the row at `(row, col)`: the text from `col` onward
    /// becomes a new row inserted immediately after; the original row
    /// is truncated to `col`.
    ///
    /// On the one-past-end line this appends a fresh empty row, so
    /// pressing Enter below the last line behaves like everywhere else.
    pub fn split_row(&mut self, row: usize, col: usize) {
        debug_assert!(row <= self.rows.len(), "cursor row out of range");
        if row == self.rows.len() {
            self.rows.push(Row::new(""));
        } else {
            let tail = self.rows[row].split_off(col);
            self.rows.insert(row + 1, tail);
        }
        self.dirty = true;
    }

    /// Append `text` to the end of an existing row. No-op past the end.
    pub fn append_str(&mut self, row: usize, text: &str) {
        if let Some(r) = self.rows.get_mut(row) {
            r.append_str(text);
            self.dirty = true;
        }
    }

    // -- Serialization ------------------------------------------------------

    /// Serialize all rows for save: every row, including the last, is
    /// followed by the platform line terminator.
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut text = String::new();
        for row in &self.rows {
            text.push_str(row.chars());
            text.push_str(LINE_ENDING);
        }
        text
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Viewport — the visible window into the document.
//!
//! A `Viewport` holds the scroll offsets and the size of the text area
//! (the screen minus status bar and message line). After every cursor
//! move, [`scroll_to`](Viewport::scroll_to) first derives the cursor's
//! render column, then adjusts the offsets minimally in the direction
//! of travel so the render cursor sits inside
//! `[row_off, row_off + rows) × [col_off, col_off + cols)`.
//!
//! The vertical offset never overscrolls past document bounds under
//! normal movement; the horizontal axis has no inherent bound since
//! lines are unbounded in length. Search exploits the vertical rule by
//! setting `row_off` to a past-the-end sentinel, forcing the next
//! scroll pass to pull the match row to the top of the window.

use crate::cursor::Cursor;
use crate::document::Document;

/// Scroll state plus the text-area geometry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// First visible document row.
    pub row_off: usize,
    /// First visible render column.
    pub col_off: usize,
    /// Text-area height in rows.
    pub rows: usize,
    /// Text-area width in columns.
    pub cols: usize,
}

impl Viewport {
    /// Create a viewport of the given text-area size, scrolled to the
    /// top-left.
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            row_off: 0,
            col_off: 0,
            rows,
            cols,
        }
    }

    /// Recompute the cursor's render column and pull the offsets so the
    /// cursor is visible. Expands the window minimally: scrolling up or
    /// left snaps the offset to the cursor, scrolling down or right
    /// places the cursor on the last visible row/column.
    pub fn scroll_to(&mut self, cursor: &mut Cursor, doc: &Document) {
        cursor.rx = doc
            .row(cursor.y)
            .map_or(cursor.x, |row| row.cx_to_rx(cursor.x));

        if cursor.y < self.row_off {
            self.row_off = cursor.y;
        }
        // A zero-size text area (terminal of height ≤ 2) has no lower
        // edge to chase; the offset must still never pass the cursor.
        if self.rows > 0 && cursor.y >= self.row_off + self.rows {
            self.row_off = cursor.y + 1 - self.rows;
        }
        if cursor.rx < self.col_off {
            self.col_off = cursor.rx;
        }
        if self.cols > 0 && cursor.rx >= self.col_off + self.cols {
            self.col_off = cursor.rx + 1 - self.cols;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc_of_lines(n: usize) -> Document {
        let text: String = (0..n).map(|i| format!("line {i}\n")).collect();
        Document::from_text(&text)
    }

    #[test]
    fn cursor_inside_window_leaves_offsets_alone() {
        let doc = doc_of_lines(50);
        let mut view = Viewport::new(10, 80);
        view.row_off = 5;
        let mut cursor = Cursor { x: 0, y: 8, rx: 0 };
        view.scroll_to(&mut cursor, &doc);
        assert_eq!(view.row_off, 5);
        assert_eq!(view.col_off, 0);
    }

    #[test]
    fn scrolling_up_snaps_offset_to_cursor() {
        let doc = doc_of_lines(50);
        let mut view = Viewport::new(10, 80);
        view.row_off = 20;
        let mut cursor = Cursor { x: 0, y: 12, rx: 0 };
        view.scroll_to(&mut cursor, &doc);
        assert_eq!(view.row_off, 12);
    }

    #[test]
    fn scrolling_down_keeps_cursor_on_last_row() {
        let doc = doc_of_lines(50);
        let mut view = Viewport::new(10, 80);
        let mut cursor = Cursor { x: 0, y: 25, rx: 0 };
        view.scroll_to(&mut cursor, &doc);
        // Row 25 is the last visible row: offset 16 shows rows 16..26.
        assert_eq!(view.row_off, 16);
    }

    #[test]
    fn horizontal_scroll_tracks_render_column() {
        let doc = Document::from_text(&format!("{}\n", "x".repeat(200)));
        let mut view = Viewport::new(10, 80);
        let mut cursor = Cursor { x: 120, y: 0, rx: 0 };
        view.scroll_to(&mut cursor, &doc);
        assert_eq!(cursor.rx, 120);
        // Column 120 is the last visible column: offset 41 shows 41..121.
        assert_eq!(view.col_off, 41);

        cursor.x = 30;
        view.scroll_to(&mut cursor, &doc);
        assert_eq!(view.col_off, 30);
    }

    #[test]
    fn rx_derives_from_tab_expansion() {
        let doc = Document::from_text("\tabc\n");
        let mut view = Viewport::new(10, 80);
        let mut cursor = Cursor { x: 1, y: 0, rx: 0 };
        view.scroll_to(&mut cursor, &doc);
        assert_eq!(cursor.rx, 4);
    }

    #[test]
    fn one_past_end_row_uses_char_column_as_rx() {
        let doc = doc_of_lines(3);
        let mut view = Viewport::new(10, 80);
        let mut cursor = Cursor { x: 0, y: 3, rx: 7 };
        view.scroll_to(&mut cursor, &doc);
        assert_eq!(cursor.rx, 0);
    }

    #[test]
    fn zero_size_window_keeps_offsets_at_or_before_cursor() {
        // A 2-row terminal leaves a 0×0 text area; the offsets must not
        // run past the cursor, or viewport-relative coordinates
        // underflow.
        let doc = doc_of_lines(10);
        let mut view = Viewport::new(0, 0);
        let mut cursor = Cursor { x: 3, y: 5, rx: 0 };
        view.scroll_to(&mut cursor, &doc);
        assert!(view.row_off <= cursor.y);
        assert!(view.col_off <= cursor.rx);
    }

    #[test]
    fn past_the_end_sentinel_pulls_cursor_row_to_top() {
        let doc = doc_of_lines(100);
        let mut view = Viewport::new(10, 80);
        // Search sets row_off past the end, then parks the cursor on
        // the match row.
        view.row_off = doc.row_count();
        let mut cursor = Cursor { x: 0, y: 42, rx: 0 };
        view.scroll_to(&mut cursor, &doc);
        assert_eq!(view.row_off, 42);
    }
}

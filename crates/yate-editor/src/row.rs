//! Row — one line of the open document.
//!
//! A `Row` holds two strings: `chars`, the raw text exactly as typed
//! (no embedded newline), and `render`, the derived display form with
//! every tab expanded to the next multiple-of-[`TAB_STOP`] column.
//! Every mutation recomputes `render` before returning, so readers can
//! always trust it — the two are never allowed to drift.
//!
//! # Coordinate systems
//!
//! Two column spaces coexist. The *char column* (`cx`) indexes into
//! `chars`; the *render column* (`rx`) indexes into `render`. They
//! differ only when tabs precede the position. [`cx_to_rx`](Row::cx_to_rx)
//! and [`rx_to_cx`](Row::rx_to_cx) convert between them.
//!
//! Every non-tab character occupies exactly one column — the editor's
//! unit model is single-column characters, by design.

/// Fixed tab stop: tabs expand to the next multiple of this column.
pub const TAB_STOP: usize = 4;

/// One line of text with its tab-expanded display form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    chars: String,
    render: String,
}

impl Row {
    /// Create a row from raw text. The text must not contain newlines.
    #[must_use]
    pub fn new(text: &str) -> Self {
        debug_assert!(!text.contains('\n'), "row text must not embed newlines");
        let mut row = Self {
            chars: text.to_string(),
            render: String::new(),
        };
        row.update_render();
        row
    }

    /// The raw text.
    #[inline]
    #[must_use]
    pub fn chars(&self) -> &str {
        &self.chars
    }

    /// The rendered text — tabs expanded, one column per char.
    #[inline]
    #[must_use]
    pub fn render(&self) -> &str {
        &self.render
    }

    /// Length of the raw text in chars.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.chars().count()
    }

    /// True when the row holds no text.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Length of the rendered text in columns. Always ≥ [`len`](Self::len).
    #[inline]
    #[must_use]
    pub fn render_len(&self) -> usize {
        self.render.chars().count()
    }

    // -- Mutation -----------------------------------------------------------

    /// Insert `ch` at char column `col`, clamped to the row length.
    pub fn insert_char(&mut self, col: usize, ch: char) {
        let idx = self.byte_index(col.min(self.len()));
        self.chars.insert(idx, ch);
        self.update_render();
    }

    /// Delete the char at column `col`. No-op if `col` is out of range.
    pub fn delete_char(&mut self, col: usize) {
        if col >= self.len() {
            return;
        }
        let idx = self.byte_index(col);
        self.chars.remove(idx);
        self.update_render();
    }

    /// Append `text` to the end of the row. Used by the line join.
    pub fn append_str(&mut self, text: &str) {
        self.chars.push_str(text);
        self.update_render();
    }

    /// Split the row at char column `col`: the tail from `col` onward
    /// is returned as a new row, this row is truncated to `col`.
    #[must_use]
    pub fn split_off(&mut self, col: usize) -> Self {
        let idx = self.byte_index(col.min(self.len()));
        let tail = self.chars.split_off(idx);
        self.update_render();
        Self::new(&tail)
    }

    // -- Column mapping -----------------------------------------------------

    /// Map a char column to its render column.
    ///
    /// Walks the chars before `cx`, expanding each tab to the next
    /// multiple of [`TAB_STOP`] and counting every other char as one
    /// column.
    #[must_use]
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        let mut rx = 0;
        for ch in self.chars.chars().take(cx) {
            if ch == '\t' {
                rx += (TAB_STOP - 1) - (rx % TAB_STOP);
            }
            rx += 1;
        }
        rx
    }

    /// Map a render column back to a char column.
    ///
    /// Scans left to right accumulating expanded width and returns the
    /// first char index whose expanded span would pass `rx`. When `rx`
    /// falls inside a tab's expansion this lands on the tab itself — an
    /// approximation, and the only sensible one. An `rx` past the end
    /// of the row maps to the row length.
    #[must_use]
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        let mut cur_rx = 0;
        for (cx, ch) in self.chars.chars().enumerate() {
            if ch == '\t' {
                cur_rx += (TAB_STOP - 1) - (cur_rx % TAB_STOP);
            }
            cur_rx += 1;
            if cur_rx > rx {
                return cx;
            }
        }
        self.len()
    }

    // -- Internal -----------------------------------------------------------

    /// Rebuild `render` from `chars`: tabs become runs of spaces out to
    /// the next tab stop, everything else copies through.
    fn update_render(&mut self) {
        self.render.clear();
        let mut col = 0;
        for ch in self.chars.chars() {
            if ch == '\t' {
                self.render.push(' ');
                col += 1;
                while col % TAB_STOP != 0 {
                    self.render.push(' ');
                    col += 1;
                }
            } else {
                self.render.push(ch);
                col += 1;
            }
        }
    }

    /// Byte index of char column `col`. `col` must be ≤ the row length.
    fn byte_index(&self, col: usize) -> usize {
        self.chars
            .char_indices()
            .nth(col)
            .map_or(self.chars.len(), |(idx, _)| idx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

// SPDX-License-Identifier: MIT
//
// yate — yet another text editor.
//
// This is the main binary that wires together the crates:
//
//   yate-term   → raw mode, key decoding, ANSI output, frame buffer
//   yate-editor → rows, document, cursor, viewport, search
//
// The Editor struct owns the session state. Each iteration of the
// session loop flows:
//
//   refresh (scroll → compose frame → one write) → read one key →
//   dispatch → document/cursor mutation → repeat
//
// Layout:
//
//   ┌──────────────────────────────┐
//   │ text area                    │  ← rows - 2
//   ├──────────────────────────────┤
//   │ status bar (INVERSE)         │  ← 1 row
//   ├──────────────────────────────┤
//   │ message line                 │  ← 1 row
//   └──────────────────────────────┘
//
// The prompt (save-as, search) is a re-entrant sub-loop: it borrows the
// same render pipeline and key stream, interpolating the typed text
// into the message line until Enter or Escape hands control back.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use std::time::{Duration, Instant};

use yate_editor::cursor::{Cursor, Direction};
use yate_editor::document::Document;
use yate_editor::search;
use yate_editor::view::Viewport;

use yate_term::ansi;
use yate_term::frame::Frame;
use yate_term::input::{KeyStream, TtyInput};
use yate_term::key::Key;
use yate_term::terminal::{RawMode, Size, window_size};

// ─── Constants ──────────────────────────────────────────────────────────────

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Consecutive Ctrl-Q presses required to discard unsaved changes.
const QUIT_CONFIRMATIONS: u32 = 3;

/// How long a status message stays visible.
const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Status-bar filename truncation width, in columns.
const STATUS_NAME_WIDTH: usize = 20;

// ─── Session state ──────────────────────────────────────────────────────────

/// What the session loop should do after a keypress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// A transient message for the bottom line, stamped for expiry.
struct StatusMessage {
    text: String,
    time: Instant,
}

/// The editing session: document, cursor, viewport, and the key
/// dispatch state (dirty tracking lives on the document, quit
/// confirmation here).
struct Editor {
    doc: Document,
    cursor: Cursor,
    view: Viewport,
    frame: Frame,
    message: Option<StatusMessage>,
    /// Remaining Ctrl-Q presses before a dirty document is discarded.
    /// Re-armed to [`QUIT_CONFIRMATIONS`] by any non-quit key.
    quit_confirms: u32,
}

impl Editor {
    /// Create a session over `doc` for a terminal of `size`. The bottom
    /// two screen rows are reserved for the status bar and the message
    /// line.
    fn new(doc: Document, size: Size) -> Self {
        Self {
            doc,
            cursor: Cursor::new(),
            view: Viewport::new(
                usize::from(size.rows).saturating_sub(2),
                usize::from(size.cols),
            ),
            frame: Frame::new(),
            message: None,
            quit_confirms: QUIT_CONFIRMATIONS,
        }
    }

    /// Show a transient message on the bottom line.
    fn set_message(&mut self, text: impl Into<String>) {
        self.message = Some(StatusMessage {
            text: text.into(),
            time: Instant::now(),
        });
    }

    /// Clear the bottom line immediately.
    fn clear_message(&mut self) {
        self.message = None;
    }

    // ─── Render pipeline ────────────────────────────────────────────────────

    /// Repaint the screen: scroll the viewport to the cursor, compose
    /// the whole frame in memory, then issue exactly one write.
    ///
    /// Pure with respect to editing state — only the scroll offsets and
    /// the derived render column change.
    #[allow(clippy::cast_possible_truncation)]
    fn refresh(&mut self, out: &mut impl Write) -> io::Result<()> {
        self.view.scroll_to(&mut self.cursor, &self.doc);

        self.frame.clear();
        ansi::cursor_hide(&mut self.frame)?;
        ansi::cursor_home(&mut self.frame)?;

        self.draw_rows()?;
        self.draw_status_bar()?;
        self.draw_message_bar()?;

        // Viewport-relative; cursor_to converts to the terminal's
        // 1-indexed coordinates.
        let x = (self.cursor.rx - self.view.col_off) as u16;
        let y = (self.cursor.y - self.view.row_off) as u16;
        ansi::cursor_to(&mut self.frame, x, y)?;
        ansi::cursor_show(&mut self.frame)?;

        self.frame.flush_to(out)
    }

    /// One line per viewport row: a slice of the rendered document row,
    /// a `~` filler past end-of-document, or the welcome banner.
    fn draw_rows(&mut self) -> io::Result<()> {
        for y in 0..self.view.rows {
            let file_row = y + self.view.row_off;
            if let Some(row) = self.doc.row(file_row) {
                let visible: String = row
                    .render()
                    .chars()
                    .skip(self.view.col_off)
                    .take(self.view.cols)
                    .collect();
                self.frame.push_str(&visible);
            } else if self.doc.is_empty() && !self.doc.dirty() && y == self.view.rows / 3 {
                self.draw_welcome();
            } else {
                self.frame.push_str("~");
            }
            ansi::erase_line_right(&mut self.frame)?;
            self.frame.push_str("\r\n");
        }
        Ok(())
    }

    /// Centered banner, shown only for a fresh, untouched document.
    fn draw_welcome(&mut self) {
        let welcome = format!("Yate editor -- version {VERSION}");
        let text: String = welcome.chars().take(self.view.cols).collect();
        let padding = self.view.cols.saturating_sub(text.chars().count()) / 2;
        if padding > 0 {
            self.frame.push_str("~");
            for _ in 1..padding {
                self.frame.push_str(" ");
            }
        }
        self.frame.push_str(&text);
    }

    /// Inverse-video status bar: truncated filename, line count, and
    /// dirty marker on the left; current-line/total right-aligned.
    fn draw_status_bar(&mut self) -> io::Result<()> {
        ansi::inverse(&mut self.frame)?;

        let name = self.doc.path().and_then(|p| p.file_name()).map_or_else(
            || "[No Name]".to_string(),
            |n| n.to_string_lossy().into_owned(),
        );
        let name: String = name.chars().take(STATUS_NAME_WIDTH).collect();
        let modified = if self.doc.dirty() { " (modified)" } else { "" };
        let left = format!("{name} - {} lines{modified}", self.doc.row_count());
        let right = format!("{}/{}", self.cursor.y + 1, self.doc.row_count());

        let left: String = left.chars().take(self.view.cols).collect();
        let mut len = left.chars().count();
        self.frame.push_str(&left);

        let right_len = right.chars().count();
        while len < self.view.cols {
            if self.view.cols - len == right_len {
                self.frame.push_str(&right);
                break;
            }
            self.frame.push_str(" ");
            len += 1;
        }

        ansi::reset(&mut self.frame)?;
        self.frame.push_str("\r\n");
        Ok(())
    }

    /// Message line: the status message while it is younger than its
    /// expiry window, otherwise blank.
    fn draw_message_bar(&mut self) -> io::Result<()> {
        ansi::erase_line_right(&mut self.frame)?;
        if let Some(msg) = &self.message {
            if msg.time.elapsed() < MESSAGE_TIMEOUT {
                let text: String = msg.text.chars().take(self.view.cols).collect();
                self.frame.push_str(&text);
            }
        }
        Ok(())
    }

    // ─── Editing operations ─────────────────────────────────────────────────

    /// Insert a printable character at the cursor and advance.
    fn insert_char(&mut self, ch: char) {
        self.doc.insert_char(self.cursor.y, self.cursor.x, ch);
        self.cursor.x += 1;
    }

    /// Enter: split the current row at the cursor (an insert of an
    /// empty row above when the cursor is at column 0).
    fn insert_newline(&mut self) {
        if self.cursor.x == 0 {
            self.doc.insert_row(self.cursor.y, "");
        } else {
            self.doc.split_row(self.cursor.y, self.cursor.x);
        }
        self.cursor.y += 1;
        self.cursor.x = 0;
    }

    /// Backspace: delete left of the cursor, joining lines at column 0.
    fn delete_backward(&mut self) {
        if let Some(pos) = self.doc.delete_char(self.cursor.y, self.cursor.x) {
            self.cursor.y = pos.row;
            self.cursor.x = pos.col;
        }
    }

    /// Delete: remove the character under the cursor. At end-of-row the
    /// next row joins up; at the very end of the document, a no-op.
    fn delete_forward(&mut self) {
        if self.cursor.x < self.doc.row_len(self.cursor.y) {
            self.doc.delete_char(self.cursor.y, self.cursor.x + 1);
        } else if self.cursor.y + 1 < self.doc.row_count() {
            self.doc.delete_char(self.cursor.y + 1, 0);
        }
    }

    /// PageUp/PageDown: snap to the viewport edge, then move a full
    /// screen of rows with the ordinary clamping step.
    fn page(&mut self, dir: Direction) {
        self.cursor.y = match dir {
            Direction::Up => self.view.row_off,
            _ => (self.view.row_off + self.view.rows.saturating_sub(1)).min(self.doc.row_count()),
        };
        self.cursor.x = self.cursor.x.min(self.doc.row_len(self.cursor.y));
        for _ in 0..self.view.rows {
            self.cursor.step(&self.doc, dir);
        }
    }

    // ─── Prompt / search / save ─────────────────────────────────────────────

    /// Blocking single-line input on the message line.
    ///
    /// `template` carries a `{}` placeholder for the live-typed text.
    /// Enter returns the accumulator when non-empty (an empty Enter is
    /// ignored, not a cancel); Escape cancels with `None`; Backspace,
    /// Delete, and Ctrl-H pop the last character; any other non-control
    /// character appends.
    fn prompt(
        &mut self,
        out: &mut impl Write,
        keys: &mut impl KeyStream,
        template: &str,
    ) -> io::Result<Option<String>> {
        let mut input = String::new();
        loop {
            self.set_message(template.replace("{}", &input));
            self.refresh(out)?;

            match keys.read_key()? {
                Key::Enter => {
                    if !input.is_empty() {
                        self.clear_message();
                        return Ok(Some(input));
                    }
                }
                Key::Escape => {
                    self.clear_message();
                    return Ok(None);
                }
                Key::Backspace | Key::Delete | Key::Ctrl('h') => {
                    input.pop();
                }
                Key::Char(ch) if !ch.is_control() => input.push(ch),
                _ => {}
            }
        }
    }

    /// Ctrl-F: prompt for a query and jump to the first match.
    ///
    /// On a hit the row offset is parked past the end of the document
    /// so the next scroll pass pulls the match row to the top of the
    /// viewport — leading, not merely visible. No match, or a cancelled
    /// prompt, leaves cursor and viewport unchanged.
    fn find(&mut self, out: &mut impl Write, keys: &mut impl KeyStream) -> io::Result<()> {
        let Some(query) = self.prompt(out, keys, "Search: {} (ESC to cancel)")? else {
            return Ok(());
        };

        match search::find_forward(&self.doc, &query) {
            Some(pos) => {
                self.cursor.y = pos.row;
                self.cursor.x = pos.col;
                self.view.row_off = self.doc.row_count();
            }
            None => self.set_message(format!("No match found for '{query}'")),
        }
        Ok(())
    }

    /// Ctrl-S: serialize and write the document.
    ///
    /// An untitled document prompts for a filename first; cancelling
    /// aborts the save and leaves the dirty flag alone. Save I/O
    /// failures are recoverable: reported on the message line, session
    /// unaffected. `fs::write` is all-or-error, so a reported success
    /// is a complete file.
    fn save(&mut self, out: &mut impl Write, keys: &mut impl KeyStream) -> io::Result<()> {
        let path = match self.doc.path() {
            Some(p) => p.to_path_buf(),
            None => match self.prompt(out, keys, "Save as: {} (ESC to cancel)")? {
                Some(name) => {
                    let path = PathBuf::from(name);
                    self.doc.set_path(path.clone());
                    path
                }
                None => {
                    self.set_message("Save aborted");
                    return Ok(());
                }
            },
        };

        let text = self.doc.to_text();
        match fs::write(&path, &text) {
            Ok(()) => {
                self.doc.mark_clean();
                self.set_message(format!("{} bytes written to disk", text.len()));
            }
            Err(e) => self.set_message(format!("Can't save! I/O error: {e}")),
        }
        Ok(())
    }

    // ─── Key dispatch ───────────────────────────────────────────────────────

    /// Handle one logical key. Returns whether the session continues.
    fn process_key(
        &mut self,
        key: Key,
        out: &mut impl Write,
        keys: &mut impl KeyStream,
    ) -> io::Result<Flow> {
        // Quit confirmation counts consecutive presses only. Handled
        // first so every other branch falls through to the re-arm below.
        if key == Key::Ctrl('q') {
            if self.doc.dirty() {
                self.quit_confirms -= 1;
                if self.quit_confirms > 0 {
                    self.set_message(format!(
                        "WARNING! File has unsaved changes. \
                         Press Ctrl-Q {} more time{} to quit.",
                        self.quit_confirms,
                        if self.quit_confirms == 1 { "" } else { "s" }
                    ));
                    return Ok(Flow::Continue);
                }
            }
            return Ok(Flow::Quit);
        }

        match key {
            Key::Ctrl('s') => self.save(out, keys)?,
            Key::Ctrl('f') => self.find(out, keys)?,

            Key::Enter => self.insert_newline(),
            Key::Backspace => self.delete_backward(),
            Key::Delete => self.delete_forward(),

            Key::Up => self.cursor.step(&self.doc, Direction::Up),
            Key::Down => self.cursor.step(&self.doc, Direction::Down),
            Key::Left => self.cursor.step(&self.doc, Direction::Left),
            Key::Right => self.cursor.step(&self.doc, Direction::Right),

            Key::Home => self.cursor.line_home(),
            Key::End => self.cursor.line_end(&self.doc),
            Key::PageUp => self.page(Direction::Up),
            Key::PageDown => self.page(Direction::Down),

            // Ctrl-L (legacy refresh) and a bare Escape do nothing.
            Key::Ctrl('l') | Key::Escape => {}

            Key::Char(ch) if ch == '\t' || !ch.is_control() => self.insert_char(ch),

            // Unbound Ctrl chords and stray control characters.
            Key::Char(_) | Key::Ctrl(_) => {}
        }

        // Any non-quit key re-arms the confirmation counter.
        self.quit_confirms = QUIT_CONFIRMATIONS;
        Ok(Flow::Continue)
    }

    // ─── Session loop ───────────────────────────────────────────────────────

    /// The session loop: paint, block for one key, dispatch, repeat. On
    /// quit the screen is cleared so the shell prompt comes back on a
    /// clean display.
    fn run(&mut self, out: &mut impl Write, keys: &mut impl KeyStream) -> io::Result<()> {
        self.set_message("HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find");

        loop {
            self.refresh(out)?;
            let key = keys.read_key()?;
            if self.process_key(key, out, keys)? == Flow::Quit {
                break;
            }
        }

        ansi::clear_screen(out)?;
        ansi::cursor_home(out)?;
        out.flush()
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

/// Attach the failing operation's name to an OS error for the final
/// diagnostic.
fn op_err(op: &str, e: io::Error) -> io::Error {
    io::Error::new(e.kind(), format!("{op}: {e}"))
}

/// Run one editing session under raw mode.
///
/// The `RawMode` guard restores the terminal on every exit path out of
/// this function — ordinary quit and error propagation alike.
fn run_session(doc: Document) -> io::Result<()> {
    let mut raw = RawMode::enter().map_err(|e| op_err("enter raw mode", e))?;
    let size = window_size().map_err(|e| op_err("query window size", e))?;

    let mut editor = Editor::new(doc, size);
    let mut keys = TtyInput::new();
    let mut out = io::stdout().lock();

    let result = editor.run(&mut out, &mut keys);
    drop(out);

    // Restore eagerly so a restore failure is observable; Drop repeats
    // it best-effort if this path is skipped.
    raw.restore().map_err(|e| op_err("restore terminal", e))?;
    result
}

fn main() {
    let path = env::args_os().nth(1).map(PathBuf::from);

    let doc = match &path {
        Some(p) => Document::open(p).unwrap_or_else(|e| {
            eprintln!("yate: {}: {e}", p.display());
            process::exit(1);
        }),
        None => Document::new(),
    };

    if let Err(e) = run_session(doc) {
        eprintln!("yate: {e}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

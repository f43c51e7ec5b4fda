// SPDX-License-Identifier: MIT
//
// ANSI escape sequence generation.
//
// Pure functions that write escape sequences to any `impl Write`. No
// state, no decisions about when to emit — that's the render loop's job.
// This module just knows the byte-level encoding of every terminal
// command we need.
//
// All cursor positions are 0-indexed in our API and converted to
// 1-indexed for the terminal (ANSI standard uses 1-based coordinates).
//
// All functions return `io::Result` propagated from the underlying
// writer. In practice they never fail when writing to `Frame` (backed
// by a Vec).

use std::io::{self, Write};

// ─── Cursor ──────────────────────────────────────────────────────────────────

/// Move the cursor to `(x, y)` using the CUP (Cursor Position) sequence.
///
/// Our coordinates are 0-indexed; ANSI CUP is 1-indexed.
#[inline]
pub fn cursor_to(w: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
    write!(w, "\x1b[{};{}H", y + 1, x + 1)
}

/// Move the cursor to the top-left corner (CUP with default arguments).
#[inline]
pub fn cursor_home(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[H")
}

/// Hide the cursor (DECTCEM reset).
#[inline]
pub fn cursor_hide(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25l")
}

/// Show the cursor (DECTCEM set).
#[inline]
pub fn cursor_show(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[?25h")
}

// ─── Screen ──────────────────────────────────────────────────────────────────

/// Clear the entire screen (ED 2).
#[inline]
pub fn clear_screen(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[2J")
}

/// Erase from the cursor to the end of the current line (EL 0).
///
/// Emitted after every rendered row so each repaint clears stale text
/// without blanking the whole screen — the flicker-free alternative to
/// ED 2 per frame.
#[inline]
pub fn erase_line_right(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[K")
}

// ─── Text Attributes ─────────────────────────────────────────────────────────

/// Switch to inverse video (SGR 7). Used for the status bar.
#[inline]
pub fn inverse(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[7m")
}

/// Reset all SGR attributes to terminal defaults (SGR 0).
#[inline]
pub fn reset(w: &mut impl Write) -> io::Result<()> {
    w.write_all(b"\x1b[m")
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn capture(f: impl Fn(&mut Vec<u8>) -> io::Result<()>) -> Vec<u8> {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        buf
    }

    #[test]
    fn cursor_to_converts_to_one_indexed() {
        assert_eq!(capture(|w| cursor_to(w, 0, 0)), b"\x1b[1;1H");
        assert_eq!(capture(|w| cursor_to(w, 4, 9)), b"\x1b[10;5H");
    }

    #[test]
    fn cursor_home_is_bare_cup() {
        assert_eq!(capture(cursor_home), b"\x1b[H");
    }

    #[test]
    fn cursor_visibility() {
        assert_eq!(capture(cursor_hide), b"\x1b[?25l");
        assert_eq!(capture(cursor_show), b"\x1b[?25h");
    }

    #[test]
    fn screen_erase() {
        assert_eq!(capture(clear_screen), b"\x1b[2J");
        assert_eq!(capture(erase_line_right), b"\x1b[K");
    }

    #[test]
    fn attributes() {
        assert_eq!(capture(inverse), b"\x1b[7m");
        assert_eq!(capture(reset), b"\x1b[m");
    }
}

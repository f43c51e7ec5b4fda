// SPDX-License-Identifier: MIT
//
// yate-term — Terminal layer for yate.
//
// Direct terminal control for a keystroke-driven editor: raw termios
// mode with guaranteed restore, window-size queries, ANSI escape
// generation, a bounded-lookahead key decoder, and the append-only
// frame buffer that lets a whole repaint go out in one write.
//
// This crate intentionally avoids external TUI frameworks (ratatui,
// crossterm) in favor of direct terminal control via ANSI escape
// sequences and raw termios. Every byte sent to the terminal is
// accounted for.

pub mod ansi;
pub mod frame;
pub mod input;
pub mod key;
pub mod terminal;

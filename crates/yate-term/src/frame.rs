// SPDX-License-Identifier: MIT
//
// Frame buffering — one repaint, one write.
//
// Every refresh composes its full output (cursor control, row text,
// status bar, message line) into a `Frame` first. A single write at
// frame end puts it all on the wire at once; interleaving many small
// writes lets the terminal repaint mid-frame, which shows up as
// flicker and tearing.

use std::io::{self, Write};

/// A byte buffer that accumulates one frame of terminal output.
///
/// Implements [`Write`] so the `ansi` helpers and `write!` both target
/// it directly. Reused across frames: [`clear`](Self::clear) keeps the
/// allocation, [`flush_to`](Self::flush_to) writes and clears.
///
/// Default capacity: 4 KB — enough for a typical frame without
/// reallocation.
pub struct Frame {
    buf: Vec<u8>,
}

const DEFAULT_CAPACITY: usize = 4096;

impl Frame {
    /// Create an empty frame buffer with default capacity.
    #[must_use]
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(DEFAULT_CAPACITY),
        }
    }

    /// Number of bytes accumulated.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the frame is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// The accumulated bytes (for testing and debugging).
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Append a string slice.
    #[inline]
    pub fn push_str(&mut self, s: &str) {
        self.buf.extend_from_slice(s.as_bytes());
    }

    /// Clear the buffer for reuse (keeps allocated capacity).
    #[inline]
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Write the accumulated frame to `w` in a single call and clear
    /// the buffer.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `w` fails.
    pub fn flush_to(&mut self, w: &mut impl Write) -> io::Result<()> {
        if !self.buf.is_empty() {
            w.write_all(&self.buf)?;
            w.flush()?;
            self.buf.clear();
        }
        Ok(())
    }
}

impl Write for Frame {
    #[inline]
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Intentionally a no-op. Real flushing via flush_to().
        Ok(())
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

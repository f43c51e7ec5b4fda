// SPDX-License-Identifier: MIT
//
// Blocking key input over the non-blocking raw-mode read.
//
// Raw mode is entered with `VMIN=0`/`VTIME=1`, so a single `read()`
// returns within ~100 ms whether or not a byte arrived. `TtyInput`
// turns that primitive into a blocking `read_key()` by retrying until
// a lead byte shows up, then handing the same bounded read to the
// decoder for escape-sequence lookahead. One primitive, two uses — a
// true blocking read would hang the lookahead on a lone ESC.
//
// `KeyStream` is the seam between the session loop and the terminal:
// the editor and its modal prompt both consume keys through it, and
// tests substitute a scripted implementation.

use std::io;

use crate::key::{self, Key};

/// A blocking source of logical keys.
///
/// `read_key` returns exactly one key per call, blocking until one is
/// available. Implemented by [`TtyInput`] for the real terminal and by
/// scripted queues in tests.
pub trait KeyStream {
    /// Block until one logical key is available and return it.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying byte source fails.
    fn read_key(&mut self) -> io::Result<Key>;
}

/// Key input from the controlling terminal's stdin.
///
/// Requires raw mode to be active: relies on the `VMIN=0`/`VTIME=1`
/// poll semantics installed by `RawMode::enter`.
#[derive(Debug, Default)]
pub struct TtyInput;

impl TtyInput {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[cfg(unix)]
impl KeyStream for TtyInput {
    fn read_key(&mut self) -> io::Result<Key> {
        // Busy-poll for the lead byte; each attempt waits at most one
        // poll window inside the driver.
        let first = loop {
            if let Some(byte) = crate::terminal::read_byte_raw()? {
                break byte;
            }
        };

        // Lookahead reads fail open: a read error mid-sequence decodes
        // the same as a missing byte.
        Ok(key::decode(first, || {
            crate::terminal::read_byte_raw().unwrap_or(None)
        }))
    }
}

#[cfg(not(unix))]
impl KeyStream for TtyInput {
    fn read_key(&mut self) -> io::Result<Key> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "terminal input requires a unix terminal",
        ))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

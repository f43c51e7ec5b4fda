// SPDX-License-Identifier: MIT
//
// Terminal control — raw mode and window-size queries, with RAII cleanup.
//
// Safety: This module necessarily uses `unsafe` for termios (tcgetattr,
// tcsetattr), ioctl (TIOCGWINSZ), isatty, and raw fd reads/writes. These
// are the standard POSIX interfaces for terminal control — there is no
// safe alternative. Each unsafe block is minimal and documented.
#![allow(unsafe_code)]
//
// This module owns the terminal's raw state. `RawMode::enter` snapshots
// the current line discipline and switches to raw mode; the snapshot is
// reinstated on drop — even if the editor panics mid-frame.
//
// The panic hook bypasses Rust's stdout lock entirely, writing a
// pre-built restore sequence directly to fd 1. This prevents deadlock if
// the panic happened while holding the stdout lock (common during frame
// rendering). One raw write, termios restored, then the original panic
// handler prints its message to a working terminal.

use std::io::{self, Write};
#[cfg(unix)]
use std::sync::Mutex;
use std::sync::Once;

// ─── Size ───────────────────────────────────────────────────────────────────

/// Terminal dimensions in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    /// Number of rows (height in character cells).
    pub rows: u16,
    /// Number of columns (width in character cells).
    pub cols: u16,
}

impl Size {
    /// Total number of cells (`rows × cols`).
    #[inline]
    #[must_use]
    pub const fn area(self) -> u32 {
        self.rows as u32 * self.cols as u32
    }
}

/// Check whether stdin is connected to a terminal (TTY).
#[cfg(unix)]
#[must_use]
pub fn is_tty() -> bool {
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 }
}

#[cfg(not(unix))]
#[must_use]
pub fn is_tty() -> bool {
    false
}

// ─── Window Size ────────────────────────────────────────────────────────────

/// Query the terminal size via `ioctl(TIOCGWINSZ)`.
///
/// Returns `None` if stdout is not a terminal, the call fails, or the
/// driver reports a zero dimension.
#[cfg(unix)]
fn size_from_ioctl() -> Option<Size> {
    let mut ws: libc::winsize = unsafe { std::mem::zeroed() };
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &raw mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some(Size {
            rows: ws.ws_row,
            cols: ws.ws_col,
        })
    } else {
        None
    }
}

/// Query the terminal size by parking the cursor at the bottom-right
/// extreme and asking where it landed.
///
/// Fallback for terminals whose driver doesn't answer `TIOCGWINSZ`.
/// `ESC [999C ESC [999B` moves the cursor as far right and down as the
/// screen allows (both commands clamp at the edge), then a Device Status
/// Report query (`ESC [6n`) makes the terminal reply with
/// `ESC [ rows ; cols R` on stdin. Requires raw mode to be active so the
/// reply is readable byte-by-byte.
#[cfg(unix)]
fn size_from_cursor_report() -> io::Result<Size> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(b"\x1b[999C\x1b[999B\x1b[6n")?;
    stdout.flush()?;
    drop(stdout);

    // Read the reply up to the terminating 'R'. Bounded: a well-formed
    // report fits well within 32 bytes.
    let mut reply = [0u8; 32];
    let mut len = 0;
    while len < reply.len() {
        match read_byte_raw()? {
            Some(b'R') => break,
            Some(b) => {
                reply[len] = b;
                len += 1;
            }
            None => break,
        }
    }

    parse_cursor_report(&reply[..len])
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "malformed cursor report"))
}

/// Parse `ESC [ rows ; cols` (the terminating `R` already consumed).
fn parse_cursor_report(reply: &[u8]) -> Option<Size> {
    let body = reply.strip_prefix(b"\x1b[")?;
    let text = std::str::from_utf8(body).ok()?;
    let (rows, cols) = text.split_once(';')?;
    let rows: u16 = rows.parse().ok()?;
    let cols: u16 = cols.parse().ok()?;
    if rows == 0 || cols == 0 {
        return None;
    }
    Some(Size { rows, cols })
}

/// One non-blocking byte read from stdin under raw mode.
///
/// With `VMIN=0`/`VTIME=1` a read returns within ~100 ms; `Ok(None)`
/// means no byte arrived in that window.
#[cfg(unix)]
pub(crate) fn read_byte_raw() -> io::Result<Option<u8>> {
    let mut byte = 0u8;
    let n = unsafe { libc::read(libc::STDIN_FILENO, (&raw mut byte).cast(), 1) };
    match n {
        1 => Ok(Some(byte)),
        0 => Ok(None),
        _ => {
            let err = io::Error::last_os_error();
            // EAGAIN is the poll window expiring, not a failure.
            if err.kind() == io::ErrorKind::WouldBlock {
                Ok(None)
            } else {
                Err(err)
            }
        }
    }
}

/// Current terminal size.
///
/// Primary path is `ioctl(TIOCGWINSZ)`; if that is unavailable the
/// cursor-report fallback is tried. Both paths produce the same
/// `Size` contract.
///
/// # Errors
///
/// Returns an error when neither the ioctl nor the fallback can
/// determine the geometry.
#[cfg(unix)]
pub fn window_size() -> io::Result<Size> {
    if let Some(size) = size_from_ioctl() {
        return Ok(size);
    }
    size_from_cursor_report()
}

#[cfg(not(unix))]
pub fn window_size() -> io::Result<Size> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "window size query requires a unix terminal",
    ))
}

// ─── Panic-Safe Terminal Restore ────────────────────────────────────────────

/// Global backup of original termios for panic recovery.
///
/// The [`RawMode`] guard owns its own copy, but the panic hook can't
/// access it. This global backup — behind a [`Mutex`], not `static mut`
/// — lets the hook restore the line discipline without the guard.
#[cfg(unix)]
static TERMIOS_BACKUP: Mutex<Option<libc::termios>> = Mutex::new(None);

/// Restore termios from the global backup. Best-effort, ignores errors.
#[cfg(unix)]
fn restore_termios_from_backup() {
    if let Ok(guard) = TERMIOS_BACKUP.lock() {
        if let Some(ref original) = *guard {
            unsafe {
                let _ = libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, original);
            }
        }
    }
}

/// Screen-reset sequence for emergency use: clear the display, park the
/// cursor at home, make sure the cursor is visible again.
const EMERGENCY_RESTORE: &[u8] = b"\x1b[2J\x1b[H\x1b[?25h";

/// Panic hook guard — ensures the hook is installed at most once per process.
static PANIC_HOOK_INSTALLED: Once = Once::new();

/// Install a panic hook that restores the terminal before printing the error.
///
/// Without this, a panic in raw mode leaves the user's terminal broken:
/// no echo, no line editing, no way to read the error message. The hook
/// writes [`EMERGENCY_RESTORE`] directly to fd 1 (bypassing Rust's
/// stdout lock to avoid deadlock), restores termios, then delegates to
/// the original panic handler so the error prints to a working terminal.
fn install_panic_hook() {
    PANIC_HOOK_INSTALLED.call_once(|| {
        let original = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            emergency_restore();

            #[cfg(unix)]
            restore_termios_from_backup();

            original(info);
        }));
    });
}

/// Write the screen-reset sequence directly to stdout's file descriptor.
fn emergency_restore() {
    #[cfg(unix)]
    unsafe {
        let _ = libc::write(
            libc::STDOUT_FILENO,
            EMERGENCY_RESTORE.as_ptr().cast::<libc::c_void>(),
            EMERGENCY_RESTORE.len(),
        );
    }

    #[cfg(not(unix))]
    {
        let _ = io::stdout().write_all(EMERGENCY_RESTORE);
        let _ = io::stdout().flush();
    }
}

// ─── RawMode ────────────────────────────────────────────────────────────────

/// Raw-mode guard with RAII cleanup.
///
/// [`enter`](Self::enter) snapshots the terminal's line discipline and
/// switches to raw mode: input delivered byte-by-byte without echo,
/// signal and flow-control chords passed through as plain bytes, output
/// post-processing off, and `VMIN=0`/`VTIME=1` so a read with no data
/// returns within one tenth of a second instead of blocking. The
/// snapshot is reinstated when the guard is dropped — even on panic.
///
/// # Example
///
/// ```no_run
/// use yate_term::terminal::RawMode;
///
/// let _raw = RawMode::enter()?;
/// // ... decode keys, paint frames ...
/// // Terminal is restored automatically on drop.
/// # Ok::<(), std::io::Error>(())
/// ```
pub struct RawMode {
    /// Original termios saved before entering raw mode. `None` when
    /// stdin is not a TTY (tests, pipes) — nothing to restore then.
    #[cfg(unix)]
    original: Option<libc::termios>,
}

impl RawMode {
    /// Switch the terminal to raw mode.
    ///
    /// A no-op (but still a valid guard) when stdin is not a TTY, so the
    /// editor can run under pipes and in tests without failing setup.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal attributes cannot be read or
    /// written.
    #[cfg(unix)]
    pub fn enter() -> io::Result<Self> {
        if !is_tty() {
            return Ok(Self { original: None });
        }

        install_panic_hook();

        unsafe {
            let mut termios: libc::termios = std::mem::zeroed();
            if libc::tcgetattr(libc::STDIN_FILENO, &raw mut termios) != 0 {
                return Err(io::Error::last_os_error());
            }

            let original = termios;

            // Also save to the global backup for the panic hook.
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = Some(original);
            }

            // No break-signal, no parity check, no 8th-bit strip, no
            // CR→NL translation, no XON/XOFF.
            termios.c_iflag &=
                !(libc::BRKINT | libc::INPCK | libc::ISTRIP | libc::ICRNL | libc::IXON);
            // No output post-processing ("\n" → "\r\n").
            termios.c_oflag &= !libc::OPOST;
            // 8-bit characters.
            termios.c_cflag |= libc::CS8;
            // No echo, no canonical line buffering, no SIGINT/SIGTSTP,
            // no literal-next (Ctrl-V).
            termios.c_lflag &= !(libc::ECHO | libc::ICANON | libc::ISIG | libc::IEXTEN);

            // VMIN=0, VTIME=1: read() returns after at most 100 ms even
            // with no input. The key reader retries; the escape decoder
            // and the window-size fallback rely on the bounded wait.
            termios.c_cc[libc::VMIN] = 0;
            termios.c_cc[libc::VTIME] = 1;

            if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const termios) != 0 {
                return Err(io::Error::last_os_error());
            }

            Ok(Self {
                original: Some(original),
            })
        }
    }

    #[cfg(not(unix))]
    pub fn enter() -> io::Result<Self> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "raw mode requires a unix terminal",
        ))
    }

    /// Reinstate the captured line discipline.
    ///
    /// Idempotent: after the first successful restore the guard holds
    /// nothing and further calls are no-ops. Drop calls this; exposing
    /// it lets callers restore eagerly and observe the error.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal attributes cannot be written.
    #[cfg(unix)]
    pub fn restore(&mut self) -> io::Result<()> {
        if let Some(original) = self.original.take() {
            unsafe {
                if libc::tcsetattr(libc::STDIN_FILENO, libc::TCSAFLUSH, &raw const original) != 0 {
                    return Err(io::Error::last_os_error());
                }
            }

            // Clear the global backup — we've restored successfully.
            if let Ok(mut guard) = TERMIOS_BACKUP.lock() {
                *guard = None;
            }
        }
        Ok(())
    }

    #[cfg(not(unix))]
    pub fn restore(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = self.restore();
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // ── Size ──────────────────────────────────────────────────────────

    #[test]
    fn size_area() {
        assert_eq!(Size { rows: 24, cols: 80 }.area(), 1920);
    }

    #[test]
    fn size_area_zero_dimension() {
        assert_eq!(Size { rows: 0, cols: 80 }.area(), 0);
        assert_eq!(Size { rows: 24, cols: 0 }.area(), 0);
    }

    #[test]
    fn size_is_copy() {
        let a = Size { rows: 24, cols: 80 };
        let b = a;
        assert_eq!(a, b);
    }

    // ── Cursor report parsing ────────────────────────────────────────

    #[test]
    fn parse_cursor_report_basic() {
        assert_eq!(
            parse_cursor_report(b"\x1b[24;80"),
            Some(Size { rows: 24, cols: 80 })
        );
    }

    #[test]
    fn parse_cursor_report_large() {
        assert_eq!(
            parse_cursor_report(b"\x1b[210;543"),
            Some(Size {
                rows: 210,
                cols: 543
            })
        );
    }

    #[test]
    fn parse_cursor_report_rejects_missing_escape() {
        assert_eq!(parse_cursor_report(b"24;80"), None);
    }

    #[test]
    fn parse_cursor_report_rejects_missing_semicolon() {
        assert_eq!(parse_cursor_report(b"\x1b[2480"), None);
    }

    #[test]
    fn parse_cursor_report_rejects_non_numeric() {
        assert_eq!(parse_cursor_report(b"\x1b[24;x"), None);
    }

    #[test]
    fn parse_cursor_report_rejects_zero_dimension() {
        assert_eq!(parse_cursor_report(b"\x1b[0;80"), None);
        assert_eq!(parse_cursor_report(b"\x1b[24;0"), None);
    }

    #[test]
    fn parse_cursor_report_rejects_empty() {
        assert_eq!(parse_cursor_report(b""), None);
    }

    // ── Emergency restore sequence ──────────────────────────────────

    #[test]
    fn emergency_restore_is_valid_utf8() {
        std::str::from_utf8(EMERGENCY_RESTORE).unwrap();
    }

    #[test]
    fn emergency_restore_clears_and_shows_cursor() {
        let s = std::str::from_utf8(EMERGENCY_RESTORE).unwrap();
        assert!(s.contains("\x1b[2J"), "must clear the screen");
        assert!(s.contains("\x1b[H"), "must home the cursor");
        assert!(s.ends_with("\x1b[?25h"), "must show the cursor last");
    }

    // ── Queries ─────────────────────────────────────────────────────

    #[test]
    fn is_tty_does_not_panic() {
        let _ = is_tty();
    }
}

// SPDX-License-Identifier: MIT
//
// Key decoding — raw bytes in, logical keys out.
//
// The decoder is a small state machine keyed by the accumulated escape
// prefix, deliberately isolated from terminal I/O: it pulls follow-up
// bytes through a caller-supplied closure, so tests drive it from byte
// slices and the TTY reader drives it from the non-blocking read.
//
// Two contracts shape everything here:
//
// - Bounded lookahead. After a lead ESC at most four further bytes are
//   pulled to disambiguate CSI (`ESC [`) and SS3 (`ESC O`) forms,
//   including the one- and two-digit numeric forms terminated by `~`.
//   Never unbounded.
// - Fail open. If any expected byte is missing or unrecognized, the
//   sequence decodes as a plain `Escape` keypress. A partial or
//   ambiguous sequence is never fatal and never blocks.

/// A logical key event.
///
/// Several wire sequences alias to the same logical key: Home arrives
/// as `ESC [1~`, `ESC [7~`, `ESC [H`, or `ESC OH` depending on the
/// terminal; End likewise. Backspace is both DEL (127) and Ctrl-H (8).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// A printable character (including `'\t'`).
    Char(char),
    /// A Ctrl chord: byte values 0–31 outside the named keys, reported
    /// with the letter the chord was struck on (`Ctrl('q')` for 17).
    Ctrl(char),
    Enter,
    Backspace,
    Escape,
    Delete,
    // ── Navigation ──────────────────────────────────────────────
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

/// Decode one logical key from a lead byte plus bounded lookahead.
///
/// `next` yields the following byte when one is available within the
/// poll window, `None` otherwise. It is called at most four times for
/// escape sequences and at most three times for UTF-8 continuations.
pub fn decode(first: u8, mut next: impl FnMut() -> Option<u8>) -> Key {
    match first {
        0x1b => decode_escape(&mut next),
        b'\r' => Key::Enter,
        // DEL and Ctrl-H both normalize to Backspace.
        0x7f | 0x08 => Key::Backspace,
        // Tab is a control byte but a first-class document character.
        b'\t' => Key::Char('\t'),
        // Remaining control bytes are Ctrl chords; flipping bit 6
        // recovers the key the chord was struck on.
        0..=0x1f => Key::Ctrl(((first ^ 0x40).to_ascii_lowercase()) as char),
        0x20..=0x7e => Key::Char(first as char),
        _ => decode_utf8(first, &mut next),
    }
}

/// Decode the tail of an escape sequence. The lead ESC is consumed.
fn decode_escape(next: &mut impl FnMut() -> Option<u8>) -> Key {
    let Some(b1) = next() else {
        // Lone ESC — the user pressed the Escape key.
        return Key::Escape;
    };

    match b1 {
        // CSI form: ESC [ ...
        b'[' => {
            let Some(b2) = next() else {
                return Key::Escape;
            };
            match b2 {
                b'A' => Key::Up,
                b'B' => Key::Down,
                b'C' => Key::Right,
                b'D' => Key::Left,
                b'H' => Key::Home,
                b'F' => Key::End,
                // Numeric intermediate byte, terminated by '~'.
                b'0'..=b'9' => match next() {
                    Some(b'~') => match b2 {
                        b'1' | b'7' => Key::Home,
                        b'3' => Key::Delete,
                        b'4' | b'8' => Key::End,
                        b'5' => Key::PageUp,
                        b'6' => Key::PageDown,
                        _ => Key::Escape,
                    },
                    // Two-digit form (`ESC [15~`, function keys): not a
                    // key we bind, but the terminator must be pulled
                    // too or it replays as a literal '~'.
                    Some(b'0'..=b'9') => {
                        next();
                        Key::Escape
                    }
                    _ => Key::Escape,
                },
                _ => Key::Escape,
            }
        }
        // SS3 form: ESC O ...
        b'O' => match next() {
            Some(b'H') => Key::Home,
            Some(b'F') => Key::End,
            _ => Key::Escape,
        },
        _ => Key::Escape,
    }
}

/// Assemble a multi-byte UTF-8 character. The lead byte is consumed.
///
/// Pulls the exact number of continuation bytes the lead byte promises
/// (bounded at three). Malformed input fails open to the replacement
/// character rather than desynchronizing the stream.
fn decode_utf8(first: u8, next: &mut impl FnMut() -> Option<u8>) -> Key {
    let len = match first {
        0xc0..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf7 => 4,
        // Stray continuation or invalid lead byte.
        _ => return Key::Char(char::REPLACEMENT_CHARACTER),
    };

    let mut bytes = [first, 0, 0, 0];
    for slot in bytes.iter_mut().take(len).skip(1) {
        match next() {
            Some(b @ 0x80..=0xbf) => *slot = b,
            _ => return Key::Char(char::REPLACEMENT_CHARACTER),
        }
    }

    match std::str::from_utf8(&bytes[..len]) {
        Ok(s) => s
            .chars()
            .next()
            .map_or(Key::Char(char::REPLACEMENT_CHARACTER), Key::Char),
        Err(_) => Key::Char(char::REPLACEMENT_CHARACTER),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Decode one key from a byte script; trailing bytes stay unread.
    fn decode_bytes(bytes: &[u8]) -> Key {
        let mut iter = bytes.iter().copied();
        let first = iter.next().expect("script must not be empty");
        decode(first, || iter.next())
    }

    // ── Plain characters ────────────────────────────────────────────

    #[test]
    fn printable_ascii() {
        assert_eq!(decode_bytes(b"a"), Key::Char('a'));
        assert_eq!(decode_bytes(b"Z"), Key::Char('Z'));
        assert_eq!(decode_bytes(b" "), Key::Char(' '));
        assert_eq!(decode_bytes(b"~"), Key::Char('~'));
    }

    #[test]
    fn tab_is_a_character() {
        assert_eq!(decode_bytes(b"\t"), Key::Char('\t'));
    }

    #[test]
    fn enter_is_carriage_return() {
        assert_eq!(decode_bytes(b"\r"), Key::Enter);
    }

    // ── Ctrl chords ─────────────────────────────────────────────────

    #[test]
    fn ctrl_letters() {
        assert_eq!(decode_bytes(&[17]), Key::Ctrl('q')); // Ctrl-Q
        assert_eq!(decode_bytes(&[19]), Key::Ctrl('s')); // Ctrl-S
        assert_eq!(decode_bytes(&[6]), Key::Ctrl('f')); // Ctrl-F
        assert_eq!(decode_bytes(&[12]), Key::Ctrl('l')); // Ctrl-L
    }

    #[test]
    fn ctrl_h_normalizes_to_backspace() {
        assert_eq!(decode_bytes(&[8]), Key::Backspace);
    }

    #[test]
    fn del_byte_normalizes_to_backspace() {
        assert_eq!(decode_bytes(&[127]), Key::Backspace);
    }

    // ── CSI sequences ───────────────────────────────────────────────

    #[test]
    fn arrows() {
        assert_eq!(decode_bytes(b"\x1b[A"), Key::Up);
        assert_eq!(decode_bytes(b"\x1b[B"), Key::Down);
        assert_eq!(decode_bytes(b"\x1b[C"), Key::Right);
        assert_eq!(decode_bytes(b"\x1b[D"), Key::Left);
    }

    #[test]
    fn tilde_form_editing_keys() {
        assert_eq!(decode_bytes(b"\x1b[3~"), Key::Delete);
        assert_eq!(decode_bytes(b"\x1b[5~"), Key::PageUp);
        assert_eq!(decode_bytes(b"\x1b[6~"), Key::PageDown);
    }

    #[test]
    fn home_aliases() {
        assert_eq!(decode_bytes(b"\x1b[1~"), Key::Home);
        assert_eq!(decode_bytes(b"\x1b[7~"), Key::Home);
        assert_eq!(decode_bytes(b"\x1b[H"), Key::Home);
        assert_eq!(decode_bytes(b"\x1bOH"), Key::Home);
    }

    #[test]
    fn end_aliases() {
        assert_eq!(decode_bytes(b"\x1b[4~"), Key::End);
        assert_eq!(decode_bytes(b"\x1b[8~"), Key::End);
        assert_eq!(decode_bytes(b"\x1b[F"), Key::End);
        assert_eq!(decode_bytes(b"\x1bOF"), Key::End);
    }

    // ── Fail-open behaviour ─────────────────────────────────────────

    #[test]
    fn lone_escape() {
        assert_eq!(decode_bytes(b"\x1b"), Key::Escape);
    }

    #[test]
    fn truncated_csi_fails_open() {
        assert_eq!(decode_bytes(b"\x1b["), Key::Escape);
        assert_eq!(decode_bytes(b"\x1b[5"), Key::Escape);
        assert_eq!(decode_bytes(b"\x1bO"), Key::Escape);
    }

    #[test]
    fn unknown_sequences_fail_open() {
        assert_eq!(decode_bytes(b"\x1b[Z"), Key::Escape);
        assert_eq!(decode_bytes(b"\x1b[9~"), Key::Escape);
        assert_eq!(decode_bytes(b"\x1b[5x"), Key::Escape);
        assert_eq!(decode_bytes(b"\x1bOx"), Key::Escape);
        assert_eq!(decode_bytes(b"\x1bq"), Key::Escape);
    }

    #[test]
    fn two_digit_csi_fails_open_and_consumes_its_terminator() {
        // `ESC [15~` (F5) is unbound, but the whole sequence must be
        // eaten: a leftover '~' would be inserted into the document.
        let mut iter = b"[15~x".iter().copied();
        let key = decode(0x1b, || iter.next());
        assert_eq!(key, Key::Escape);
        assert_eq!(iter.next(), Some(b'x'));
    }

    #[test]
    fn lookahead_is_bounded() {
        // One-digit forms pull three bytes after ESC, two-digit forms
        // four. Never more.
        let mut pulled = 0;
        let mut iter = b"[5~zzzz".iter().copied();
        let key = decode(0x1b, || {
            pulled += 1;
            iter.next()
        });
        assert_eq!(key, Key::PageUp);
        assert_eq!(pulled, 3);

        let mut pulled = 0;
        let mut iter = b"[15~zzzz".iter().copied();
        let key = decode(0x1b, || {
            pulled += 1;
            iter.next()
        });
        assert_eq!(key, Key::Escape);
        assert_eq!(pulled, 4);
    }

    // ── UTF-8 ───────────────────────────────────────────────────────

    #[test]
    fn two_byte_utf8() {
        assert_eq!(decode_bytes("é".as_bytes()), Key::Char('é'));
    }

    #[test]
    fn three_byte_utf8() {
        assert_eq!(decode_bytes("→".as_bytes()), Key::Char('→'));
    }

    #[test]
    fn four_byte_utf8() {
        assert_eq!(decode_bytes("🦀".as_bytes()), Key::Char('🦀'));
    }

    #[test]
    fn truncated_utf8_fails_open() {
        assert_eq!(
            decode_bytes(&[0xc3]),
            Key::Char(char::REPLACEMENT_CHARACTER)
        );
    }

    #[test]
    fn stray_continuation_byte_fails_open() {
        assert_eq!(
            decode_bytes(&[0x80]),
            Key::Char(char::REPLACEMENT_CHARACTER)
        );
    }

    #[test]
    fn invalid_continuation_fails_open() {
        // Lead byte promises a continuation; a printable follows instead.
        assert_eq!(
            decode_bytes(&[0xc3, b'x']),
            Key::Char(char::REPLACEMENT_CHARACTER)
        );
    }
}

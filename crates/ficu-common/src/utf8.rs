//! Low-level UTF-8 decoding and encoding over byte slices.
//!
//! These are the "safe body" helpers behind UTF-8 iteration: they accept
//! arbitrary bytes, never read outside the given bounds, and treat each
//! ill-formed sequence as its maximal subpart (Unicode 3.9, table 3-8), so a
//! truncated sequence consumes only the bytes that could have started a
//! well-formed one.

use crate::error::{Error, ErrorCode, Result};

/// Value returned for ill-formed input in [`Utf8Mode::Sentinel`] and
/// [`Utf8Mode::Strict`].
pub const SENTINEL: i32 = -1;

/// How ill-formed sequences are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Utf8Mode {
    /// Return [`SENTINEL`].
    #[default]
    Sentinel,
    /// Return U+FFFD.
    Replacement,
    /// Return [`SENTINEL`], and also reject noncharacters.
    Strict,
}

impl Utf8Mode {
    fn error_value(self) -> i32 {
        match self {
            Self::Replacement => 0xfffd,
            Self::Sentinel | Self::Strict => SENTINEL,
        }
    }
}

/// Whether `c` is a Unicode noncharacter (U+FDD0..U+FDEF, U+xxFFFE/F).
#[must_use]
pub fn is_noncharacter(c: u32) -> bool {
    (0xfdd0..=0xfdef).contains(&c) || (c & 0xfffe) == 0xfffe && c <= 0x10ffff
}

/// Number of bytes needed to encode `c`, or 0 if `c` is not a scalar value.
#[must_use]
pub fn encoded_len(c: u32) -> usize {
    match c {
        0..=0x7f => 1,
        0x80..=0x7ff => 2,
        0xd800..=0xdfff => 0,
        0x800..=0xffff => 3,
        0x10000..=0x10ffff => 4,
        _ => 0,
    }
}

/// Valid range for the first trail byte after `lead`, and the total
/// sequence length. `None` for bytes that never start a sequence.
fn lead_info(lead: u8) -> Option<(u8, u8, usize)> {
    match lead {
        0xc2..=0xdf => Some((0x80, 0xbf, 2)),
        0xe0 => Some((0xa0, 0xbf, 3)),
        0xe1..=0xec | 0xee..=0xef => Some((0x80, 0xbf, 3)),
        0xed => Some((0x80, 0x9f, 3)),
        0xf0 => Some((0x90, 0xbf, 4)),
        0xf1..=0xf3 => Some((0x80, 0xbf, 4)),
        0xf4 => Some((0x80, 0x8f, 4)),
        _ => None,
    }
}

/// Decode a sequence starting at `start`. Returns the code point (if well
/// formed) and the number of bytes consumed, which is the maximal subpart
/// for ill-formed input and always at least 1.
fn decode_at(bytes: &[u8], start: usize) -> (Option<u32>, usize) {
    let lead = bytes[start];
    if lead < 0x80 {
        return (Some(u32::from(lead)), 1);
    }
    let Some((lo, hi, len)) = lead_info(lead) else {
        return (None, 1);
    };
    let mut c = u32::from(lead) & (0x7f >> len);
    let mut consumed = 1;
    while consumed < len {
        let Some(&b) = bytes.get(start + consumed) else {
            return (None, consumed);
        };
        let (min, max) = if consumed == 1 { (lo, hi) } else { (0x80, 0xbf) };
        if !(min..=max).contains(&b) {
            return (None, consumed);
        }
        c = (c << 6) | u32::from(b & 0x3f);
        consumed += 1;
    }
    (Some(c), consumed)
}

/// Decode the code point at `*i` and advance past it.
///
/// `*i` must be less than `bytes.len()`. Ill-formed input advances by the
/// maximal subpart and returns the mode's error value.
pub fn next_code_point(bytes: &[u8], i: &mut usize, mode: Utf8Mode) -> i32 {
    let (c, consumed) = decode_at(bytes, *i);
    *i += consumed;
    match c {
        Some(c) if mode == Utf8Mode::Strict && is_noncharacter(c) => SENTINEL,
        // Scalar values fit in i32.
        Some(c) => c as i32,
        None => mode.error_value(),
    }
}

/// Decode the code point that ends just before `*i` and move `*i` back to
/// its first byte. Never moves below `start`.
///
/// An ill-formed tail moves back by one byte and returns the mode's error
/// value.
pub fn prev_code_point(bytes: &[u8], start: usize, i: &mut usize, mode: Utf8Mode) -> i32 {
    let end = *i;
    let lead = back1(bytes, start, end);
    let (c, consumed) = decode_at(bytes, lead);
    match c {
        Some(c) if lead + consumed == end => {
            *i = lead;
            if mode == Utf8Mode::Strict && is_noncharacter(c) {
                SENTINEL
            } else {
                c as i32
            }
        }
        _ => {
            *i = end - 1;
            mode.error_value()
        }
    }
}

/// Index of the first byte of the sequence ending just before `i`.
///
/// Backs up over at most three trail bytes to a lead byte whose sequence
/// ends exactly at `i`; otherwise returns `i - 1`.
#[must_use]
pub fn back1(bytes: &[u8], start: usize, i: usize) -> usize {
    debug_assert!(start < i && i <= bytes.len());
    let mut j = i - 1;
    let floor = start.max(i.saturating_sub(4));
    while j > floor && (0x80..=0xbf).contains(&bytes[j]) {
        j -= 1;
    }
    let (c, consumed) = decode_at(bytes, j);
    if c.is_some() && j + consumed == i {
        j
    } else {
        i - 1
    }
}

/// Encode `c` into `buf` at `*i` and advance.
///
/// Fails with `U_ILLEGAL_ARGUMENT_ERROR` for surrogates and values above
/// U+10FFFF, and with `U_BUFFER_OVERFLOW_ERROR` when the sequence does not
/// fit; in both cases nothing is written.
pub fn append_code_point(buf: &mut [u8], i: &mut usize, c: u32) -> Result<()> {
    let len = encoded_len(c);
    if len == 0 {
        return Err(Error::illegal_argument(format!(
            "U+{c:04X} is not a Unicode scalar value"
        )));
    }
    let Some(dst) = buf.get_mut(*i..*i + len) else {
        return Err(Error::new(
            ErrorCode::BufferOverflowError,
            format!("{len}-byte sequence does not fit"),
        ));
    };
    match len {
        1 => dst[0] = c as u8,
        2 => {
            dst[0] = 0xc0 | (c >> 6) as u8;
            dst[1] = 0x80 | (c & 0x3f) as u8;
        }
        3 => {
            dst[0] = 0xe0 | (c >> 12) as u8;
            dst[1] = 0x80 | ((c >> 6) & 0x3f) as u8;
            dst[2] = 0x80 | (c & 0x3f) as u8;
        }
        _ => {
            dst[0] = 0xf0 | (c >> 18) as u8;
            dst[1] = 0x80 | ((c >> 12) & 0x3f) as u8;
            dst[2] = 0x80 | ((c >> 6) & 0x3f) as u8;
            dst[3] = 0x80 | (c & 0x3f) as u8;
        }
    }
    *i += len;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_all(bytes: &[u8], mode: Utf8Mode) -> Vec<i32> {
        let mut out = Vec::new();
        let mut i = 0;
        while i < bytes.len() {
            out.push(next_code_point(bytes, &mut i, mode));
        }
        out
    }

    #[test]
    fn decodes_well_formed_text() {
        let text = "a\u{e9}\u{20ac}\u{1f600}";
        assert_eq!(
            decode_all(text.as_bytes(), Utf8Mode::Sentinel),
            vec![0x61, 0xe9, 0x20ac, 0x1f600]
        );
    }

    #[test]
    fn ill_formed_sequences_consume_maximal_subpart() {
        // Truncated 3-byte sequence, then 'a', then a lone trail byte.
        let bytes = [0xe2, 0x82, b'a', 0x80];
        assert_eq!(decode_all(&bytes, Utf8Mode::Sentinel), vec![-1, 0x61, -1]);
        // Encoded surrogate: ED A0 is already ill-formed at the second byte.
        let bytes = [0xed, 0xa0, 0x80];
        assert_eq!(decode_all(&bytes, Utf8Mode::Replacement), vec![0xfffd; 3]);
        // Overlong.
        assert_eq!(decode_all(&[0xc0, 0xaf], Utf8Mode::Sentinel), vec![-1, -1]);
    }

    #[test]
    fn strict_mode_rejects_noncharacters() {
        let text = "\u{fdd0}\u{fffe}x";
        assert_eq!(decode_all(text.as_bytes(), Utf8Mode::Strict), vec![-1, -1, 0x78]);
        assert_eq!(
            decode_all(text.as_bytes(), Utf8Mode::Sentinel),
            vec![0xfdd0, 0xfffe, 0x78]
        );
    }

    #[test]
    fn backward_decoding_matches_forward() {
        let text = "x\u{e9}\u{20ac}\u{1f600}";
        let bytes = text.as_bytes();
        let mut i = bytes.len();
        let mut out = Vec::new();
        while i > 0 {
            out.push(prev_code_point(bytes, 0, &mut i, Utf8Mode::Sentinel));
        }
        out.reverse();
        assert_eq!(out, decode_all(bytes, Utf8Mode::Sentinel));
    }

    #[test]
    fn backward_over_garbage_moves_one_byte() {
        let bytes = [b'a', 0x80, 0x80];
        let mut i = 3;
        assert_eq!(prev_code_point(&bytes, 0, &mut i, Utf8Mode::Sentinel), -1);
        assert_eq!(i, 2);
        assert_eq!(back1(&bytes, 0, 3), 2);
        assert_eq!(back1("\u{20ac}".as_bytes(), 0, 3), 0);
    }

    #[test]
    fn append_checks_value_and_capacity() {
        let mut buf = [0u8; 5];
        let mut i = 0;
        append_code_point(&mut buf, &mut i, 0x20ac).unwrap();
        append_code_point(&mut buf, &mut i, 0x41).unwrap();
        assert_eq!(&buf[..i], "\u{20ac}A".as_bytes());
        let err = append_code_point(&mut buf, &mut i, 0x1f600).unwrap_err();
        assert_eq!(err.code(), ErrorCode::BufferOverflowError);
        assert_eq!(i, 4);
        let err = append_code_point(&mut buf, &mut i, 0xd800).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IllegalArgumentError);
    }
}

//! Byte-order and charset-family conversion of serialized ICU data.
//!
//! A [`DataSwapper`] knows the endianness and charset family of its input and
//! of the output it should produce. Format-specific swap functions (the trie,
//! break-iterator data) read header fields through it in *input* order and
//! hand it blocks of 16- or 32-bit words to convert.
//!
//! Input and output are always distinct slices; callers that need in-place
//! conversion copy the input first.

use crate::data_header::DataHeader;
use crate::error::{Error, ErrorCode, Result};

/// Byte order of serialized data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endianness {
    Little,
    Big,
}

impl Endianness {
    /// Byte order of the running platform.
    #[cfg(target_endian = "little")]
    pub const NATIVE: Self = Self::Little;
    /// Byte order of the running platform.
    #[cfg(target_endian = "big")]
    pub const NATIVE: Self = Self::Big;

    /// Value stored in the `isBigEndian` header byte.
    #[must_use]
    pub const fn header_byte(self) -> u8 {
        match self {
            Self::Little => 0,
            Self::Big => 1,
        }
    }

    /// Interpret an `isBigEndian` header byte.
    #[must_use]
    pub const fn from_header_byte(b: u8) -> Option<Self> {
        match b {
            0 => Some(Self::Little),
            1 => Some(Self::Big),
            _ => None,
        }
    }

    /// Decode a 16-bit value stored in this byte order.
    #[must_use]
    pub fn read_u16(self, b: [u8; 2]) -> u16 {
        match self {
            Self::Little => u16::from_le_bytes(b),
            Self::Big => u16::from_be_bytes(b),
        }
    }

    /// Decode a 32-bit value stored in this byte order.
    #[must_use]
    pub fn read_u32(self, b: [u8; 4]) -> u32 {
        match self {
            Self::Little => u32::from_le_bytes(b),
            Self::Big => u32::from_be_bytes(b),
        }
    }

    /// Serialize a 16-bit value in this byte order.
    #[must_use]
    pub fn u16_bytes(self, v: u16) -> [u8; 2] {
        match self {
            Self::Little => v.to_le_bytes(),
            Self::Big => v.to_be_bytes(),
        }
    }

    /// Serialize a 32-bit value in this byte order.
    #[must_use]
    pub fn u32_bytes(self, v: u32) -> [u8; 4] {
        match self {
            Self::Little => v.to_le_bytes(),
            Self::Big => v.to_be_bytes(),
        }
    }
}

/// Character set family used for invariant strings in data headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharsetFamily {
    Ascii = 0,
    Ebcdic = 1,
}

impl TryFrom<u8> for CharsetFamily {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(Self::Ascii),
            1 => Ok(Self::Ebcdic),
            _ => Err(Error::illegal_argument(format!(
                "unknown charset family {value}"
            ))),
        }
    }
}

/// Endianness/charset converter for one input → output direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataSwapper {
    in_endian: Endianness,
    in_charset: CharsetFamily,
    out_endian: Endianness,
    out_charset: CharsetFamily,
}

impl DataSwapper {
    /// Create a swapper for an explicit conversion.
    #[must_use]
    pub const fn new(
        in_endian: Endianness,
        in_charset: CharsetFamily,
        out_endian: Endianness,
        out_charset: CharsetFamily,
    ) -> Self {
        Self {
            in_endian,
            in_charset,
            out_endian,
            out_charset,
        }
    }

    /// Create a swapper whose input properties are read from the ICU data
    /// header at the start of `data`.
    pub fn for_input_data(
        data: &[u8],
        out_endian: Endianness,
        out_charset: CharsetFamily,
    ) -> Result<Self> {
        let header = DataHeader::parse(data)?;
        Ok(Self::new(
            header.info.endianness,
            header.info.charset_family,
            out_endian,
            out_charset,
        ))
    }

    #[must_use]
    pub const fn input_endianness(&self) -> Endianness {
        self.in_endian
    }

    #[must_use]
    pub const fn output_endianness(&self) -> Endianness {
        self.out_endian
    }

    #[must_use]
    pub const fn input_charset(&self) -> CharsetFamily {
        self.in_charset
    }

    #[must_use]
    pub const fn output_charset(&self) -> CharsetFamily {
        self.out_charset
    }

    /// Whether 16/32-bit words change byte order.
    #[must_use]
    pub fn swaps_bytes(&self) -> bool {
        self.in_endian != self.out_endian
    }

    /// Read a 16-bit input-order value at `offset`.
    pub fn read_u16(&self, data: &[u8], offset: usize) -> Result<u16> {
        let bytes = data
            .get(offset..offset.saturating_add(2))
            .ok_or_else(|| Error::index_out_of_bounds(format!("u16 read at {offset}")))?;
        Ok(self.in_endian.read_u16([bytes[0], bytes[1]]))
    }

    /// Read a 32-bit input-order value at `offset`.
    pub fn read_u32(&self, data: &[u8], offset: usize) -> Result<u32> {
        let bytes = data
            .get(offset..offset.saturating_add(4))
            .ok_or_else(|| Error::index_out_of_bounds(format!("u32 read at {offset}")))?;
        Ok(self
            .in_endian
            .read_u32([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Write a 16-bit value in output order at `offset`.
    pub fn write_u16(&self, out: &mut [u8], offset: usize, value: u16) -> Result<()> {
        let slot = out
            .get_mut(offset..offset.saturating_add(2))
            .ok_or_else(|| Error::index_out_of_bounds(format!("u16 write at {offset}")))?;
        slot.copy_from_slice(&self.out_endian.u16_bytes(value));
        Ok(())
    }

    /// Write a 32-bit value in output order at `offset`.
    pub fn write_u32(&self, out: &mut [u8], offset: usize, value: u32) -> Result<()> {
        let slot = out
            .get_mut(offset..offset.saturating_add(4))
            .ok_or_else(|| Error::index_out_of_bounds(format!("u32 write at {offset}")))?;
        slot.copy_from_slice(&self.out_endian.u32_bytes(value));
        Ok(())
    }

    /// Convert an array of 16-bit words from input to output order.
    pub fn swap_array16(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.swap_units(input, output, 2)
    }

    /// Convert an array of 32-bit words from input to output order.
    pub fn swap_array32(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        self.swap_units(input, output, 4)
    }

    fn swap_units(&self, input: &[u8], output: &mut [u8], unit: usize) -> Result<()> {
        if input.len() % unit != 0 {
            return Err(Error::illegal_argument(format!(
                "{} bytes is not a whole number of {}-byte words",
                input.len(),
                unit
            )));
        }
        let have = output.len();
        let Some(output) = output.get_mut(..input.len()) else {
            return Err(Error::index_out_of_bounds(format!(
                "output holds {have} bytes, need {}",
                input.len()
            )));
        };
        if self.swaps_bytes() {
            for (src, dst) in input.chunks_exact(unit).zip(output.chunks_exact_mut(unit)) {
                for (i, b) in src.iter().rev().enumerate() {
                    dst[i] = *b;
                }
            }
        } else {
            output.copy_from_slice(input);
        }
        Ok(())
    }

    /// Convert invariant characters between charset families.
    ///
    /// Fails with `U_INVALID_CHAR_FOUND` on any byte outside the invariant
    /// set, even when no conversion is needed.
    pub fn swap_invariant_chars(&self, input: &[u8], output: &mut [u8]) -> Result<()> {
        let Some(output) = output.get_mut(..input.len()) else {
            return Err(Error::index_out_of_bounds("invariant string output too short"));
        };
        for (i, (&b, dst)) in input.iter().zip(output.iter_mut()).enumerate() {
            let ascii = match self.in_charset {
                CharsetFamily::Ascii => Some(b).filter(|&b| is_invariant_ascii(b)),
                CharsetFamily::Ebcdic => ebcdic_to_ascii(b),
            };
            let Some(ascii) = ascii else {
                return Err(Error::new(
                    ErrorCode::InvalidCharFound,
                    format!("byte 0x{b:02x} is not an invariant character"),
                )
                .at(i));
            };
            *dst = match self.out_charset {
                CharsetFamily::Ascii => ascii,
                CharsetFamily::Ebcdic => ASCII_TO_EBCDIC[usize::from(ascii)],
            };
        }
        Ok(())
    }
}

// Invariant characters: NUL, TAB, LF, CR, space, letters, digits and
// "%&'()*+,-./:;<=>?_ plus the double quote.
fn is_invariant_ascii(b: u8) -> bool {
    matches!(b,
        0x00 | 0x09 | 0x0a | 0x0d | b' ' | b'"' | b'%'..=b'?' | b'A'..=b'Z' | b'_' | b'a'..=b'z')
}

const fn build_ascii_to_ebcdic() -> [u8; 128] {
    let mut t = [0u8; 128];
    t[0x09] = 0x05;
    t[0x0a] = 0x25;
    t[0x0d] = 0x0d;
    t[b' ' as usize] = 0x40;
    t[b'"' as usize] = 0x7f;
    t[b'%' as usize] = 0x6c;
    t[b'&' as usize] = 0x50;
    t[b'\'' as usize] = 0x7d;
    t[b'(' as usize] = 0x4d;
    t[b')' as usize] = 0x5d;
    t[b'*' as usize] = 0x5c;
    t[b'+' as usize] = 0x4e;
    t[b',' as usize] = 0x6b;
    t[b'-' as usize] = 0x60;
    t[b'.' as usize] = 0x4b;
    t[b'/' as usize] = 0x61;
    t[b':' as usize] = 0x7a;
    t[b';' as usize] = 0x5e;
    t[b'<' as usize] = 0x4c;
    t[b'=' as usize] = 0x7e;
    t[b'>' as usize] = 0x6e;
    t[b'?' as usize] = 0x6f;
    t[b'_' as usize] = 0x6d;
    let mut i = 0;
    while i < 10 {
        t[b'0' as usize + i] = 0xf0 + i as u8;
        i += 1;
    }
    let mut i = 0;
    while i < 26 {
        let (upper, lower) = match i {
            0..=8 => (0xc1 + i as u8, 0x81 + i as u8),
            9..=17 => (0xd1 + (i - 9) as u8, 0x91 + (i - 9) as u8),
            _ => (0xe2 + (i - 18) as u8, 0xa2 + (i - 18) as u8),
        };
        t[b'A' as usize + i] = upper;
        t[b'a' as usize + i] = lower;
        i += 1;
    }
    t
}

static ASCII_TO_EBCDIC: [u8; 128] = build_ascii_to_ebcdic();

fn ebcdic_to_ascii(b: u8) -> Option<u8> {
    if b == 0 {
        return Some(0);
    }
    (1u8..128)
        .filter(|&a| is_invariant_ascii(a))
        .find(|&a| ASCII_TO_EBCDIC[usize::from(a)] == b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le_to_be() -> DataSwapper {
        DataSwapper::new(
            Endianness::Little,
            CharsetFamily::Ascii,
            Endianness::Big,
            CharsetFamily::Ascii,
        )
    }

    #[test]
    fn swap16_reverses_each_word() {
        let input = [0x01, 0x02, 0x03, 0x04];
        let mut out = [0u8; 4];
        le_to_be().swap_array16(&input, &mut out).unwrap();
        assert_eq!(out, [0x02, 0x01, 0x04, 0x03]);
    }

    #[test]
    fn swap32_reverses_each_word() {
        let input = [0x01, 0x02, 0x03, 0x04, 0xaa, 0xbb, 0xcc, 0xdd];
        let mut out = [0u8; 8];
        le_to_be().swap_array32(&input, &mut out).unwrap();
        assert_eq!(out, [0x04, 0x03, 0x02, 0x01, 0xdd, 0xcc, 0xbb, 0xaa]);
    }

    #[test]
    fn same_order_copies() {
        let ds = DataSwapper::new(
            Endianness::Big,
            CharsetFamily::Ascii,
            Endianness::Big,
            CharsetFamily::Ascii,
        );
        let input = [9, 8, 7, 6];
        let mut out = [0u8; 4];
        ds.swap_array32(&input, &mut out).unwrap();
        assert_eq!(out, input);
    }

    #[test]
    fn odd_lengths_are_rejected() {
        let mut out = [0u8; 8];
        let err = le_to_be().swap_array16(&[1, 2, 3], &mut out).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IllegalArgumentError);
        let err = le_to_be().swap_array32(&[1, 2, 3, 4, 5, 6], &mut out).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IllegalArgumentError);
    }

    #[test]
    fn short_output_is_rejected() {
        let mut out = [0u8; 2];
        let err = le_to_be().swap_array16(&[1, 2, 3, 4], &mut out).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IndexOutOfBoundsError);
    }

    #[test]
    fn read_and_write_follow_directions() {
        let ds = le_to_be();
        assert_eq!(ds.read_u16(&[0x34, 0x12], 0).unwrap(), 0x1234);
        assert_eq!(ds.read_u32(&[0, 0x78, 0x56, 0x34, 0x12], 1).unwrap(), 0x1234_5678);
        let mut out = [0u8; 4];
        ds.write_u32(&mut out, 0, 0x1234_5678).unwrap();
        assert_eq!(out, [0x12, 0x34, 0x56, 0x78]);
        assert!(ds.read_u32(&[1, 2, 3], 0).is_err());
    }

    #[test]
    fn invariant_chars_round_trip_through_ebcdic() {
        let to_ebcdic = DataSwapper::new(
            Endianness::Little,
            CharsetFamily::Ascii,
            Endianness::Little,
            CharsetFamily::Ebcdic,
        );
        let to_ascii = DataSwapper::new(
            Endianness::Little,
            CharsetFamily::Ebcdic,
            Endianness::Little,
            CharsetFamily::Ascii,
        );
        let text = b"Copyright (C) 2009, Intl. Business Machines; all_rights=reserved?\0";
        let mut ebcdic = vec![0u8; text.len()];
        to_ebcdic.swap_invariant_chars(text, &mut ebcdic).unwrap();
        assert_eq!(ebcdic[0], 0xc3); // 'C'
        assert_eq!(ebcdic[9], 0x40); // ' '
        let mut back = vec![0u8; text.len()];
        to_ascii.swap_invariant_chars(&ebcdic, &mut back).unwrap();
        assert_eq!(back.as_slice(), text.as_slice());
    }

    #[test]
    fn variant_chars_are_rejected() {
        let ds = le_to_be();
        let mut out = [0u8; 4];
        for bad in [b'$', b'@', b'#', b'[', b'~', 0x80] {
            let err = ds.swap_invariant_chars(&[b'a', bad], &mut out).unwrap_err();
            assert_eq!(err.code(), ErrorCode::InvalidCharFound);
            assert_eq!(err.offset(), Some(1));
        }
    }
}

//! The generic ICU data file header.
//!
//! Every ICU binary data file starts with this header:
//!
//! | offset | field |
//! |--------|-------|
//! | 0 | `headerSize: u16` (padded to a multiple of 16) |
//! | 2 | magic `0xda 0x27` |
//! | 4 | `info.size: u16` |
//! | 6 | `info.reservedWord: u16` |
//! | 8 | `isBigEndian: u8` |
//! | 9 | `charsetFamily: u8` |
//! | 10 | `sizeofUChar: u8` (always 2) |
//! | 11 | reserved |
//! | 12 | `dataFormat[4]` |
//! | 16 | `formatVersion[4]` |
//! | 20 | `dataVersion[4]` |
//! | 24 | optional NUL-terminated copyright string in invariant characters |

use tracing::warn;

use crate::error::{Error, Result};
use crate::swapper::{CharsetFamily, DataSwapper, Endianness};

/// Magic bytes following `headerSize`.
pub const MAGIC: [u8; 2] = [0xda, 0x27];

/// Size of the `UDataInfo` block written by this crate.
pub const INFO_SIZE: u16 = 20;

/// Smallest legal header: size + magic + `UDataInfo`.
pub const MIN_HEADER_SIZE: usize = 4 + INFO_SIZE as usize;

/// The `UDataInfo` part of a data header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataInfo {
    /// Declared size of the info block in bytes.
    pub size: u16,
    pub endianness: Endianness,
    pub charset_family: CharsetFamily,
    pub sizeof_uchar: u8,
    /// Four-byte format tag, e.g. `*b"Brk "`.
    pub data_format: [u8; 4],
    pub format_version: [u8; 4],
    pub data_version: [u8; 4],
}

/// A parsed ICU data header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataHeader {
    /// Total header length in bytes; the payload starts here.
    pub header_size: u16,
    pub info: DataInfo,
    pub copyright: Option<String>,
}

impl DataHeader {
    /// Header for a new data file in the platform's byte order.
    #[must_use]
    pub fn new(data_format: [u8; 4], format_version: [u8; 4], data_version: [u8; 4]) -> Self {
        Self {
            header_size: 0,
            info: DataInfo {
                size: INFO_SIZE,
                endianness: Endianness::NATIVE,
                charset_family: CharsetFamily::Ascii,
                sizeof_uchar: 2,
                data_format,
                format_version,
                data_version,
            },
            copyright: None,
        }
    }

    /// Attach a copyright string (invariant characters only).
    #[must_use]
    pub fn with_copyright(mut self, copyright: impl Into<String>) -> Self {
        self.copyright = Some(copyright.into());
        self
    }

    /// Parse and validate the header at the start of `bytes`.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < MIN_HEADER_SIZE {
            return Err(Error::index_out_of_bounds(
                "input is too short to contain a data header",
            ));
        }
        if bytes[2..4] != MAGIC {
            return Err(Error::unsupported("data header magic word does not match"));
        }
        let endianness = Endianness::from_header_byte(bytes[8])
            .ok_or_else(|| Error::unsupported("unrecognized isBigEndian value"))?;
        let charset_family = CharsetFamily::try_from(bytes[9])
            .map_err(|_| Error::unsupported("unrecognized charset family"))?;
        let sizeof_uchar = bytes[10];
        if sizeof_uchar != 2 {
            return Err(Error::unsupported("sizeofUChar is not 2"));
        }

        let header_size = endianness.read_u16([bytes[0], bytes[1]]);
        let info_size = endianness.read_u16([bytes[4], bytes[5]]);
        check_sizes(header_size, info_size, Some(bytes.len()))?;

        let copyright_start = 4 + usize::from(info_size);
        let copyright_bytes = &bytes[copyright_start..usize::from(header_size)];
        let nul = copyright_bytes
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(copyright_bytes.len());
        let copyright = if nul == 0 {
            None
        } else {
            let ds = DataSwapper::new(endianness, charset_family, endianness, CharsetFamily::Ascii);
            let mut ascii = vec![0u8; nul];
            ds.swap_invariant_chars(&copyright_bytes[..nul], &mut ascii)?;
            Some(String::from_utf8_lossy(&ascii).into_owned())
        };

        Ok(Self {
            header_size,
            info: DataInfo {
                size: info_size,
                endianness,
                charset_family,
                sizeof_uchar,
                data_format: [bytes[12], bytes[13], bytes[14], bytes[15]],
                format_version: [bytes[16], bytes[17], bytes[18], bytes[19]],
                data_version: [bytes[20], bytes[21], bytes[22], bytes[23]],
            },
            copyright,
        })
    }

    /// The data format tag as text, e.g. `"Brk "`.
    #[must_use]
    pub fn data_format_str(&self) -> String {
        String::from_utf8_lossy(&self.info.data_format).into_owned()
    }

    /// Serialize the header in the given byte order and charset family.
    ///
    /// The result is padded with zeros to a multiple of 16 bytes.
    pub fn to_bytes(&self, endian: Endianness, charset: CharsetFamily) -> Result<Vec<u8>> {
        let copyright = self.copyright.as_deref().unwrap_or("").as_bytes();
        let unpadded = MIN_HEADER_SIZE + copyright.len() + usize::from(!copyright.is_empty());
        let header_size = unpadded.div_ceil(16) * 16;
        let header_size_u16 = u16::try_from(header_size)
            .map_err(|_| Error::illegal_argument("copyright string too long"))?;

        let mut out = vec![0u8; header_size];
        out[0..2].copy_from_slice(&endian.u16_bytes(header_size_u16));
        out[2..4].copy_from_slice(&MAGIC);
        out[4..6].copy_from_slice(&endian.u16_bytes(INFO_SIZE));
        out[8] = endian.header_byte();
        out[9] = charset as u8;
        out[10] = 2;
        out[12..16].copy_from_slice(&self.info.data_format);
        out[16..20].copy_from_slice(&self.info.format_version);
        out[20..24].copy_from_slice(&self.info.data_version);
        if !copyright.is_empty() {
            let ds = DataSwapper::new(endian, CharsetFamily::Ascii, endian, charset);
            ds.swap_invariant_chars(
                copyright,
                &mut out[MIN_HEADER_SIZE..MIN_HEADER_SIZE + copyright.len()],
            )?;
        }
        Ok(out)
    }
}

fn check_sizes(header_size: u16, info_size: u16, available: Option<usize>) -> Result<()> {
    if usize::from(header_size) < MIN_HEADER_SIZE
        || info_size < INFO_SIZE
        || usize::from(header_size) < 4 + usize::from(info_size)
    {
        return Err(Error::unsupported(format!(
            "data header sizes are inconsistent: headerSize {header_size}, info.size {info_size}"
        )));
    }
    // A buffer shorter than headerSize is a header size mismatch, the same
    // U_UNSUPPORTED_ERROR udata_swapDataHeader reports; output buffers that
    // are too short are the only IndexOutOfBounds case.
    if let Some(available) = available
        && available < usize::from(header_size)
    {
        return Err(Error::unsupported(format!(
            "data header claims {header_size} bytes, only {available} available"
        )));
    }
    Ok(())
}

/// Swap the generic data header (`udata_swapDataHeader`).
///
/// Returns the header size. With `output == None` only validates and
/// reports the size. The output receives a copy of the header with the
/// output endianness/charset bytes, swapped 16-bit size fields and a
/// converted copyright string.
pub fn swap_data_header(
    ds: &DataSwapper,
    input: &[u8],
    output: Option<&mut [u8]>,
) -> Result<usize> {
    let result = swap_data_header_inner(ds, input, output);
    if let Err(err) = &result {
        warn!(error = %err, "swap_data_header: invalid data header");
    }
    result
}

fn swap_data_header_inner(
    ds: &DataSwapper,
    input: &[u8],
    output: Option<&mut [u8]>,
) -> Result<usize> {
    if input.len() < MIN_HEADER_SIZE {
        return Err(Error::unsupported("input is too short to contain a data header"));
    }
    if input[2..4] != MAGIC || input[10] != 2 {
        return Err(Error::unsupported(
            "not an ICU data file (magic or sizeofUChar mismatch)",
        ));
    }
    let header_size = ds.read_u16(input, 0)?;
    let info_size = ds.read_u16(input, 4)?;
    check_sizes(header_size, info_size, Some(input.len()))?;
    let header_size = usize::from(header_size);

    let Some(output) = output else {
        return Ok(header_size);
    };
    if output.len() < header_size {
        return Err(Error::index_out_of_bounds(format!(
            "output holds {} bytes, header needs {header_size}",
            output.len()
        )));
    }

    output[..header_size].copy_from_slice(&input[..header_size]);
    output[8] = ds.output_endianness().header_byte();
    output[9] = ds.output_charset() as u8;
    ds.swap_array16(&input[0..2], &mut output[0..2])?;
    ds.swap_array16(&input[4..8], &mut output[4..8])?;

    let copyright_start = 4 + usize::from(info_size);
    let copyright = &input[copyright_start..header_size];
    let len = copyright
        .iter()
        .position(|&b| b == 0)
        .unwrap_or(copyright.len());
    ds.swap_invariant_chars(
        &copyright[..len],
        &mut output[copyright_start..copyright_start + len],
    )?;
    Ok(header_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tracing_test::traced_test;

    fn sample(endian: Endianness) -> Vec<u8> {
        DataHeader::new(*b"Brk ", [3, 1, 0, 0], [5, 2, 0, 0])
            .with_copyright("Copyright (C) 2010, International Business Machines")
            .to_bytes(endian, CharsetFamily::Ascii)
            .unwrap()
    }

    #[test]
    fn written_header_parses_back() {
        for endian in [Endianness::Little, Endianness::Big] {
            let bytes = sample(endian);
            assert_eq!(bytes.len() % 16, 0);
            let header = DataHeader::parse(&bytes).unwrap();
            assert_eq!(usize::from(header.header_size), bytes.len());
            assert_eq!(header.info.endianness, endian);
            assert_eq!(header.info.size, INFO_SIZE);
            assert_eq!(header.data_format_str(), "Brk ");
            assert_eq!(header.info.format_version, [3, 1, 0, 0]);
            assert_eq!(
                header.copyright.as_deref(),
                Some("Copyright (C) 2010, International Business Machines")
            );
        }
    }

    #[test]
    fn header_without_copyright_is_minimal() {
        let bytes = DataHeader::new(*b"Test", [1, 0, 0, 0], [0; 4])
            .to_bytes(Endianness::Little, CharsetFamily::Ascii)
            .unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(DataHeader::parse(&bytes).unwrap().copyright, None);
    }

    #[test]
    fn bad_magic_is_unsupported() {
        let mut bytes = sample(Endianness::Little);
        bytes[3] = 0x28;
        assert_eq!(
            DataHeader::parse(&bytes).unwrap_err().code(),
            ErrorCode::UnsupportedError
        );
    }

    #[test]
    fn truncated_input_is_rejected() {
        let bytes = sample(Endianness::Little);
        assert_eq!(
            DataHeader::parse(&bytes[..10]).unwrap_err().code(),
            ErrorCode::IndexOutOfBoundsError
        );
        assert_eq!(
            DataHeader::parse(&bytes[..30]).unwrap_err().code(),
            ErrorCode::UnsupportedError
        );
    }

    #[test]
    fn swap_header_of_truncated_input_is_unsupported() {
        let input = sample(Endianness::Little);
        let ds = DataSwapper::new(
            Endianness::Little,
            CharsetFamily::Ascii,
            Endianness::Big,
            CharsetFamily::Ascii,
        );
        let short = &input[..input.len() - 1];
        let err = swap_data_header(&ds, short, None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnsupportedError);

        let mut out = vec![0u8; input.len() - 1];
        let err = swap_data_header(&ds, &input, Some(&mut out)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IndexOutOfBoundsError);
    }

    #[test]
    fn swap_header_to_big_endian_ebcdic() {
        let input = sample(Endianness::Little);
        let ds = DataSwapper::new(
            Endianness::Little,
            CharsetFamily::Ascii,
            Endianness::Big,
            CharsetFamily::Ebcdic,
        );
        assert_eq!(swap_data_header(&ds, &input, None).unwrap(), input.len());

        let mut out = vec![0u8; input.len()];
        let size = swap_data_header(&ds, &input, Some(&mut out)).unwrap();
        assert_eq!(size, input.len());
        let header = DataHeader::parse(&out).unwrap();
        assert_eq!(header.info.endianness, Endianness::Big);
        assert_eq!(header.info.charset_family, CharsetFamily::Ebcdic);
        assert_eq!(usize::from(header.header_size), input.len());
        assert_eq!(
            header.copyright.as_deref(),
            Some("Copyright (C) 2010, International Business Machines")
        );
    }

    #[test]
    #[traced_test]
    fn swap_header_rejects_and_logs_garbage() {
        let ds = DataSwapper::new(
            Endianness::Little,
            CharsetFamily::Ascii,
            Endianness::Big,
            CharsetFamily::Ascii,
        );
        let err = swap_data_header(&ds, &[0u8; 32], None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnsupportedError);
        assert!(logs_contain("invalid data header"));
    }
}

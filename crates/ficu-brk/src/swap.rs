//! Byte-order and charset conversion of break data files (`ubrk_swap`).
//!
//! The input is a complete ICU data file: generic data header followed by
//! the break data image. Every offset is read from the input header before
//! anything is written, so the header itself is swapped last.

use std::ops::Range;

use ficu_common::{DataHeader, DataSwapper, Error, Result, swap_data_header, swap_trie};
use tracing::{debug, warn};

use crate::data::{
    DATA_FORMAT, FORMAT_VERSION_MAJOR, HEADER_LENGTH, RBBI_MAGIC, Section, TABLE_TOP_LENGTH,
};

/// Swap a break data file from `input` into `output`.
///
/// Returns the total size in bytes (data header plus break data). With
/// `output == None` nothing is written and only the size is computed.
///
/// Errors:
/// * not `Brk ` data, or a format version other than 3, bad magic or a
///   declared length below the header size: `U_UNSUPPORTED_ERROR`;
/// * input or output shorter than the total size: `U_INDEX_OUTOFBOUNDS_ERROR`;
/// * a malformed trie: `U_INVALID_FORMAT_ERROR`.
pub fn swap_break_data(ds: &DataSwapper, input: &[u8], output: Option<&mut [u8]>) -> Result<usize> {
    let result = swap_inner(ds, input, output);
    match &result {
        Ok(total) => debug!(
            total,
            from = ?ds.input_endianness(),
            to = ?ds.output_endianness(),
            "swapped break iterator data"
        ),
        Err(err) => warn!(error = %err, "swap_break_data: cannot swap break iterator data"),
    }
    result
}

/// Swap a break data file in place.
pub fn swap_break_data_in_place(ds: &DataSwapper, data: &mut [u8]) -> Result<usize> {
    let input = data.to_vec();
    swap_break_data(ds, &input, Some(data))
}

/// Swap a break data file into a newly allocated buffer of exactly the
/// file's size.
pub fn swap_break_data_to_vec(ds: &DataSwapper, input: &[u8]) -> Result<Vec<u8>> {
    let total = swap_break_data(ds, input, None)?;
    let mut out = vec![0u8; total];
    swap_break_data(ds, input, Some(&mut out))?;
    Ok(out)
}

fn swap_inner(ds: &DataSwapper, input: &[u8], output: Option<&mut [u8]>) -> Result<usize> {
    let header_size = swap_data_header(ds, input, None)?;
    let info = DataHeader::parse(input)?.info;
    if info.data_format != DATA_FORMAT || info.format_version[0] != FORMAT_VERSION_MAJOR {
        return Err(Error::unsupported(format!(
            "data format {:?} version {} is not break iterator data",
            String::from_utf8_lossy(&info.data_format),
            info.format_version[0]
        )));
    }

    let body = &input[header_size..];
    if body.len() < HEADER_LENGTH {
        return Err(Error::unsupported("break data is shorter than its header"));
    }
    let word = |i: usize| ds.read_u32(body, 4 * i);
    let magic = word(0)?;
    let length = word(2)? as usize;
    if magic != RBBI_MAGIC || body[4] != FORMAT_VERSION_MAJOR || length < HEADER_LENGTH {
        return Err(Error::unsupported(format!(
            "bad break data header: magic 0x{magic:x}, version {}, length {length}",
            body[4]
        )));
    }

    let total = header_size + length;
    let Some(output) = output else {
        return Ok(total);
    };
    if input.len() < total {
        return Err(Error::index_out_of_bounds(format!(
            "input holds {} bytes, break data needs {total}",
            input.len()
        )));
    }
    if output.len() < total {
        return Err(Error::index_out_of_bounds(format!(
            "output holds {} bytes, need {total}",
            output.len()
        )));
    }

    swap_data_header(ds, input, Some(&mut output[..header_size]))?;

    let body = &body[..length];
    let out = &mut output[header_size..total];
    out.fill(0);

    let section = |i: usize| -> Result<Range<usize>> {
        let s = Section {
            offset: word(i)?,
            len: word(i + 1)?,
        };
        let range = s.range();
        if range.end > length {
            return Err(Error::index_out_of_bounds(format!(
                "section at {}+{} lies past the {length}-byte data",
                s.offset, s.len
            )));
        }
        Ok(range)
    };

    for table_word in [4, 6, 8, 10] {
        let range = section(table_word)?;
        if range.is_empty() {
            continue;
        }
        if range.len() < TABLE_TOP_LENGTH {
            return Err(Error::invalid_format("state table shorter than its header"));
        }
        let top = range.start..range.start + TABLE_TOP_LENGTH;
        let rows = top.end..range.end;
        ds.swap_array32(&body[top.clone()], &mut out[top])?;
        ds.swap_array16(&body[rows.clone()], &mut out[rows])?;
    }

    let trie = section(12)?;
    if !trie.is_empty() {
        swap_trie(ds, &body[trie.clone()], Some(&mut out[trie]))?;
    }

    let rules = section(14)?;
    ds.swap_array16(&body[rules.clone()], &mut out[rules])?;

    let statuses = section(16)?;
    ds.swap_array32(&body[statuses.clone()], &mut out[statuses])?;

    ds.swap_array32(&body[..HEADER_LENGTH], &mut out[..HEADER_LENGTH])?;
    out[4..8].copy_from_slice(&body[4..8]);

    Ok(total)
}

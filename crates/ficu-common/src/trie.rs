//! Version-1 `UTrie` with 16-bit data: lookup, construction and swapping.
//!
//! A trie maps every code point to a 16-bit value in two steps. The index
//! holds one entry per 32-code-point block; an entry is the offset (in
//! units of 4) of that block's values in the combined index+data array.
//!
//! Serialized layout (all fields in the file's byte order):
//!
//! ```text
//! u32 signature      "Trie" (0x54726965)
//! u32 options        bits 0..3 shift (5), 4..7 index shift (2), flags
//! i32 indexLength    u16 index entries
//! i32 dataLength     data entries (u16, or u32 with DATA_IS_32_BIT)
//! u16 index[indexLength]
//! u16 data[dataLength]
//! ```
//!
//! The first 2048 index entries cover the BMP, where the slots for
//! U+D800..U+DBFF describe lead surrogate *code units*. The values for those
//! code points as *code points* live in the 32 entries after the BMP index.
//! Supplementary code points are reached through the lead unit's value: a
//! folding function turns it into the index offset of 32 further entries
//! covering the 1024 trail units.

use std::collections::HashMap;

use bitflags::bitflags;
use tracing::warn;

use crate::error::{Error, Result};
use crate::swapper::{DataSwapper, Endianness};

pub const SHIFT: u32 = 5;
pub const INDEX_SHIFT: u32 = 2;
pub const DATA_BLOCK_LENGTH: usize = 1 << SHIFT;
pub const DATA_MASK: u32 = DATA_BLOCK_LENGTH as u32 - 1;
pub const BMP_INDEX_LENGTH: usize = 0x10000 >> SHIFT;
pub const LEAD_INDEX_DISP: usize = 0x2800 >> SHIFT;
pub const SURROGATE_BLOCK_COUNT: usize = 1 << (10 - SHIFT);
pub const DATA_GRANULARITY: usize = 1 << INDEX_SHIFT;
pub const SIGNATURE: u32 = 0x5472_6965;
pub const HEADER_LENGTH: usize = 16;

const OPTIONS_SHIFT_MASK: u32 = 0xf;
const OPTIONS_INDEX_SHIFT: u32 = 4;
const LATIN1_BLOCKS: usize = 0x100 >> SHIFT;
const LEAD_BLOCK_START: usize = 0xd800 >> SHIFT;
const LEAD_BLOCK_END: usize = 0xdc00 >> SHIFT;

bitflags! {
    /// Flag bits of the `options` header word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TrieOptions: u32 {
        const DATA_IS_32_BIT = 0x100;
        const LATIN1_IS_LINEAR = 0x200;
    }
}

/// Maps a lead surrogate unit's value to the index offset of its
/// supplementary block, or 0 when the lead has no supplementary data.
pub type FoldingFn = fn(u16) -> u16;

/// Folding used by break iterator data: bit 15 marks an offset in the low
/// 15 bits.
#[must_use]
pub fn fold_high_bit(value: u16) -> u16 {
    if value & 0x8000 != 0 { value & 0x7fff } else { 0 }
}

#[derive(Debug, Clone, Copy)]
struct RawHeader {
    signature: u32,
    options: u32,
    index_length: u32,
    data_length: u32,
}

impl RawHeader {
    fn read(bytes: &[u8], read_u32: impl Fn(&[u8], usize) -> Result<u32>) -> Result<Self> {
        if bytes.len() < HEADER_LENGTH {
            return Err(Error::index_out_of_bounds(format!(
                "trie needs a {HEADER_LENGTH}-byte header, have {} bytes",
                bytes.len()
            )));
        }
        Ok(Self {
            signature: read_u32(bytes, 0)?,
            options: read_u32(bytes, 4)?,
            index_length: read_u32(bytes, 8)?,
            data_length: read_u32(bytes, 12)?,
        })
    }

    fn flags(&self) -> TrieOptions {
        TrieOptions::from_bits_truncate(self.options)
    }

    /// Checks the structural constraints and returns the serialized size.
    fn validate(&self) -> Result<usize> {
        let index_length = self.index_length as i32;
        let data_length = self.data_length as i32;
        let ok = self.signature == SIGNATURE
            && self.options & OPTIONS_SHIFT_MASK == SHIFT
            && (self.options >> OPTIONS_INDEX_SHIFT) & OPTIONS_SHIFT_MASK == INDEX_SHIFT
            && index_length >= BMP_INDEX_LENGTH as i32
            && index_length as usize % SURROGATE_BLOCK_COUNT == 0
            && data_length >= DATA_BLOCK_LENGTH as i32
            && data_length as usize % DATA_GRANULARITY == 0
            && (!self.flags().contains(TrieOptions::LATIN1_IS_LINEAR)
                || data_length as usize >= DATA_BLOCK_LENGTH + 0x100);
        if !ok {
            return Err(Error::invalid_format(format!(
                "not a valid trie: signature 0x{:08x}, options 0x{:x}, \
                 indexLength {index_length}, dataLength {data_length}",
                self.signature, self.options
            )));
        }
        let unit = if self.flags().contains(TrieOptions::DATA_IS_32_BIT) { 4 } else { 2 };
        Ok(HEADER_LENGTH + 2 * index_length as usize + unit * data_length as usize)
    }
}

/// A read-only trie with 16-bit values.
#[derive(Debug, Clone)]
pub struct Trie16 {
    options: u32,
    index_length: usize,
    /// Index entries followed by data values.
    array: Vec<u16>,
    folding: FoldingFn,
}

impl PartialEq for Trie16 {
    fn eq(&self, other: &Self) -> bool {
        self.options == other.options
            && self.index_length == other.index_length
            && self.array == other.array
    }
}

impl Eq for Trie16 {}

impl Trie16 {
    /// Parse a serialized trie in the given byte order.
    ///
    /// Trailing bytes after the trie are ignored; use
    /// [`serialized_len`](Self::serialized_len) to find its end.
    pub fn from_bytes(bytes: &[u8], endian: Endianness, folding: FoldingFn) -> Result<Self> {
        let header = RawHeader::read(bytes, |b, at| {
            Ok(endian.read_u32([b[at], b[at + 1], b[at + 2], b[at + 3]]))
        })?;
        let size = header.validate()?;
        if header.flags().contains(TrieOptions::DATA_IS_32_BIT) {
            return Err(Error::invalid_format("trie holds 32-bit data, expected 16-bit"));
        }
        if bytes.len() < size {
            return Err(Error::index_out_of_bounds(format!(
                "trie needs {size} bytes, have {}",
                bytes.len()
            )));
        }
        let array: Vec<u16> = bytes[HEADER_LENGTH..size]
            .chunks_exact(2)
            .map(|p| endian.read_u16([p[0], p[1]]))
            .collect();
        let index_length = header.index_length as usize;
        if let Some(bad) = array[..index_length]
            .iter()
            .position(|&e| (usize::from(e) << INDEX_SHIFT) + DATA_BLOCK_LENGTH > array.len())
        {
            return Err(Error::invalid_format(format!(
                "trie index entry {bad} points past the data"
            ))
            .at(HEADER_LENGTH + 2 * bad));
        }
        Ok(Self {
            options: header.options,
            index_length,
            array,
            folding,
        })
    }

    /// Serialized size in bytes.
    #[must_use]
    pub fn serialized_len(&self) -> usize {
        HEADER_LENGTH + 2 * self.array.len()
    }

    /// Serialize in the given byte order.
    #[must_use]
    pub fn to_bytes(&self, endian: Endianness) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_len());
        out.extend_from_slice(&endian.u32_bytes(SIGNATURE));
        out.extend_from_slice(&endian.u32_bytes(self.options));
        // Lengths are bounded by the u16 index entries.
        out.extend_from_slice(&endian.u32_bytes(self.index_length as u32));
        out.extend_from_slice(&endian.u32_bytes(self.data_length() as u32));
        for &v in &self.array {
            out.extend_from_slice(&endian.u16_bytes(v));
        }
        out
    }

    #[must_use]
    pub fn options(&self) -> TrieOptions {
        TrieOptions::from_bits_truncate(self.options)
    }

    #[must_use]
    pub fn index_length(&self) -> usize {
        self.index_length
    }

    #[must_use]
    pub fn data_length(&self) -> usize {
        self.array.len() - self.index_length
    }

    /// The value of the all-initial first data block.
    #[must_use]
    pub fn initial_value(&self) -> u16 {
        self.array.get(self.index_length).copied().unwrap_or(0)
    }

    fn raw(&self, index_pos: usize, low: u32) -> u16 {
        self.array
            .get(index_pos)
            .and_then(|&e| self.array.get((usize::from(e) << INDEX_SHIFT) + low as usize))
            .copied()
            .unwrap_or_else(|| self.initial_value())
    }

    /// Value for a code point. Out-of-range input yields the initial value.
    #[must_use]
    pub fn get(&self, cp: u32) -> u16 {
        match cp {
            0xd800..=0xdbff => {
                self.raw(LEAD_INDEX_DISP + (cp >> SHIFT) as usize, cp & DATA_MASK)
            }
            0..=0xffff => self.raw((cp >> SHIFT) as usize, cp & DATA_MASK),
            0x10000..=0x10ffff => {
                let lead = 0xd7c0 + (cp >> 10);
                let trail = cp & 0x3ff;
                self.get_from_pair(self.get_from_lead(lead as u16), trail as u16)
            }
            _ => self.initial_value(),
        }
    }

    /// Value stored for a UTF-16 code unit, treating lead surrogates as
    /// units (their folding values) rather than as code points.
    #[must_use]
    pub fn get_from_lead(&self, unit: u16) -> u16 {
        let cp = u32::from(unit);
        self.raw((cp >> SHIFT) as usize, cp & DATA_MASK)
    }

    /// Value for a supplementary code point given its lead unit's value.
    #[must_use]
    pub fn get_from_pair(&self, lead_value: u16, trail: u16) -> u16 {
        let offset = usize::from((self.folding)(lead_value));
        if offset == 0 {
            return self.initial_value();
        }
        let trail = u32::from(trail) & 0x3ff;
        self.raw(offset + (trail >> SHIFT) as usize, trail & DATA_MASK)
    }
}

/// Mutable code point → value map that compiles to a [`Trie16`].
///
/// Lead surrogate units of the built trie carry `0x8000 | offset` for
/// supplementary blocks, to be read back with [`fold_high_bit`].
#[derive(Debug, Clone)]
pub struct TrieBuilder16 {
    initial: u16,
    blocks: Vec<Option<Box<[u16; DATA_BLOCK_LENGTH]>>>,
}

impl TrieBuilder16 {
    #[must_use]
    pub fn new(initial: u16) -> Self {
        Self {
            initial,
            blocks: vec![None; 0x110000 >> SHIFT],
        }
    }

    fn check(cp: u32) -> Result<()> {
        if cp > 0x10ffff {
            return Err(Error::illegal_argument(format!(
                "0x{cp:x} is not a code point"
            )));
        }
        Ok(())
    }

    pub fn set(&mut self, cp: u32, value: u16) -> Result<()> {
        Self::check(cp)?;
        let initial = self.initial;
        let block = self.blocks[(cp >> SHIFT) as usize]
            .get_or_insert_with(|| Box::new([initial; DATA_BLOCK_LENGTH]));
        block[(cp & DATA_MASK) as usize] = value;
        Ok(())
    }

    /// Set every code point in `start..=end`.
    pub fn set_range(&mut self, start: u32, end: u32, value: u16) -> Result<()> {
        Self::check(end)?;
        if start > end {
            return Err(Error::illegal_argument(format!(
                "empty range 0x{start:x}..=0x{end:x}"
            )));
        }
        let mut cp = start;
        while cp <= end {
            if cp & DATA_MASK == 0 && end - cp >= DATA_MASK {
                self.blocks[(cp >> SHIFT) as usize] = Some(Box::new([value; DATA_BLOCK_LENGTH]));
                cp += DATA_BLOCK_LENGTH as u32;
            } else {
                self.set(cp, value)?;
                cp += 1;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn get(&self, cp: u32) -> u16 {
        self.blocks
            .get((cp >> SHIFT) as usize)
            .and_then(Option::as_deref)
            .map_or(self.initial, |b| b[(cp & DATA_MASK) as usize])
    }

    fn block(&self, b: usize) -> [u16; DATA_BLOCK_LENGTH] {
        self.blocks[b]
            .as_deref()
            .copied()
            .unwrap_or([self.initial; DATA_BLOCK_LENGTH])
    }

    /// Compile into a trie with deduplicated data blocks, a linear
    /// Latin-1 range and shared supplementary index blocks.
    pub fn build(&self) -> Result<Trie16> {
        let initial_block = [self.initial; DATA_BLOCK_LENGTH];
        let mut data: Vec<u16> = initial_block.to_vec();
        let mut seen: HashMap<[u16; DATA_BLOCK_LENGTH], usize> = HashMap::new();
        seen.insert(initial_block, 0);

        // Data offsets (relative to the data start) for each index entry.
        let mut index = vec![0usize; BMP_INDEX_LENGTH + SURROGATE_BLOCK_COUNT];
        for (b, entry) in index.iter_mut().enumerate().take(LATIN1_BLOCKS) {
            let block = self.block(b);
            *entry = data.len();
            seen.entry(block).or_insert(data.len());
            data.extend_from_slice(&block);
        }
        for b in LATIN1_BLOCKS..BMP_INDEX_LENGTH {
            let offset = intern(&mut data, &mut seen, self.block(b));
            if (LEAD_BLOCK_START..LEAD_BLOCK_END).contains(&b) {
                index[BMP_INDEX_LENGTH + b - LEAD_BLOCK_START] = offset;
            } else {
                index[b] = offset;
            }
        }

        // Supplementary index blocks, shared between leads with equal data.
        let mut supp_seen: HashMap<[usize; SURROGATE_BLOCK_COUNT], usize> = HashMap::new();
        let mut lead_values = [self.initial; 1024];
        for (lead, lead_value) in lead_values.iter_mut().enumerate() {
            let first = BMP_INDEX_LENGTH + lead * SURROGATE_BLOCK_COUNT;
            if (first..first + SURROGATE_BLOCK_COUNT).all(|b| self.block(b) == initial_block) {
                continue;
            }
            let mut entries = [0usize; SURROGATE_BLOCK_COUNT];
            for (k, entry) in entries.iter_mut().enumerate() {
                *entry = intern(&mut data, &mut seen, self.block(first + k));
            }
            let position = match supp_seen.get(&entries) {
                Some(&p) => p,
                None => {
                    let p = index.len();
                    index.extend_from_slice(&entries);
                    supp_seen.insert(entries, p);
                    p
                }
            };
            *lead_value = u16::try_from(position)
                .ok()
                .filter(|&p| p <= 0x7fff)
                .map(|p| 0x8000 | p)
                .ok_or_else(|| Error::illegal_argument("too many supplementary blocks to fold"))?;
        }
        for (j, chunk) in lead_values.chunks_exact(DATA_BLOCK_LENGTH).enumerate() {
            let mut block = initial_block;
            block.copy_from_slice(chunk);
            index[LEAD_BLOCK_START + j] = intern(&mut data, &mut seen, block);
        }

        let index_length = index.len();
        let mut array = Vec::with_capacity(index_length + data.len());
        for offset in index {
            let entry = (index_length + offset) >> INDEX_SHIFT;
            array.push(u16::try_from(entry).map_err(|_| {
                Error::illegal_argument("trie data too large for 16-bit index entries")
            })?);
        }
        array.extend_from_slice(&data);

        Ok(Trie16 {
            options: SHIFT
                | (INDEX_SHIFT << OPTIONS_INDEX_SHIFT)
                | TrieOptions::LATIN1_IS_LINEAR.bits(),
            index_length,
            array,
            folding: fold_high_bit,
        })
    }
}

fn intern(
    data: &mut Vec<u16>,
    seen: &mut HashMap<[u16; DATA_BLOCK_LENGTH], usize>,
    block: [u16; DATA_BLOCK_LENGTH],
) -> usize {
    *seen.entry(block).or_insert_with(|| {
        let offset = data.len();
        data.extend_from_slice(&block);
        offset
    })
}

/// Swap a serialized trie (`utrie_swap`).
///
/// Returns the trie's size in bytes. With `output == None` only validates.
pub fn swap_trie(ds: &DataSwapper, input: &[u8], output: Option<&mut [u8]>) -> Result<usize> {
    let result = swap_trie_inner(ds, input, output);
    if let Err(err) = &result {
        warn!(error = %err, "swap_trie: cannot swap trie data");
    }
    result
}

fn swap_trie_inner(ds: &DataSwapper, input: &[u8], output: Option<&mut [u8]>) -> Result<usize> {
    let header = RawHeader::read(input, |b, at| ds.read_u32(b, at))?;
    let size = header.validate()?;
    if input.len() < size {
        return Err(Error::index_out_of_bounds(format!(
            "trie needs {size} bytes, have {}",
            input.len()
        )));
    }
    let Some(output) = output else {
        return Ok(size);
    };
    if output.len() < size {
        return Err(Error::index_out_of_bounds(format!(
            "trie output holds {} bytes, need {size}",
            output.len()
        )));
    }

    ds.swap_array32(&input[..HEADER_LENGTH], &mut output[..HEADER_LENGTH])?;
    if header.flags().contains(TrieOptions::DATA_IS_32_BIT) {
        let data_start = HEADER_LENGTH + 2 * header.index_length as usize;
        ds.swap_array16(
            &input[HEADER_LENGTH..data_start],
            &mut output[HEADER_LENGTH..data_start],
        )?;
        ds.swap_array32(&input[data_start..size], &mut output[data_start..size])?;
    } else {
        ds.swap_array16(&input[HEADER_LENGTH..size], &mut output[HEADER_LENGTH..size])?;
    }
    Ok(size)
}

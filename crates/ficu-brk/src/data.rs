//! Binary break-iterator data: header, state tables and the loaded image.
//!
//! # Layout
//!
//! The image starts with a 96-byte header of 32-bit words:
//!
//! ```text
//! magic 0xb1a0 | formatVersion[4] | length | catCount
//! fTable, fTableLen | rTable, rTableLen | sfTable, sfTableLen | srTable, srTableLen
//! trie, trieLen | ruleSource, ruleSourceLen | statusTable, statusTableLen
//! reserved[6]
//! ```
//!
//! Offsets are relative to the start of the header. A state table is a
//! 16-byte top (`numStates`, `rowLen`, `flags`, reserved) followed by
//! `numStates` rows of 16-bit words: `accepting`, `lookAhead`, `tagIdx`,
//! reserved, then one next-state entry per character category.

use std::fmt::{self, Write as _};
use std::ops::Range;

use bitflags::bitflags;
use ficu_common::trie::{Trie16, fold_high_bit};
use ficu_common::{DataHeader, Endianness, Error, Result};
use tracing::{debug, trace, warn};

pub const RBBI_MAGIC: u32 = 0xb1a0;
pub const FORMAT_VERSION_MAJOR: u8 = 3;
pub const FORMAT_VERSION: [u8; 4] = [3, 1, 0, 0];
/// Data format tag in the ICU data header.
pub const DATA_FORMAT: [u8; 4] = *b"Brk ";
pub const HEADER_LENGTH: usize = 96;
pub const TABLE_TOP_LENGTH: usize = 16;
pub const ROW_HEADER_WORDS: usize = 4;

pub const STOP_STATE: u16 = 0;
pub const START_STATE: u16 = 1;
/// Category of characters in no set.
pub const OTHER_CATEGORY: u16 = 0;
/// Pseudo-category fed to the state machine at end of input.
pub const EOF_CATEGORY: u16 = 1;
/// Pseudo-category fed before the first character when a table has
/// [`TableFlags::BOF_REQUIRED`].
pub const BOF_CATEGORY: u16 = 2;
/// Category bit marking characters handled by a dictionary.
pub const DICTIONARY_BIT: u16 = 0x4000;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TableFlags: u32 {
        /// A completed look-ahead match ends the match immediately.
        const LOOKAHEAD_HARD_BREAK = 1;
        /// Run the machine on the BOF pseudo-category before the first
        /// character.
        const BOF_REQUIRED = 2;
    }
}

/// One offset/length pair of the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Section {
    pub offset: u32,
    pub len: u32,
}

impl Section {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        let start = self.offset as usize;
        start..start + self.len as usize
    }
}

/// The fixed 96-byte header of a break data image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RbbiHeader {
    pub magic: u32,
    pub format_version: [u8; 4],
    /// Total image length in bytes, header included.
    pub length: u32,
    pub cat_count: u32,
    pub forward: Section,
    pub reverse: Section,
    pub safe_forward: Section,
    pub safe_reverse: Section,
    pub trie: Section,
    pub rule_source: Section,
    pub status_table: Section,
}

impl RbbiHeader {
    /// Read the header fields without validating them.
    pub fn parse(bytes: &[u8], endian: Endianness) -> Result<Self> {
        if bytes.len() < HEADER_LENGTH {
            return Err(Error::index_out_of_bounds(format!(
                "break data needs a {HEADER_LENGTH}-byte header, have {} bytes",
                bytes.len()
            )));
        }
        let word = |i: usize| {
            let at = 4 * i;
            endian.read_u32([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        let section = |i: usize| Section {
            offset: word(i),
            len: word(i + 1),
        };
        Ok(Self {
            magic: word(0),
            format_version: [bytes[4], bytes[5], bytes[6], bytes[7]],
            length: word(2),
            cat_count: word(3),
            forward: section(4),
            reverse: section(6),
            safe_forward: section(8),
            safe_reverse: section(10),
            trie: section(12),
            rule_source: section(14),
            status_table: section(16),
        })
    }

    #[must_use]
    pub fn to_bytes(&self, endian: Endianness) -> [u8; HEADER_LENGTH] {
        let mut words = [0u32; HEADER_LENGTH / 4];
        words[0] = self.magic;
        words[2] = self.length;
        words[3] = self.cat_count;
        for (i, s) in self.sections().iter().enumerate() {
            words[4 + 2 * i] = s.1.offset;
            words[5 + 2 * i] = s.1.len;
        }
        let mut out = [0u8; HEADER_LENGTH];
        for (chunk, w) in out.chunks_exact_mut(4).zip(words) {
            chunk.copy_from_slice(&endian.u32_bytes(w));
        }
        out[4..8].copy_from_slice(&self.format_version);
        out
    }

    /// The seven sections in header order, with their names.
    #[must_use]
    pub fn sections(&self) -> [(&'static str, Section); 7] {
        [
            ("forward table", self.forward),
            ("reverse table", self.reverse),
            ("safe forward table", self.safe_forward),
            ("safe reverse table", self.safe_reverse),
            ("trie", self.trie),
            ("rule source", self.rule_source),
            ("status table", self.status_table),
        ]
    }
}

/// A row of a state table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row<'a> {
    words: &'a [i16],
}

impl Row<'_> {
    /// `-1` for an ordinary accepting state, a look-ahead rule number when a
    /// pending look-ahead completes here, 0 otherwise.
    #[must_use]
    pub fn accepting(&self) -> i16 {
        self.words[0]
    }

    #[must_use]
    pub fn lookahead(&self) -> i16 {
        self.words[1]
    }

    /// Index of this state's rule status group.
    #[must_use]
    pub fn tag_idx(&self) -> i16 {
        self.words[2]
    }

    /// Next state for a category. Unknown categories lead to the stop state.
    #[must_use]
    pub fn next_state(&self, category: u16) -> u16 {
        self.words
            .get(ROW_HEADER_WORDS + usize::from(category))
            .map_or(STOP_STATE, |&s| s as u16)
    }

    pub fn next_states(&self) -> impl Iterator<Item = u16> + '_ {
        self.words[ROW_HEADER_WORDS..].iter().map(|&s| s as u16)
    }
}

/// A state transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTable {
    flags: TableFlags,
    cat_count: usize,
    /// All rows, `ROW_HEADER_WORDS + cat_count` words each.
    words: Vec<i16>,
}

impl StateTable {
    /// An empty table holding only the stop state.
    #[must_use]
    pub fn new(cat_count: usize, flags: TableFlags) -> Self {
        Self {
            flags,
            cat_count,
            words: vec![0; ROW_HEADER_WORDS + cat_count],
        }
    }

    /// Append a row and return its state number.
    pub fn push_row(
        &mut self,
        accepting: i16,
        lookahead: i16,
        tag_idx: i16,
        next: &[u16],
    ) -> Result<u16> {
        if next.len() != self.cat_count {
            return Err(Error::illegal_argument(format!(
                "row has {} next states, table has {} categories",
                next.len(),
                self.cat_count
            )));
        }
        let state = u16::try_from(self.num_states())
            .map_err(|_| Error::illegal_argument("too many states"))?;
        self.words.extend_from_slice(&[accepting, lookahead, tag_idx, 0]);
        self.words.extend(next.iter().map(|&s| s as i16));
        Ok(state)
    }

    /// Parse a table section; `bytes` is exactly the section.
    pub fn parse(bytes: &[u8], endian: Endianness, cat_count: usize) -> Result<Self> {
        if bytes.len() < TABLE_TOP_LENGTH {
            return Err(Error::invalid_format("state table shorter than its header"));
        }
        let word =
            |at: usize| endian.read_u32([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]]);
        let num_states = word(0) as usize;
        let row_len = word(4) as usize;
        let flags = TableFlags::from_bits_truncate(word(8));
        let expected_row = 2 * (ROW_HEADER_WORDS + cat_count);
        if row_len != expected_row {
            return Err(Error::invalid_format(format!(
                "row length {row_len} does not match {cat_count} categories \
                 (expected {expected_row})"
            ))
            .at(4));
        }
        let expected_len = num_states
            .checked_mul(row_len)
            .and_then(|n| n.checked_add(TABLE_TOP_LENGTH));
        if expected_len != Some(bytes.len()) {
            return Err(Error::invalid_format(format!(
                "{num_states} states of {row_len} bytes do not fill a {}-byte table",
                bytes.len()
            )));
        }
        if num_states < 2 {
            return Err(Error::invalid_format("state table needs stop and start states"));
        }
        let words: Vec<i16> = bytes[TABLE_TOP_LENGTH..]
            .chunks_exact(2)
            .map(|p| endian.read_u16([p[0], p[1]]) as i16)
            .collect();
        let table = Self {
            flags,
            cat_count,
            words,
        };
        for state in 0..num_states {
            let row = table.row_at(state);
            if let Some(bad) = row.next_states().find(|&s| usize::from(s) >= num_states) {
                return Err(Error::invalid_format(format!(
                    "state {state} transitions to {bad}, table has {num_states} states"
                )));
            }
        }
        Ok(table)
    }

    fn row_words(&self) -> usize {
        ROW_HEADER_WORDS + self.cat_count
    }

    fn row_at(&self, state: usize) -> Row<'_> {
        let start = state * self.row_words();
        Row {
            words: &self.words[start..start + self.row_words()],
        }
    }

    #[must_use]
    pub fn row(&self, state: u16) -> Option<Row<'_>> {
        (usize::from(state) < self.num_states()).then(|| self.row_at(usize::from(state)))
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.words
            .chunks_exact(self.row_words())
            .map(|words| Row { words })
    }

    #[must_use]
    pub fn num_states(&self) -> usize {
        self.words.len() / self.row_words()
    }

    /// Row length in bytes.
    #[must_use]
    pub fn row_len(&self) -> usize {
        2 * self.row_words()
    }

    #[must_use]
    pub fn flags(&self) -> TableFlags {
        self.flags
    }

    #[must_use]
    pub fn cat_count(&self) -> usize {
        self.cat_count
    }

    #[must_use]
    pub fn serialized_len(&self) -> usize {
        TABLE_TOP_LENGTH + 2 * self.words.len()
    }

    #[must_use]
    pub fn to_bytes(&self, endian: Endianness) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.serialized_len());
        out.extend_from_slice(&endian.u32_bytes(self.num_states() as u32));
        out.extend_from_slice(&endian.u32_bytes(self.row_len() as u32));
        out.extend_from_slice(&endian.u32_bytes(self.flags.bits()));
        out.extend_from_slice(&[0; 4]);
        for &w in &self.words {
            out.extend_from_slice(&endian.u16_bytes(w as u16));
        }
        out
    }
}

impl fmt::Display for StateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " State | Acc  LA  Tag |")?;
        for c in 0..self.cat_count {
            write!(f, "{c:>4}")?;
        }
        writeln!(f)?;
        writeln!(f, "{}", "-".repeat(22 + 4 * self.cat_count))?;
        for (state, row) in self.rows().enumerate() {
            write!(
                f,
                "{state:>6} |{:>4}{:>4}{:>5} |",
                row.accepting(),
                row.lookahead(),
                row.tag_idx()
            )?;
            for next in row.next_states() {
                write!(f, "{next:>4}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A validated, immutable break data image.
///
/// Share one instance between iterators with `Arc<RbbiData>`. Two images
/// compare equal when they hold the same tables, trie, rules and statuses,
/// whatever their byte order.
#[derive(Debug, Clone)]
pub struct RbbiData {
    data_header: Option<DataHeader>,
    endian: Endianness,
    header: RbbiHeader,
    forward: StateTable,
    reverse: Option<StateTable>,
    safe_forward: Option<StateTable>,
    safe_reverse: Option<StateTable>,
    trie: Trie16,
    rule_source: String,
    status_table: Vec<i32>,
}

impl PartialEq for RbbiData {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
            && self.forward == other.forward
            && self.reverse == other.reverse
            && self.safe_forward == other.safe_forward
            && self.safe_reverse == other.safe_reverse
            && self.trie == other.trie
            && self.rule_source == other.rule_source
            && self.status_table == other.status_table
    }
}

impl Eq for RbbiData {}

impl RbbiData {
    /// Load a complete ICU data file (`Brk ` format, major version 3).
    pub fn from_udata(bytes: &[u8]) -> Result<Self> {
        let result = Self::from_udata_inner(bytes);
        if let Err(err) = &result {
            warn!(error = %err, "rejecting break iterator data file");
        }
        result
    }

    fn from_udata_inner(bytes: &[u8]) -> Result<Self> {
        let header = DataHeader::parse(bytes)?;
        if header.info.data_format != DATA_FORMAT
            || header.info.format_version[0] != FORMAT_VERSION_MAJOR
        {
            return Err(Error::invalid_format(format!(
                "data format {:?} version {} is not break iterator data",
                header.data_format_str(),
                header.info.format_version[0]
            )));
        }
        let body = &bytes[usize::from(header.header_size)..];
        let mut data = Self::from_raw_inner(body, header.info.endianness)?;
        data.data_header = Some(header);
        Ok(data)
    }

    /// Load bare break data (no ICU data header) in the given byte order.
    pub fn from_raw(bytes: &[u8], endian: Endianness) -> Result<Self> {
        let result = Self::from_raw_inner(bytes, endian);
        if let Err(err) = &result {
            warn!(error = %err, "rejecting break iterator data");
        }
        result
    }

    fn from_raw_inner(bytes: &[u8], endian: Endianness) -> Result<Self> {
        let header = RbbiHeader::parse(bytes, endian)?;
        if header.magic != RBBI_MAGIC {
            return Err(Error::invalid_format(format!(
                "bad magic 0x{:x}, expected 0x{RBBI_MAGIC:x}",
                header.magic
            ))
            .at(0));
        }
        if header.format_version[0] != FORMAT_VERSION_MAJOR {
            return Err(Error::invalid_format(format!(
                "unsupported format version {}",
                header.format_version[0]
            ))
            .at(4));
        }
        let length = header.length as usize;
        if length < HEADER_LENGTH {
            return Err(Error::invalid_format(format!(
                "declared length {length} is shorter than the header"
            ))
            .at(8));
        }
        if length > bytes.len() {
            return Err(Error::index_out_of_bounds(format!(
                "declared length {length} exceeds the {} available bytes",
                bytes.len()
            )));
        }
        if header.cat_count <= u32::from(BOF_CATEGORY) {
            return Err(Error::invalid_format(format!(
                "{} categories leave no room for EOF and BOF",
                header.cat_count
            ))
            .at(12));
        }
        for (name, section) in header.sections() {
            if section.is_empty() {
                continue;
            }
            let end = u64::from(section.offset) + u64::from(section.len);
            if (section.offset as usize) < HEADER_LENGTH || end > length as u64 {
                return Err(Error::invalid_format(format!(
                    "{name} at {}+{} lies outside the data",
                    section.offset, section.len
                )));
            }
        }

        let cat_count = header.cat_count as usize;
        let table = |section: Section, name: &str| -> Result<Option<StateTable>> {
            if section.is_empty() {
                return Ok(None);
            }
            let table = StateTable::parse(&bytes[section.range()], endian, cat_count)
                .map_err(|e| Error::new(e.code(), format!("{name}: {}", e.detail())))?;
            trace!(name, states = table.num_states(), flags = ?table.flags(), "loaded state table");
            Ok(Some(table))
        };
        let forward = table(header.forward, "forward table")?
            .ok_or_else(|| Error::invalid_format("break data has no forward table"))?;
        let reverse = table(header.reverse, "reverse table")?;
        let safe_forward = table(header.safe_forward, "safe forward table")?;
        let safe_reverse = table(header.safe_reverse, "safe reverse table")?;

        if header.trie.is_empty() {
            return Err(Error::invalid_format("break data has no category trie"));
        }
        let trie = Trie16::from_bytes(&bytes[header.trie.range()], endian, fold_high_bit)?;
        if trie.serialized_len() > header.trie.len as usize {
            return Err(Error::invalid_format("trie overruns its section"));
        }

        let rules = &bytes[header.rule_source.range()];
        if rules.len() % 2 != 0 {
            return Err(Error::invalid_format("rule source has an odd byte length"));
        }
        let units: Vec<u16> = rules
            .chunks_exact(2)
            .map(|p| endian.read_u16([p[0], p[1]]))
            .take_while(|&u| u != 0)
            .collect();
        let rule_source = String::from_utf16_lossy(&units);

        let status_bytes = &bytes[header.status_table.range()];
        if status_bytes.len() % 4 != 0 {
            return Err(Error::invalid_format("status table is not made of 32-bit values"));
        }
        let status_table: Vec<i32> = status_bytes
            .chunks_exact(4)
            .map(|p| endian.read_u32([p[0], p[1], p[2], p[3]]) as i32)
            .collect();
        let groups = status_groups(&status_table)?;
        for (name, table) in [
            ("forward table", Some(&forward)),
            ("reverse table", reverse.as_ref()),
            ("safe forward table", safe_forward.as_ref()),
            ("safe reverse table", safe_reverse.as_ref()),
        ] {
            let Some(table) = table else { continue };
            for (state, row) in table.rows().enumerate() {
                let tag = row.tag_idx();
                let ok = if status_table.is_empty() {
                    tag == 0
                } else {
                    usize::try_from(tag).is_ok_and(|t| groups.contains(&t))
                };
                if !ok {
                    return Err(Error::invalid_format(format!(
                        "{name} state {state} has tag index {tag} outside the status table"
                    )));
                }
            }
        }

        debug!(
            length,
            cat_count,
            states = forward.num_states(),
            statuses = status_table.len(),
            ?endian,
            "loaded break iterator data"
        );
        Ok(Self {
            data_header: None,
            endian,
            header,
            forward,
            reverse,
            safe_forward,
            safe_reverse,
            trie,
            rule_source,
            status_table,
        })
    }

    /// The ICU data header, when loaded with [`from_udata`](Self::from_udata).
    #[must_use]
    pub fn data_header(&self) -> Option<&DataHeader> {
        self.data_header.as_ref()
    }

    /// Byte order the image was loaded from.
    #[must_use]
    pub fn endianness(&self) -> Endianness {
        self.endian
    }

    #[must_use]
    pub fn header(&self) -> &RbbiHeader {
        &self.header
    }

    #[must_use]
    pub fn forward_table(&self) -> &StateTable {
        &self.forward
    }

    #[must_use]
    pub fn reverse_table(&self) -> Option<&StateTable> {
        self.reverse.as_ref()
    }

    #[must_use]
    pub fn safe_forward_table(&self) -> Option<&StateTable> {
        self.safe_forward.as_ref()
    }

    #[must_use]
    pub fn safe_reverse_table(&self) -> Option<&StateTable> {
        self.safe_reverse.as_ref()
    }

    #[must_use]
    pub fn trie(&self) -> &Trie16 {
        &self.trie
    }

    #[must_use]
    pub fn rule_source(&self) -> &str {
        &self.rule_source
    }

    #[must_use]
    pub fn rule_status_table(&self) -> &[i32] {
        &self.status_table
    }

    /// Number of character categories, including the EOF and BOF
    /// pseudo-categories.
    #[must_use]
    pub fn cat_count(&self) -> usize {
        self.header.cat_count as usize
    }

    /// Character category of a code point, without the dictionary bit.
    #[must_use]
    pub fn category(&self, cp: u32) -> u16 {
        self.trie.get(cp) & !DICTIONARY_BIT
    }

    /// Whether a code point is flagged for dictionary handling.
    #[must_use]
    pub fn is_dictionary_char(&self, cp: u32) -> bool {
        self.trie.get(cp) & DICTIONARY_BIT != 0
    }

    /// The status values of the group starting at `tag_idx`.
    #[must_use]
    pub fn status_group(&self, tag_idx: i16) -> &[i32] {
        let Ok(start) = usize::try_from(tag_idx) else {
            return &[];
        };
        let Some(&count) = self.status_table.get(start) else {
            return &[];
        };
        let count = usize::try_from(count).unwrap_or(0);
        self.status_table
            .get(start + 1..start + 1 + count)
            .unwrap_or(&[])
    }

    /// Human-readable listing of the header, tables, statuses and rules.
    #[must_use]
    pub fn dump(&self) -> String {
        let mut out = String::new();
        let h = &self.header;
        let v = h.format_version;
        // Writing to a String cannot fail.
        let _ = writeln!(out, "RBBI Data");
        let _ = writeln!(out, "   Magic:          {:x}", h.magic);
        let _ = writeln!(out, "   Format Version: {}.{}.{}.{}", v[0], v[1], v[2], v[3]);
        let _ = writeln!(out, "   Length:         {}", h.length);
        let _ = writeln!(out, "   Categories:     {}", h.cat_count);
        let _ = writeln!(out, "   Byte order:     {:?}", self.endian);
        for (name, s) in h.sections() {
            let _ = writeln!(out, "   {name:<19} offset {:>6}  length {:>6}", s.offset, s.len);
        }
        for (name, table) in [
            ("Forward", Some(&self.forward)),
            ("Reverse", self.reverse.as_ref()),
            ("Safe Forward", self.safe_forward.as_ref()),
            ("Safe Reverse", self.safe_reverse.as_ref()),
        ] {
            let _ = writeln!(out);
            match table {
                Some(table) => {
                    let _ =
                        writeln!(out, "{name} State Transition Table (flags {:?})", table.flags());
                    let _ = write!(out, "{table}");
                }
                None => {
                    let _ = writeln!(out, "{name} State Transition Table: none");
                }
            }
        }
        let _ = writeln!(out, "\nRule Status Table");
        let mut i = 0;
        while i < self.status_table.len() {
            let group = self.status_group(i as i16);
            let _ = writeln!(out, "{i:>6}: {group:?}");
            i += group.len() + 1;
        }
        let _ = writeln!(out, "\nRule Source\n{}", self.rule_source);
        out
    }
}

/// Start indices of the status groups; each group is a count followed by
/// that many values.
fn status_groups(table: &[i32]) -> Result<Vec<usize>> {
    let mut starts = Vec::new();
    let mut i = 0;
    while i < table.len() {
        let count = usize::try_from(table[i]).ok().filter(|&c| c >= 1);
        match count {
            Some(count) if i + 1 + count <= table.len() => {
                starts.push(i);
                i += 1 + count;
            }
            _ => {
                return Err(Error::invalid_format(format!(
                    "malformed rule status group at index {i}"
                ))
                .at(4 * i));
            }
        }
    }
    Ok(starts)
}

//! Serializer for break data images.

use ficu_common::{CharsetFamily, DataHeader, Endianness, Error, Result, Trie16};

use crate::data::{
    DATA_FORMAT, FORMAT_VERSION, HEADER_LENGTH, RBBI_MAGIC, RbbiData, RbbiHeader, Section,
    StateTable,
};

fn align8(n: usize) -> usize {
    n.div_ceil(8) * 8
}

/// Assembles state tables, a category trie, rule source and rule status
/// values into a break data image.
///
/// Sections are laid out after the header in header order, each starting
/// on an 8-byte boundary.
#[derive(Debug, Clone)]
pub struct RbbiDataBuilder {
    cat_count: u32,
    forward: Option<StateTable>,
    reverse: Option<StateTable>,
    safe_forward: Option<StateTable>,
    safe_reverse: Option<StateTable>,
    trie: Option<Trie16>,
    rule_source: String,
    status_table: Vec<i32>,
    data_version: [u8; 4],
    copyright: Option<String>,
}

impl RbbiDataBuilder {
    #[must_use]
    pub fn new(cat_count: u32) -> Self {
        Self {
            cat_count,
            forward: None,
            reverse: None,
            safe_forward: None,
            safe_reverse: None,
            trie: None,
            rule_source: String::new(),
            status_table: vec![1, 0],
            data_version: [0; 4],
            copyright: None,
        }
    }

    #[must_use]
    pub fn forward_table(mut self, table: StateTable) -> Self {
        self.forward = Some(table);
        self
    }

    #[must_use]
    pub fn reverse_table(mut self, table: StateTable) -> Self {
        self.reverse = Some(table);
        self
    }

    #[must_use]
    pub fn safe_forward_table(mut self, table: StateTable) -> Self {
        self.safe_forward = Some(table);
        self
    }

    #[must_use]
    pub fn safe_reverse_table(mut self, table: StateTable) -> Self {
        self.safe_reverse = Some(table);
        self
    }

    #[must_use]
    pub fn trie(mut self, trie: Trie16) -> Self {
        self.trie = Some(trie);
        self
    }

    #[must_use]
    pub fn rule_source(mut self, rules: &str) -> Self {
        self.rule_source = rules.to_string();
        self
    }

    /// Rule status groups: a count followed by that many values, repeated.
    /// Defaults to a single group holding status 0.
    #[must_use]
    pub fn status_table(mut self, statuses: Vec<i32>) -> Self {
        self.status_table = statuses;
        self
    }

    /// Unicode/data version recorded in the ICU data header.
    #[must_use]
    pub fn data_version(mut self, version: [u8; 4]) -> Self {
        self.data_version = version;
        self
    }

    #[must_use]
    pub fn copyright(mut self, copyright: &str) -> Self {
        self.copyright = Some(copyright.to_string());
        self
    }

    /// Serialize the bare image (no ICU data header).
    pub fn to_raw_bytes(&self, endian: Endianness) -> Result<Vec<u8>> {
        let Some(trie) = &self.trie else {
            return Err(Error::illegal_argument("break data needs a category trie"));
        };
        for table in [&self.forward, &self.reverse, &self.safe_forward, &self.safe_reverse]
            .into_iter()
            .flatten()
        {
            if table.cat_count() != self.cat_count as usize {
                return Err(Error::illegal_argument(format!(
                    "state table has {} categories, builder has {}",
                    table.cat_count(),
                    self.cat_count
                )));
            }
        }

        // Each part is (contents, length recorded in the header).
        let whole = |bytes: Vec<u8>| {
            let len = bytes.len();
            (bytes, len)
        };
        let table = |t: &Option<StateTable>| {
            whole(t.as_ref().map(|t| t.to_bytes(endian)).unwrap_or_default())
        };

        let mut rules = Vec::with_capacity(2 * (self.rule_source.len() + 1));
        for unit in self.rule_source.encode_utf16() {
            rules.extend_from_slice(&endian.u16_bytes(unit));
        }
        let rules_len = rules.len();
        rules.extend_from_slice(&[0, 0]);

        let statuses: Vec<u8> = self
            .status_table
            .iter()
            .flat_map(|&s| endian.u32_bytes(s as u32))
            .collect();

        let parts = [
            table(&self.forward),
            table(&self.reverse),
            table(&self.safe_forward),
            table(&self.safe_reverse),
            whole(trie.to_bytes(endian)),
            (rules, rules_len),
            whole(statuses),
        ];

        let mut sections = [Section::default(); 7];
        let mut out = vec![0u8; HEADER_LENGTH];
        for ((bytes, len), section) in parts.iter().zip(sections.iter_mut()) {
            let offset = out.len();
            if *len > 0 {
                *section = Section {
                    offset: to_u32(offset)?,
                    len: to_u32(*len)?,
                };
            }
            out.extend_from_slice(bytes);
            out.resize(align8(out.len()), 0);
        }

        let header = RbbiHeader {
            magic: RBBI_MAGIC,
            format_version: FORMAT_VERSION,
            length: to_u32(out.len())?,
            cat_count: self.cat_count,
            forward: sections[0],
            reverse: sections[1],
            safe_forward: sections[2],
            safe_reverse: sections[3],
            trie: sections[4],
            rule_source: sections[5],
            status_table: sections[6],
        };
        out[..HEADER_LENGTH].copy_from_slice(&header.to_bytes(endian));
        Ok(out)
    }

    /// Serialize as a complete ICU data file with a `Brk ` data header.
    pub fn to_udata_bytes(&self, endian: Endianness, charset: CharsetFamily) -> Result<Vec<u8>> {
        let mut header = DataHeader::new(DATA_FORMAT, FORMAT_VERSION, self.data_version);
        if let Some(copyright) = &self.copyright {
            header = header.with_copyright(copyright.as_str());
        }
        let mut out = header.to_bytes(endian, charset)?;
        out.extend_from_slice(&self.to_raw_bytes(endian)?);
        Ok(out)
    }

    /// Serialize in native byte order and load the result, validating it.
    pub fn build(&self) -> Result<RbbiData> {
        RbbiData::from_raw(&self.to_raw_bytes(Endianness::NATIVE)?, Endianness::NATIVE)
    }
}

fn to_u32(n: usize) -> Result<u32> {
    u32::try_from(n).map_err(|_| Error::illegal_argument("break data exceeds 4 GiB"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TableFlags;
    use ficu_common::TrieBuilder16;

    fn builder() -> RbbiDataBuilder {
        let mut fwd = StateTable::new(3, TableFlags::empty());
        fwd.push_row(0, 0, 0, &[2, 0, 0]).unwrap();
        fwd.push_row(-1, 0, 0, &[0, 0, 0]).unwrap();
        RbbiDataBuilder::new(3)
            .forward_table(fwd)
            .trie(TrieBuilder16::new(0).build().unwrap())
            .rule_source("[^]; \u{e9}")
    }

    #[test]
    fn sections_are_aligned_and_ordered() {
        let bytes = builder().to_raw_bytes(Endianness::Little).unwrap();
        let header = RbbiHeader::parse(&bytes, Endianness::Little).unwrap();
        assert_eq!(header.length as usize, bytes.len());
        assert_eq!(header.forward.offset as usize, HEADER_LENGTH);
        assert!(header.reverse.is_empty());
        let mut last = 0;
        for (_, s) in header.sections() {
            if s.is_empty() {
                continue;
            }
            assert_eq!(s.offset % 8, 0);
            assert!(s.offset >= last);
            last = s.offset + s.len;
        }
        // Six UTF-16 units, terminator not counted.
        assert_eq!(header.rule_source.len, 12);
        assert_eq!(header.status_table.len, 8);
    }

    #[test]
    fn category_count_must_match_tables() {
        let err = RbbiDataBuilder::new(5)
            .forward_table(StateTable::new(3, TableFlags::empty()))
            .trie(TrieBuilder16::new(0).build().unwrap())
            .to_raw_bytes(Endianness::Big)
            .unwrap_err();
        assert_eq!(err.code(), ficu_common::ErrorCode::IllegalArgumentError);
    }

    #[test]
    fn build_round_trips_rule_source() {
        let data = builder().build().unwrap();
        assert_eq!(data.rule_source(), "[^]; \u{e9}");
        assert_eq!(data.rule_status_table(), &[1, 0]);
    }
}

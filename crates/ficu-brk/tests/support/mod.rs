//! Shared break data for integration tests and benches.

#![allow(dead_code)]

use ficu_brk::data::DICTIONARY_BIT;
use ficu_brk::{RbbiDataBuilder, StateTable, TableFlags};
use ficu_common::{CharsetFamily, Endianness, TrieBuilder16};

pub const WORD_NONE: i32 = 0;
pub const WORD_NUMBER: i32 = 100;
pub const WORD_LETTER: i32 = 200;
pub const WORD_IDEO: i32 = 400;

pub const WORD_RULES: &str = "\
$Letter  = [\\p{Alphabetic} - \\p{Ideographic}];
$Numeric = [0-9];
$Ideo    = [\\p{Ideographic}];
$Space   = [\\p{White_Space}];
($Letter | $Numeric)* $Letter ($Letter | $Numeric)* {200};
$Numeric+ {100};
$Ideo {400};
$Space+;
";

/// A small word-break rule set: letters (with digits), numbers, single
/// ideographs, runs of spaces, everything else one character at a time.
///
/// Categories: 0 other, 1 EOF, 2 BOF, 3 letter, 4 digit, 5 space,
/// 6 ideograph.
pub fn word_builder() -> RbbiDataBuilder {
    let mut fwd = StateTable::new(7, TableFlags::empty());
    // 1 start
    fwd.push_row(0, 0, 0, &[6, 0, 0, 2, 3, 4, 5]).unwrap();
    // 2 word containing a letter
    fwd.push_row(-1, 0, 4, &[0, 0, 0, 2, 2, 0, 0]).unwrap();
    // 3 digits only
    fwd.push_row(-1, 0, 2, &[0, 0, 0, 2, 3, 0, 0]).unwrap();
    // 4 spaces
    fwd.push_row(-1, 0, 0, &[0, 0, 0, 0, 0, 4, 0]).unwrap();
    // 5 ideograph
    fwd.push_row(-1, 0, 6, &[0; 7]).unwrap();
    // 6 other
    fwd.push_row(-1, 0, 0, &[0; 7]).unwrap();

    // Reverse and safe tables mirror the forward rules; they are carried
    // through loading and swapping.
    let mut rev = StateTable::new(7, TableFlags::empty());
    rev.push_row(0, 0, 0, &[3, 0, 0, 2, 2, 4, 3]).unwrap();
    rev.push_row(-1, 0, 0, &[0, 0, 0, 2, 2, 0, 0]).unwrap();
    rev.push_row(-1, 0, 0, &[0; 7]).unwrap();
    rev.push_row(-1, 0, 0, &[0, 0, 0, 0, 0, 4, 0]).unwrap();
    let mut safe = StateTable::new(7, TableFlags::empty());
    safe.push_row(0, 0, 0, &[0, 0, 0, 2, 2, 0, 0]).unwrap();
    safe.push_row(-1, 0, 0, &[0, 0, 0, 2, 2, 0, 0]).unwrap();

    let mut trie = TrieBuilder16::new(0);
    trie.set_range(u32::from(b'A'), u32::from(b'Z'), 3).unwrap();
    trie.set_range(u32::from(b'a'), u32::from(b'z'), 3).unwrap();
    trie.set_range(0xc0, 0x24f, 3).unwrap();
    trie.set(0xd7, 0).unwrap();
    trie.set(0xf7, 0).unwrap();
    trie.set_range(0x391, 0x3c9, 3).unwrap();
    trie.set_range(0x410, 0x44f, 3).unwrap();
    trie.set_range(0xe01, 0xe2e, 3 | DICTIONARY_BIT).unwrap();
    trie.set_range(u32::from(b'0'), u32::from(b'9'), 4).unwrap();
    for space in [0x09, 0x0a, 0x0d, 0x20, 0x3000] {
        trie.set(space, 5).unwrap();
    }
    trie.set_range(0x4e00, 0x9fff, 6).unwrap();
    trie.set_range(0x20000, 0x2a6df, 6).unwrap();

    RbbiDataBuilder::new(7)
        .forward_table(fwd)
        .reverse_table(rev)
        .safe_forward_table(safe.clone())
        .safe_reverse_table(safe)
        .trie(trie.build().unwrap())
        .rule_source(WORD_RULES)
        .status_table(vec![1, WORD_NONE, 1, WORD_NUMBER, 1, WORD_LETTER, 1, WORD_IDEO])
        .data_version([15, 1, 0, 0])
        .copyright("Copyright (C) 2026 ficu contributors")
}

pub fn word_file(endian: Endianness, charset: CharsetFamily) -> Vec<u8> {
    word_builder().to_udata_bytes(endian, charset).unwrap()
}

pub const SAMPLE_TEXT: &str = "The quick (\"brown\") fox can't jump 32.3 feet, right? \
    Ελληνικά κείμενο και русский текст. 你好世界 𠀀𠀁 สวัสดีครับ 2026\tend\n";

//! End-to-end runs of the `ficu-swap` modes against files on disk.

use std::path::Path;

use ficu_brk::{RbbiData, RbbiDataBuilder, StateTable, TableFlags};
use ficu_common::{CharsetFamily, DataHeader, Endianness, TrieBuilder16};
use ficu_tools::cli::{Mode, Opts};
use ficu_tools::run::{ToolError, run};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

const RULES: &str = "$Letter = [a-z];\n$Letter+ {200};\n";

/// Categories: 0 other, 1 EOF, 2 BOF, 3 letter.
fn letters_file(endian: Endianness) -> Vec<u8> {
    let mut fwd = StateTable::new(4, TableFlags::empty());
    fwd.push_row(0, 0, 0, &[3, 0, 0, 2]).unwrap();
    fwd.push_row(-1, 0, 2, &[0, 0, 0, 2]).unwrap();
    fwd.push_row(-1, 0, 0, &[0; 4]).unwrap();

    let mut trie = TrieBuilder16::new(0);
    trie.set_range(u32::from(b'a'), u32::from(b'z'), 3).unwrap();

    RbbiDataBuilder::new(4)
        .forward_table(fwd)
        .trie(trie.build().unwrap())
        .rule_source(RULES)
        .status_table(vec![1, 0, 1, 200])
        .data_version([15, 1, 0, 0])
        .copyright("Copyright (C) 2026 ficu contributors")
        .to_udata_bytes(endian, CharsetFamily::Ascii)
        .unwrap()
}

fn opts(mode: Mode, input: &Path, output: Option<&Path>, endian: Endianness) -> Opts {
    Opts {
        mode,
        endian,
        charset: CharsetFamily::Ascii,
        input: Some(input.to_path_buf()),
        output: output.map(Path::to_path_buf),
    }
}

fn run_to_string(opts: &Opts) -> Result<String, ToolError> {
    let mut out = Vec::new();
    run(opts, &mut out)?;
    Ok(String::from_utf8(out).unwrap())
}

#[test]
fn swap_to_big_endian_and_back() {
    let dir = TempDir::new().unwrap();
    let little = dir.path().join("word_le.brk");
    let big = dir.path().join("word_be.brk");
    let back = dir.path().join("word_back.brk");
    let original = letters_file(Endianness::Little);
    std::fs::write(&little, &original).unwrap();

    run_to_string(&opts(Mode::Swap, &little, Some(big.as_path()), Endianness::Big)).unwrap();
    let swapped = std::fs::read(&big).unwrap();
    assert_eq!(swapped.len(), original.len());
    assert_eq!(DataHeader::parse(&swapped).unwrap().info.endianness, Endianness::Big);
    assert_eq!(swapped, letters_file(Endianness::Big));

    let data = RbbiData::from_udata(&swapped).unwrap();
    assert_eq!(data.rule_source(), RULES);
    assert_eq!(data.category(u32::from(b'q')), 3);

    run_to_string(&opts(Mode::Swap, &big, Some(back.as_path()), Endianness::Little)).unwrap();
    assert_eq!(std::fs::read(&back).unwrap(), original);
}

#[test]
fn preflight_reports_total_size() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("word.brk");
    let bytes = letters_file(Endianness::Big);
    std::fs::write(&path, &bytes).unwrap();

    let report = run_to_string(&opts(Mode::Preflight, &path, None, Endianness::Little)).unwrap();
    assert_eq!(report, format!("{}\n", bytes.len()));
}

#[test]
fn info_lists_header_and_sections() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("word.brk");
    std::fs::write(&path, letters_file(Endianness::Little)).unwrap();

    let report = run_to_string(&opts(Mode::Info, &path, None, Endianness::NATIVE)).unwrap();
    assert!(report.contains("data format:     Brk "), "{report}");
    assert!(report.contains("data version:    15.1.0.0"), "{report}");
    assert!(report.contains("endianness:      Little"), "{report}");
    assert!(report.contains("copyright:       Copyright (C) 2026 ficu contributors"), "{report}");
    assert!(report.contains("categories:      4"), "{report}");
}

#[test]
fn dump_includes_rule_source() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("word.brk");
    std::fs::write(&path, letters_file(Endianness::Big)).unwrap();

    let report = run_to_string(&opts(Mode::Dump, &path, None, Endianness::NATIVE)).unwrap();
    assert!(report.starts_with("RBBI Data"), "{report}");
    assert!(report.contains("Byte order:     Big"), "{report}");
    assert!(report.ends_with(&format!("Rule Source\n{RULES}\n")), "{report}");
}

#[test]
fn missing_input_names_the_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.brk");
    let err = run_to_string(&opts(Mode::Info, &path, None, Endianness::NATIVE)).unwrap_err();
    assert!(matches!(err, ToolError::Io { .. }));
    assert!(err.to_string().contains("absent.brk"));
}

#[test]
fn non_break_data_is_rejected_and_output_untouched() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("other.dat");
    let output = dir.path().join("out.dat");
    let mut bytes = letters_file(Endianness::Little);
    // Rewrite the data format id ("Brk ") in the info block.
    bytes[12..16].copy_from_slice(b"Nrm2");
    std::fs::write(&input, &bytes).unwrap();

    let err = run_to_string(&opts(Mode::Swap, &input, Some(output.as_path()), Endianness::Big))
        .unwrap_err();
    match err {
        ToolError::Data { source, .. } => {
            assert_eq!(source.code(), ficu_common::ErrorCode::UnsupportedError)
        }
        other => panic!("unexpected error {other}"),
    }
    assert!(!output.exists());
}

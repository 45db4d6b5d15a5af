//! Benchmarks for loading, swapping and iterating break data.
//!
//! Run with: `cargo bench --package ficu-brk --bench break_bench`

#[path = "../tests/support/mod.rs"]
mod support;

use std::hint::black_box;
use std::sync::Arc;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use ficu_brk::{RbbiData, RuleBasedBreakIterator, swap_break_data};
use ficu_common::{CharsetFamily, DataSwapper, Endianness};
use support::{SAMPLE_TEXT, word_file};

fn bench_load(c: &mut Criterion) {
    let file = word_file(Endianness::NATIVE, CharsetFamily::Ascii);
    c.bench_function("rbbi_data/from_udata", |b| {
        b.iter(|| RbbiData::from_udata(black_box(&file)).unwrap())
    });
}

fn bench_swap(c: &mut Criterion) {
    let file = word_file(Endianness::Little, CharsetFamily::Ascii);
    let ds = DataSwapper::for_input_data(&file, Endianness::Big, CharsetFamily::Ascii).unwrap();
    let mut out = vec![0u8; file.len()];
    let mut group = c.benchmark_group("swap_break_data");
    group.throughput(Throughput::Bytes(file.len() as u64));
    group.bench_function("preflight", |b| {
        b.iter(|| swap_break_data(&ds, black_box(&file), None).unwrap())
    });
    group.bench_function("little_to_big", |b| {
        b.iter(|| swap_break_data(&ds, black_box(&file), Some(&mut out)).unwrap())
    });
    group.finish();
}

fn bench_iterate(c: &mut Criterion) {
    let data = Arc::new(
        RbbiData::from_udata(&word_file(Endianness::NATIVE, CharsetFamily::Ascii)).unwrap(),
    );
    let mut group = c.benchmark_group("break_iteration");
    for repeats in [1usize, 16, 256] {
        let text = SAMPLE_TEXT.repeat(repeats);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("next", text.len()), &text, |b, text| {
            let mut it = RuleBasedBreakIterator::new(Arc::clone(&data));
            b.iter(|| {
                it.set_text(black_box(text));
                let mut n = 0usize;
                while it.next().is_some() {
                    n += 1;
                }
                n
            })
        });
        group.bench_with_input(BenchmarkId::new("preceding", text.len()), &text, |b, text| {
            let mut it = RuleBasedBreakIterator::new(Arc::clone(&data));
            it.set_text(text);
            b.iter(|| {
                let mut pos = it.last();
                while let Some(p) = it.preceding(pos) {
                    pos = p;
                }
                pos
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_load, bench_swap, bench_iterate);
criterion_main!(benches);

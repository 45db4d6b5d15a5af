//! Benchmarks for compiling, formatting and parsing messages.
//!
//! Run with: `cargo bench --package ficu-fmt --bench message_bench`

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ficu_common::Locale;
use ficu_fmt::{Formattable, MessageFormat, MessageFormatOptions};

const FILE_COUNT: &str = concat!(
    "The disk \"{1}\" contains ",
    "{0,choice,0#no files|1#one file|1< {0,number,integer} files}.",
);
const PARTY: &str = concat!(
    "{host} {gender,select,",
    "female{invites {guests,plural,offset:1 =0{nobody} =1{{guest}} ",
    "one{{guest} and one other} other{{guest} and # others}} to her party} ",
    "other{invites {guests,plural,=0{nobody} other{# people}} to a party}}.",
);

fn compile(pattern: &str) -> MessageFormat {
    MessageFormat::with_options(pattern, &Locale::us(), MessageFormatOptions::default()).unwrap()
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("message/compile");
    for (name, pattern) in [("file_count", FILE_COUNT), ("party", PARTY)] {
        group.bench_with_input(BenchmarkId::from_parameter(name), pattern, |b, p| {
            b.iter(|| compile(black_box(p)))
        });
    }
    group.finish();
}

fn bench_format(c: &mut Criterion) {
    let file_count = compile(FILE_COUNT);
    let mut group = c.benchmark_group("message/format_file_count");
    for n in [0, 1, 12373] {
        let args = [Formattable::Long(n), Formattable::from("MyDisk")];
        group.bench_with_input(BenchmarkId::from_parameter(n), &args, |b, args| {
            b.iter(|| file_count.format(black_box(args)).unwrap())
        });
    }
    group.finish();

    let party = compile(PARTY);
    let args = [
        ("host", Formattable::from("Ann")),
        ("gender", Formattable::from("female")),
        ("guests", Formattable::Long(5)),
        ("guest", Formattable::from("Bo")),
    ];
    c.bench_function("message/format_named_nested", |b| {
        b.iter(|| party.format_named(black_box(&args)).unwrap())
    });
}

fn bench_parse(c: &mut Criterion) {
    let m = compile("{0} has {1,number} files, {2,choice,0#none|1#some}.");
    c.bench_function("message/parse", |b| {
        b.iter(|| m.parse(black_box("disk has 1,234 files, some.")).unwrap())
    });
}

criterion_group!(benches, bench_compile, bench_format, bench_parse);
criterion_main!(benches);

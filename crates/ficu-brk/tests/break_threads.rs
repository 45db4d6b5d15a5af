//! One shared break data image driving iterators on many threads.

mod support;

use std::sync::Arc;
use std::thread;

use ficu_brk::{RbbiData, RuleBasedBreakIterator};
use ficu_common::{CharsetFamily, Endianness};
use support::{SAMPLE_TEXT, word_file};

fn segment(data: &Arc<RbbiData>, text: &str) -> Vec<(usize, i32)> {
    let mut it = RuleBasedBreakIterator::new(Arc::clone(data));
    it.set_text(text);
    let mut out = Vec::new();
    while let Some(b) = it.next() {
        out.push((b, it.rule_status()));
    }
    out
}

#[test]
fn concurrent_iteration_matches_single_threaded() {
    let data = Arc::new(
        RbbiData::from_udata(&word_file(Endianness::NATIVE, CharsetFamily::Ascii)).unwrap(),
    );
    let texts: Vec<String> = (0..8)
        .map(|i| format!("{i} {}", SAMPLE_TEXT.repeat(i + 1)))
        .collect();
    let expected: Vec<_> = texts.iter().map(|t| segment(&data, t)).collect();

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let data = Arc::clone(&data);
            let texts = texts.clone();
            thread::spawn(move || {
                (0..50)
                    .map(|round| {
                        let i = (worker + round) % texts.len();
                        (i, segment(&data, &texts[i]))
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for (i, got) in handle.join().unwrap() {
            assert_eq!(got, expected[i]);
        }
    }
}

#[test]
fn cloned_iterators_are_independent() {
    let data = Arc::new(
        RbbiData::from_udata(&word_file(Endianness::NATIVE, CharsetFamily::Ascii)).unwrap(),
    );
    let mut a = RuleBasedBreakIterator::new(data);
    a.set_text("one two three");
    a.next();
    let mut b = a.clone();
    assert_eq!(b.next(), Some(4));
    assert_eq!(a.current(), 3);
    assert_eq!(a.last(), 13);
    assert_eq!(b.current(), 4);
}

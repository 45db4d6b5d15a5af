//! Shared formatters used from many threads at once.

use std::sync::Arc;
use std::thread;

use ficu_common::Locale;
use ficu_fmt::{
    Formattable, MessageFormat, MessageFormatOptions, TimeUnit, TimeUnitAmount, TimeUnitFormat,
    TimeUnitStyle,
};

const PATTERNS: [&str; 4] = [
    "{0,choice,0#no files|1#one file|1< {0,number,integer} files} on {1}",
    "{1}: {0} / {0,number,percent} / {0,spellout}",
    "{1} has {0,plural,=1{one item} other{# items}} as of {2,date,short}",
    "{1} {0,ordinal} {0,duration}",
];

fn args(i: i32) -> Vec<Formattable> {
    vec![
        Formattable::Long(i * 37 % 5000),
        Formattable::from(format!("disk{i}")),
        Formattable::Date(1e12 + f64::from(i) * 86_400_000.0),
    ]
}

#[test]
fn concurrent_formatting_matches_single_threaded() {
    let locales = ["en_US", "de_DE", "fr_FR", "ja_JP"];
    let messages: Vec<Arc<MessageFormat>> = locales
        .iter()
        .flat_map(|id| {
            let locale = Locale::new(id).unwrap();
            PATTERNS.iter().map(move |p| {
                let options = MessageFormatOptions::default();
                Arc::new(MessageFormat::with_options(p, &locale, options).unwrap())
            })
        })
        .collect();

    let expected: Vec<Vec<String>> = messages
        .iter()
        .map(|m| (0..40).map(|i| m.format(&args(i)).unwrap()).collect())
        .collect();

    // Fresh copies whose default formatters are first built under contention.
    let fresh: Vec<Arc<MessageFormat>> = messages
        .iter()
        .map(|m| Arc::new(MessageFormat::with_locale(&m.to_pattern(), m.locale()).unwrap()))
        .collect();

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let fresh = fresh.clone();
            thread::spawn(move || {
                let mut results = Vec::new();
                for round in 0..200 {
                    let m = (worker + round) % fresh.len();
                    let i = ((worker * 7 + round) % 40) as i32;
                    results.push((m, i, fresh[m].format(&args(i)).unwrap()));
                }
                results
            })
        })
        .collect();

    for handle in handles {
        for (m, i, got) in handle.join().unwrap() {
            assert_eq!(got, expected[m][i as usize]);
        }
    }
}

#[test]
fn concurrent_time_unit_formatting() {
    let format = Arc::new(TimeUnitFormat::new(&Locale::english(), TimeUnitStyle::Full).unwrap());
    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let format = Arc::clone(&format);
            thread::spawn(move || {
                (0..100)
                    .map(|n| {
                        let unit = TimeUnit::ALL[(worker + n) % TimeUnit::ALL.len()];
                        let amount = TimeUnitAmount::new(n as f64, unit);
                        let text = format.format(&amount).unwrap();
                        format.parse(&text).unwrap() == amount
                    })
                    .all(|ok| ok)
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().unwrap());
    }
}

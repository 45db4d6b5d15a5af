//! Spelled-out numbers, ordinals and durations.
//!
//! [`RuleBasedNumberFormat`] carries the English rule sets ICU ships for
//! its three standard kinds. Each kind has named rule sets; the default is
//! `%spellout-numbering`, `%digits-ordinal` or `%duration`. Locales other
//! than English use the English rules.

use ficu_common::{Error, Locale, Result};
use tracing::debug;

use crate::formattable::Formattable;
use crate::number::DecimalFormat;

/// Values at or above this are written with digits by the spellout rules.
const SPELLOUT_LIMIT: f64 = 1e18;

/// Integer magnitudes from here on are not exact as `f64`.
const EXACT_F64_LIMIT: u64 = 1 << 53;

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

const SCALES: [(u64, &str); 5] = [
    (1_000_000_000_000_000, "quadrillion"),
    (1_000_000_000_000, "trillion"),
    (1_000_000_000, "billion"),
    (1_000_000, "million"),
    (1_000, "thousand"),
];

const IRREGULAR_ORDINALS: [(&str, &str); 7] = [
    ("one", "first"),
    ("two", "second"),
    ("three", "third"),
    ("five", "fifth"),
    ("eight", "eighth"),
    ("nine", "ninth"),
    ("twelve", "twelfth"),
];

/// The standard rule-based formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RbnfKind {
    Spellout,
    Ordinal,
    Duration,
}

/// A named rule set of one of the [`RbnfKind`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleSet {
    SpelloutNumbering,
    SpelloutCardinal,
    SpelloutOrdinal,
    DigitsOrdinal,
    Duration,
    InNumerals,
    WithWords,
}

impl RuleSet {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::SpelloutNumbering => "%spellout-numbering",
            Self::SpelloutCardinal => "%spellout-cardinal",
            Self::SpelloutOrdinal => "%spellout-ordinal",
            Self::DigitsOrdinal => "%digits-ordinal",
            Self::Duration => "%duration",
            Self::InNumerals => "%in-numerals",
            Self::WithWords => "%with-words",
        }
    }
}

impl RbnfKind {
    /// Public rule sets, default first.
    #[must_use]
    pub fn rule_sets(self) -> &'static [RuleSet] {
        match self {
            Self::Spellout => &[
                RuleSet::SpelloutNumbering,
                RuleSet::SpelloutCardinal,
                RuleSet::SpelloutOrdinal,
            ],
            Self::Ordinal => &[RuleSet::DigitsOrdinal],
            Self::Duration => &[RuleSet::Duration, RuleSet::InNumerals, RuleSet::WithWords],
        }
    }

    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Spellout => "spellout",
            Self::Ordinal => "ordinal",
            Self::Duration => "duration",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RuleBasedNumberFormat {
    kind: RbnfKind,
    locale: Locale,
    rule_set: RuleSet,
    grouped: DecimalFormat,
    plain: DecimalFormat,
}

impl RuleBasedNumberFormat {
    pub fn new(kind: RbnfKind, locale: &Locale) -> Result<Self> {
        if locale.language() != "en" {
            debug!(
                %locale,
                kind = kind.keyword(),
                "no rule-based number data, using English rules"
            );
        }
        let english = Locale::english();
        Ok(Self {
            kind,
            locale: locale.clone(),
            rule_set: kind.rule_sets()[0],
            grouped: DecimalFormat::new("#,##0.#", &english)?,
            plain: DecimalFormat::new("0", &english)?,
        })
    }

    #[must_use]
    pub fn kind(&self) -> RbnfKind {
        self.kind
    }

    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    #[must_use]
    pub fn default_rule_set(&self) -> RuleSet {
        self.rule_set
    }

    pub fn rule_set_names(&self) -> impl Iterator<Item = &'static str> {
        self.kind.rule_sets().iter().map(|set| set.name())
    }

    /// Select a rule set by name (`%spellout-ordinal`).
    pub fn set_default_rule_set(&mut self, name: &str) -> Result<()> {
        let name = name.trim();
        let set = self
            .kind
            .rule_sets()
            .iter()
            .find(|set| set.name() == name)
            .ok_or_else(|| {
                Error::illegal_argument(format!(
                    "no rule set {name:?} for {} formats",
                    self.kind.keyword()
                ))
            })?;
        self.rule_set = *set;
        Ok(())
    }

    pub fn format(&self, value: &Formattable) -> Result<String> {
        match *value {
            Formattable::Long(l) => Ok(self.format_i64(i64::from(l))),
            Formattable::Int64(i) => Ok(self.format_i64(i)),
            _ => match value.as_f64() {
                Some(d) => Ok(self.format_f64(d)),
                None => Err(Error::illegal_argument(format!(
                    "cannot format a {} with {} rules",
                    value.kind(),
                    self.kind.keyword()
                ))),
            },
        }
    }

    #[must_use]
    pub fn format_i64(&self, number: i64) -> String {
        let magnitude = number.unsigned_abs();
        if magnitude < EXACT_F64_LIMIT {
            return self.format_f64(number as f64);
        }
        let mut out = String::new();
        if number < 0 {
            out.push_str(match self.kind {
                RbnfKind::Spellout => "minus ",
                _ => "-",
            });
        }
        let spelled = (magnitude as f64) < SPELLOUT_LIMIT;
        match self.rule_set {
            RuleSet::SpelloutNumbering | RuleSet::SpelloutCardinal if spelled => {
                spell_integer(magnitude, &mut out);
            }
            RuleSet::SpelloutOrdinal if spelled => spell_ordinal_integer(magnitude, &mut out),
            RuleSet::SpelloutNumbering | RuleSet::SpelloutCardinal => {
                out.push_str(&self.grouped_magnitude(number));
            }
            RuleSet::SpelloutOrdinal | RuleSet::DigitsOrdinal => {
                out.push_str(&self.grouped_magnitude(number));
                out.push_str(ordinal_suffix(magnitude));
            }
            RuleSet::Duration | RuleSet::InNumerals => self.clock_seconds(magnitude, &mut out),
            RuleSet::WithWords => self.worded_seconds(magnitude, &mut out),
        }
        out
    }

    /// Grouped digits of `|number|`, exact for every `i64`.
    fn grouped_magnitude(&self, number: i64) -> String {
        let text = self.grouped.format_i64(number);
        match text.strip_prefix('-') {
            Some(digits) => digits.to_string(),
            None => text,
        }
    }

    #[must_use]
    pub fn format_f64(&self, number: f64) -> String {
        if number.is_nan() {
            return "NaN".to_string();
        }
        let mut out = String::new();
        if number < 0.0 {
            out.push_str(match self.kind {
                RbnfKind::Spellout => "minus ",
                _ => "-",
            });
        }
        let n = number.abs();
        match self.rule_set {
            RuleSet::SpelloutNumbering | RuleSet::SpelloutCardinal => {
                self.spell_cardinal(n, &mut out)
            }
            RuleSet::SpelloutOrdinal => self.spell_ordinal(n, &mut out),
            RuleSet::DigitsOrdinal => self.digits_ordinal(n, &mut out),
            RuleSet::Duration | RuleSet::InNumerals => self.in_numerals(n, &mut out),
            RuleSet::WithWords => self.with_words(n, &mut out),
        }
        out
    }

    fn spell_cardinal(&self, n: f64, out: &mut String) {
        if n.is_infinite() {
            out.push_str("infinity");
        } else if n >= SPELLOUT_LIMIT {
            out.push_str(&self.grouped.format_f64(n));
        } else {
            spell_integer(n.trunc() as u64, out);
            if n.fract() != 0.0 {
                out.push_str(" point");
                let text = n.to_string();
                let fraction = text.split_once('.').map_or("", |(_, f)| f);
                for d in fraction.bytes().filter(u8::is_ascii_digit) {
                    out.push(' ');
                    out.push_str(ONES[usize::from(d - b'0')]);
                }
            }
        }
    }

    /// Non-integers fall back to grouped digits with no ordinal ending.
    fn spell_ordinal(&self, n: f64, out: &mut String) {
        if n.is_infinite() || n.fract() != 0.0 {
            out.push_str(&self.grouped.format_f64(n));
        } else if n >= SPELLOUT_LIMIT {
            out.push_str(&self.grouped.format_f64(n));
            out.push_str(ordinal_suffix(n as u64));
        } else {
            spell_ordinal_integer(n as u64, out);
        }
    }

    /// Non-integers get grouped digits and no suffix.
    fn digits_ordinal(&self, n: f64, out: &mut String) {
        out.push_str(&self.grouped.format_f64(n));
        if n.is_finite() && n.fract() == 0.0 {
            out.push_str(ordinal_suffix(n as u64));
        }
    }

    fn in_numerals(&self, n: f64, out: &mut String) {
        if n.is_infinite() {
            out.push_str("∞ sec.");
            return;
        }
        if n < 60.0 {
            out.push_str(&self.plain.format_f64(n));
            out.push_str(" sec.");
            return;
        }
        self.clock_seconds(n.round_ties_even() as u64, out);
    }

    fn clock_seconds(&self, total: u64, out: &mut String) {
        let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
        if hours == 0 {
            out.push_str(&format!("{minutes}:{seconds:02}"));
        } else {
            out.push_str(&self.grouped.format_i64(hours as i64));
            out.push_str(&format!(":{minutes:02}:{seconds:02}"));
        }
    }

    /// `%with-words` for whole seconds of at least one hour.
    fn worded_seconds(&self, total: u64, out: &mut String) {
        let unit = |out: &mut String, count: u64, one: &str, many: &str| {
            out.push_str(&self.plain.format_i64(count as i64));
            out.push(' ');
            out.push_str(if count == 1 { one } else { many });
        };
        let (hours, minutes, seconds) = (total / 3600, total / 60 % 60, total % 60);
        unit(out, hours, "hour", "hours");
        if minutes != 0 || seconds != 0 {
            out.push_str(", ");
            unit(out, minutes, "minute", "minutes");
            if seconds != 0 {
                out.push_str(", ");
                unit(out, seconds, "second", "seconds");
            }
        }
    }

    fn with_words(&self, n: f64, out: &mut String) {
        let unit = |out: &mut String, count: f64, one: &str, many: &str| {
            if (1.0..2.0).contains(&count) {
                out.push_str("1 ");
                out.push_str(one);
            } else if count < 1.0 {
                out.push_str("0 ");
                out.push_str(many);
            } else {
                out.push_str(&self.plain.format_f64(count));
                out.push(' ');
                out.push_str(many);
            }
        };
        if n.is_infinite() {
            out.push_str("∞ seconds");
        } else if n < 60.0 {
            unit(out, n, "second", "seconds");
        } else if n < 3600.0 {
            unit(out, (n / 60.0).floor(), "minute", "minutes");
            let rest = n % 60.0;
            if rest != 0.0 {
                out.push_str(", ");
                self.with_words(rest, out);
            }
        } else {
            unit(out, (n / 3600.0).floor(), "hour", "hours");
            let rest = n % 3600.0;
            if rest != 0.0 {
                out.push_str(", ");
                unit(out, (rest / 60.0).floor(), "minute", "minutes");
                let seconds = rest % 60.0;
                if seconds != 0.0 {
                    out.push_str(", ");
                    self.with_words(seconds, out);
                }
            }
        }
    }

    /// Parse text produced by the current rule set, starting at `*pos`.
    ///
    /// Spelled-out numbers accept cardinal and ordinal words in any case.
    /// On failure `*pos` is unchanged.
    pub fn parse(&self, text: &str, pos: &mut usize) -> Option<Formattable> {
        let rest = text.get(*pos..)?;
        let (value, used) = match self.kind {
            RbnfKind::Spellout => parse_words(rest)?,
            RbnfKind::Ordinal => {
                let mut at = 0;
                let value = self.grouped.parse(rest, &mut at)?.as_f64()?;
                let suffix = ["st", "nd", "rd", "th"]
                    .into_iter()
                    .find(|s| rest[at..].starts_with(s))
                    .map_or(0, str::len);
                (value, at + suffix)
            }
            RbnfKind::Duration => self.parse_duration(rest)?,
        };
        *pos += used;
        Some(Formattable::from_parsed(value))
    }

    fn parse_duration(&self, text: &str) -> Option<(f64, usize)> {
        let mut at = 0;
        let first = self.grouped.parse(text, &mut at)?.as_f64()?;
        if let Some(after) = text[at..].strip_prefix(" sec.") {
            return Some((first, text.len() - after.len()));
        }
        let mut fields = vec![first];
        while fields.len() < 3 && text[at..].starts_with(':') {
            let digits = text[at + 1..].bytes().take_while(u8::is_ascii_digit).count();
            if digits != 2 {
                break;
            }
            fields.push(text[at + 1..at + 3].parse::<f64>().ok()?);
            at += 3;
        }
        match fields[..] {
            [minutes, seconds] => Some((minutes * 60.0 + seconds, at)),
            [hours, minutes, seconds] => Some((hours * 3600.0 + minutes * 60.0 + seconds, at)),
            _ => None,
        }
    }
}

fn spell_integer(n: u64, out: &mut String) {
    if n < 20 {
        out.push_str(ONES[n as usize]);
        return;
    }
    if n < 100 {
        out.push_str(TENS[(n / 10) as usize]);
        if n % 10 != 0 {
            out.push('-');
            out.push_str(ONES[(n % 10) as usize]);
        }
        return;
    }
    let (scale, name) = if n < 1000 {
        (100, "hundred")
    } else {
        SCALES
            .into_iter()
            .find(|&(scale, _)| n >= scale)
            .unwrap_or((1000, "thousand"))
    };
    spell_integer(n / scale, out);
    out.push(' ');
    out.push_str(name);
    if n % scale != 0 {
        out.push(' ');
        spell_integer(n % scale, out);
    }
}

fn spell_ordinal_integer(n: u64, out: &mut String) {
    let mut cardinal = String::new();
    spell_integer(n, &mut cardinal);
    let split = cardinal.rfind([' ', '-']).map_or(0, |i| i + 1);
    let (head, last) = cardinal.split_at(split);
    out.push_str(head);
    out.push_str(&ordinal_word(last));
}

fn ordinal_word(cardinal: &str) -> String {
    if let Some(&(_, ordinal)) = IRREGULAR_ORDINALS.iter().find(|(c, _)| *c == cardinal) {
        return ordinal.to_string();
    }
    match cardinal.strip_suffix('y') {
        Some(stem) => format!("{stem}ieth"),
        None => format!("{cardinal}th"),
    }
}

fn ordinal_suffix(n: u64) -> &'static str {
    if (11..=13).contains(&(n % 100)) {
        return "th";
    }
    match n % 10 {
        1 => "st",
        2 => "nd",
        3 => "rd",
        _ => "th",
    }
}

/// The value of a cardinal or ordinal number word.
fn word_value(word: &str) -> Option<u64> {
    let lookup = |w: &str| {
        ONES.iter()
            .position(|&o| o == w)
            .or_else(|| TENS.iter().position(|&t| !t.is_empty() && t == w).map(|i| i * 10))
            .map(|v| v as u64)
    };
    if let Some(v) = lookup(word) {
        return Some(v);
    }
    if let Some(&(cardinal, _)) = IRREGULAR_ORDINALS.iter().find(|(_, o)| *o == word) {
        return lookup(cardinal);
    }
    if let Some(stem) = word.strip_suffix("ieth") {
        return lookup(&format!("{stem}y"));
    }
    word.strip_suffix("th").and_then(lookup)
}

fn scale_value(word: &str) -> Option<u64> {
    if word == "hundred" || word == "hundredth" {
        return Some(100);
    }
    let word = word.strip_suffix("th").unwrap_or(word);
    SCALES.iter().find(|(_, name)| *name == word).map(|&(scale, _)| scale)
}

/// Parse English number words from the start of `text`.
fn parse_words(text: &str) -> Option<(f64, usize)> {
    let mut words = Vec::new();
    let mut at = 0;
    loop {
        let len = text[at..].bytes().take_while(u8::is_ascii_alphabetic).count();
        if len == 0 {
            break;
        }
        words.push((text[at..at + len].to_ascii_lowercase(), at + len));
        at += len;
        match text[at..].bytes().next() {
            Some(b' ' | b'-')
                if text[at + 1..].bytes().next().is_some_and(|b| b.is_ascii_alphabetic()) =>
            {
                at += 1;
            }
            _ => break,
        }
    }

    let mut iter = words.iter().peekable();
    let negative = iter.next_if(|(w, _)| w == "minus").is_some();
    let (mut total, mut current) = (0u64, 0u64);
    let mut end = None;
    while let Some((word, word_end)) = iter.peek() {
        if let Some(v) = word_value(word) {
            current = current.saturating_add(v);
        } else if let Some(scale) = scale_value(word) {
            if scale == 100 {
                current = current.max(1).saturating_mul(100);
            } else {
                total = total.saturating_add(current.max(1).saturating_mul(scale));
                current = 0;
            }
        } else {
            break;
        }
        end = Some(*word_end);
        iter.next();
    }
    let mut end = end?;
    let mut number = total.saturating_add(current).to_string();

    if iter.next_if(|(w, _)| w == "point").is_some() {
        let mut fraction = String::new();
        while let Some((word, word_end)) =
            iter.next_if(|(w, _)| word_value(w).is_some_and(|v| v < 10))
        {
            fraction.extend(word_value(word).and_then(|d| char::from_digit(d as u32, 10)));
            end = *word_end;
        }
        if !fraction.is_empty() {
            number = format!("{number}.{fraction}");
        }
    }
    let value: f64 = number.parse().ok()?;
    Some((if negative { -value } else { value }, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rbnf(kind: RbnfKind) -> RuleBasedNumberFormat {
        RuleBasedNumberFormat::new(kind, &Locale::english()).unwrap()
    }

    fn with_set(kind: RbnfKind, set: &str) -> RuleBasedNumberFormat {
        let mut f = rbnf(kind);
        f.set_default_rule_set(set).unwrap();
        f
    }

    #[test]
    fn spellout_cardinal() {
        let f = rbnf(RbnfKind::Spellout);
        assert_eq!(f.default_rule_set(), RuleSet::SpelloutNumbering);
        assert_eq!(f.format_f64(0.0), "zero");
        assert_eq!(f.format_f64(13.0), "thirteen");
        assert_eq!(f.format_f64(40.0), "forty");
        assert_eq!(f.format_f64(123.0), "one hundred twenty-three");
        assert_eq!(f.format_i64(12373), "twelve thousand three hundred seventy-three");
        assert_eq!(f.format_i64(2_000_001), "two million one");
        assert_eq!(f.format_f64(-7.0), "minus seven");
        assert_eq!(f.format_f64(3.14), "three point one four");
        assert_eq!(f.format_i64(i64::MAX), "9,223,372,036,854,775,807");
    }

    #[test]
    fn spellout_ordinal() {
        let f = with_set(RbnfKind::Spellout, "%spellout-ordinal");
        assert_eq!(f.format_f64(1.0), "first");
        assert_eq!(f.format_f64(12.0), "twelfth");
        assert_eq!(f.format_f64(20.0), "twentieth");
        assert_eq!(f.format_f64(21.0), "twenty-first");
        assert_eq!(f.format_f64(101.0), "one hundred first");
        assert_eq!(f.format_f64(1000.0), "one thousandth");
        assert_eq!(f.format_f64(4.0), "fourth");
    }

    #[test]
    fn digits_ordinal() {
        let f = rbnf(RbnfKind::Ordinal);
        let cases = [
            (1, "1st"),
            (2, "2nd"),
            (3, "3rd"),
            (4, "4th"),
            (11, "11th"),
            (12, "12th"),
            (13, "13th"),
            (21, "21st"),
            (111, "111th"),
            (12373, "12,373rd"),
        ];
        for (n, expected) in cases {
            assert_eq!(f.format_i64(n), expected);
        }
        assert_eq!(f.format_f64(-2.0), "-2nd");
        assert_eq!(f.format_f64(2.5), "2.5");
    }

    #[test]
    fn large_integers_stay_exact() {
        let ordinal = rbnf(RbnfKind::Ordinal);
        assert_eq!(ordinal.format_i64(9_007_199_254_740_993), "9,007,199,254,740,993rd");
        assert_eq!(ordinal.format_i64(i64::MIN), "-9,223,372,036,854,775,808th");

        let spelled = with_set(RbnfKind::Spellout, "%spellout-ordinal");
        assert_eq!(
            spelled.format_i64(9_007_199_254_740_993),
            "nine quadrillion seven trillion one hundred ninety-nine billion \
             two hundred fifty-four million seven hundred forty thousand nine hundred ninety-third"
        );
        assert_eq!(spelled.format_i64(i64::MIN), "minus 9,223,372,036,854,775,808th");

        let duration = rbnf(RbnfKind::Duration);
        assert_eq!(duration.format_i64(9_007_199_254_740_993), "2,501,999,792,983:36:33");
        let words = with_set(RbnfKind::Duration, "%with-words");
        assert_eq!(
            words.format_i64(9_007_199_254_740_993),
            "2501999792983 hours, 36 minutes, 33 seconds"
        );
    }

    #[test]
    fn fractional_ordinals_have_no_suffix() {
        assert_eq!(rbnf(RbnfKind::Ordinal).format_f64(1.5), "1.5");
        let spelled = with_set(RbnfKind::Spellout, "%spellout-ordinal");
        assert_eq!(spelled.format_f64(1.5), "1.5");
        assert_eq!(spelled.format_f64(-3.25), "minus 3.2");
    }

    #[test]
    fn durations() {
        let f = rbnf(RbnfKind::Duration);
        assert_eq!(f.format_f64(45.0), "45 sec.");
        assert_eq!(f.format_f64(123.0), "2:03");
        assert_eq!(f.format_f64(3723.0), "1:02:03");
        assert_eq!(f.format_f64(3603.0), "1:00:03");
        assert_eq!(f.format_i64(3_600_000), "1,000:00:00");

        let words = with_set(RbnfKind::Duration, "%with-words");
        assert_eq!(words.format_f64(1.0), "1 second");
        assert_eq!(words.format_f64(45.0), "45 seconds");
        assert_eq!(words.format_f64(60.0), "1 minute");
        assert_eq!(words.format_f64(125.0), "2 minutes, 5 seconds");
        assert_eq!(words.format_f64(3600.0), "1 hour");
        assert_eq!(words.format_f64(3603.0), "1 hour, 0 minutes, 3 seconds");
        assert_eq!(words.format_f64(3723.0), "1 hour, 2 minutes, 3 seconds");
    }

    #[test]
    fn unknown_rule_set_is_rejected() {
        let mut f = rbnf(RbnfKind::Ordinal);
        let err = f.set_default_rule_set("%spellout-ordinal").unwrap_err();
        assert_eq!(err.code(), ficu_common::ErrorCode::IllegalArgumentError);
        assert_eq!(f.default_rule_set(), RuleSet::DigitsOrdinal);
        assert_eq!(rbnf(RbnfKind::Duration).rule_set_names().count(), 3);
    }

    #[test]
    fn parse_spelled_numbers() {
        let f = rbnf(RbnfKind::Spellout);
        let text = "One hundred twenty-three files";
        let mut pos = 0;
        assert_eq!(f.parse(text, &mut pos), Some(Formattable::Long(123)));
        assert_eq!(&text[pos..], " files");

        let mut pos = 0;
        assert_eq!(
            f.parse("twelve thousand three hundred seventy-third", &mut pos),
            Some(Formattable::Long(12373))
        );
        let mut pos = 0;
        assert_eq!(
            f.parse("minus three point one four", &mut pos),
            Some(Formattable::Double(-3.14))
        );
        let mut pos = 0;
        assert_eq!(f.parse("files", &mut pos), None);
        assert_eq!(pos, 0);
    }

    #[test]
    fn parse_ordinals_and_durations() {
        let mut pos = 0;
        assert_eq!(
            rbnf(RbnfKind::Ordinal).parse("12,373rd place", &mut pos),
            Some(Formattable::Long(12373))
        );
        assert_eq!(pos, 8);

        let d = rbnf(RbnfKind::Duration);
        for (text, seconds) in [("1:02:03", 3723), ("2:03", 123), ("45 sec.", 45)] {
            let mut pos = 0;
            assert_eq!(d.parse(text, &mut pos), Some(Formattable::Long(seconds)), "{text}");
            assert_eq!(pos, text.len());
        }
    }

    #[test]
    fn other_locales_use_english_rules() {
        let f =
            RuleBasedNumberFormat::new(RbnfKind::Spellout, &Locale::new("de").unwrap()).unwrap();
        assert_eq!(f.format_f64(2.0), "two");
        assert_eq!(f.locale().language(), "de");
    }
}

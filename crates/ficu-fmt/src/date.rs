//! Pattern-based date and time formatting.
//!
//! [`SimpleDateFormat`] renders a [`UDate`] through a pattern of field
//! letters. Each run of the same letter is one field; the run length picks
//! the width or the name form.
//!
//! | Letter | Field | Forms |
//! |--------|-------|-------|
//! | `G` | era | `AD`, `GGGG` → `Anno Domini` |
//! | `y` | year | `yy` → two digits, otherwise zero-padded |
//! | `M` | month | `M`, `MM`, `MMM` abbreviated, `MMMM` wide |
//! | `d` | day of month | padded |
//! | `E` | weekday | `E`–`EEE` abbreviated, `EEEE` wide |
//! | `a` | AM/PM marker | |
//! | `h` `H` `k` `K` | hour 1–12, 0–23, 1–24, 0–11 | padded |
//! | `m` `s` | minute, second | padded |
//! | `S` | fraction of a second | digits of the millisecond |
//! | `D` | day of year | padded |
//! | `z` | zone | `GMT`, `GMT+02:00` |
//! | `Z` | zone | `+0200`, `ZZZZ` → `GMT+02:00` |
//!
//! Other ASCII letters are rejected; text in `'…'` is literal and `''` is an
//! apostrophe. Calendar fields come from the `time` crate in the proleptic
//! Gregorian calendar at a fixed UTC offset (UTC unless configured).

use ficu_common::{Error, ErrorCode, Locale, Result};
use time::{OffsetDateTime, UtcOffset};

use crate::formattable::{Formattable, UDate};
use crate::locale_data::{DateNames, locale_data};

const FIELD_LETTERS: &str = "GyMdEahHkKmsSDzZ";

/// The standard lengths of locale date and time patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DateStyle {
    Full,
    Long,
    #[default]
    Medium,
    Short,
}

impl DateStyle {
    pub const ALL: [Self; 4] = [Self::Full, Self::Long, Self::Medium, Self::Short];

    /// Match a style keyword, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let keyword = keyword.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.keyword().eq_ignore_ascii_case(keyword))
    }

    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Long => "long",
            Self::Medium => "medium",
            Self::Short => "short",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Full => 0,
            Self::Long => 1,
            Self::Medium => 2,
            Self::Short => 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Field { letter: char, count: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleDateFormat {
    pattern: String,
    tokens: Vec<Token>,
    names: &'static DateNames,
    offset: UtcOffset,
}

impl SimpleDateFormat {
    pub fn new(pattern: &str, locale: &Locale) -> Result<Self> {
        Ok(Self {
            pattern: pattern.to_string(),
            tokens: tokenize(pattern)?,
            names: locale_data(locale).names,
            offset: UtcOffset::UTC,
        })
    }

    pub fn date_instance(style: DateStyle, locale: &Locale) -> Result<Self> {
        Self::new(locale_data(locale).date_patterns.date[style.index()], locale)
    }

    pub fn time_instance(style: DateStyle, locale: &Locale) -> Result<Self> {
        Self::new(locale_data(locale).date_patterns.time[style.index()], locale)
    }

    /// The locale's date and time patterns joined by its date-time glue.
    pub fn date_time_instance(date: DateStyle, time: DateStyle, locale: &Locale) -> Result<Self> {
        let patterns = &locale_data(locale).date_patterns;
        let pattern = patterns
            .date_time
            .replace("{1}", patterns.date[date.index()])
            .replace("{0}", patterns.time[time.index()]);
        Self::new(&pattern, locale)
    }

    /// Replace the pattern. On error `self` is unchanged.
    pub fn apply_pattern(&mut self, pattern: &str) -> Result<()> {
        self.tokens = tokenize(pattern)?;
        self.pattern = pattern.to_string();
        Ok(())
    }

    /// Render times at `offset` from UTC.
    #[must_use]
    pub fn with_offset(mut self, offset: UtcOffset) -> Self {
        self.offset = offset;
        self
    }

    #[must_use]
    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    #[must_use]
    pub fn to_pattern(&self) -> &str {
        &self.pattern
    }

    /// Format a date or any numeric value taken as milliseconds.
    pub fn format_formattable(&self, value: &Formattable) -> Result<String> {
        match value.as_date() {
            Some(date) => self.format(date),
            None => Err(Error::illegal_argument(format!(
                "cannot format a {} as a date",
                value.kind()
            ))),
        }
    }

    pub fn format(&self, date: UDate) -> Result<String> {
        if !date.is_finite() {
            return Err(Error::illegal_argument("date is not finite"));
        }
        let millis = date.floor() as i128;
        let dt = millis
            .checked_mul(1_000_000)
            .and_then(|nanos| OffsetDateTime::from_unix_timestamp_nanos(nanos).ok())
            .and_then(|dt| dt.checked_to_offset(self.offset))
            .ok_or_else(|| Error::illegal_argument(format!("date {date} is out of range")))?;

        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                &Token::Field { letter, count } => self.push_field(&mut out, &dt, letter, count),
            }
        }
        Ok(out)
    }

    fn push_field(&self, out: &mut String, dt: &OffsetDateTime, letter: char, count: usize) {
        let pad = |out: &mut String, value: i64| out.push_str(&format!("{value:0count$}"));
        let year = i64::from(dt.year());
        let hour = i64::from(dt.hour());
        match letter {
            'G' => {
                let era = usize::from(year > 0);
                out.push_str(if count >= 4 {
                    self.names.eras_wide[era]
                } else {
                    self.names.eras_abbr[era]
                });
            }
            'y' => {
                let era_year = if year > 0 { year } else { 1 - year };
                if count == 2 {
                    out.push_str(&format!("{:02}", era_year % 100));
                } else {
                    pad(out, era_year);
                }
            }
            'M' => {
                let month = usize::from(u8::from(dt.month())) - 1;
                match count {
                    1 | 2 => pad(out, month as i64 + 1),
                    3 => out.push_str(self.names.months_abbr[month]),
                    _ => out.push_str(self.names.months_wide[month]),
                }
            }
            'd' => pad(out, i64::from(dt.day())),
            'E' => {
                let day = usize::from(dt.weekday().number_days_from_sunday());
                out.push_str(if count >= 4 {
                    self.names.weekdays_wide[day]
                } else {
                    self.names.weekdays_abbr[day]
                });
            }
            'a' => out.push_str(self.names.am_pm[usize::from(hour >= 12)]),
            'h' => pad(out, if hour % 12 == 0 { 12 } else { hour % 12 }),
            'H' => pad(out, hour),
            'k' => pad(out, if hour == 0 { 24 } else { hour }),
            'K' => pad(out, hour % 12),
            'm' => pad(out, i64::from(dt.minute())),
            's' => pad(out, i64::from(dt.second())),
            'S' => {
                let millis = format!("{:03}", dt.millisecond());
                if count <= 3 {
                    out.push_str(&millis[..count]);
                } else {
                    out.push_str(&millis);
                    out.extend(std::iter::repeat_n('0', count - 3));
                }
            }
            'D' => pad(out, i64::from(dt.ordinal())),
            'z' => {
                if count < 4 && self.offset.is_utc() {
                    out.push_str("GMT");
                } else {
                    self.push_gmt_offset(out);
                }
            }
            'Z' => {
                if count >= 4 {
                    self.push_gmt_offset(out);
                } else {
                    let (h, m, _) = self.offset.as_hms();
                    let sign = if self.offset.is_negative() { '-' } else { '+' };
                    out.push_str(&format!("{sign}{:02}{:02}", h.unsigned_abs(), m.unsigned_abs()));
                }
            }
            _ => {}
        }
    }

    fn push_gmt_offset(&self, out: &mut String) {
        let (h, m, _) = self.offset.as_hms();
        let sign = if self.offset.is_negative() { '-' } else { '+' };
        out.push_str(&format!("GMT{sign}{:02}:{:02}", h.unsigned_abs(), m.unsigned_abs()));
    }
}

fn tokenize(pattern: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut literal = String::new();
    let mut chars = pattern.char_indices().peekable();
    while let Some((at, c)) = chars.next() {
        if c == '\'' {
            if chars.next_if(|&(_, n)| n == '\'').is_some() {
                literal.push('\'');
                continue;
            }
            loop {
                match chars.next() {
                    Some((_, '\'')) => {
                        if chars.next_if(|&(_, n)| n == '\'').is_some() {
                            literal.push('\'');
                        } else {
                            break;
                        }
                    }
                    Some((_, q)) => literal.push(q),
                    None => {
                        return Err(Error::new(ErrorCode::PatternSyntaxError, "unterminated quote")
                            .at(at));
                    }
                }
            }
        } else if c.is_ascii_alphabetic() {
            if !FIELD_LETTERS.contains(c) {
                return Err(
                    Error::invalid_format(format!("unsupported pattern letter '{c}'")).at(at)
                );
            }
            let mut count = 1;
            while chars.next_if(|&(_, n)| n == c).is_some() {
                count += 1;
            }
            if !literal.is_empty() {
                tokens.push(Token::Literal(std::mem::take(&mut literal)));
            }
            tokens.push(Token::Field { letter: c, count });
        } else {
            literal.push(c);
        }
    }
    if !literal.is_empty() {
        tokens.push(Token::Literal(literal));
    }
    Ok(tokens)
}

//! Decimal number formatting and parsing.
//!
//! [`DecimalFormat`] implements the commonly used part of ICU's decimal
//! pattern language:
//!
//! | Symbol | Meaning |
//! |--------|---------|
//! | `0` | required digit |
//! | `#` | optional digit |
//! | `,` | grouping separator (primary and secondary sizes) |
//! | `.` | decimal separator |
//! | `%` / `‰` | multiply by 100 / 1000 and show the sign |
//! | `¤` / `¤¤` | currency symbol / ISO code |
//! | `-` | localized minus sign in an affix |
//! | `;` | separates the positive and negative subpatterns |
//! | `'` | quotes literal text, `''` is an apostrophe |
//!
//! Exponents, significant digits, padding and rounding increments are
//! rejected. Rounding is half-even on the shortest decimal representation
//! of the value.

use ficu_common::{Error, ErrorCode, Locale, Result};

use crate::formattable::Formattable;
use crate::locale_data::{NumberSymbols, locale_data};

/// Digits kept after the decimal point at most; enough for any `f64`.
const MAX_FRACTION_DIGITS: u16 = 340;

/// The standard number formats of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberStyle {
    Number,
    Integer,
    Currency,
    Percent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum AffixPart {
    Literal(String),
    Currency,
    IntlCurrency,
    Percent,
    PerMille,
    Minus,
}

/// One parsed `prefix number suffix` subpattern.
#[derive(Debug, Default)]
struct SubPattern {
    prefix: Vec<AffixPart>,
    suffix: Vec<AffixPart>,
    multiplier: Option<u32>,
    grouping: Option<(u8, u8)>,
    min_int: u16,
    min_frac: u16,
    max_frac: u16,
    decimal_shown: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DecimalFormat {
    symbols: NumberSymbols,
    positive_prefix: Vec<AffixPart>,
    positive_suffix: Vec<AffixPart>,
    negative_prefix: Vec<AffixPart>,
    negative_suffix: Vec<AffixPart>,
    explicit_negative: bool,
    multiplier: u32,
    grouping_used: bool,
    grouping_size: u8,
    secondary_grouping_size: u8,
    min_int: u16,
    min_frac: u16,
    max_frac: u16,
    decimal_always_shown: bool,
    parse_integer_only: bool,
}

impl DecimalFormat {
    /// Compile `pattern` with the symbols of `locale`.
    pub fn new(pattern: &str, locale: &Locale) -> Result<Self> {
        Self::with_symbols(pattern, locale_data(locale).symbols)
    }

    pub fn with_symbols(pattern: &str, symbols: NumberSymbols) -> Result<Self> {
        let mut format = Self {
            symbols,
            positive_prefix: Vec::new(),
            positive_suffix: Vec::new(),
            negative_prefix: Vec::new(),
            negative_suffix: Vec::new(),
            explicit_negative: false,
            multiplier: 1,
            grouping_used: false,
            grouping_size: 0,
            secondary_grouping_size: 0,
            min_int: 1,
            min_frac: 0,
            max_frac: 0,
            decimal_always_shown: false,
            parse_integer_only: false,
        };
        format.apply_pattern(pattern)?;
        Ok(format)
    }

    /// One of the locale's standard formats.
    pub fn instance(locale: &Locale, style: NumberStyle) -> Result<Self> {
        let data = locale_data(locale);
        let pattern = match style {
            NumberStyle::Number | NumberStyle::Integer => data.number_patterns.decimal,
            NumberStyle::Currency => data.number_patterns.currency,
            NumberStyle::Percent => data.number_patterns.percent,
        };
        let mut format = Self::with_symbols(pattern, data.symbols)?;
        if style == NumberStyle::Integer {
            format.set_maximum_fraction_digits(0);
            format.decimal_always_shown = false;
            format.parse_integer_only = true;
        }
        Ok(format)
    }

    /// Replace every pattern-derived setting. On error `self` is unchanged.
    pub fn apply_pattern(&mut self, pattern: &str) -> Result<()> {
        let (positive, negative) = parse_pattern(pattern)?;
        self.multiplier = positive.multiplier.unwrap_or(1);
        (self.grouping_used, self.grouping_size, self.secondary_grouping_size) =
            match positive.grouping {
                Some((primary, secondary)) => (true, primary, secondary),
                None => (false, 0, 0),
            };
        self.min_int = positive.min_int;
        self.min_frac = positive.min_frac;
        self.max_frac = positive.max_frac;
        self.decimal_always_shown = positive.decimal_shown;
        self.parse_integer_only = false;
        match negative {
            Some(negative) => {
                self.explicit_negative = true;
                self.negative_prefix = negative.prefix;
                self.negative_suffix = negative.suffix;
            }
            None => {
                self.explicit_negative = false;
                self.negative_prefix = std::iter::once(AffixPart::Minus)
                    .chain(positive.prefix.iter().cloned())
                    .collect();
                self.negative_suffix = positive.suffix.clone();
            }
        }
        self.positive_prefix = positive.prefix;
        self.positive_suffix = positive.suffix;
        Ok(())
    }

    #[must_use]
    pub fn symbols(&self) -> &NumberSymbols {
        &self.symbols
    }

    #[must_use]
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    #[must_use]
    pub fn maximum_fraction_digits(&self) -> u16 {
        self.max_frac
    }

    #[must_use]
    pub fn minimum_fraction_digits(&self) -> u16 {
        self.min_frac
    }

    #[must_use]
    pub fn minimum_integer_digits(&self) -> u16 {
        self.min_int
    }

    #[must_use]
    pub fn is_grouping_used(&self) -> bool {
        self.grouping_used
    }

    #[must_use]
    pub fn is_parse_integer_only(&self) -> bool {
        self.parse_integer_only
    }

    pub fn set_maximum_fraction_digits(&mut self, digits: u16) {
        self.max_frac = digits.min(MAX_FRACTION_DIGITS);
        self.min_frac = self.min_frac.min(self.max_frac);
    }

    pub fn set_minimum_fraction_digits(&mut self, digits: u16) {
        self.min_frac = digits.min(MAX_FRACTION_DIGITS);
        self.max_frac = self.max_frac.max(self.min_frac);
    }

    pub fn set_minimum_integer_digits(&mut self, digits: u16) {
        self.min_int = digits;
    }

    pub fn set_grouping_used(&mut self, used: bool) {
        self.grouping_used = used && self.grouping_size > 0;
    }

    pub fn set_parse_integer_only(&mut self, integer_only: bool) {
        self.parse_integer_only = integer_only;
    }

    /// Format any numeric [`Formattable`].
    pub fn format(&self, value: &Formattable) -> Result<String> {
        match *value {
            Formattable::Double(d) => Ok(self.format_f64(d)),
            Formattable::Long(l) => Ok(self.format_i64(i64::from(l))),
            Formattable::Int64(i) => Ok(self.format_i64(i)),
            _ => Err(Error::illegal_argument(format!(
                "cannot format a {} as a number",
                value.kind()
            ))),
        }
    }

    #[must_use]
    pub fn format_f64(&self, number: f64) -> String {
        if number.is_nan() {
            return self.symbols.nan.to_string();
        }
        let negative = number < 0.0 || (number == 0.0 && number.is_sign_negative());
        let value = number.abs() * f64::from(self.multiplier);
        let mut out = String::new();
        self.push_affix(&mut out, self.prefix(negative));
        if value.is_infinite() {
            out.push_str(self.symbols.infinity);
        } else {
            let mut digits = Digits::from_f64(value);
            digits.round(self.max_frac);
            self.push_number(&mut out, &digits);
        }
        self.push_affix(&mut out, self.suffix(negative));
        out
    }

    #[must_use]
    pub fn format_i64(&self, number: i64) -> String {
        let value = u128::from(number.unsigned_abs()) * u128::from(self.multiplier);
        let negative = number < 0;
        let mut out = String::new();
        self.push_affix(&mut out, self.prefix(negative));
        self.push_number(&mut out, &Digits::from_integer(value));
        self.push_affix(&mut out, self.suffix(negative));
        out
    }

    /// Parse a number starting at `*pos`.
    ///
    /// On success `*pos` moves past the number and its affixes. Integral
    /// results come back as `Long` or `Int64`. On failure `*pos` is left
    /// alone.
    pub fn parse(&self, text: &str, pos: &mut usize) -> Option<Formattable> {
        let rest = text.get(*pos..)?;
        if rest.starts_with(self.symbols.nan) {
            *pos += self.symbols.nan.len();
            return Some(Formattable::Double(f64::NAN));
        }
        let mut best: Option<(usize, f64)> = None;
        for negative in [false, true] {
            let prefix = self.expand(self.prefix(negative));
            let suffix = self.expand(self.suffix(negative));
            let Some(body) = rest.strip_prefix(prefix.as_str()) else {
                continue;
            };
            let Some((value, used)) = self.parse_digits(body) else {
                continue;
            };
            let after = prefix.len() + used;
            if !rest[after..].starts_with(suffix.as_str()) {
                continue;
            }
            let end = after + suffix.len();
            if best.is_none_or(|(longest, _)| end > longest) {
                best = Some((end, if negative { -value } else { value }));
            }
        }
        let (end, value) = best?;
        *pos += end;
        Some(Formattable::from_parsed(value / f64::from(self.multiplier)))
    }

    fn parse_digits(&self, body: &str) -> Option<(f64, usize)> {
        if body.starts_with(self.symbols.infinity) {
            return Some((f64::INFINITY, self.symbols.infinity.len()));
        }
        let mut number = String::new();
        let mut seen_digit = false;
        let mut seen_decimal = false;
        let mut used = 0;
        let mut chars = body.char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            if c.is_ascii_digit() {
                number.push(c);
                seen_digit = true;
            } else if c == self.symbols.grouping
                && self.grouping_used
                && !seen_decimal
                && seen_digit
                && chars.peek().is_some_and(|(_, next)| next.is_ascii_digit())
            {
                // Grouping separators carry no value.
            } else if c == self.symbols.decimal && !seen_decimal && !self.parse_integer_only {
                number.push('.');
                seen_decimal = true;
            } else {
                break;
            }
            used = i + c.len_utf8();
        }
        if !seen_digit {
            return None;
        }
        number.parse::<f64>().ok().map(|v| (v, used))
    }

    /// The pattern equivalent to the current settings.
    #[must_use]
    pub fn to_pattern(&self) -> String {
        let mut out = String::new();
        affix_pattern(&self.positive_prefix, &mut out);
        self.number_pattern(&mut out);
        affix_pattern(&self.positive_suffix, &mut out);
        if self.explicit_negative {
            out.push(';');
            affix_pattern(&self.negative_prefix, &mut out);
            self.number_pattern(&mut out);
            affix_pattern(&self.negative_suffix, &mut out);
        }
        out
    }

    fn number_pattern(&self, out: &mut String) {
        let primary = usize::from(self.grouping_size);
        let secondary = match self.secondary_grouping_size {
            0 => primary,
            s => usize::from(s),
        };
        let min_int = usize::from(self.min_int);
        let width = if self.grouping_used {
            let extra = if self.secondary_grouping_size > 0 { secondary } else { 0 };
            min_int.max(primary + 1 + extra)
        } else {
            min_int.max(1)
        };
        for i in (0..width).rev() {
            out.push(if i < min_int { '0' } else { '#' });
            if self.grouping_used && i > 0 && self.separator_before(i, primary, secondary) {
                out.push(',');
            }
        }
        if self.max_frac > 0 || self.decimal_always_shown {
            out.push('.');
            for i in 0..self.max_frac {
                out.push(if i < self.min_frac { '0' } else { '#' });
            }
        }
    }

    /// Whether a separator goes between integer digit `i` and `i - 1`,
    /// counting from the units digit.
    fn separator_before(&self, i: usize, primary: usize, secondary: usize) -> bool {
        primary > 0
            && (i == primary || (i > primary && secondary > 0 && (i - primary) % secondary == 0))
    }

    fn prefix(&self, negative: bool) -> &[AffixPart] {
        if negative { &self.negative_prefix } else { &self.positive_prefix }
    }

    fn suffix(&self, negative: bool) -> &[AffixPart] {
        if negative { &self.negative_suffix } else { &self.positive_suffix }
    }

    fn expand(&self, parts: &[AffixPart]) -> String {
        let mut out = String::new();
        self.push_affix(&mut out, parts);
        out
    }

    fn push_affix(&self, out: &mut String, parts: &[AffixPart]) {
        for part in parts {
            match part {
                AffixPart::Literal(s) => out.push_str(s),
                AffixPart::Currency => out.push_str(self.symbols.currency_symbol),
                AffixPart::IntlCurrency => out.push_str(self.symbols.currency_code),
                AffixPart::Percent => out.push(self.symbols.percent),
                AffixPart::PerMille => out.push(self.symbols.per_mille),
                AffixPart::Minus => out.push(self.symbols.minus),
            }
        }
    }

    fn push_number(&self, out: &mut String, digits: &Digits) {
        let int_len = usize::try_from(digits.decimal_at).unwrap_or(0);
        let mut int_digits: Vec<u8> = (0..int_len)
            .map(|i| digits.digits.get(i).copied().unwrap_or(0))
            .collect();
        let min_int = usize::from(self.min_int);
        if int_digits.len() < min_int {
            let pad = min_int - int_digits.len();
            int_digits.splice(0..0, std::iter::repeat_n(0, pad));
        }

        let significant_frac = digits.digits.len() as i64 - i64::from(digits.decimal_at);
        let frac_len = usize::try_from(significant_frac.max(0))
            .unwrap_or(0)
            .min(usize::from(self.max_frac))
            .max(usize::from(self.min_frac));
        let frac_digits: Vec<u8> = (0..frac_len)
            .map(|j| {
                let index = i64::from(digits.decimal_at) + j as i64;
                usize::try_from(index)
                    .ok()
                    .and_then(|i| digits.digits.get(i).copied())
                    .unwrap_or(0)
            })
            .collect();

        if int_digits.is_empty() && frac_digits.is_empty() {
            int_digits.push(0);
        }

        let primary = usize::from(self.grouping_size);
        let secondary = match self.secondary_grouping_size {
            0 => primary,
            s => usize::from(s),
        };
        let n = int_digits.len();
        for (k, d) in int_digits.iter().enumerate() {
            out.push(char::from(b'0' + d));
            let remaining = n - k - 1;
            if self.grouping_used
                && remaining > 0
                && self.separator_before(remaining, primary, secondary)
            {
                out.push(self.symbols.grouping);
            }
        }
        if !frac_digits.is_empty() || self.decimal_always_shown {
            out.push(self.symbols.decimal);
        }
        for d in frac_digits {
            out.push(char::from(b'0' + d));
        }
    }
}

/// A non-negative decimal `0.d1d2d3… × 10^decimal_at`, without trailing
/// zeros. Zero has no digits.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Digits {
    digits: Vec<u8>,
    decimal_at: i32,
}

impl Digits {
    fn from_f64(value: f64) -> Self {
        let text = format!("{value:e}");
        let (mantissa, exponent) = text.split_once('e').unwrap_or((text.as_str(), "0"));
        let exponent: i32 = exponent.parse().unwrap_or(0);
        let digits = mantissa
            .bytes()
            .filter(u8::is_ascii_digit)
            .map(|b| b - b'0')
            .collect();
        Self::normalized(digits, exponent + 1)
    }

    fn from_integer(value: u128) -> Self {
        let digits: Vec<u8> = value.to_string().bytes().map(|b| b - b'0').collect();
        let len = i32::try_from(digits.len()).unwrap_or(i32::MAX);
        Self::normalized(digits, len)
    }

    fn normalized(mut digits: Vec<u8>, decimal_at: i32) -> Self {
        while digits.last() == Some(&0) {
            digits.pop();
        }
        let lead = digits.iter().take_while(|&&d| d == 0).count();
        digits.drain(..lead);
        let decimal_at = if digits.is_empty() { 0 } else { decimal_at - lead as i32 };
        Self { digits, decimal_at }
    }

    /// Round half-even to `max_frac` digits after the decimal point.
    fn round(&mut self, max_frac: u16) {
        let keep = i64::from(self.decimal_at) + i64::from(max_frac);
        if keep >= self.digits.len() as i64 {
            return;
        }
        let Ok(keep) = usize::try_from(keep) else {
            *self = Self::normalized(Vec::new(), 0);
            return;
        };
        let dropped = self.digits[keep];
        let rest_nonzero = self.digits[keep + 1..].iter().any(|&d| d != 0);
        let previous_odd = keep > 0 && self.digits[keep - 1] % 2 == 1;
        let round_up = dropped > 5 || (dropped == 5 && (rest_nonzero || previous_odd));
        self.digits.truncate(keep);
        if round_up {
            let mut carried = true;
            for d in self.digits.iter_mut().rev() {
                if *d == 9 {
                    *d = 0;
                } else {
                    *d += 1;
                    carried = false;
                    break;
                }
            }
            if carried {
                self.digits.insert(0, 1);
                self.decimal_at += 1;
            }
        }
        let decimal_at = self.decimal_at;
        *self = Self::normalized(std::mem::take(&mut self.digits), decimal_at);
    }
}

fn parse_pattern(pattern: &str) -> Result<(SubPattern, Option<SubPattern>)> {
    let chars: Vec<(usize, char)> = pattern.char_indices().collect();
    let mut i = 0;
    let positive = parse_subpattern(&chars, &mut i)?;
    let negative = if i < chars.len() {
        // Skip the ';'.
        i += 1;
        let negative = parse_subpattern(&chars, &mut i)?;
        if i < chars.len() {
            return Err(Error::new(ErrorCode::UnexpectedToken, "more than two subpatterns")
                .at(chars[i].0));
        }
        Some(negative)
    } else {
        None
    };
    Ok((positive, negative))
}

/// Parse one subpattern, stopping at an unquoted `;` or the end.
fn parse_subpattern(chars: &[(usize, char)], i: &mut usize) -> Result<SubPattern> {
    #[derive(PartialEq)]
    enum Phase {
        Prefix,
        Number,
        Suffix,
    }

    let mut sub = SubPattern::default();
    let mut phase = Phase::Prefix;
    let mut in_quote = false;
    let mut literal = String::new();

    let mut int_zeros = 0u16;
    let mut frac_zeros = 0u16;
    let mut frac_sharps = 0u16;
    let mut seen_decimal = false;
    let mut seen_digit = false;
    // Digits since the last ',' and the size of the group before it.
    let mut group_marks: Vec<u16> = Vec::new();
    let mut since_group = 0u16;

    let syntax =
        |code: ErrorCode, detail: &'static str, at: usize| Err(Error::new(code, detail).at(at));

    while *i < chars.len() {
        let (at, c) = chars[*i];
        if phase == Phase::Number {
            match c {
                '#' if !seen_decimal => {
                    if int_zeros > 0 {
                        return syntax(ErrorCode::UnexpectedToken, "'#' after '0'", at);
                    }
                    since_group += 1;
                }
                '0' if !seen_decimal => {
                    int_zeros += 1;
                    since_group += 1;
                }
                '#' => frac_sharps += 1,
                '0' => {
                    if frac_sharps > 0 {
                        return syntax(ErrorCode::UnexpectedToken, "'0' after '#' in fraction", at);
                    }
                    frac_zeros += 1;
                }
                ',' if !seen_decimal => {
                    group_marks.push(since_group);
                    since_group = 0;
                }
                ',' => {
                    return syntax(
                        ErrorCode::UnexpectedToken,
                        "grouping separator in fraction",
                        at,
                    );
                }
                '.' if seen_decimal => {
                    return syntax(
                        ErrorCode::MultipleDecimalSeparators,
                        "second decimal separator",
                        at,
                    );
                }
                '.' => seen_decimal = true,
                '1'..='9' => {
                    return syntax(
                        ErrorCode::UnexpectedToken,
                        "rounding increments are not supported",
                        at,
                    );
                }
                '@' => {
                    return syntax(
                        ErrorCode::UnexpectedToken,
                        "significant digits are not supported",
                        at,
                    );
                }
                'E' => {
                    return syntax(
                        ErrorCode::MalformedExponentialPattern,
                        "exponents are not supported",
                        at,
                    );
                }
                _ => {
                    phase = Phase::Suffix;
                    continue;
                }
            }
            *i += 1;
            continue;
        }

        if in_quote {
            if c == '\'' {
                if chars.get(*i + 1).is_some_and(|&(_, n)| n == '\'') {
                    literal.push('\'');
                    *i += 1;
                } else {
                    in_quote = false;
                }
            } else {
                literal.push(c);
            }
            *i += 1;
            continue;
        }

        let affix = if phase == Phase::Prefix { &mut sub.prefix } else { &mut sub.suffix };
        let mut special = |part: AffixPart, literal: &mut String| {
            if !literal.is_empty() {
                affix.push(AffixPart::Literal(std::mem::take(literal)));
            }
            affix.push(part);
        };
        match c {
            '\'' => {
                if chars.get(*i + 1).is_some_and(|&(_, n)| n == '\'') {
                    literal.push('\'');
                    *i += 1;
                } else {
                    in_quote = true;
                }
            }
            '#' | '0' | ',' | '.' if phase == Phase::Prefix => {
                if !literal.is_empty() {
                    sub.prefix.push(AffixPart::Literal(std::mem::take(&mut literal)));
                }
                phase = Phase::Number;
                seen_digit = true;
                continue;
            }
            '#' | '0'..='9' | ',' | '.' | '@' if phase == Phase::Suffix => {
                return syntax(
                    ErrorCode::UnexpectedToken,
                    "unquoted special character in suffix",
                    at,
                );
            }
            ';' => {
                if phase == Phase::Prefix {
                    return syntax(ErrorCode::UnexpectedToken, "subpattern without digits", at);
                }
                break;
            }
            '*' => return syntax(ErrorCode::IllegalPadPosition, "padding is not supported", at),
            '%' => {
                if sub.multiplier.is_some() {
                    return syntax(
                        ErrorCode::MultiplePercentSymbols,
                        "second percent or per-mille sign",
                        at,
                    );
                }
                sub.multiplier = Some(100);
                special(AffixPart::Percent, &mut literal);
            }
            '‰' => {
                if sub.multiplier.is_some() {
                    return syntax(
                        ErrorCode::MultiplePermillSymbols,
                        "second percent or per-mille sign",
                        at,
                    );
                }
                sub.multiplier = Some(1000);
                special(AffixPart::PerMille, &mut literal);
            }
            '¤' => {
                if chars.get(*i + 1).is_some_and(|&(_, n)| n == '¤') {
                    *i += 1;
                    special(AffixPart::IntlCurrency, &mut literal);
                } else {
                    special(AffixPart::Currency, &mut literal);
                }
            }
            '-' => special(AffixPart::Minus, &mut literal),
            _ => literal.push(c),
        }
        *i += 1;
    }

    if in_quote {
        let end = chars.last().map_or(0, |&(at, _)| at);
        return syntax(ErrorCode::PatternSyntaxError, "unterminated quote", end);
    }
    if !seen_digit {
        let at = chars.get(*i).map_or_else(|| chars.last().map_or(0, |&(a, _)| a), |&(a, _)| a);
        return syntax(ErrorCode::UnexpectedToken, "subpattern without digits", at);
    }
    if !literal.is_empty() {
        let affix = if phase == Phase::Prefix { &mut sub.prefix } else { &mut sub.suffix };
        affix.push(AffixPart::Literal(literal));
    }

    if let Some(&previous) = group_marks.last() {
        if since_group == 0 {
            let at = chars.get(*i).map_or(0, |&(a, _)| a);
            return syntax(ErrorCode::UnexpectedToken, "grouping separator at end of integer", at);
        }
        let primary = u8::try_from(since_group).unwrap_or(u8::MAX);
        let secondary = if group_marks.len() > 1 {
            u8::try_from(previous).unwrap_or(u8::MAX)
        } else {
            0
        };
        let secondary = if secondary == primary { 0 } else { secondary };
        sub.grouping = Some((primary, secondary));
    }
    sub.min_int = int_zeros;
    sub.min_frac = frac_zeros.min(MAX_FRACTION_DIGITS);
    sub.max_frac = (frac_zeros + frac_sharps).min(MAX_FRACTION_DIGITS);
    sub.decimal_shown = seen_decimal && frac_zeros + frac_sharps == 0;
    Ok(sub)
}

fn affix_pattern(parts: &[AffixPart], out: &mut String) {
    for part in parts {
        match part {
            AffixPart::Literal(s) => {
                for c in s.chars() {
                    match c {
                        '\'' => out.push_str("''"),
                        '#' | '0'..='9' | ',' | '.' | ';' | '%' | '‰' | '¤' | '-' | '*' | '@'
                        | 'E' => {
                            out.push('\'');
                            out.push(c);
                            out.push('\'');
                        }
                        _ => out.push(c),
                    }
                }
            }
            AffixPart::Currency => out.push('¤'),
            AffixPart::IntlCurrency => out.push_str("¤¤"),
            AffixPart::Percent => out.push('%'),
            AffixPart::PerMille => out.push('‰'),
            AffixPart::Minus => out.push('-'),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en(pattern: &str) -> DecimalFormat {
        DecimalFormat::new(pattern, &Locale::english()).unwrap()
    }

    fn instance(id: &str, style: NumberStyle) -> DecimalFormat {
        DecimalFormat::instance(&Locale::new(id).unwrap(), style).unwrap()
    }

    #[test]
    fn default_number_format() {
        let f = instance("en", NumberStyle::Number);
        assert_eq!(f.format_f64(12373.0), "12,373");
        assert_eq!(f.format_f64(1234567.891), "1,234,567.891");
        assert_eq!(f.format_f64(0.12345), "0.123");
        assert_eq!(f.format_f64(-3.5), "-3.5");
        assert_eq!(f.format_f64(0.0), "0");
        assert_eq!(f.format_i64(i64::MIN), "-9,223,372,036,854,775,808");
        assert_eq!(f.format_f64(f64::NAN), "NaN");
        assert_eq!(f.format_f64(f64::NEG_INFINITY), "-∞");
    }

    #[test]
    fn half_even_rounding() {
        let f = en("0.#");
        assert_eq!(f.format_f64(0.25), "0.2");
        assert_eq!(f.format_f64(0.35), "0.4");
        assert_eq!(f.format_f64(0.251), "0.3");
        assert_eq!(f.format_f64(9.96), "10");
        assert_eq!(en("0").format_f64(2.5), "2");
        assert_eq!(en("0").format_f64(3.5), "4");
        assert_eq!(en("0").format_f64(0.5), "0");
        assert_eq!(en("#,##0").format_f64(999.5), "1,000");
        assert_eq!(en("0.00").format_f64(0.0001), "0.00");
    }

    #[test]
    fn integer_style() {
        let f = instance("en", NumberStyle::Integer);
        assert_eq!(f.format_f64(12373.0), "12,373");
        assert_eq!(f.format_f64(2.5), "2");
        assert_eq!(f.to_pattern(), "#,##0");
        let mut pos = 0;
        assert_eq!(f.parse("3.75 apples", &mut pos), Some(Formattable::Long(3)));
        assert_eq!(pos, 1);
    }

    #[test]
    fn locale_symbols() {
        assert_eq!(instance("de", NumberStyle::Number).format_f64(1234.5), "1.234,5");
        assert_eq!(instance("fr", NumberStyle::Number).format_f64(1234.5), "1\u{a0}234,5");
        assert_eq!(instance("de", NumberStyle::Percent).format_f64(0.25), "25 %");
        assert_eq!(instance("en", NumberStyle::Percent).format_f64(0.256), "26%");
    }

    #[test]
    fn currency_with_negative_subpattern() {
        let f = instance("en", NumberStyle::Currency);
        assert_eq!(f.format_f64(1234.5), "$1,234.50");
        assert_eq!(f.format_f64(-1234.5), "($1,234.50)");
        assert_eq!(f.to_pattern(), "¤#,##0.00;(¤#,##0.00)");
        assert_eq!(instance("de", NumberStyle::Currency).format_f64(3.0), "3,00 €");
    }

    #[test]
    fn secondary_grouping() {
        let f = en("#,##,##0");
        assert_eq!(f.format_f64(12_345_678.0), "1,23,45,678");
        assert_eq!(f.to_pattern(), "#,##,##0");
        assert_eq!(en("#,###,##0").to_pattern(), "#,##0");
    }

    #[test]
    fn quoted_affixes_and_minimums() {
        let f = en("'#'00.00' pts'");
        assert_eq!(f.format_f64(5.0), "#05.00 pts");
        assert_eq!(f.to_pattern(), "'#'00.00 pts");
        assert_eq!(en("'o''clock' 0").format_f64(7.0), "o'clock 7");
        assert_eq!(en(".00").format_f64(0.5), ".50");
        assert_eq!(en("#.").format_f64(3.0), "3.");
    }

    #[test]
    fn pattern_errors() {
        let code = |p: &str| DecimalFormat::new(p, &Locale::english()).unwrap_err().code();
        assert_eq!(code("0.0E0"), ErrorCode::MalformedExponentialPattern);
        assert_eq!(code("0.0.0"), ErrorCode::MultipleDecimalSeparators);
        assert_eq!(code("%0%"), ErrorCode::MultiplePercentSymbols);
        assert_eq!(code("abc"), ErrorCode::UnexpectedToken);
        assert_eq!(code("0;0;0"), ErrorCode::UnexpectedToken);
        assert_eq!(code("0#"), ErrorCode::UnexpectedToken);
        assert_eq!(code("'abc0"), ErrorCode::PatternSyntaxError);
        assert_eq!(code("*x0"), ErrorCode::IllegalPadPosition);
    }

    #[test]
    fn parse_numbers() {
        let f = instance("en", NumberStyle::Number);
        let mut pos = 0;
        assert_eq!(f.parse("12,373 files", &mut pos), Some(Formattable::Long(12373)));
        assert_eq!(pos, 6);

        let mut pos = 2;
        assert_eq!(f.parse("x=-0.5;", &mut pos), Some(Formattable::Double(-0.5)));
        assert_eq!(pos, 6);

        let mut pos = 0;
        assert_eq!(f.parse("abc", &mut pos), None);
        assert_eq!(pos, 0);

        let mut pos = 0;
        assert_eq!(
            f.parse("9,000,000,000", &mut pos),
            Some(Formattable::Int64(9_000_000_000))
        );

        let percent = instance("en", NumberStyle::Percent);
        let mut pos = 0;
        assert_eq!(percent.parse("50%", &mut pos), Some(Formattable::Double(0.5)));

        let currency = instance("en", NumberStyle::Currency);
        let mut pos = 0;
        assert_eq!(currency.parse("($2.00)", &mut pos), Some(Formattable::Long(-2)));
        assert_eq!(pos, 7);
    }

    #[test]
    fn failed_apply_pattern_keeps_settings() {
        let mut f = en("#,##0.00");
        assert!(f.apply_pattern("0.0E0").is_err());
        assert_eq!(f.to_pattern(), "#,##0.00");
    }

    #[test]
    fn fraction_digit_setters_stay_consistent() {
        let mut f = en("0.00##");
        f.set_maximum_fraction_digits(1);
        assert_eq!(f.minimum_fraction_digits(), 1);
        f.set_minimum_fraction_digits(3);
        assert_eq!(f.maximum_fraction_digits(), 3);
        assert_eq!(f.format_f64(1.0), "1.000");
    }
}

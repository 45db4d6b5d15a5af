//! Range-to-text selection.
//!
//! A [`ChoiceFormat`] maps half-open numeric intervals to strings. The
//! pattern lists `limit relation text` entries separated by `|`:
//!
//! * `1#one file`: the interval starts at 1, inclusive (`≤` means the same)
//! * `1<many files`: the interval starts just above 1
//! * `∞`, `-∞`: infinite limits
//!
//! A number selects the last entry whose limit it reaches; numbers below the
//! first limit, and NaN, select the first entry. Text may be quoted with
//! `'…'`; `''` is an apostrophe. A `|` inside `{…}` does not split entries,
//! so choice texts can hold nested MessageFormat arguments.

use std::fmt;

use ficu_common::{Error, ErrorCode, Result};

use crate::formattable::Formattable;

const INFINITY: char = '∞';
const LESS_EQUAL: char = '≤';

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChoiceFormat {
    limits: Vec<f64>,
    /// `true` when the limit itself is excluded (`<`).
    closures: Vec<bool>,
    formats: Vec<String>,
}

impl ChoiceFormat {
    pub fn new(pattern: &str) -> Result<Self> {
        let mut format = Self::default();
        format.apply_pattern(pattern)?;
        Ok(format)
    }

    /// Build from inclusive limits.
    pub fn from_limits(limits: &[f64], formats: &[&str]) -> Result<Self> {
        Self::from_limits_and_closures(limits, &vec![false; limits.len()], formats)
    }

    pub fn from_limits_and_closures(
        limits: &[f64],
        closures: &[bool],
        formats: &[&str],
    ) -> Result<Self> {
        let mut format = Self::default();
        format.set_choices(limits, closures, formats)?;
        Ok(format)
    }

    /// Replace all entries. The three slices must have the same length and
    /// the limits must ascend.
    pub fn set_choices(
        &mut self,
        limits: &[f64],
        closures: &[bool],
        formats: &[&str],
    ) -> Result<()> {
        if limits.len() != formats.len() || limits.len() != closures.len() {
            return Err(Error::illegal_argument(
                "limits, closures and formats differ in length",
            ));
        }
        for i in 0..limits.len() {
            if limits[i].is_nan() {
                return Err(Error::illegal_argument("NaN choice limit"));
            }
            if i > 0 && !ascending(limits[i - 1], closures[i - 1], limits[i], closures[i]) {
                return Err(Error::illegal_argument("choice limits are not ascending"));
            }
        }
        self.limits = limits.to_vec();
        self.closures = closures.to_vec();
        self.formats = formats.iter().map(|f| (*f).to_string()).collect();
        Ok(())
    }

    /// Replace all entries from a pattern. On error `self` is unchanged.
    pub fn apply_pattern(&mut self, pattern: &str) -> Result<()> {
        let mut limits = Vec::new();
        let mut closures = Vec::new();
        let mut formats = Vec::new();

        let mut buf = String::new();
        let mut in_quote = false;
        let mut brace_depth = 0usize;
        let mut expecting_limit = true;
        let mut skip_space = false;
        let mut chars = pattern.char_indices().peekable();

        let syntax = |detail: &'static str, at: usize| Err(Error::pattern_syntax(detail).at(at));

        while let Some((at, c)) = chars.next() {
            if skip_space {
                if c.is_whitespace() {
                    continue;
                }
                skip_space = false;
            }
            if c == '\'' {
                if chars.next_if(|&(_, n)| n == '\'').is_some() {
                    buf.push('\'');
                } else {
                    in_quote = !in_quote;
                }
            } else if in_quote {
                buf.push(c);
            } else if c == '{' {
                brace_depth += 1;
                buf.push(c);
            } else if c == '}' {
                if brace_depth == 0 {
                    return syntax("unmatched '}' in choice text", at);
                }
                brace_depth -= 1;
                buf.push(c);
            } else if brace_depth > 0 {
                buf.push(c);
            } else if expecting_limit && matches!(c, '#' | '<' | LESS_EQUAL) {
                let text = buf.trim();
                let limit = match text {
                    "" => return syntax("missing choice limit", at),
                    "∞" | "+∞" => f64::INFINITY,
                    "-∞" => f64::NEG_INFINITY,
                    _ => match text.parse::<f64>() {
                        Ok(limit) if !limit.is_nan() => limit,
                        _ => return syntax("choice limit is not a number", at),
                    },
                };
                let closure = c == '<';
                if let (Some(&prev), Some(&prev_closure)) = (limits.last(), closures.last())
                    && !ascending(prev, prev_closure, limit, closure)
                {
                    return syntax("choice limits are not ascending", at);
                }
                limits.push(limit);
                closures.push(closure);
                buf.clear();
                expecting_limit = false;
                skip_space = true;
            } else if c == '|' {
                if expecting_limit {
                    return syntax("choice entry without a limit", at);
                }
                formats.push(std::mem::take(&mut buf));
                expecting_limit = true;
            } else {
                buf.push(c);
            }
        }

        if in_quote {
            return syntax("unterminated quote", pattern.len());
        }
        if brace_depth > 0 {
            return Err(
                Error::new(ErrorCode::UnmatchedBraces, "unclosed '{' in choice text")
                    .at(pattern.len()),
            );
        }
        if expecting_limit {
            if !limits.is_empty() || !buf.trim().is_empty() {
                return syntax("choice entry without a limit", pattern.len());
            }
        } else {
            formats.push(buf);
        }

        self.limits = limits;
        self.closures = closures;
        self.formats = formats;
        Ok(())
    }

    /// The pattern for the current entries; reparsing it gives the same
    /// entries.
    #[must_use]
    pub fn to_pattern(&self) -> String {
        let mut out = String::new();
        for (i, ((&limit, &closure), text)) in self
            .limits
            .iter()
            .zip(&self.closures)
            .zip(&self.formats)
            .enumerate()
        {
            if i > 0 {
                out.push('|');
            }
            push_limit(&mut out, limit);
            out.push(if closure { '<' } else { '#' });

            let need_quote = text.contains(['<', '#', LESS_EQUAL, '|'])
                || text.starts_with(char::is_whitespace);
            if need_quote {
                out.push('\'');
            }
            for c in text.chars() {
                out.push(c);
                if c == '\'' {
                    out.push('\'');
                }
            }
            if need_quote {
                out.push('\'');
            }
        }
        out
    }

    /// The text of the entry `number` falls into.
    #[must_use]
    pub fn format(&self, number: f64) -> &str {
        let mut i = 0;
        while i < self.limits.len() {
            let reached = if self.closures[i] {
                number > self.limits[i]
            } else {
                number >= self.limits[i]
            };
            if !reached {
                break;
            }
            i += 1;
        }
        self.formats.get(i.saturating_sub(1)).map_or("", String::as_str)
    }

    pub fn format_formattable(&self, value: &Formattable) -> Result<String> {
        match value.as_f64() {
            Some(number) => Ok(self.format(number).to_string()),
            None => Err(Error::illegal_argument(format!(
                "cannot choose on a {}",
                value.kind()
            ))),
        }
    }

    /// Match the longest entry text at `*pos` and return its limit.
    ///
    /// On failure `*pos` is unchanged.
    pub fn parse(&self, text: &str, pos: &mut usize) -> Option<f64> {
        let rest = text.get(*pos..)?;
        let mut best: Option<(usize, f64)> = None;
        for (format, &limit) in self.formats.iter().zip(&self.limits) {
            if !format.is_empty()
                && rest.starts_with(format.as_str())
                && best.is_none_or(|(len, _)| format.len() > len)
            {
                best = Some((format.len(), limit));
            }
        }
        let (len, limit) = best?;
        *pos += len;
        Some(limit)
    }

    #[must_use]
    pub fn limits(&self) -> &[f64] {
        &self.limits
    }

    #[must_use]
    pub fn closures(&self) -> &[bool] {
        &self.closures
    }

    #[must_use]
    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    /// The smallest double greater than `d`.
    #[must_use]
    pub fn next_double(d: f64) -> f64 {
        if d.is_nan() || d == f64::INFINITY {
            return d;
        }
        if d == 0.0 {
            return f64::from_bits(1);
        }
        let bits = d.to_bits();
        f64::from_bits(if d > 0.0 { bits + 1 } else { bits - 1 })
    }

    /// The largest double less than `d`.
    #[must_use]
    pub fn previous_double(d: f64) -> f64 {
        -Self::next_double(-d)
    }
}

impl fmt::Display for ChoiceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pattern())
    }
}

/// Two equal limits are allowed when the first is inclusive and the second
/// exclusive; that places the limit value itself in the first interval.
fn ascending(prev: f64, prev_closure: bool, limit: f64, closure: bool) -> bool {
    limit > prev || (limit == prev && !prev_closure && closure)
}

fn push_limit(out: &mut String, limit: f64) {
    if limit == f64::INFINITY {
        out.push(INFINITY);
    } else if limit == f64::NEG_INFINITY {
        out.push('-');
        out.push(INFINITY);
    } else if limit.fract() == 0.0 && limit.abs() < 1e15 {
        out.push_str(&format!("{}", limit as i64));
    } else {
        out.push_str(&limit.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_interval() {
        let f = ChoiceFormat::new("0#no files|1#one file|1<many files").unwrap();
        assert_eq!(f.format(-5.0), "no files");
        assert_eq!(f.format(0.0), "no files");
        assert_eq!(f.format(0.5), "no files");
        assert_eq!(f.format(1.0), "one file");
        assert_eq!(f.format(1.000_001), "many files");
        assert_eq!(f.format(f64::NAN), "no files");
        assert_eq!(f.closures(), &[false, false, true]);
    }

    #[test]
    fn whitespace_after_relation_is_skipped() {
        let f = ChoiceFormat::new("0# none | 1< {0} files").unwrap();
        assert_eq!(f.formats(), &["none ", "{0} files"]);
    }

    #[test]
    fn braces_protect_separators() {
        let f = ChoiceFormat::new("0#{0,choice,0#a|1#b}|1#c").unwrap();
        assert_eq!(f.formats(), &["{0,choice,0#a|1#b}", "c"]);
    }

    #[test]
    fn quotes() {
        let f = ChoiceFormat::new("0#it''s|1#'a|b'").unwrap();
        assert_eq!(f.formats(), &["it's", "a|b"]);
        assert_eq!(f.to_pattern(), "0#it''s|1#'a|b'");
    }

    #[test]
    fn regression_patterns_round_trip() {
        for pattern in [
            "0#are no files|1#is one file|1<are many files",
            "-∞<are negative|0<are no or fraction|1#is one|1<is 1+|∞<are many.",
            "0#no files|1#one file|1<{0,number,integer} files",
            "1#one|2#two|2.5#two and a half|3#three",
        ] {
            let f = ChoiceFormat::new(pattern).unwrap();
            assert_eq!(f.to_pattern(), pattern);
            assert_eq!(ChoiceFormat::new(&f.to_pattern()).unwrap(), f);
        }
    }

    #[test]
    fn infinite_limits() {
        let f =
            ChoiceFormat::new("-∞<are negative|0<are no or fraction|1#is one|1<is 1+|∞<are many.")
                .unwrap();
        assert_eq!(f.format(f64::NEG_INFINITY), "are negative");
        assert_eq!(f.format(-1.0), "are negative");
        assert_eq!(f.format(0.0), "are negative");
        assert_eq!(f.format(0.5), "are no or fraction");
        assert_eq!(f.format(1.0), "is one");
        assert_eq!(f.format(2.0), "is 1+");
        assert_eq!(f.format(f64::INFINITY), "is 1+");
    }

    #[test]
    fn syntax_errors() {
        let code = |p: &str| ChoiceFormat::new(p).unwrap_err().code();
        assert_eq!(code("1#a|0#b"), ErrorCode::PatternSyntaxError);
        assert_eq!(code("1#a|1#b"), ErrorCode::PatternSyntaxError);
        assert_eq!(code("x#a"), ErrorCode::PatternSyntaxError);
        assert_eq!(code("#a"), ErrorCode::PatternSyntaxError);
        assert_eq!(code("0#a|b"), ErrorCode::PatternSyntaxError);
        assert_eq!(code("0#'a"), ErrorCode::PatternSyntaxError);
        assert_eq!(code("0#{a"), ErrorCode::UnmatchedBraces);
        assert_eq!(code("0#a}"), ErrorCode::PatternSyntaxError);

        let mut f = ChoiceFormat::new("0#a").unwrap();
        assert!(f.apply_pattern("2#x|1#y").is_err());
        assert_eq!(f.to_pattern(), "0#a");
    }

    #[test]
    fn parse_longest_text() {
        let f = ChoiceFormat::new("0#file|1#files|2#fil").unwrap();
        let mut pos = 4;
        assert_eq!(f.parse("the files", &mut pos), Some(1.0));
        assert_eq!(pos, 9);
        let mut pos = 0;
        assert_eq!(f.parse("nothing", &mut pos), None);
        assert_eq!(pos, 0);
    }

    #[test]
    fn built_from_arrays() {
        let f = ChoiceFormat::from_limits_and_closures(
            &[0.0, 1.0, 1.0],
            &[false, false, true],
            &["none", "one", "many"],
        )
        .unwrap();
        assert_eq!(f.to_pattern(), "0#none|1#one|1<many");
        assert!(ChoiceFormat::from_limits(&[1.0, 0.0], &["a", "b"]).is_err());
        assert!(ChoiceFormat::from_limits(&[1.0], &["a", "b"]).is_err());
    }

    #[test]
    fn adjacent_doubles() {
        assert!(ChoiceFormat::next_double(1.0) > 1.0);
        assert_eq!(ChoiceFormat::previous_double(ChoiceFormat::next_double(1.0)), 1.0);
        assert!(ChoiceFormat::next_double(-1.0) > -1.0);
        assert_eq!(ChoiceFormat::next_double(0.0), f64::from_bits(1));
        assert!(ChoiceFormat::previous_double(0.0) < 0.0);
        assert_eq!(ChoiceFormat::next_double(f64::INFINITY), f64::INFINITY);
        assert_eq!(ChoiceFormat::previous_double(f64::NEG_INFINITY), f64::NEG_INFINITY);
    }
}

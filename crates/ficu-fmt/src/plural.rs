//! Plural-category message selection.
//!
//! Pattern: `[offset:N] (keyword|=N) '{' text '}' …`. Every keyword must be
//! one the locale's [`PluralRules`] produce, and `other` must be present.
//! In the chosen text, `#` outside nested braces becomes the formatted
//! number minus the offset.
//!
//! # Failure Modes
//!
//! | Pattern problem                   | Error code              |
//! |-----------------------------------|-------------------------|
//! | keyword the rules never produce   | `UndefinedKeyword`      |
//! | keyword given twice               | `DuplicateKeyword`      |
//! | no `other`                        | `DefaultKeywordMissing` |
//! | text without a keyword, bad `=N`  | `PatternSyntaxError`    |
//! | text never closed                 | `UnmatchedBraces`       |

use ficu_common::{Error, ErrorCode, Locale, Result};

use crate::formattable::Formattable;
use crate::number::{DecimalFormat, NumberStyle};
use crate::plural_rules::{OTHER, PluralRules};

#[derive(Debug, Clone, PartialEq)]
pub struct PluralFormat {
    locale: Locale,
    rules: PluralRules,
    pattern: String,
    offset: f64,
    explicit: Vec<(f64, String)>,
    phrases: Vec<(String, String)>,
    number_format: DecimalFormat,
}

impl PluralFormat {
    /// A format with the rules of `locale` and an empty pattern.
    pub fn for_locale(locale: &Locale) -> Result<Self> {
        Self::with_rules(PluralRules::for_locale(locale)?, locale)
    }

    pub fn with_rules(rules: PluralRules, locale: &Locale) -> Result<Self> {
        Ok(Self {
            locale: locale.clone(),
            rules,
            pattern: String::new(),
            offset: 0.0,
            explicit: Vec::new(),
            phrases: Vec::new(),
            number_format: DecimalFormat::instance(locale, NumberStyle::Number)?,
        })
    }

    pub fn new(pattern: &str, locale: &Locale) -> Result<Self> {
        let mut format = Self::for_locale(locale)?;
        format.apply_pattern(pattern)?;
        Ok(format)
    }

    /// Replace the pattern. On error `self` is unchanged.
    pub fn apply_pattern(&mut self, pattern: &str) -> Result<()> {
        let parsed = parse_pattern(pattern, &self.rules)?;
        self.pattern = pattern.to_string();
        self.offset = parsed.offset;
        self.explicit = parsed.explicit;
        self.phrases = parsed.phrases;
        Ok(())
    }

    #[must_use]
    pub fn to_pattern(&self) -> &str {
        &self.pattern
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn rules(&self) -> &PluralRules {
        &self.rules
    }

    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// The format used for `#`.
    pub fn set_number_format(&mut self, format: DecimalFormat) {
        self.number_format = format;
    }

    /// The text for `number` with `#` substituted.
    pub fn format(&self, number: f64) -> Result<String> {
        if self.phrases.is_empty() {
            return Err(Error::invalid_format("plural format has no pattern"));
        }
        let phrase = match self.explicit.iter().find(|(value, _)| *value == number) {
            Some((_, text)) => text.as_str(),
            None => {
                let keyword = self.rules.select(number - self.offset);
                self.phrase(keyword)
                    .or_else(|| self.phrase(OTHER))
                    .unwrap_or_default()
            }
        };

        let mut out = String::with_capacity(phrase.len());
        let mut depth = 0usize;
        for c in phrase.chars() {
            match c {
                '{' => depth += 1,
                '}' => depth = depth.saturating_sub(1),
                '#' if depth == 0 => {
                    out.push_str(&self.number_format.format_f64(number - self.offset));
                    continue;
                }
                _ => {}
            }
            out.push(c);
        }
        Ok(out)
    }

    pub fn format_formattable(&self, value: &Formattable) -> Result<String> {
        match value.as_f64() {
            Some(number) => self.format(number),
            None => Err(Error::illegal_argument(format!(
                "cannot pluralize a {}",
                value.kind()
            ))),
        }
    }

    fn phrase(&self, keyword: &str) -> Option<&str> {
        self.phrases
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, text)| text.as_str())
    }
}

struct Parsed {
    offset: f64,
    explicit: Vec<(f64, String)>,
    phrases: Vec<(String, String)>,
}

fn parse_pattern(pattern: &str, rules: &PluralRules) -> Result<Parsed> {
    let mut parsed = Parsed {
        offset: 0.0,
        explicit: Vec::new(),
        phrases: Vec::new(),
    };
    let mut rest = pattern.trim_start();

    if let Some(after) = rest.strip_prefix("offset:") {
        let after = after.trim_start();
        let end = after
            .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
            .unwrap_or(after.len());
        parsed.offset = after[..end].parse::<f64>().map_err(|_| {
            Error::pattern_syntax("bad plural offset").at(pattern.len() - after.len())
        })?;
        rest = after[end..].trim_start();
    }

    while !rest.is_empty() {
        let at = pattern.len() - rest.len();
        let key_end = rest
            .find(|c: char| c == '{' || c.is_whitespace())
            .ok_or_else(|| Error::pattern_syntax("plural keyword without text").at(at))?;
        let key = &rest[..key_end];
        rest = rest[key_end..].trim_start();
        if key.is_empty() {
            return Err(Error::pattern_syntax("plural text without a keyword").at(at));
        }
        let Some(body) = rest.strip_prefix('{') else {
            return Err(Error::pattern_syntax("expected '{' after plural keyword").at(at));
        };

        let mut depth = 1usize;
        let mut close = None;
        for (i, c) in body.char_indices() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        close = Some(i);
                        break;
                    }
                }
                _ => {}
            }
        }
        let Some(close) = close else {
            return Err(Error::new(ErrorCode::UnmatchedBraces, "plural text is not closed").at(at));
        };
        let text = body[..close].to_string();
        rest = body[close + 1..].trim_start();

        if let Some(value) = key.strip_prefix('=') {
            let value = value
                .parse::<f64>()
                .map_err(|_| Error::pattern_syntax("bad explicit plural value").at(at))?;
            if parsed.explicit.iter().any(|(v, _)| *v == value) {
                return Err(
                    Error::new(ErrorCode::DuplicateKeyword, format!("'{key}' given twice")).at(at)
                );
            }
            parsed.explicit.push((value, text));
            continue;
        }

        if !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(Error::pattern_syntax(format!("'{key}' is not a plural keyword")).at(at));
        }
        if !rules.is_keyword(key) {
            return Err(Error::new(
                ErrorCode::UndefinedKeyword,
                format!("'{key}' is not a plural category of this locale"),
            )
            .at(at));
        }
        if parsed.phrases.iter().any(|(k, _)| k == key) {
            return Err(
                Error::new(ErrorCode::DuplicateKeyword, format!("'{key}' given twice")).at(at)
            );
        }
        parsed.phrases.push((key.to_string(), text));
    }

    if !parsed.phrases.iter().any(|(k, _)| k == OTHER) {
        return Err(Error::new(
            ErrorCode::DefaultKeywordMissing,
            "plural pattern has no 'other' text",
        ));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en(pattern: &str) -> Result<PluralFormat> {
        PluralFormat::new(pattern, &Locale::english())
    }

    #[test]
    fn selects_by_category() {
        let f = en("one{# file} other{# files}").unwrap();
        assert_eq!(f.format(1.0).unwrap(), "1 file");
        assert_eq!(f.format(0.0).unwrap(), "0 files");
        assert_eq!(f.format(12373.0).unwrap(), "12,373 files");
        assert_eq!(f.format(1.5).unwrap(), "1.5 files");
    }

    #[test]
    fn explicit_values_and_offset() {
        let f = en(
            "offset:1 =0{nobody} =1{just {0}} one{{0} and one other} other{{0} and # others}",
        )
        .unwrap();
        assert_eq!(f.offset(), 1.0);
        assert_eq!(f.format(0.0).unwrap(), "nobody");
        assert_eq!(f.format(1.0).unwrap(), "just {0}");
        assert_eq!(f.format(2.0).unwrap(), "{0} and one other");
        assert_eq!(f.format(5.0).unwrap(), "{0} and 4 others");
    }

    #[test]
    fn hash_in_nested_braces_is_kept() {
        let f = en("other{# {0,choice,0#x|1#y}}").unwrap();
        assert_eq!(f.format(3.0).unwrap(), "3 {0,choice,0#x|1#y}");
    }

    #[test]
    fn locale_categories() {
        let ru = PluralFormat::new(
            "one{# файл} few{# файла} many{# файлов} other{# файла}",
            &Locale::new("ru").unwrap(),
        )
        .unwrap();
        assert_eq!(ru.format(21.0).unwrap(), "21 файл");
        assert_eq!(ru.format(3.0).unwrap(), "3 файла");
        assert_eq!(ru.format(11.0).unwrap(), "11 файлов");
    }

    #[test]
    fn pattern_errors() {
        let code = |p: &str| en(p).unwrap_err().code();
        assert_eq!(code("few{a} other{b}"), ErrorCode::UndefinedKeyword);
        assert_eq!(code("one{a} one{b} other{c}"), ErrorCode::DuplicateKeyword);
        assert_eq!(code("=1{a} =1{b} other{c}"), ErrorCode::DuplicateKeyword);
        assert_eq!(code("one{a}"), ErrorCode::DefaultKeywordMissing);
        assert_eq!(code("other{a"), ErrorCode::UnmatchedBraces);
        assert_eq!(code("{a} other{b}"), ErrorCode::PatternSyntaxError);
        assert_eq!(code("one other{b}"), ErrorCode::PatternSyntaxError);
        assert_eq!(code("=x{a} other{b}"), ErrorCode::PatternSyntaxError);
        assert_eq!(code("other"), ErrorCode::PatternSyntaxError);
    }

    #[test]
    fn failed_apply_keeps_pattern() {
        let mut f = en("other{x}").unwrap();
        assert!(f.apply_pattern("one{y}").is_err());
        assert_eq!(f.to_pattern(), "other{x}");
        assert_eq!(f.format(2.0).unwrap(), "x");
    }

    #[test]
    fn non_numeric_argument() {
        let f = en("other{x}").unwrap();
        let err = f.format_formattable(&Formattable::from("a")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IllegalArgumentError);
    }
}

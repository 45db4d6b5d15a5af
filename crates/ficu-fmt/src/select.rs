//! Keyword-to-text selection.
//!
//! Pattern: `keyword '{' text '}' …` where a keyword starts with an ASCII
//! letter and continues with letters, digits, `_` or `-`. `other` is
//! required and is used for any keyword without its own text.

use ficu_common::{Error, ErrorCode, Result};

use crate::formattable::Formattable;

pub const OTHER: &str = "other";

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectFormat {
    pattern: String,
    phrases: Vec<(String, String)>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    Keyword,
    PastKeyword,
    Phrase,
}

impl SelectFormat {
    pub fn new(pattern: &str) -> Result<Self> {
        let mut format = Self::default();
        format.apply_pattern(pattern)?;
        Ok(format)
    }

    /// Replace the pattern. On error `self` is unchanged.
    pub fn apply_pattern(&mut self, pattern: &str) -> Result<()> {
        let mut phrases: Vec<(String, String)> = Vec::new();
        let mut state = State::Start;
        let mut keyword = String::new();
        let mut phrase = String::new();
        let mut depth = 0usize;

        for (at, c) in pattern.char_indices() {
            match state {
                State::Start | State::PastKeyword if c.is_whitespace() => {}
                State::Start if c.is_ascii_alphabetic() => {
                    keyword.push(c);
                    state = State::Keyword;
                }
                State::Keyword if is_keyword_char(c) => keyword.push(c),
                State::Keyword if c.is_whitespace() => state = State::PastKeyword,
                State::Keyword | State::PastKeyword if c == '{' => {
                    if phrases.iter().any(|(k, _)| *k == keyword) {
                        return Err(Error::new(
                            ErrorCode::DuplicateKeyword,
                            format!("'{keyword}' given twice"),
                        )
                        .at(at));
                    }
                    state = State::Phrase;
                }
                State::Phrase => match c {
                    '{' => {
                        depth += 1;
                        phrase.push(c);
                    }
                    '}' if depth > 0 => {
                        depth -= 1;
                        phrase.push(c);
                    }
                    '}' => {
                        phrases.push((std::mem::take(&mut keyword), std::mem::take(&mut phrase)));
                        state = State::Start;
                    }
                    _ => phrase.push(c),
                },
                _ => {
                    return Err(
                        Error::pattern_syntax(format!("unexpected '{c}' in select pattern")).at(at)
                    );
                }
            }
        }

        if state != State::Start {
            let code = if state == State::Phrase {
                ErrorCode::UnmatchedBraces
            } else {
                ErrorCode::PatternSyntaxError
            };
            return Err(Error::new(code, "select pattern ends inside an entry").at(pattern.len()));
        }
        if !phrases.iter().any(|(k, _)| k == OTHER) {
            return Err(Error::new(
                ErrorCode::DefaultKeywordMissing,
                "select pattern has no 'other' text",
            ));
        }

        self.pattern = pattern.to_string();
        self.phrases = phrases;
        Ok(())
    }

    #[must_use]
    pub fn to_pattern(&self) -> &str {
        &self.pattern
    }

    /// The text for `keyword`, falling back to `other`.
    pub fn format(&self, keyword: &str) -> Result<&str> {
        let valid = keyword.starts_with(|c: char| c.is_ascii_alphabetic())
            && keyword.chars().all(is_keyword_char);
        if !valid {
            return Err(Error::illegal_argument(format!(
                "'{keyword}' is not a select keyword"
            )));
        }
        self.phrase(keyword)
            .or_else(|| self.phrase(OTHER))
            .ok_or_else(|| Error::invalid_format("select format has no pattern"))
    }

    pub fn format_formattable(&self, value: &Formattable) -> Result<String> {
        match value.as_str() {
            Some(keyword) => self.format(keyword).map(str::to_string),
            None => Err(Error::illegal_argument(format!(
                "cannot select on a {}",
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

fn is_keyword_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selects_keyword() {
        let f = SelectFormat::new("feminine {She} masculine {He} other{They}").unwrap();
        assert_eq!(f.format("feminine").unwrap(), "She");
        assert_eq!(f.format("masculine").unwrap(), "He");
        assert_eq!(f.format("neuter").unwrap(), "They");
        assert_eq!(f.format("other").unwrap(), "They");
    }

    #[test]
    fn nested_braces_kept() {
        let f =
            SelectFormat::new("female{{0} went to her car} other{{0} went to the car}").unwrap();
        assert_eq!(f.format("female").unwrap(), "{0} went to her car");
    }

    #[test]
    fn invalid_keyword_argument() {
        let f = SelectFormat::new("other{x}").unwrap();
        for bad in ["", "9lives", "a b", "a.b"] {
            assert_eq!(
                f.format(bad).unwrap_err().code(),
                ErrorCode::IllegalArgumentError,
                "{bad:?}"
            );
        }
        assert_eq!(f.format("x-y_1").unwrap(), "x");
    }

    #[test]
    fn pattern_errors() {
        let code = |p: &str| SelectFormat::new(p).unwrap_err().code();
        assert_eq!(code("odd{foo} odd{bar} other{foobar}"), ErrorCode::DuplicateKeyword);
        assert_eq!(code("odd{foo} even{bar}"), ErrorCode::DefaultKeywordMissing);
        assert_eq!(code(""), ErrorCode::DefaultKeywordMissing);
        assert_eq!(code("odd{foo"), ErrorCode::UnmatchedBraces);
        assert_eq!(code("odd"), ErrorCode::PatternSyntaxError);
        assert_eq!(code("1odd{foo} other{x}"), ErrorCode::PatternSyntaxError);
        assert_eq!(code("odd even{x} other{y}"), ErrorCode::PatternSyntaxError);
        assert_eq!(code("{x} other{y}"), ErrorCode::PatternSyntaxError);
        assert_eq!(code("od$d{x} other{y}"), ErrorCode::PatternSyntaxError);
    }

    #[test]
    fn failed_apply_keeps_pattern() {
        let mut f = SelectFormat::new("other{x}").unwrap();
        assert!(f.apply_pattern("odd{foo}").is_err());
        assert_eq!(f.to_pattern(), "other{x}");
    }

    #[test]
    fn non_string_argument() {
        let f = SelectFormat::new("other{x}").unwrap();
        let err = f.format_formattable(&Formattable::from(3)).unwrap_err();
        assert_eq!(err.code(), ErrorCode::IllegalArgumentError);
    }
}

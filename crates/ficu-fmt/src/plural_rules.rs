//! Locale plural categories.
//!
//! Rules are written in a small language:
//!
//! ```text
//! rules     = rule (';' rule)*
//! rule      = keyword ':' condition
//! condition = and ('or' and)*
//! and       = relation ('and' relation)*
//! relation  = 'n' ['mod' int] ( 'is' ['not'] int
//!                             | ['not'] ('in' | 'within') range (',' range)* )
//! range     = int ['..' int]
//! ```
//!
//! `in` only matches integers; `within` matches any value inside the range.
//! Rules are tried in order and the first match wins; a number matching no
//! rule is `other`.

use std::fmt;

use ficu_common::{Error, ErrorCode, Locale, Result};

pub const OTHER: &str = "other";

#[derive(Debug, Clone, Copy, PartialEq)]
struct Range {
    low: f64,
    high: f64,
}

#[derive(Debug, Clone, PartialEq)]
enum Relation {
    Is { modulus: Option<f64>, negated: bool, value: f64 },
    In { modulus: Option<f64>, negated: bool, integer_only: bool, ranges: Vec<Range> },
}

impl Relation {
    fn matches(&self, n: f64) -> bool {
        let operand = |modulus: Option<f64>| match modulus {
            Some(m) => n % m,
            None => n,
        };
        match self {
            Relation::Is { modulus, negated, value } => (operand(*modulus) == *value) != *negated,
            Relation::In { modulus, negated, integer_only, ranges } => {
                let v = operand(*modulus);
                let inside = (!*integer_only || v.fract() == 0.0)
                    && ranges.iter().any(|r| v >= r.low && v <= r.high);
                inside != *negated
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Rule {
    keyword: String,
    /// Disjunction of conjunctions.
    condition: Vec<Vec<Relation>>,
}

impl Rule {
    fn matches(&self, n: f64) -> bool {
        self.condition
            .iter()
            .any(|and| and.iter().all(|relation| relation.matches(n)))
    }
}

/// An ordered set of plural rules.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PluralRules {
    rules: Vec<Rule>,
    source: String,
}

impl PluralRules {
    /// Compile rule text.
    pub fn new(description: &str) -> Result<Self> {
        let tokens = tokenize(description)?;
        let mut parser = Parser { tokens: &tokens, at: 0 };
        let mut rules: Vec<Rule> = Vec::new();
        while !parser.done() {
            let rule = parser.rule()?;
            if rules.iter().any(|r| r.keyword == rule.keyword) {
                return Err(Error::new(
                    ErrorCode::ParseError,
                    format!("plural keyword '{}' defined twice", rule.keyword),
                ));
            }
            rules.push(rule);
            if !parser.done() {
                parser.expect(";")?;
            }
        }
        Ok(Self {
            rules,
            source: description.trim().to_string(),
        })
    }

    /// The rules for `locale`'s language; languages without plural
    /// distinctions, and unknown ones, only have `other`.
    pub fn for_locale(locale: &Locale) -> Result<Self> {
        Self::new(builtin_rules(locale.language()))
    }

    /// The keyword for `number`.
    #[must_use]
    pub fn select(&self, number: f64) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.matches(number))
            .map_or(OTHER, |rule| rule.keyword.as_str())
    }

    /// Every keyword the rules can produce, `other` included.
    pub fn keywords(&self) -> impl Iterator<Item = &str> {
        let has_other = self.rules.iter().any(|r| r.keyword == OTHER);
        self.rules
            .iter()
            .map(|r| r.keyword.as_str())
            .chain((!has_other).then_some(OTHER))
    }

    #[must_use]
    pub fn is_keyword(&self, keyword: &str) -> bool {
        keyword == OTHER || self.rules.iter().any(|r| r.keyword == keyword)
    }
}

impl fmt::Display for PluralRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn builtin_rules(language: &str) -> &'static str {
    match language {
        "en" | "de" | "nl" | "sv" | "da" | "no" | "nb" | "nn" | "fi" | "et" | "it" | "es" | "pt"
        | "el" | "bg" | "hu" | "ca" | "eu" | "gl" | "af" | "sw" | "ur" | "hi" | "bn" => {
            "one: n is 1"
        }
        "fr" => "one: n within 0..2 and n is not 2",
        "ru" | "uk" | "be" | "sr" | "hr" | "bs" => {
            "one: n mod 10 is 1 and n mod 100 is not 11; \
             few: n mod 10 in 2..4 and n mod 100 not in 12..14; \
             many: n mod 10 is 0 or n mod 10 in 5..9 or n mod 100 in 11..14"
        }
        "pl" => {
            "one: n is 1; \
             few: n mod 10 in 2..4 and n mod 100 not in 12..14; \
             many: n is not 1 and n mod 10 in 0..1 or n mod 10 in 5..9 or n mod 100 in 12..14"
        }
        "cs" | "sk" => "one: n is 1; few: n in 2..4",
        "ar" => {
            "zero: n is 0; one: n is 1; two: n is 2; \
             few: n mod 100 in 3..10; many: n mod 100 in 11..99"
        }
        "he" | "iw" => "one: n is 1; two: n is 2; many: n is not 0 and n mod 10 is 0",
        "lv" => "zero: n is 0; one: n mod 10 is 1 and n mod 100 is not 11",
        "lt" => {
            "one: n mod 10 is 1 and n mod 100 not in 11..19; \
             few: n mod 10 in 2..9 and n mod 100 not in 11..19"
        }
        "ga" => "one: n is 1; two: n is 2",
        "ro" | "mo" => "one: n is 1; few: n is 0 or n is not 1 and n mod 100 in 1..19",
        "sl" => "one: n mod 100 is 1; two: n mod 100 is 2; few: n mod 100 in 3..4",
        _ => "",
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Word(String),
    Number(f64),
    Punct(&'static str),
}

fn tokenize(text: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some(&(at, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
        } else if c == ':' || c == ';' || c == ',' {
            chars.next();
            tokens.push(Token::Punct(match c {
                ':' => ":",
                ';' => ";",
                _ => ",",
            }));
        } else if c == '.' {
            chars.next();
            if chars.next_if(|&(_, n)| n == '.').is_none() {
                return Err(Error::new(ErrorCode::ParseError, "expected '..'").at(at));
            }
            tokens.push(Token::Punct(".."));
        } else if c.is_ascii_digit() {
            let mut end = at;
            while let Some((i, d)) = chars.next_if(|&(_, d)| d.is_ascii_digit()) {
                end = i + d.len_utf8();
            }
            let value = text[at..end]
                .parse::<f64>()
                .map_err(|_| Error::new(ErrorCode::ParseError, "bad number").at(at))?;
            tokens.push(Token::Number(value));
        } else if c.is_ascii_alphabetic() {
            let mut end = at;
            while let Some((i, d)) =
                chars.next_if(|&(_, d)| d.is_ascii_alphanumeric() || d == '_')
            {
                end = i + d.len_utf8();
            }
            tokens.push(Token::Word(text[at..end].to_ascii_lowercase()));
        } else {
            return Err(
                Error::new(ErrorCode::ParseError, format!("unexpected '{c}' in plural rules"))
                    .at(at),
            );
        }
    }
    Ok(tokens)
}

struct Parser<'a> {
    tokens: &'a [Token],
    at: usize,
}

impl Parser<'_> {
    fn done(&self) -> bool {
        self.at >= self.tokens.len()
    }

    fn error(&self, detail: &'static str) -> Error {
        Error::new(ErrorCode::ParseError, detail)
    }

    fn peek_word(&self, word: &str) -> bool {
        matches!(self.tokens.get(self.at), Some(Token::Word(w)) if w == word)
    }

    fn eat_word(&mut self, word: &str) -> bool {
        let found = self.peek_word(word);
        if found {
            self.at += 1;
        }
        found
    }

    fn eat_punct(&mut self, punct: &str) -> bool {
        let found = matches!(self.tokens.get(self.at), Some(Token::Punct(p)) if *p == punct);
        if found {
            self.at += 1;
        }
        found
    }

    fn expect(&mut self, punct: &'static str) -> Result<()> {
        if self.eat_punct(punct) {
            Ok(())
        } else {
            Err(self.error("unexpected token in plural rules"))
        }
    }

    fn number(&mut self) -> Result<f64> {
        match self.tokens.get(self.at) {
            Some(Token::Number(n)) => {
                self.at += 1;
                Ok(*n)
            }
            _ => Err(self.error("expected a number in plural rules")),
        }
    }

    fn rule(&mut self) -> Result<Rule> {
        let keyword = match self.tokens.get(self.at) {
            Some(Token::Word(w)) => w.clone(),
            _ => return Err(self.error("expected a plural keyword")),
        };
        self.at += 1;
        self.expect(":")?;

        let mut condition = Vec::new();
        loop {
            let mut and = vec![self.relation()?];
            while self.eat_word("and") {
                and.push(self.relation()?);
            }
            condition.push(and);
            if !self.eat_word("or") {
                break;
            }
        }
        Ok(Rule { keyword, condition })
    }

    fn relation(&mut self) -> Result<Relation> {
        if !self.eat_word("n") {
            return Err(self.error("plural relation must start with 'n'"));
        }
        let modulus = if self.eat_word("mod") {
            let m = self.number()?;
            if m == 0.0 {
                return Err(self.error("plural modulus of zero"));
            }
            Some(m)
        } else {
            None
        };

        if self.eat_word("is") {
            let negated = self.eat_word("not");
            let value = self.number()?;
            return Ok(Relation::Is { modulus, negated, value });
        }

        let negated = self.eat_word("not");
        let integer_only = if self.eat_word("in") {
            true
        } else if self.eat_word("within") {
            false
        } else {
            return Err(self.error("expected 'is', 'in' or 'within'"));
        };
        let mut ranges = Vec::new();
        loop {
            let low = self.number()?;
            let high = if self.eat_punct("..") { self.number()? } else { low };
            if high < low {
                return Err(self.error("plural range is reversed"));
            }
            ranges.push(Range { low, high });
            if !self.eat_punct(",") {
                break;
            }
        }
        Ok(Relation::In { modulus, negated, integer_only, ranges })
    }
}

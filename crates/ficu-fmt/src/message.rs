//! Message patterns with typed arguments.
//!
//! A pattern is literal text with `{…}` clauses:
//!
//! ```text
//! {arg}                 plain value
//! {arg,type}            value through a sub-format
//! {arg,type,style}      sub-format with a style keyword or pattern
//! ```
//!
//! `arg` is a decimal index or an identifier; one pattern uses only one of
//! the two. Outside clauses, `'` quotes: `'{'` is a literal brace and `''` an
//! apostrophe. A `}` outside any clause is literal.
//!
//! # Invariants
//!
//! | Property                           | Guarantee                                        |
//! |------------------------------------|--------------------------------------------------|
//! | Failed `apply_pattern`             | previous pattern and sub-formats are kept        |
//! | Mixed numbered and named arguments | rejected with `InvalidFormatError`               |
//! | Nested message results             | expanded at most `max_nesting_depth` levels deep |
//! | `to_pattern` of a compiled message | compiles back to an equal message                |
//!
//! # Failure Modes
//!
//! | Problem                                   | Error code                 |
//! |-------------------------------------------|----------------------------|
//! | clause never closed                       | `UnmatchedBraces`          |
//! | bad argument name, mixed argument kinds   | `InvalidFormatError`       |
//! | unknown type keyword                      | `IllegalArgumentError`     |
//! | argument of the wrong type                | `IllegalArgumentError`     |
//! | positional arguments for a named pattern  | `ArgumentTypeMismatch`     |
//! | text does not match on parse              | `MessageParseError`        |

use std::fmt;
use std::sync::OnceLock;

use ficu_common::{Error, ErrorCode, Locale, Result};

use crate::choice::ChoiceFormat;
use crate::date::{DateStyle, SimpleDateFormat};
use crate::format::Format;
use crate::formattable::{Formattable, FormattableType};
use crate::number::{DecimalFormat, NumberStyle};
use crate::plural::PluralFormat;
use crate::rbnf::{RbnfKind, RuleBasedNumberFormat};
use crate::select::SelectFormat;

/// Environment variable overriding [`MessageFormatOptions::max_nesting_depth`].
pub const MAX_DEPTH_ENV: &str = "FICU_MESSAGE_MAX_DEPTH";

const DEFAULT_MAX_NESTING_DEPTH: usize = 10;

/// Largest numbered argument index a pattern may use.
const MAX_ARG_INDEX: usize = 9_999_999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageFormatOptions {
    /// How many times choice, plural and select results that contain
    /// message syntax are expanded before formatting fails.
    pub max_nesting_depth: usize,
}

impl Default for MessageFormatOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl MessageFormatOptions {
    /// Options with overrides from environment lookups.
    ///
    /// Values that do not parse are ignored with a warning.
    pub fn from_env_with(get_env: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self::default();
        if let Some(value) = get_env(MAX_DEPTH_ENV) {
            match value.trim().parse::<usize>() {
                Ok(depth) => options.max_nesting_depth = depth,
                Err(_) => tracing::warn!(
                    var = MAX_DEPTH_ENV,
                    %value,
                    "ignoring unparseable nesting depth"
                ),
            }
        }
        options
    }

    /// Process-wide options, read from the environment on first use.
    pub fn process_default() -> Self {
        static OPTIONS: OnceLock<MessageFormatOptions> = OnceLock::new();
        *OPTIONS.get_or_init(|| Self::from_env_with(|name| std::env::var(name).ok()))
    }

    #[must_use]
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }
}

/// How a clause names its argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgRef {
    Index(usize),
    Name(String),
}

impl ArgRef {
    fn matches_name(&self, name: &str) -> bool {
        match self {
            ArgRef::Index(i) => name.parse::<usize>().is_ok_and(|n| n == *i),
            ArgRef::Name(n) => n == name,
        }
    }
}

impl fmt::Display for ArgRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgRef::Index(i) => write!(f, "{i}"),
            ArgRef::Name(name) => f.write_str(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct Subformat {
    format: Option<Format>,
    /// Byte offset into the literal text where the argument goes.
    offset: usize,
    arg: ArgRef,
    kind: FormattableType,
}

/// Argument values a message is formatted with.
#[derive(Clone, Copy)]
enum Args<'a> {
    Positional(&'a [Formattable]),
    Named(&'a [(&'a str, Formattable)]),
}

impl<'a> Args<'a> {
    fn get(self, arg: &ArgRef) -> Option<&'a Formattable> {
        match (self, arg) {
            (Args::Positional(values), ArgRef::Index(i)) => values.get(*i),
            (Args::Positional(_), ArgRef::Name(_)) => None,
            (Args::Named(values), _) => values
                .iter()
                .find(|(name, _)| arg.matches_name(name))
                .map(|(_, value)| value),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MessageFormat {
    locale: Locale,
    options: MessageFormatOptions,
    literal: String,
    subformats: Vec<Subformat>,
    named: bool,
    default_number: OnceLock<DecimalFormat>,
    default_date: OnceLock<SimpleDateFormat>,
}

impl MessageFormat {
    /// Compile `pattern` for the process default locale.
    pub fn new(pattern: &str) -> Result<Self> {
        Self::with_locale(pattern, Locale::default_locale())
    }

    pub fn with_locale(pattern: &str, locale: &Locale) -> Result<Self> {
        Self::with_options(pattern, locale, MessageFormatOptions::process_default())
    }

    pub fn with_options(
        pattern: &str,
        locale: &Locale,
        options: MessageFormatOptions,
    ) -> Result<Self> {
        let mut format = Self {
            locale: locale.clone(),
            options,
            literal: String::new(),
            subformats: Vec::new(),
            named: false,
            default_number: OnceLock::new(),
            default_date: OnceLock::new(),
        };
        format.apply_pattern(pattern)?;
        Ok(format)
    }

    /// Compile and format in one step with the default locale.
    pub fn format_pattern(pattern: &str, args: &[Formattable]) -> Result<String> {
        Self::new(pattern)?.format(args)
    }

    /// Replace the pattern. On error `self` is unchanged.
    pub fn apply_pattern(&mut self, pattern: &str) -> Result<()> {
        let mut segments: [String; 4] = Default::default();
        let mut part = 0usize;
        let mut in_quote = false;
        let mut depth = 0usize;
        let mut clause_at = 0usize;
        let mut named: Option<bool> = None;
        let mut subformats = Vec::new();
        let mut chars = pattern.char_indices().peekable();

        while let Some((at, c)) = chars.next() {
            if part == 0 {
                if c == '\'' {
                    if chars.next_if(|&(_, n)| n == '\'').is_some() {
                        segments[0].push('\'');
                    } else {
                        in_quote = !in_quote;
                    }
                } else if c == '{' && !in_quote {
                    part = 1;
                    clause_at = at;
                } else {
                    segments[0].push(c);
                }
                continue;
            }

            if in_quote {
                segments[part].push(c);
                if c == '\'' {
                    in_quote = false;
                }
                continue;
            }
            match c {
                ',' if part < 3 => part += 1,
                '{' => {
                    depth += 1;
                    segments[part].push(c);
                }
                '}' if depth == 0 => {
                    let sub = self.make_format(&segments, clause_at, &mut named)?;
                    subformats.push(sub);
                    for segment in &mut segments[1..] {
                        segment.clear();
                    }
                    part = 0;
                }
                '}' => {
                    depth -= 1;
                    segments[part].push(c);
                }
                '\'' => {
                    in_quote = true;
                    segments[part].push(c);
                }
                _ => segments[part].push(c),
            }
        }

        if part != 0 {
            return Err(
                Error::new(ErrorCode::UnmatchedBraces, "message clause is not closed").at(clause_at)
            );
        }

        let [literal, ..] = segments;
        tracing::trace!(arguments = subformats.len(), "compiled message pattern");
        self.literal = literal;
        self.subformats = subformats;
        self.named = named.unwrap_or(false);
        Ok(())
    }

    fn make_format(
        &self,
        segments: &[String; 4],
        clause_at: usize,
        named: &mut Option<bool>,
    ) -> Result<Subformat> {
        let name = segments[1].trim();
        let invalid = |detail: String| Error::invalid_format(detail).at(clause_at);

        let arg = if !name.is_empty()
            && name.len() <= 10
            && name.bytes().all(|b| b.is_ascii_digit())
        {
            match name.parse::<usize>() {
                Ok(i) if i <= MAX_ARG_INDEX => ArgRef::Index(i),
                _ => return Err(invalid(format!("argument number {name} is too large"))),
            }
        } else if is_identifier(name) {
            ArgRef::Name(name.to_string())
        } else {
            return Err(invalid(format!("'{name}' is not an argument number or name")));
        };

        let is_named = matches!(arg, ArgRef::Name(_));
        match *named {
            None => *named = Some(is_named),
            Some(mode) if mode != is_named => {
                return Err(invalid("numbered and named arguments are mixed".to_string()));
            }
            Some(_) => {}
        }

        let keyword = segments[2].trim().to_lowercase();
        let style = segments[3].trim();
        let style_keyword = style.to_lowercase();
        let locale = &self.locale;
        let at_clause = |e: Error| match e.offset() {
            Some(_) => e,
            None => e.at(clause_at),
        };

        let (format, kind): (Option<Format>, FormattableType) = match keyword.as_str() {
            "" => (None, FormattableType::String),
            "number" => {
                let (number_style, kind) = match style_keyword.as_str() {
                    "currency" => (NumberStyle::Currency, FormattableType::Double),
                    "percent" => (NumberStyle::Percent, FormattableType::Double),
                    "integer" => (NumberStyle::Integer, FormattableType::Long),
                    _ => (NumberStyle::Number, FormattableType::Double),
                };
                let mut format = DecimalFormat::instance(locale, number_style).map_err(at_clause)?;
                if !style.is_empty()
                    && !matches!(style_keyword.as_str(), "currency" | "percent" | "integer")
                {
                    format.apply_pattern(style).map_err(|e| e.at(clause_at))?;
                }
                (Some(Format::Number(format)), kind)
            }
            "date" | "time" => {
                let date_style = if style.is_empty() {
                    Some(DateStyle::default())
                } else {
                    DateStyle::from_keyword(style)
                };
                let format = match date_style {
                    Some(s) if keyword == "date" => SimpleDateFormat::date_instance(s, locale),
                    Some(s) => SimpleDateFormat::time_instance(s, locale),
                    None => SimpleDateFormat::new(style, locale),
                }
                .map_err(|e| e.at(clause_at))?;
                (Some(Format::Date(format)), FormattableType::Date)
            }
            "choice" => {
                let format = ChoiceFormat::new(style).map_err(|e| e.at(clause_at))?;
                (Some(Format::Choice(format)), FormattableType::Double)
            }
            "spellout" | "ordinal" | "duration" => {
                let kind = match keyword.as_str() {
                    "spellout" => RbnfKind::Spellout,
                    "ordinal" => RbnfKind::Ordinal,
                    _ => RbnfKind::Duration,
                };
                let mut format = RuleBasedNumberFormat::new(kind, locale).map_err(at_clause)?;
                if !style.is_empty()
                    && let Err(e) = format.set_default_rule_set(style)
                {
                    tracing::debug!(style, error = %e, "keeping default rule set");
                }
                (Some(Format::RuleBased(format)), FormattableType::Double)
            }
            "plural" => {
                let format =
                    PluralFormat::new(&unquote(style), locale).map_err(|e| e.at(clause_at))?;
                (Some(Format::Plural(format)), FormattableType::Double)
            }
            "select" => {
                let format = SelectFormat::new(&unquote(style)).map_err(|e| e.at(clause_at))?;
                (Some(Format::Select(format)), FormattableType::String)
            }
            _ => {
                return Err(Error::illegal_argument(format!(
                    "unknown format type '{}'",
                    segments[2].trim()
                ))
                .at(clause_at));
            }
        };

        Ok(Subformat {
            format,
            offset: segments[0].len(),
            arg,
            kind,
        })
    }

    /// Format with positional arguments.
    pub fn format(&self, args: &[Formattable]) -> Result<String> {
        if self.named {
            return Err(Error::new(
                ErrorCode::ArgumentTypeMismatch,
                "pattern uses named arguments",
            ));
        }
        self.format_args(Args::Positional(args), 0)
    }

    /// Format with named arguments. A numbered pattern looks its arguments
    /// up by their decimal names.
    pub fn format_named(&self, args: &[(&str, Formattable)]) -> Result<String> {
        self.format_args(Args::Named(args), 0)
    }

    /// Format with an [`Formattable::Array`] of positional arguments.
    pub fn format_formattable(&self, value: &Formattable) -> Result<String> {
        match value {
            Formattable::Array(args) => self.format(args),
            other => Err(Error::illegal_argument(format!(
                "message arguments must be an array, not a {}",
                other.kind()
            ))),
        }
    }

    fn format_args(&self, args: Args<'_>, depth: usize) -> Result<String> {
        let mut out = String::with_capacity(self.literal.len() + 16 * self.subformats.len());
        let mut last = 0;
        for sub in &self.subformats {
            out.push_str(&self.literal[last..sub.offset]);
            last = sub.offset;

            let Some(value) = args.get(&sub.arg) else {
                out.push('{');
                out.push_str(&sub.arg.to_string());
                out.push('}');
                continue;
            };

            match &sub.format {
                Some(format) => {
                    let text = format.format(value)?;
                    if format.yields_message() && text.contains('{') {
                        if depth >= self.options.max_nesting_depth {
                            return Err(Error::illegal_argument(format!(
                                "message nesting deeper than {}",
                                self.options.max_nesting_depth
                            )));
                        }
                        let nested = Self::with_options(&text, &self.locale, self.options)?;
                        out.push_str(&nested.format_args(args, depth + 1)?);
                    } else {
                        out.push_str(&text);
                    }
                }
                None => match value {
                    Formattable::Double(_) | Formattable::Long(_) | Formattable::Int64(_) => {
                        out.push_str(&self.default_number()?.format(value)?);
                    }
                    Formattable::Date(date) => out.push_str(&self.default_date()?.format(*date)?),
                    Formattable::String(s) => out.push_str(s),
                    Formattable::Array(_) => {
                        return Err(Error::illegal_argument(format!(
                            "argument {} is an array",
                            sub.arg
                        )));
                    }
                },
            }
        }
        out.push_str(&self.literal[last..]);
        Ok(out)
    }

    fn default_number(&self) -> Result<&DecimalFormat> {
        if let Some(format) = self.default_number.get() {
            return Ok(format);
        }
        let format = DecimalFormat::instance(&self.locale, NumberStyle::Number)?;
        Ok(self.default_number.get_or_init(|| format))
    }

    fn default_date(&self) -> Result<&SimpleDateFormat> {
        if let Some(format) = self.default_date.get() {
            return Ok(format);
        }
        let format =
            SimpleDateFormat::date_time_instance(DateStyle::Short, DateStyle::Short, &self.locale)?;
        Ok(self.default_date.get_or_init(|| format))
    }

    /// Parse `source` from its start.
    pub fn parse(&self, source: &str) -> Result<Vec<Formattable>> {
        let mut pos = 0;
        self.parse_at(source, &mut pos)
    }

    /// Parse the arguments of a numbered pattern out of `source` starting at
    /// `*pos`. Arguments the text does not set are `Formattable::default()`.
    ///
    /// On failure `*pos` is unchanged.
    pub fn parse_at(&self, source: &str, pos: &mut usize) -> Result<Vec<Formattable>> {
        if self.named {
            return Err(Error::new(
                ErrorCode::ArgumentTypeMismatch,
                "cannot parse a pattern with named arguments",
            ));
        }
        let fail = |at: usize| {
            Err(Error::new(ErrorCode::MessageParseError, "text does not match message").at(at))
        };

        let count = self
            .subformats
            .iter()
            .filter_map(|sub| match sub.arg {
                ArgRef::Index(i) => Some(i + 1),
                ArgRef::Name(_) => None,
            })
            .max()
            .unwrap_or(0);
        let mut values: Vec<Option<Formattable>> = vec![None; count];

        let mut pattern_at = 0;
        let mut source_at = *pos;
        for (i, sub) in self.subformats.iter().enumerate() {
            let literal = &self.literal[pattern_at..sub.offset];
            match source.get(source_at..) {
                Some(rest) if rest.starts_with(literal) => source_at += literal.len(),
                _ => return fail(source_at),
            }
            pattern_at = sub.offset;
            let ArgRef::Index(slot) = sub.arg else {
                return fail(source_at);
            };

            match &sub.format {
                None => {
                    let next_offset = self
                        .subformats
                        .get(i + 1)
                        .map_or(self.literal.len(), |next| next.offset);
                    let next = &self.literal[pattern_at..next_offset];
                    let rest = &source[source_at..];
                    let end = if next.is_empty() {
                        rest.len()
                    } else {
                        match rest.find(next) {
                            Some(end) => end,
                            None => return fail(source_at),
                        }
                    };
                    let value = &rest[..end];
                    if value != format!("{{{slot}}}") {
                        values[slot] = Some(Formattable::String(value.to_string()));
                    }
                    source_at += end;
                }
                Some(format) => {
                    let mut at = source_at;
                    match format.parse_object(source, &mut at) {
                        Some(value) if at > source_at => {
                            values[slot] = Some(value);
                            source_at = at;
                        }
                        _ => return fail(source_at),
                    }
                }
            }
        }

        let tail = &self.literal[pattern_at..];
        match source.get(source_at..) {
            Some(rest) if rest.starts_with(tail) => source_at += tail.len(),
            _ => return fail(source_at),
        }

        *pos = source_at;
        Ok(values.into_iter().map(Option::unwrap_or_default).collect())
    }

    /// A pattern that compiles to this message.
    #[must_use]
    pub fn to_pattern(&self) -> String {
        let mut out = String::with_capacity(self.literal.len() + 16 * self.subformats.len());
        let mut last = 0;
        for sub in &self.subformats {
            copy_and_fix_quotes(&self.literal[last..sub.offset], &mut out);
            last = sub.offset;
            out.push('{');
            out.push_str(&sub.arg.to_string());
            if let Some(format) = &sub.format {
                self.append_format(format, &mut out);
            }
            out.push('}');
        }
        copy_and_fix_quotes(&self.literal[last..], &mut out);
        out
    }

    fn append_format(&self, format: &Format, out: &mut String) {
        let locale = &self.locale;
        match format {
            Format::Number(f) => {
                let standard = [
                    (NumberStyle::Number, ""),
                    (NumberStyle::Currency, ",currency"),
                    (NumberStyle::Percent, ",percent"),
                    (NumberStyle::Integer, ",integer"),
                ]
                .into_iter()
                .find(|(style, _)| DecimalFormat::instance(locale, *style).is_ok_and(|s| s == *f));
                out.push_str(",number");
                match standard {
                    Some((_, suffix)) => out.push_str(suffix),
                    None => {
                        out.push(',');
                        out.push_str(&f.to_pattern());
                    }
                }
            }
            Format::Date(f) => {
                let standard = ["date", "time"].into_iter().find_map(|keyword| {
                    DateStyle::ALL.into_iter().find_map(|style| {
                        let instance = if keyword == "date" {
                            SimpleDateFormat::date_instance(style, locale)
                        } else {
                            SimpleDateFormat::time_instance(style, locale)
                        };
                        instance.is_ok_and(|s| s == *f).then_some((keyword, style))
                    })
                });
                match standard {
                    Some((keyword, style)) => {
                        out.push(',');
                        out.push_str(keyword);
                        if style != DateStyle::default() {
                            out.push(',');
                            out.push_str(style.keyword());
                        }
                    }
                    None => {
                        out.push_str(",date,");
                        out.push_str(f.to_pattern());
                    }
                }
            }
            Format::Choice(f) => {
                out.push_str(",choice,");
                out.push_str(&f.to_pattern());
            }
            Format::RuleBased(f) => {
                out.push(',');
                out.push_str(f.kind().keyword());
                let rule_set = f.default_rule_set();
                if f.kind().rule_sets().first() != Some(&rule_set) {
                    out.push(',');
                    out.push_str(rule_set.name());
                }
            }
            Format::Plural(f) => {
                out.push_str(",plural,");
                out.push_str(f.to_pattern());
            }
            Format::Select(f) => {
                out.push_str(",select,");
                out.push_str(f.to_pattern());
            }
        }
    }

    /// Double lone apostrophes so they survive compilation as literal text.
    /// Quoted braces and argument clauses are left alone.
    #[must_use]
    pub fn auto_quote_apostrophe(pattern: &str) -> String {
        #[derive(Clone, Copy, PartialEq, Eq)]
        enum State {
            Initial,
            SingleQuote,
            InQuote,
            Element,
        }

        let mut out = String::with_capacity(pattern.len() + 4);
        let mut state = State::Initial;
        let mut depth = 0usize;
        for c in pattern.chars() {
            state = match (state, c) {
                (State::Initial, '\'') => State::SingleQuote,
                (State::Initial, '{') => {
                    depth += 1;
                    State::Element
                }
                (State::SingleQuote, '\'') => State::Initial,
                (State::SingleQuote, '{' | '}') => State::InQuote,
                (State::SingleQuote, _) => {
                    out.push('\'');
                    State::Initial
                }
                (State::InQuote, '\'') => State::Initial,
                (State::Element, '{') => {
                    depth += 1;
                    State::Element
                }
                (State::Element, '}') => {
                    depth -= 1;
                    if depth == 0 { State::Initial } else { State::Element }
                }
                (state, _) => state,
            };
            out.push(c);
        }
        if matches!(state, State::SingleQuote | State::InQuote) {
            out.push('\'');
        }
        out
    }

    /// Replace the sub-format of the clause at `index`, in pattern order.
    pub fn set_format(&mut self, index: usize, format: Format) -> Result<()> {
        let count = self.subformats.len();
        let sub = self.subformats.get_mut(index).ok_or_else(|| {
            Error::index_out_of_bounds(format!("message has {count} arguments, not {}", index + 1))
        })?;
        sub.format = Some(format);
        Ok(())
    }

    /// Replace sub-formats in pattern order; extra formats are ignored.
    pub fn set_formats(&mut self, formats: &[Format]) {
        for (sub, format) in self.subformats.iter_mut().zip(formats) {
            sub.format = Some(format.clone());
        }
    }

    /// Sub-formats in pattern order; `None` for plain clauses.
    pub fn formats(&self) -> Vec<Option<&Format>> {
        self.subformats.iter().map(|sub| sub.format.as_ref()).collect()
    }

    /// Replace the sub-format of every clause naming `name`.
    pub fn set_format_by_arg_name(&mut self, name: &str, format: Format) -> Result<()> {
        let mut found = false;
        for sub in self.subformats.iter_mut().filter(|sub| sub.arg.matches_name(name)) {
            sub.format = Some(format.clone());
            found = true;
        }
        if found {
            Ok(())
        } else {
            Err(Error::illegal_argument(format!("no argument named '{name}'")))
        }
    }

    /// The sub-format of the first clause naming `name`.
    #[must_use]
    pub fn format_by_arg_name(&self, name: &str) -> Option<&Format> {
        self.subformats
            .iter()
            .find(|sub| sub.arg.matches_name(name))
            .and_then(|sub| sub.format.as_ref())
    }

    /// Distinct argument names, in order of first use.
    pub fn arg_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for sub in &self.subformats {
            let name = sub.arg.to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    #[must_use]
    pub fn uses_named_arguments(&self) -> bool {
        self.named
    }

    /// Each distinct argument with the type its last clause expects.
    pub fn arg_types(&self) -> Vec<(ArgRef, FormattableType)> {
        let mut types: Vec<(ArgRef, FormattableType)> = Vec::new();
        for sub in &self.subformats {
            match types.iter_mut().find(|(arg, _)| *arg == sub.arg) {
                Some(entry) => entry.1 = sub.kind,
                None => types.push((sub.arg.clone(), sub.kind)),
            }
        }
        types
    }

    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Change the locale used for plain numbers, dates and nested messages.
    /// Compiled sub-formats keep their own locale.
    pub fn set_locale(&mut self, locale: &Locale) {
        self.locale = locale.clone();
        self.default_number = OnceLock::new();
        self.default_date = OnceLock::new();
    }

    #[must_use]
    pub fn options(&self) -> MessageFormatOptions {
        self.options
    }
}

impl PartialEq for MessageFormat {
    fn eq(&self, other: &Self) -> bool {
        self.locale == other.locale
            && self.literal == other.literal
            && self.subformats == other.subformats
            && self.named == other.named
    }
}

impl fmt::Display for MessageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_pattern())
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| unicode_ident::is_xid_start(c) || c == '_')
        && chars.all(unicode_ident::is_xid_continue)
}

/// Strip quoting from a plural or select style: `''` is an apostrophe and a
/// lone `'` is dropped.
fn unquote(style: &str) -> String {
    let mut out = String::with_capacity(style.len());
    let mut chars = style.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.next_if_eq(&'\'').is_some() {
                out.push('\'');
            }
        } else {
            out.push(c);
        }
    }
    out
}

fn copy_and_fix_quotes(text: &str, out: &mut String) {
    let mut open_brace = false;
    for c in text.chars() {
        match c {
            '{' => {
                out.push_str("'{'");
                open_brace = true;
            }
            '}' if open_brace => {
                out.push('}');
                open_brace = false;
            }
            '}' => out.push_str("'}'"),
            '\'' => out.push_str("''"),
            _ => out.push(c),
        }
    }
}

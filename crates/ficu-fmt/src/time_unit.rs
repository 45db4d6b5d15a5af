//! Durations such as "3 hours" or "1 min".
//!
//! Each unit has one message per plural category of the locale, compiled
//! as `{0}` followed by the unit word. Locales without their own unit
//! words use the English ones with their own plural rules.

use std::fmt;

use ficu_common::{Error, ErrorCode, Locale, Result};

use crate::format::Format;
use crate::formattable::Formattable;
use crate::message::MessageFormat;
use crate::number::{DecimalFormat, NumberStyle};
use crate::plural_rules::{OTHER, PluralRules};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Year,
    Month,
    Week,
    Day,
    Hour,
    Minute,
    Second,
}

impl TimeUnit {
    pub const ALL: [Self; 7] = [
        Self::Year,
        Self::Month,
        Self::Week,
        Self::Day,
        Self::Hour,
        Self::Minute,
        Self::Second,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeUnitAmount {
    pub number: f64,
    pub unit: TimeUnit,
}

impl TimeUnitAmount {
    pub fn new(number: f64, unit: TimeUnit) -> Self {
        Self { number, unit }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeUnitStyle {
    #[default]
    Full,
    Abbreviated,
}

/// Unit words as `[one, other]`, in [`TimeUnit::ALL`] order.
type UnitWords = [[&'static str; 2]; 7];

const EN_FULL: UnitWords = [
    ["year", "years"],
    ["month", "months"],
    ["week", "weeks"],
    ["day", "days"],
    ["hour", "hours"],
    ["minute", "minutes"],
    ["second", "seconds"],
];

const EN_ABBREVIATED: UnitWords = [
    ["yr", "yrs"],
    ["mth", "mths"],
    ["wk", "wks"],
    ["day", "days"],
    ["hr", "hrs"],
    ["min", "mins"],
    ["sec", "secs"],
];

const DE_FULL: UnitWords = [
    ["Jahr", "Jahre"],
    ["Monat", "Monate"],
    ["Woche", "Wochen"],
    ["Tag", "Tage"],
    ["Stunde", "Stunden"],
    ["Minute", "Minuten"],
    ["Sekunde", "Sekunden"],
];

const DE_ABBREVIATED: UnitWords = [
    ["J.", "J."],
    ["M.", "M."],
    ["W.", "W."],
    ["T.", "T."],
    ["Std.", "Std."],
    ["Min.", "Min."],
    ["Sek.", "Sek."],
];

const FR_FULL: UnitWords = [
    ["an", "ans"],
    ["mois", "mois"],
    ["semaine", "semaines"],
    ["jour", "jours"],
    ["heure", "heures"],
    ["minute", "minutes"],
    ["seconde", "secondes"],
];

const FR_ABBREVIATED: UnitWords = [
    ["an", "ans"],
    ["mois", "mois"],
    ["sem.", "sem."],
    ["j", "j"],
    ["h", "h"],
    ["min", "min"],
    ["s", "s"],
];

fn unit_words(locale: &Locale, style: TimeUnitStyle) -> &'static UnitWords {
    match (locale.language(), style) {
        ("de", TimeUnitStyle::Full) => &DE_FULL,
        ("de", TimeUnitStyle::Abbreviated) => &DE_ABBREVIATED,
        ("fr", TimeUnitStyle::Full) => &FR_FULL,
        ("fr", TimeUnitStyle::Abbreviated) => &FR_ABBREVIATED,
        (_, TimeUnitStyle::Full) => &EN_FULL,
        (_, TimeUnitStyle::Abbreviated) => &EN_ABBREVIATED,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeUnitFormat {
    locale: Locale,
    style: TimeUnitStyle,
    rules: PluralRules,
    /// Per unit, the message for each plural keyword.
    messages: Vec<Vec<(String, MessageFormat)>>,
}

impl TimeUnitFormat {
    pub fn new(locale: &Locale, style: TimeUnitStyle) -> Result<Self> {
        let rules = PluralRules::for_locale(locale)?;
        let number = Format::Number(DecimalFormat::instance(locale, NumberStyle::Number)?);
        let words = unit_words(locale, style);

        let mut messages = Vec::with_capacity(TimeUnit::ALL.len());
        for unit in TimeUnit::ALL {
            let [one, other] = words[unit.index()];
            let mut per_keyword = Vec::new();
            for keyword in rules.keywords() {
                let word = if keyword == "one" { one } else { other };
                let pattern = format!("{{0}} {}", word.replace('\'', "''"));
                let mut message = MessageFormat::with_locale(&pattern, locale)?;
                message.set_format(0, number.clone())?;
                per_keyword.push((keyword.to_string(), message));
            }
            messages.push(per_keyword);
        }
        tracing::debug!(%locale, ?style, "built time unit format");

        Ok(Self {
            locale: locale.clone(),
            style,
            rules,
            messages,
        })
    }

    #[must_use]
    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    #[must_use]
    pub fn style(&self) -> TimeUnitStyle {
        self.style
    }

    pub fn format(&self, amount: &TimeUnitAmount) -> Result<String> {
        let keyword = self.rules.select(amount.number);
        let per_keyword = &self.messages[amount.unit.index()];
        let message = per_keyword
            .iter()
            .find(|(k, _)| k == keyword)
            .or_else(|| per_keyword.iter().find(|(k, _)| k == OTHER))
            .map(|(_, message)| message)
            .ok_or_else(|| Error::invalid_format(format!("no pattern for {}", amount.unit)))?;
        message.format(&[Formattable::Double(amount.number)])
    }

    /// Parse the whole of `text` as an amount; the longest matching unit
    /// pattern wins.
    pub fn parse(&self, text: &str) -> Result<TimeUnitAmount> {
        let mut best: Option<(usize, TimeUnitAmount)> = None;
        for (unit, per_keyword) in TimeUnit::ALL.into_iter().zip(&self.messages) {
            for (_, message) in per_keyword {
                let mut pos = 0;
                let Ok(values) = message.parse_at(text, &mut pos) else {
                    continue;
                };
                let Some(number) = values.first().and_then(Formattable::as_f64) else {
                    continue;
                };
                if best.is_none_or(|(len, _)| pos > len) {
                    best = Some((pos, TimeUnitAmount::new(number, unit)));
                }
            }
        }
        match best {
            Some((len, amount)) if len == text.len() => Ok(amount),
            _ => Err(Error::new(
                ErrorCode::MessageParseError,
                format!("'{text}' is not a time unit amount"),
            )),
        }
    }
}

//! The sub-formats a message argument can carry.

use ficu_common::Result;

use crate::choice::ChoiceFormat;
use crate::date::SimpleDateFormat;
use crate::formattable::Formattable;
use crate::number::DecimalFormat;
use crate::plural::PluralFormat;
use crate::rbnf::RuleBasedNumberFormat;
use crate::select::SelectFormat;

#[derive(Debug, Clone, PartialEq)]
pub enum Format {
    Number(DecimalFormat),
    Date(SimpleDateFormat),
    Choice(ChoiceFormat),
    RuleBased(RuleBasedNumberFormat),
    Plural(PluralFormat),
    Select(SelectFormat),
}

impl Format {
    pub fn format(&self, value: &Formattable) -> Result<String> {
        match self {
            Format::Number(f) => f.format(value),
            Format::Date(f) => f.format_formattable(value),
            Format::Choice(f) => f.format_formattable(value),
            Format::RuleBased(f) => f.format(value),
            Format::Plural(f) => f.format_formattable(value),
            Format::Select(f) => f.format_formattable(value),
        }
    }

    /// Parse a value at `*pos`. Date, plural and select formats do not
    /// parse.
    pub fn parse_object(&self, text: &str, pos: &mut usize) -> Option<Formattable> {
        match self {
            Format::Number(f) => f.parse(text, pos),
            Format::Choice(f) => f.parse(text, pos).map(Formattable::Double),
            Format::RuleBased(f) => f.parse(text, pos),
            Format::Date(_) | Format::Plural(_) | Format::Select(_) => None,
        }
    }

    /// Whether results may hold message syntax that must be expanded again.
    #[must_use]
    pub fn yields_message(&self) -> bool {
        matches!(self, Format::Choice(_) | Format::Plural(_) | Format::Select(_))
    }
}

impl From<DecimalFormat> for Format {
    fn from(f: DecimalFormat) -> Self {
        Format::Number(f)
    }
}

impl From<SimpleDateFormat> for Format {
    fn from(f: SimpleDateFormat) -> Self {
        Format::Date(f)
    }
}

impl From<ChoiceFormat> for Format {
    fn from(f: ChoiceFormat) -> Self {
        Format::Choice(f)
    }
}

impl From<RuleBasedNumberFormat> for Format {
    fn from(f: RuleBasedNumberFormat) -> Self {
        Format::RuleBased(f)
    }
}

impl From<PluralFormat> for Format {
    fn from(f: PluralFormat) -> Self {
        Format::Plural(f)
    }
}

impl From<SelectFormat> for Format {
    fn from(f: SelectFormat) -> Self {
        Format::Select(f)
    }
}

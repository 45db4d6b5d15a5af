//! Argument values passed to formatters.

use std::fmt;

/// Milliseconds since 1970-01-01T00:00:00Z.
pub type UDate = f64;

/// A value a [`Format`](crate::Format) can render.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Formattable {
    Double(f64),
    Long(i32),
    Int64(i64),
    Date(UDate),
    String(String),
    Array(Vec<Formattable>),
}

/// The kind of value an argument holds or a sub-format expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FormattableType {
    Double,
    Long,
    Int64,
    Date,
    String,
    Array,
}

impl Formattable {
    #[must_use]
    pub fn kind(&self) -> FormattableType {
        match self {
            Self::Double(_) => FormattableType::Double,
            Self::Long(_) => FormattableType::Long,
            Self::Int64(_) => FormattableType::Int64,
            Self::Date(_) => FormattableType::Date,
            Self::String(_) => FormattableType::String,
            Self::Array(_) => FormattableType::Array,
        }
    }

    /// `true` for `Double`, `Long` and `Int64`.
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Double(_) | Self::Long(_) | Self::Int64(_))
    }

    /// The numeric value, if this is a number.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Double(d) => Some(d),
            Self::Long(l) => Some(f64::from(l)),
            Self::Int64(i) => Some(i as f64),
            _ => None,
        }
    }

    /// The numeric value, or the date in milliseconds.
    #[must_use]
    pub fn as_date(&self) -> Option<UDate> {
        match *self {
            Self::Date(d) => Some(d),
            _ => self.as_f64(),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// Narrowest integer or double holding `value`, the way parsers report
    /// numbers.
    #[must_use]
    pub fn from_parsed(value: f64) -> Self {
        let integral = value.is_finite()
            && value.fract() == 0.0
            && !(value == 0.0 && value.is_sign_negative());
        if integral && value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX) {
            Self::Long(value as i32)
        } else if integral
            && value >= -9.223_372_036_854_775e18
            && value < 9.223_372_036_854_775e18
        {
            Self::Int64(value as i64)
        } else {
            Self::Double(value)
        }
    }
}

/// A zero `Long`, the value of unset argument slots.
impl Default for Formattable {
    fn default() -> Self {
        Self::Long(0)
    }
}

impl fmt::Display for FormattableType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Double => "double",
            Self::Long => "long",
            Self::Int64 => "int64",
            Self::Date => "date",
            Self::String => "string",
            Self::Array => "array",
        })
    }
}

impl From<f64> for Formattable {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<i32> for Formattable {
    fn from(value: i32) -> Self {
        Self::Long(value)
    }
}

impl From<i64> for Formattable {
    fn from(value: i64) -> Self {
        Self::Int64(value)
    }
}

impl From<&str> for Formattable {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Formattable {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Vec<Formattable>> for Formattable {
    fn from(value: Vec<Formattable>) -> Self {
        Self::Array(value)
    }
}

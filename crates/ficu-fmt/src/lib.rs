#![forbid(unsafe_code)]

//! Message formatting with typed, nestable arguments.
//!
//! # Role in ficu
//! [`MessageFormat`] compiles patterns such as
//! `"{0,choice,0#no files|1#one file|1< {0,number,integer} files}"` into
//! literal text plus one sub-format per argument clause, then formats
//! argument lists against them. The sub-formats live here too:
//! [`DecimalFormat`], [`SimpleDateFormat`], [`RuleBasedNumberFormat`],
//! [`ChoiceFormat`], [`PluralFormat`] (driven by [`PluralRules`]) and
//! [`SelectFormat`]. [`TimeUnitFormat`] is built on [`MessageFormat`].
//!
//! # How it fits in the system
//! Errors and locale ids come from `ficu-common`. Per-locale symbols,
//! patterns and names are compiled in ([`locale_data`]). Every formatter is
//! `Send + Sync` and formats through `&self`, so one compiled message can be
//! shared across threads.
//!
//! # Example
//! ```
//! use ficu_common::Locale;
//! use ficu_fmt::{Formattable, MessageFormat};
//!
//! let m = MessageFormat::with_locale(
//!     "{0,choice,0#no files|1#one file|1< {0,number,integer} files}",
//!     &Locale::us(),
//! )
//! .unwrap();
//! assert_eq!(m.format(&[Formattable::Long(12373)]).unwrap(), "12,373 files");
//! ```

pub mod choice;
pub mod date;
pub mod format;
pub mod formattable;
pub mod locale_data;
pub mod message;
pub mod number;
pub mod plural;
pub mod plural_rules;
pub mod rbnf;
pub mod select;
pub mod time_unit;

pub use choice::ChoiceFormat;
pub use date::{DateStyle, SimpleDateFormat};
pub use format::Format;
pub use formattable::{Formattable, FormattableType, UDate};
pub use message::{ArgRef, MessageFormat, MessageFormatOptions};
pub use number::{DecimalFormat, NumberStyle};
pub use plural::PluralFormat;
pub use plural_rules::PluralRules;
pub use rbnf::{RbnfKind, RuleBasedNumberFormat, RuleSet};
pub use select::SelectFormat;
pub use time_unit::{TimeUnit, TimeUnitAmount, TimeUnitFormat, TimeUnitStyle};

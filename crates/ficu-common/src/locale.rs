//! Locale identifiers and the process default locale.
//!
//! A [`Locale`] is a parsed `language[_Script][_COUNTRY][_VARIANT]` id. It
//! accepts `_` or `-` separators and BCP 47 style casing, and always prints
//! in the canonical underscore form (`zh_Hant_TW`, `en_US_POSIX`).
//!
//! The default locale is resolved once from the environment:
//! `FICU_LOCALE`, then `LC_ALL`, `LC_MESSAGES`, `LANG`. POSIX codeset and
//! modifier suffixes (`.UTF-8`, `@euro`) are dropped, and `C`/`POSIX` map to
//! `en_US_POSIX`.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use crate::error::{Error, Result};

/// Environment variables consulted for the default locale, in order.
pub const LOCALE_ENV_VARS: [&str; 4] = ["FICU_LOCALE", "LC_ALL", "LC_MESSAGES", "LANG"];

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Locale {
    language: String,
    script: Option<String>,
    country: Option<String>,
    variant: Option<String>,
}

impl Locale {
    /// Parse a locale id. The empty string is the root locale.
    pub fn new(id: &str) -> Result<Self> {
        let mut parts = id.split(['_', '-']).peekable();
        let mut locale = Self::default();
        let Some(language) = parts.next() else {
            return Ok(locale);
        };
        if !language.is_empty() {
            if !(2..=8).contains(&language.len())
                || !language.bytes().all(|b| b.is_ascii_alphabetic())
            {
                return Err(Error::illegal_argument(format!(
                    "invalid language subtag in locale id {id:?}"
                )));
            }
            locale.language = language.to_ascii_lowercase();
        }
        if let Some(s) =
            parts.next_if(|s| s.len() == 4 && s.bytes().all(|b| b.is_ascii_alphabetic()))
        {
            let mut script = s.to_ascii_lowercase();
            script[..1].make_ascii_uppercase();
            locale.script = Some(script);
        }
        if let Some(c) = parts.next_if(|s| {
            (s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic()))
                || (s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit()))
        }) {
            locale.country = Some(c.to_ascii_uppercase());
        }
        let rest: Vec<&str> = parts.collect();
        if !rest.is_empty() {
            // "en__POSIX": an empty country before the variant.
            let variant = rest
                .iter()
                .filter(|s| !s.is_empty())
                .map(|s| s.to_ascii_uppercase())
                .collect::<Vec<_>>()
                .join("_");
            if variant.bytes().any(|b| !(b.is_ascii_alphanumeric() || b == b'_')) {
                return Err(Error::illegal_argument(format!(
                    "invalid variant in locale id {id:?}"
                )));
            }
            if !variant.is_empty() {
                locale.variant = Some(variant);
            }
        }
        Ok(locale)
    }

    /// The root locale (empty id).
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn english() -> Self {
        Self::from_parts("en", None, None)
    }

    #[must_use]
    pub fn us() -> Self {
        Self::from_parts("en", Some("US"), None)
    }

    fn from_parts(language: &str, country: Option<&str>, variant: Option<&str>) -> Self {
        Self {
            language: language.to_string(),
            script: None,
            country: country.map(str::to_string),
            variant: variant.map(str::to_string),
        }
    }

    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    #[must_use]
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }

    #[must_use]
    pub fn variant(&self) -> Option<&str> {
        self.variant.as_deref()
    }

    #[must_use]
    pub fn is_root(&self) -> bool {
        self.language.is_empty()
            && self.script.is_none()
            && self.country.is_none()
            && self.variant.is_none()
    }

    /// The next locale in the fallback chain (`de_CH` → `de` → root), or
    /// `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let mut parent = self.clone();
        if parent.variant.take().is_some()
            || parent.country.take().is_some()
            || parent.script.take().is_some()
        {
            return Some(parent);
        }
        if self.language.is_empty() {
            None
        } else {
            Some(Self::root())
        }
    }

    /// Iterate from this locale up to and including the root.
    pub fn fallback_chain(&self) -> impl Iterator<Item = Locale> {
        std::iter::successors(Some(self.clone()), Locale::parent)
    }

    /// Resolve a locale from environment lookups.
    ///
    /// `get_env` is consulted for each of [`LOCALE_ENV_VARS`]; the first
    /// non-empty value that parses wins. Falls back to `en_US_POSIX`.
    pub fn from_env_with(get_env: impl Fn(&str) -> Option<String>) -> Self {
        LOCALE_ENV_VARS
            .iter()
            .filter_map(|name| get_env(name))
            .find_map(|value| Self::from_posix(value.trim()))
            .unwrap_or_else(|| Self::from_parts("en", Some("US"), Some("POSIX")))
    }

    /// Parse a POSIX locale value such as `de_DE.UTF-8@euro`.
    fn from_posix(value: &str) -> Option<Self> {
        let base = value
            .split(['.', '@'])
            .next()
            .unwrap_or_default();
        match base {
            "" => None,
            "C" | "POSIX" => Some(Self::from_parts("en", Some("US"), Some("POSIX"))),
            other => Self::new(other).ok(),
        }
    }

    /// Process default locale, resolved from the environment on first use.
    pub fn default_locale() -> &'static Locale {
        static DEFAULT: OnceLock<Locale> = OnceLock::new();
        DEFAULT.get_or_init(|| {
            let locale = Self::from_env_with(|name| std::env::var(name).ok());
            tracing::debug!(%locale, "resolved default locale");
            locale
        })
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.language)?;
        if let Some(script) = &self.script {
            write!(f, "_{script}")?;
        }
        match (&self.country, &self.variant) {
            (Some(country), Some(variant)) => write!(f, "_{country}_{variant}"),
            (Some(country), None) => write!(f, "_{country}"),
            (None, Some(variant)) => write!(f, "__{variant}"),
            (None, None) => Ok(()),
        }
    }
}

//! ICU-compatible error codes and the crate-wide error type.
//!
//! [`ErrorCode`] keeps the numeric values and names of the C API so codes
//! can be logged, compared and round-tripped through integer form. Fallible
//! operations return [`Result`], carrying an [`Error`] with the code plus a
//! human-readable detail and, for pattern errors, the offending offset.
//!
//! # Code ranges
//!
//! | Range | Meaning |
//! |-------|---------|
//! | `< 0` | warnings (`U_USING_FALLBACK_WARNING` …) |
//! | `0` | `U_ZERO_ERROR` |
//! | `1..=30` | standard failures |
//! | `0x10000..` | transliterator rule parse errors |
//! | `0x10100..` | format pattern errors |
//! | `0x10200..` | break iterator errors |
//! | `0x10300..` | regular expression errors |
//! | `0x10400..` | IDNA errors |
//! | `0x10500..` | plugin errors |

use std::borrow::Cow;
use std::fmt;

macro_rules! error_codes {
    ($($(#[$meta:meta])* $variant:ident = $value:expr => $name:literal,)*) => {
        /// Numeric status code, value-compatible with `UErrorCode`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[repr(i32)]
        pub enum ErrorCode {
            $($(#[$meta])* $variant = $value,)*
        }

        impl ErrorCode {
            /// Every defined code, in ascending numeric order per range.
            pub const ALL: &'static [ErrorCode] = &[$(ErrorCode::$variant,)*];

            /// The C name of this code, e.g. `"U_INVALID_FORMAT_ERROR"`.
            #[must_use]
            pub const fn name(self) -> &'static str {
                match self {
                    $(ErrorCode::$variant => $name,)*
                }
            }

            /// Look up a code by numeric value.
            #[must_use]
            pub fn from_i32(value: i32) -> Option<Self> {
                match value {
                    $(v if v == $value => Some(ErrorCode::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

error_codes! {
    UsingFallbackWarning = -128 => "U_USING_FALLBACK_WARNING",
    UsingDefaultWarning = -127 => "U_USING_DEFAULT_WARNING",
    SafecloneAllocatedWarning = -126 => "U_SAFECLONE_ALLOCATED_WARNING",
    StateOldWarning = -125 => "U_STATE_OLD_WARNING",
    StringNotTerminatedWarning = -124 => "U_STRING_NOT_TERMINATED_WARNING",
    SortKeyTooShortWarning = -123 => "U_SORT_KEY_TOO_SHORT_WARNING",
    AmbiguousAliasWarning = -122 => "U_AMBIGUOUS_ALIAS_WARNING",
    DifferentUcaVersion = -121 => "U_DIFFERENT_UCA_VERSION",
    PluginChangedLevelWarning = -120 => "U_PLUGIN_CHANGED_LEVEL_WARNING",

    /// No error, no warning.
    ZeroError = 0 => "U_ZERO_ERROR",

    IllegalArgumentError = 1 => "U_ILLEGAL_ARGUMENT_ERROR",
    MissingResourceError = 2 => "U_MISSING_RESOURCE_ERROR",
    InvalidFormatError = 3 => "U_INVALID_FORMAT_ERROR",
    FileAccessError = 4 => "U_FILE_ACCESS_ERROR",
    InternalProgramError = 5 => "U_INTERNAL_PROGRAM_ERROR",
    MessageParseError = 6 => "U_MESSAGE_PARSE_ERROR",
    MemoryAllocationError = 7 => "U_MEMORY_ALLOCATION_ERROR",
    IndexOutOfBoundsError = 8 => "U_INDEX_OUTOFBOUNDS_ERROR",
    ParseError = 9 => "U_PARSE_ERROR",
    InvalidCharFound = 10 => "U_INVALID_CHAR_FOUND",
    TruncatedCharFound = 11 => "U_TRUNCATED_CHAR_FOUND",
    IllegalCharFound = 12 => "U_ILLEGAL_CHAR_FOUND",
    InvalidTableFormat = 13 => "U_INVALID_TABLE_FORMAT",
    InvalidTableFile = 14 => "U_INVALID_TABLE_FILE",
    BufferOverflowError = 15 => "U_BUFFER_OVERFLOW_ERROR",
    UnsupportedError = 16 => "U_UNSUPPORTED_ERROR",
    ResourceTypeMismatch = 17 => "U_RESOURCE_TYPE_MISMATCH",
    IllegalEscapeSequence = 18 => "U_ILLEGAL_ESCAPE_SEQUENCE",
    UnsupportedEscapeSequence = 19 => "U_UNSUPPORTED_ESCAPE_SEQUENCE",
    NoSpaceAvailable = 20 => "U_NO_SPACE_AVAILABLE",
    CeNotFoundError = 21 => "U_CE_NOT_FOUND_ERROR",
    PrimaryTooLongError = 22 => "U_PRIMARY_TOO_LONG_ERROR",
    StateTooOldError = 23 => "U_STATE_TOO_OLD_ERROR",
    TooManyAliasesError = 24 => "U_TOO_MANY_ALIASES_ERROR",
    EnumOutOfSyncError = 25 => "U_ENUM_OUT_OF_SYNC_ERROR",
    InvariantConversionError = 26 => "U_INVARIANT_CONVERSION_ERROR",
    InvalidStateError = 27 => "U_INVALID_STATE_ERROR",
    CollatorVersionMismatch = 28 => "U_COLLATOR_VERSION_MISMATCH",
    UselessCollatorError = 29 => "U_USELESS_COLLATOR_ERROR",
    NoWritePermission = 30 => "U_NO_WRITE_PERMISSION",

    BadVariableDefinition = 0x10000 => "U_BAD_VARIABLE_DEFINITION",
    MalformedRule = 0x10001 => "U_MALFORMED_RULE",
    MalformedSet = 0x10002 => "U_MALFORMED_SET",
    MalformedSymbolReference = 0x10003 => "U_MALFORMED_SYMBOL_REFERENCE",
    MalformedUnicodeEscape = 0x10004 => "U_MALFORMED_UNICODE_ESCAPE",
    MalformedVariableDefinition = 0x10005 => "U_MALFORMED_VARIABLE_DEFINITION",
    MalformedVariableReference = 0x10006 => "U_MALFORMED_VARIABLE_REFERENCE",
    MismatchedSegmentDelimiters = 0x10007 => "U_MISMATCHED_SEGMENT_DELIMITERS",
    MisplacedAnchorStart = 0x10008 => "U_MISPLACED_ANCHOR_START",
    MisplacedCursorOffset = 0x10009 => "U_MISPLACED_CURSOR_OFFSET",
    MisplacedQuantifier = 0x1000a => "U_MISPLACED_QUANTIFIER",
    MissingOperator = 0x1000b => "U_MISSING_OPERATOR",
    MissingSegmentClose = 0x1000c => "U_MISSING_SEGMENT_CLOSE",
    MultipleAnteContexts = 0x1000d => "U_MULTIPLE_ANTE_CONTEXTS",
    MultipleCursors = 0x1000e => "U_MULTIPLE_CURSORS",
    MultiplePostContexts = 0x1000f => "U_MULTIPLE_POST_CONTEXTS",
    TrailingBackslash = 0x10010 => "U_TRAILING_BACKSLASH",
    UndefinedSegmentReference = 0x10011 => "U_UNDEFINED_SEGMENT_REFERENCE",
    UndefinedVariable = 0x10012 => "U_UNDEFINED_VARIABLE",
    UnquotedSpecial = 0x10013 => "U_UNQUOTED_SPECIAL",
    UnterminatedQuote = 0x10014 => "U_UNTERMINATED_QUOTE",
    RuleMaskError = 0x10015 => "U_RULE_MASK_ERROR",
    MisplacedCompoundFilter = 0x10016 => "U_MISPLACED_COMPOUND_FILTER",
    MultipleCompoundFilters = 0x10017 => "U_MULTIPLE_COMPOUND_FILTERS",
    InvalidRbtSyntax = 0x10018 => "U_INVALID_RBT_SYNTAX",
    InvalidPropertyPattern = 0x10019 => "U_INVALID_PROPERTY_PATTERN",
    MalformedPragma = 0x1001a => "U_MALFORMED_PRAGMA",
    UnclosedSegment = 0x1001b => "U_UNCLOSED_SEGMENT",
    IllegalCharInSegment = 0x1001c => "U_ILLEGAL_CHAR_IN_SEGMENT",
    VariableRangeExhausted = 0x1001d => "U_VARIABLE_RANGE_EXHAUSTED",
    VariableRangeOverlap = 0x1001e => "U_VARIABLE_RANGE_OVERLAP",
    IllegalCharacter = 0x1001f => "U_ILLEGAL_CHARACTER",
    InternalTransliteratorError = 0x10020 => "U_INTERNAL_TRANSLITERATOR_ERROR",
    InvalidId = 0x10021 => "U_INVALID_ID",
    InvalidFunction = 0x10022 => "U_INVALID_FUNCTION",

    UnexpectedToken = 0x10100 => "U_UNEXPECTED_TOKEN",
    MultipleDecimalSeparators = 0x10101 => "U_MULTIPLE_DECIMAL_SEPARATORS",
    MultipleExponentialSymbols = 0x10102 => "U_MULTIPLE_EXPONENTIAL_SYMBOLS",
    MalformedExponentialPattern = 0x10103 => "U_MALFORMED_EXPONENTIAL_PATTERN",
    MultiplePercentSymbols = 0x10104 => "U_MULTIPLE_PERCENT_SYMBOLS",
    MultiplePermillSymbols = 0x10105 => "U_MULTIPLE_PERMILL_SYMBOLS",
    MultiplePadSpecifiers = 0x10106 => "U_MULTIPLE_PAD_SPECIFIERS",
    PatternSyntaxError = 0x10107 => "U_PATTERN_SYNTAX_ERROR",
    IllegalPadPosition = 0x10108 => "U_ILLEGAL_PAD_POSITION",
    UnmatchedBraces = 0x10109 => "U_UNMATCHED_BRACES",
    UnsupportedProperty = 0x1010a => "U_UNSUPPORTED_PROPERTY",
    UnsupportedAttribute = 0x1010b => "U_UNSUPPORTED_ATTRIBUTE",
    ArgumentTypeMismatch = 0x1010c => "U_ARGUMENT_TYPE_MISMATCH",
    DuplicateKeyword = 0x1010d => "U_DUPLICATE_KEYWORD",
    UndefinedKeyword = 0x1010e => "U_UNDEFINED_KEYWORD",
    DefaultKeywordMissing = 0x1010f => "U_DEFAULT_KEYWORD_MISSING",
    DecimalNumberSyntaxError = 0x10110 => "U_DECIMAL_NUMBER_SYNTAX_ERROR",

    BrkInternalError = 0x10200 => "U_BRK_INTERNAL_ERROR",
    BrkHexDigitsExpected = 0x10201 => "U_BRK_HEX_DIGITS_EXPECTED",
    BrkSemicolonExpected = 0x10202 => "U_BRK_SEMICOLON_EXPECTED",
    BrkRuleSyntax = 0x10203 => "U_BRK_RULE_SYNTAX",
    BrkUnclosedSet = 0x10204 => "U_BRK_UNCLOSED_SET",
    BrkAssignError = 0x10205 => "U_BRK_ASSIGN_ERROR",
    BrkVariableRedefinition = 0x10206 => "U_BRK_VARIABLE_REDFINITION",
    BrkMismatchedParen = 0x10207 => "U_BRK_MISMATCHED_PAREN",
    BrkNewLineInQuotedString = 0x10208 => "U_BRK_NEW_LINE_IN_QUOTED_STRING",
    BrkUndefinedVariable = 0x10209 => "U_BRK_UNDEFINED_VARIABLE",
    BrkInitError = 0x1020a => "U_BRK_INIT_ERROR",
    BrkRuleEmptySet = 0x1020b => "U_BRK_RULE_EMPTY_SET",
    BrkUnrecognizedOption = 0x1020c => "U_BRK_UNRECOGNIZED_OPTION",
    BrkMalformedRuleTag = 0x1020d => "U_BRK_MALFORMED_RULE_TAG",

    RegexInternalError = 0x10300 => "U_REGEX_INTERNAL_ERROR",
    RegexRuleSyntax = 0x10301 => "U_REGEX_RULE_SYNTAX",
    RegexInvalidState = 0x10302 => "U_REGEX_INVALID_STATE",
    RegexBadEscapeSequence = 0x10303 => "U_REGEX_BAD_ESCAPE_SEQUENCE",
    RegexPropertySyntax = 0x10304 => "U_REGEX_PROPERTY_SYNTAX",
    RegexUnimplemented = 0x10305 => "U_REGEX_UNIMPLEMENTED",
    RegexMismatchedParen = 0x10306 => "U_REGEX_MISMATCHED_PAREN",
    RegexNumberTooBig = 0x10307 => "U_REGEX_NUMBER_TOO_BIG",
    RegexBadInterval = 0x10308 => "U_REGEX_BAD_INTERVAL",
    RegexMaxLtMin = 0x10309 => "U_REGEX_MAX_LT_MIN",
    RegexInvalidBackRef = 0x1030a => "U_REGEX_INVALID_BACK_REF",
    RegexInvalidFlag = 0x1030b => "U_REGEX_INVALID_FLAG",
    RegexLookBehindLimit = 0x1030c => "U_REGEX_LOOK_BEHIND_LIMIT",
    RegexSetContainsString = 0x1030d => "U_REGEX_SET_CONTAINS_STRING",
    RegexOctalTooBig = 0x1030e => "U_REGEX_OCTAL_TOO_BIG",
    RegexMissingCloseBracket = 0x1030f => "U_REGEX_MISSING_CLOSE_BRACKET",
    RegexInvalidRange = 0x10310 => "U_REGEX_INVALID_RANGE",
    RegexStackOverflow = 0x10311 => "U_REGEX_STACK_OVERFLOW",
    RegexTimeOut = 0x10312 => "U_REGEX_TIME_OUT",
    RegexStoppedByCaller = 0x10313 => "U_REGEX_STOPPED_BY_CALLER",

    IdnaProhibitedError = 0x10400 => "U_IDNA_PROHIBITED_ERROR",
    IdnaUnassignedError = 0x10401 => "U_IDNA_UNASSIGNED_ERROR",
    IdnaCheckBidiError = 0x10402 => "U_IDNA_CHECK_BIDI_ERROR",
    IdnaStd3AsciiRulesError = 0x10403 => "U_IDNA_STD3_ASCII_RULES_ERROR",
    IdnaAcePrefixError = 0x10404 => "U_IDNA_ACE_PREFIX_ERROR",
    IdnaVerificationError = 0x10405 => "U_IDNA_VERIFICATION_ERROR",
    IdnaLabelTooLongError = 0x10406 => "U_IDNA_LABEL_TOO_LONG_ERROR",
    IdnaZeroLengthLabelError = 0x10407 => "U_IDNA_ZERO_LENGTH_LABEL_ERROR",
    IdnaDomainNameTooLongError = 0x10408 => "U_IDNA_DOMAIN_NAME_TOO_LONG_ERROR",

    PluginTooHigh = 0x10500 => "U_PLUGIN_TOO_HIGH",
    PluginDidntSetLevel = 0x10501 => "U_PLUGIN_DIDNT_SET_LEVEL",
}

impl ErrorCode {
    /// Numeric value of the code.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// True for `U_ZERO_ERROR` and every warning (`U_SUCCESS`).
    #[must_use]
    pub const fn is_success(self) -> bool {
        (self as i32) <= 0
    }

    /// True for every hard failure (`U_FAILURE`).
    #[must_use]
    pub const fn is_failure(self) -> bool {
        (self as i32) > 0
    }

    /// True for informational warnings only.
    #[must_use]
    pub const fn is_warning(self) -> bool {
        (self as i32) < 0
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned by every fallible ficu operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    code: ErrorCode,
    detail: Cow<'static, str>,
    offset: Option<usize>,
}

impl Error {
    /// Create an error with a code and a detail message.
    pub fn new(code: ErrorCode, detail: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code,
            detail: detail.into(),
            offset: None,
        }
    }

    /// Attach the input offset at which the problem was detected.
    #[must_use]
    pub fn at(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn illegal_argument(detail: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCode::IllegalArgumentError, detail)
    }

    pub fn invalid_format(detail: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCode::InvalidFormatError, detail)
    }

    pub fn unsupported(detail: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCode::UnsupportedError, detail)
    }

    pub fn index_out_of_bounds(detail: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCode::IndexOutOfBoundsError, detail)
    }

    pub fn pattern_syntax(detail: impl Into<Cow<'static, str>>) -> Self {
        Self::new(ErrorCode::PatternSyntaxError, detail)
    }

    /// The status code.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human-readable description of what went wrong.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Offset into the parsed input, when the error came from a parser.
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        self.offset
    }
}

impl From<ErrorCode> for Error {
    fn from(code: ErrorCode) -> Self {
        Self::new(code, "")
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code.name())?;
        if !self.detail.is_empty() {
            write!(f, ": {}", self.detail)?;
        }
        if let Some(offset) = self.offset {
            write!(f, " (at offset {offset})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {}

/// Result alias used across ficu.
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_failure_partition() {
        assert!(ErrorCode::ZeroError.is_success());
        assert!(!ErrorCode::ZeroError.is_warning());
        assert!(ErrorCode::UsingFallbackWarning.is_success());
        assert!(ErrorCode::UsingFallbackWarning.is_warning());
        assert!(ErrorCode::IllegalArgumentError.is_failure());
        assert!(ErrorCode::DuplicateKeyword.is_failure());
    }

    #[test]
    fn numeric_values_match_c_api() {
        assert_eq!(ErrorCode::IllegalArgumentError.as_i32(), 1);
        assert_eq!(ErrorCode::IndexOutOfBoundsError.as_i32(), 8);
        assert_eq!(ErrorCode::UnsupportedError.as_i32(), 16);
        assert_eq!(ErrorCode::PatternSyntaxError.as_i32(), 0x10107);
        assert_eq!(ErrorCode::DuplicateKeyword.as_i32(), 0x1010d);
        assert_eq!(ErrorCode::BrkInitError.as_i32(), 0x1020a);
    }

    #[test]
    fn from_i32_round_trips_every_code() {
        for &code in ErrorCode::ALL {
            assert_eq!(ErrorCode::from_i32(code.as_i32()), Some(code));
        }
        assert_eq!(ErrorCode::from_i32(31), None);
        assert_eq!(ErrorCode::from_i32(-1), None);
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = ErrorCode::ALL.iter().map(|c| c.name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn display_includes_detail_and_offset() {
        let err = Error::pattern_syntax("unexpected '}'").at(7);
        assert_eq!(
            err.to_string(),
            "U_PATTERN_SYNTAX_ERROR: unexpected '}' (at offset 7)"
        );
        let bare: Error = ErrorCode::UnsupportedError.into();
        assert_eq!(bare.to_string(), "U_UNSUPPORTED_ERROR");
    }
}

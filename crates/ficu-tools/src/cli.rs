//! Command-line argument parsing for `ficu-swap`.
//!
//! Parses args manually to keep the binary small. `FICU_SWAP_ENDIAN` and
//! `FICU_SWAP_CHARSET` set defaults that flags override.

use std::env;
use std::path::PathBuf;
use std::process;

use ficu_common::{CharsetFamily, Endianness};

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const ENDIAN_ENV: &str = "FICU_SWAP_ENDIAN";
pub const CHARSET_ENV: &str = "FICU_SWAP_CHARSET";

const HELP_TEXT: &str = "\
ficu-swap: inspect and byte-swap rule-based break iterator data files

USAGE:
    ficu-swap [OPTIONS] INPUT [OUTPUT]

OPTIONS:
    --endian=ORDER       Output byte order: 'little', 'big' or 'native' (default: native)
    --charset=FAMILY     Output charset family: 'ascii' or 'ebcdic' (default: ascii)
    --info               Print the data header and section layout
    --dump               Print the state tables, statuses and rule source
    --preflight          Print the size of the swapped file without writing it
    --help, -h           Show this help message
    --version, -V        Show version

Without --info, --dump or --preflight, INPUT is swapped into OUTPUT.

ENVIRONMENT VARIABLES:
    FICU_SWAP_ENDIAN     Default for --endian
    FICU_SWAP_CHARSET    Default for --charset
    FICU_LOG             Log filter (default: warn), e.g. 'ficu_brk=debug'";

/// What to do with the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Swap,
    Info,
    Dump,
    Preflight,
}

/// Parsed command-line options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opts {
    pub mode: Mode,
    /// Byte order of the output.
    pub endian: Endianness,
    /// Charset family of the output.
    pub charset: CharsetFamily,
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            mode: Mode::Swap,
            endian: Endianness::NATIVE,
            charset: CharsetFamily::Ascii,
            input: None,
            output: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Help,
    Version,
    InvalidValue { flag: &'static str, value: String },
    UnknownArg(String),
    MissingInput,
    MissingOutput,
    ConflictingModes,
}

fn parse_endian(value: &str) -> Option<Endianness> {
    match value.trim().to_ascii_lowercase().as_str() {
        "little" | "l" | "le" => Some(Endianness::Little),
        "big" | "b" | "be" => Some(Endianness::Big),
        "native" | "n" => Some(Endianness::NATIVE),
        _ => None,
    }
}

fn parse_charset(value: &str) -> Option<CharsetFamily> {
    match value.trim().to_ascii_lowercase().as_str() {
        "ascii" | "a" => Some(CharsetFamily::Ascii),
        "ebcdic" | "e" => Some(CharsetFamily::Ebcdic),
        _ => None,
    }
}

impl Opts {
    /// Parse command-line arguments and environment variables, exiting on
    /// `--help`, `--version` and errors.
    pub fn parse() -> Self {
        match Self::parse_from_env_and_args(env::args().skip(1), |key| env::var(key).ok()) {
            Ok(opts) => opts,
            Err(ParseError::Help) => {
                println!("{HELP_TEXT}");
                process::exit(0);
            }
            Err(ParseError::Version) => {
                println!("ficu-swap {VERSION}");
                process::exit(0);
            }
            Err(err) => {
                match err {
                    ParseError::InvalidValue { flag, value } => {
                        eprintln!("Invalid {flag} value: {value}")
                    }
                    ParseError::UnknownArg(arg) => eprintln!("Unknown argument: {arg}"),
                    ParseError::MissingInput => eprintln!("Missing INPUT file"),
                    ParseError::MissingOutput => eprintln!("Missing OUTPUT file"),
                    ParseError::ConflictingModes => {
                        eprintln!("--info, --dump and --preflight are mutually exclusive");
                    }
                    ParseError::Help | ParseError::Version => {}
                }
                eprintln!("Run with --help for usage information.");
                process::exit(2);
            }
        }
    }

    pub fn parse_from_env_and_args<I, S, F>(args: I, get_env: F) -> Result<Self, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
        F: Fn(&str) -> Option<String>,
    {
        let mut opts = Self::default();

        // Environment defaults; unparseable values are ignored.
        if let Some(val) = get_env(ENDIAN_ENV)
            && let Some(endian) = parse_endian(&val)
        {
            opts.endian = endian;
        }
        if let Some(val) = get_env(CHARSET_ENV)
            && let Some(charset) = parse_charset(&val)
        {
            opts.charset = charset;
        }

        let mut mode = None;
        let mut positional = Vec::new();
        for arg in args {
            let arg = arg.as_ref();
            let flag_mode = match arg {
                "--help" | "-h" => return Err(ParseError::Help),
                "--version" | "-V" => return Err(ParseError::Version),
                "--info" => Some(Mode::Info),
                "--dump" => Some(Mode::Dump),
                "--preflight" => Some(Mode::Preflight),
                other => {
                    if let Some(val) = other.strip_prefix("--endian=") {
                        opts.endian = parse_endian(val).ok_or_else(|| ParseError::InvalidValue {
                            flag: "--endian",
                            value: val.to_string(),
                        })?;
                    } else if let Some(val) = other.strip_prefix("--charset=") {
                        opts.charset = parse_charset(val).ok_or_else(|| ParseError::InvalidValue {
                            flag: "--charset",
                            value: val.to_string(),
                        })?;
                    } else if other.starts_with('-') && other != "-" {
                        return Err(ParseError::UnknownArg(other.to_string()));
                    } else {
                        positional.push(PathBuf::from(other));
                    }
                    None
                }
            };
            if let Some(new) = flag_mode {
                if mode.is_some_and(|m| m != new) {
                    return Err(ParseError::ConflictingModes);
                }
                mode = Some(new);
            }
        }
        opts.mode = mode.unwrap_or_default();

        let mut positional = positional.into_iter();
        opts.input = positional.next();
        opts.output = positional.next();
        if let Some(extra) = positional.next() {
            return Err(ParseError::UnknownArg(extra.display().to_string()));
        }
        if opts.input.is_none() {
            return Err(ParseError::MissingInput);
        }
        if opts.mode == Mode::Swap && opts.output.is_none() {
            return Err(ParseError::MissingOutput);
        }
        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_with_env(
        args: &[&str],
        env_pairs: &[(&'static str, &'static str)],
    ) -> Result<Opts, ParseError> {
        let map: std::collections::HashMap<_, _> = env_pairs.iter().copied().collect();
        Opts::parse_from_env_and_args(args, |key| map.get(key).map(|value| (*value).to_string()))
    }

    #[test]
    fn swap_defaults() {
        let opts = parse_with_env(&["in.brk", "out.brk"], &[]).unwrap();
        assert_eq!(opts.mode, Mode::Swap);
        assert_eq!(opts.endian, Endianness::NATIVE);
        assert_eq!(opts.charset, CharsetFamily::Ascii);
        assert_eq!(opts.input, Some(PathBuf::from("in.brk")));
        assert_eq!(opts.output, Some(PathBuf::from("out.brk")));
    }

    #[test]
    fn flags_override_env() {
        let env = [(ENDIAN_ENV, "big"), (CHARSET_ENV, "ebcdic")];
        let opts = parse_with_env(&["a", "b"], &env).unwrap();
        assert_eq!(opts.endian, Endianness::Big);
        assert_eq!(opts.charset, CharsetFamily::Ebcdic);

        let opts = parse_with_env(&["--endian=little", "--charset=ascii", "a", "b"], &env).unwrap();
        assert_eq!(opts.endian, Endianness::Little);
        assert_eq!(opts.charset, CharsetFamily::Ascii);
    }

    #[test]
    fn bad_env_values_are_ignored() {
        let opts = parse_with_env(&["a", "b"], &[(ENDIAN_ENV, "middle")]).unwrap();
        assert_eq!(opts.endian, Endianness::NATIVE);
    }

    #[test]
    fn inspection_modes_need_no_output() {
        for (flag, mode) in [
            ("--info", Mode::Info),
            ("--dump", Mode::Dump),
            ("--preflight", Mode::Preflight),
        ] {
            let opts = parse_with_env(&[flag, "in.brk"], &[]).unwrap();
            assert_eq!(opts.mode, mode);
            assert_eq!(opts.output, None);
        }
    }

    #[test]
    fn errors() {
        assert_eq!(parse_with_env(&["--help"], &[]), Err(ParseError::Help));
        assert_eq!(parse_with_env(&["-V"], &[]), Err(ParseError::Version));
        assert_eq!(parse_with_env(&[], &[]), Err(ParseError::MissingInput));
        assert_eq!(parse_with_env(&["in"], &[]), Err(ParseError::MissingOutput));
        assert_eq!(
            parse_with_env(&["--endian=pdp", "a", "b"], &[]),
            Err(ParseError::InvalidValue { flag: "--endian", value: "pdp".into() })
        );
        assert_eq!(
            parse_with_env(&["--fast", "a", "b"], &[]),
            Err(ParseError::UnknownArg("--fast".into()))
        );
        assert_eq!(parse_with_env(&["a", "b", "c"], &[]), Err(ParseError::UnknownArg("c".into())));
        assert_eq!(
            parse_with_env(&["--info", "--dump", "a"], &[]),
            Err(ParseError::ConflictingModes)
        );
        assert!(parse_with_env(&["--info", "--info", "a"], &[]).is_ok());
    }
}

#![forbid(unsafe_code)]

//! Command-line tooling over the ficu data formats.
//!
//! # Role in ficu
//! `ficu-swap` converts rule-based break iterator data files between byte
//! orders and charset families, and prints their headers and tables.
//!
//! # How it fits in the system
//! The binary is a thin shell: [`cli`] turns arguments and environment into
//! [`cli::Opts`], and [`run::run`] drives `ficu-brk`'s swap and dump entry
//! points.

pub mod cli;
pub mod run;

/// Environment variable holding the log filter for the binary.
pub const LOG_ENV: &str = "FICU_LOG";

//! The work behind each `ficu-swap` mode.
//!
//! Everything that reaches stdout goes through a caller-supplied writer so
//! the modes can be exercised without a process boundary.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ficu_brk::{RbbiData, swap_break_data, swap_break_data_to_vec};
use ficu_common::{DataHeader, DataSwapper};
use tracing::{debug, info};

use crate::cli::{Mode, Opts};

/// Failure of a `ficu-swap` run.
#[derive(Debug)]
pub enum ToolError {
    Io { path: PathBuf, source: io::Error },
    Data { path: PathBuf, source: ficu_common::Error },
    Output(io::Error),
    MissingPath(&'static str),
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Data { path, source } => write!(f, "{}: {source}", path.display()),
            Self::Output(err) => write!(f, "writing report: {err}"),
            Self::MissingPath(which) => write!(f, "no {which} file given"),
        }
    }
}

impl std::error::Error for ToolError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } | Self::Output(source) => Some(source),
            Self::Data { source, .. } => Some(source),
            Self::MissingPath(_) => None,
        }
    }
}

impl From<io::Error> for ToolError {
    fn from(err: io::Error) -> Self {
        Self::Output(err)
    }
}

fn read_input(path: &Path) -> Result<Vec<u8>, ToolError> {
    let bytes = fs::read(path).map_err(|source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), len = bytes.len(), "read input");
    Ok(bytes)
}

/// Execute `opts`, writing any report to `out`.
pub fn run(opts: &Opts, out: &mut impl Write) -> Result<(), ToolError> {
    let input_path = opts.input.as_deref().ok_or(ToolError::MissingPath("INPUT"))?;
    let input = read_input(input_path)?;
    let data_err = |source| ToolError::Data { path: input_path.to_path_buf(), source };

    match opts.mode {
        Mode::Info => {
            let header = DataHeader::parse(&input).map_err(data_err)?;
            write_info(&header, &input, out)?;
        }
        Mode::Dump => {
            let data = RbbiData::from_udata(&input).map_err(data_err)?;
            out.write_all(data.dump().as_bytes())?;
        }
        Mode::Preflight => {
            let ds =
                DataSwapper::for_input_data(&input, opts.endian, opts.charset).map_err(data_err)?;
            let total = swap_break_data(&ds, &input, None).map_err(data_err)?;
            writeln!(out, "{total}")?;
        }
        Mode::Swap => {
            let output_path = opts.output.as_deref().ok_or(ToolError::MissingPath("OUTPUT"))?;
            let ds =
                DataSwapper::for_input_data(&input, opts.endian, opts.charset).map_err(data_err)?;
            let swapped = swap_break_data_to_vec(&ds, &input).map_err(data_err)?;
            fs::write(output_path, &swapped)
                .map_err(|source| ToolError::Io { path: output_path.to_path_buf(), source })?;
            info!(
                input = %input_path.display(),
                output = %output_path.display(),
                len = swapped.len(),
                from = ?ds.input_endianness(),
                to = ?ds.output_endianness(),
                "wrote swapped break data"
            );
        }
    }
    Ok(())
}

fn write_info(header: &DataHeader, input: &[u8], out: &mut impl Write) -> io::Result<()> {
    let info = &header.info;
    let dotted = |v: [u8; 4]| format!("{}.{}.{}.{}", v[0], v[1], v[2], v[3]);
    writeln!(out, "data format:     {}", header.data_format_str())?;
    writeln!(out, "format version:  {}", dotted(info.format_version))?;
    writeln!(out, "data version:    {}", dotted(info.data_version))?;
    writeln!(out, "endianness:      {:?}", info.endianness)?;
    writeln!(out, "charset family:  {:?}", info.charset_family)?;
    writeln!(out, "header size:     {}", header.header_size)?;
    if let Some(copyright) = &header.copyright {
        writeln!(out, "copyright:       {copyright}")?;
    }

    // Section layout is only meaningful for break data; other files stop here.
    if let Ok(data) = RbbiData::from_udata(input) {
        let rbbi = data.header();
        writeln!(out, "data length:     {}", rbbi.length)?;
        writeln!(out, "categories:      {}", rbbi.cat_count)?;
        for (name, section) in rbbi.sections() {
            if section.is_empty() {
                writeln!(out, "  {name:<14} -")?;
            } else {
                writeln!(out, "  {name:<14} offset {:>6} len {:>6}", section.offset, section.len)?;
            }
        }
    }
    Ok(())
}

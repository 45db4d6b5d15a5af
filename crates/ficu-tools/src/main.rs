#![forbid(unsafe_code)]

//! `ficu-swap`: inspect and byte-swap break iterator data files.

use std::io;
use std::process;

use ficu_tools::LOG_ENV;
use ficu_tools::cli::Opts;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // Logs go to stderr; stdout carries reports.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    let opts = Opts::parse();
    let stdout = io::stdout();
    if let Err(err) = ficu_tools::run::run(&opts, &mut stdout.lock()) {
        eprintln!("ficu-swap: {err}");
        process::exit(1);
    }
}

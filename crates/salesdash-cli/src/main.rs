//! `salesdash`: seed the sample sales store, analyse it, and write the
//! charts and report into the working directory.
//!
//! Takes no arguments. Log verbosity follows `RUST_LOG`.

use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt::Write as _;
use std::io::{self, Write};

use salesdash::pipeline::{self, RunOutcome};
use salesdash::{ArtifactPaths, SalesError};
use tracing::error;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "warn,salesdash=info";
const BANNER_WIDTH: usize = 70;

fn main() {
    init_logging();

    let paths = ArtifactPaths::default();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let result = write_banner(&mut out)
        .map_err(SalesError::from)
        .and_then(|()| pipeline::run(&paths, &mut out))
        .and_then(|outcome| write_completion(&mut out, &outcome).map_err(SalesError::from));

    if let Err(err) = result {
        error!(error = %err, "run failed");
        let _ = out.flush();
        eprint!("{}", failure_report(&err));
        eprintln!("{}", Backtrace::force_capture());
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "{rule}")?;
    writeln!(out, "SALES ANALYSIS")?;
    writeln!(out, "BASIC SALES SUMMARY FROM A SQLITE DATABASE")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Starting SQLite sales analysis...")
}

fn write_completion<W: Write>(out: &mut W, outcome: &RunOutcome) -> io::Result<()> {
    let rule = "=".repeat(BANNER_WIDTH);
    writeln!(out, "\n{rule}")?;
    writeln!(out, "ANALYSIS COMPLETED SUCCESSFULLY")?;
    writeln!(out, "{rule}")?;
    writeln!(out, "Analysis summary:")?;
    writeln!(
        out,
        "   * SQLite database seeded with {} sales records ({} in store)",
        outcome.inserted, outcome.profile.row_count
    )?;
    writeln!(out, "   * 5 SQL queries executed")?;
    writeln!(out, "   * Dashboard and bar chart rendered")?;
    writeln!(out, "   * All interview questions answered")?;
    writeln!(out, "   * Project summary written")?;

    writeln!(out, "\nGenerated files:")?;
    for (idx, path) in outcome.artifacts.iter().enumerate() {
        writeln!(out, "   {}. {}", idx + 1, path.display())?;
    }
    Ok(())
}

/// The error message followed by each underlying cause.
fn failure_report(err: &SalesError) -> String {
    let mut text = format!("Error occurred: {err}\n");
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(text, "  caused by: {cause}");
        source = cause.source();
    }
    text
}

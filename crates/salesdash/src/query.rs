//! The five fixed aggregation queries and their typed result rows.

use std::io::Write;

use chrono::NaiveDate;
use rusqlite::Connection;
use serde::Serialize;
use tracing::{debug, warn};

use crate::SalesResult;
use crate::record::Category;
use crate::table::{TextTable, money};

pub const PRODUCT_QUERY: &str = "
    SELECT
        product,
        SUM(quantity) AS total_qty,
        SUM(quantity * price) AS revenue,
        ROUND(AVG(price), 2) AS avg_price
    FROM sales
    GROUP BY product
    ORDER BY revenue DESC";

pub const CATEGORY_QUERY: &str = "
    SELECT
        category,
        COUNT(*) AS num_transactions,
        COUNT(DISTINCT product) AS num_products,
        SUM(quantity) AS total_qty,
        SUM(quantity * price) AS revenue,
        ROUND(AVG(quantity * price), 2) AS avg_transaction_value
    FROM sales
    GROUP BY category
    ORDER BY revenue DESC";

pub const REP_QUERY: &str = "
    SELECT
        sales_rep,
        COUNT(*) AS transactions,
        SUM(quantity) AS total_items_sold,
        SUM(quantity * price) AS total_revenue,
        ROUND(AVG(quantity * price), 2) AS avg_sale_value
    FROM sales
    GROUP BY sales_rep
    ORDER BY total_revenue DESC";

pub const DAILY_QUERY: &str = "
    SELECT
        sale_date,
        COUNT(*) AS transactions,
        SUM(quantity) AS items_sold,
        SUM(quantity * price) AS daily_revenue
    FROM sales
    GROUP BY sale_date
    ORDER BY sale_date";

pub const OVERALL_QUERY: &str = "
    SELECT
        COUNT(*) AS total_transactions,
        COUNT(DISTINCT product) AS unique_products,
        COUNT(DISTINCT customer_id) AS unique_customers,
        SUM(quantity) AS total_items_sold,
        SUM(quantity * price) AS total_revenue,
        ROUND(AVG(quantity * price), 2) AS avg_transaction_value,
        MIN(sale_date) AS first_sale_date,
        MAX(sale_date) AS last_sale_date
    FROM sales";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductSummary {
    pub product: String,
    pub total_qty: i64,
    pub revenue: f64,
    pub avg_price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    /// Column text as stored; see [`CategorySummary::kind`] for the typed form.
    pub category: String,
    pub num_transactions: i64,
    pub num_products: i64,
    pub total_qty: i64,
    pub revenue: f64,
    pub avg_transaction_value: f64,
}

impl CategorySummary {
    #[must_use]
    pub fn kind(&self) -> Option<Category> {
        Category::from_column(&self.category)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepSummary {
    pub sales_rep: String,
    pub transactions: i64,
    pub total_items_sold: i64,
    pub total_revenue: f64,
    pub avg_sale_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub sale_date: NaiveDate,
    pub transactions: i64,
    pub items_sold: i64,
    pub daily_revenue: f64,
}

/// Whole-dataset totals. Sums and dates are empty-table safe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallSummary {
    pub total_transactions: i64,
    pub unique_products: i64,
    pub unique_customers: i64,
    pub total_items_sold: i64,
    pub total_revenue: f64,
    pub avg_transaction_value: f64,
    pub first_sale_date: Option<NaiveDate>,
    pub last_sale_date: Option<NaiveDate>,
}

/// All five result sets of one run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesQueryResults {
    pub products: Vec<ProductSummary>,
    pub categories: Vec<CategorySummary>,
    pub reps: Vec<RepSummary>,
    pub daily: Vec<DailySummary>,
    pub overall: OverallSummary,
}

pub fn product_summary(conn: &Connection) -> SalesResult<Vec<ProductSummary>> {
    let mut stmt = conn.prepare(PRODUCT_QUERY)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(ProductSummary {
                product: row.get(0)?,
                total_qty: row.get(1)?,
                revenue: row.get(2)?,
                avg_price: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn category_summary(conn: &Connection) -> SalesResult<Vec<CategorySummary>> {
    let mut stmt = conn.prepare(CATEGORY_QUERY)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(CategorySummary {
                category: row.get(0)?,
                num_transactions: row.get(1)?,
                num_products: row.get(2)?,
                total_qty: row.get(3)?,
                revenue: row.get(4)?,
                avg_transaction_value: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    for unknown in rows.iter().filter(|c| c.kind().is_none()) {
        warn!(category = %unknown.category, "unrecognised category in store");
    }
    Ok(rows)
}

pub fn rep_summary(conn: &Connection) -> SalesResult<Vec<RepSummary>> {
    let mut stmt = conn.prepare(REP_QUERY)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(RepSummary {
                sales_rep: row.get(0)?,
                transactions: row.get(1)?,
                total_items_sold: row.get(2)?,
                total_revenue: row.get(3)?,
                avg_sale_value: row.get(4)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn daily_summary(conn: &Connection) -> SalesResult<Vec<DailySummary>> {
    let mut stmt = conn.prepare(DAILY_QUERY)?;
    let rows = stmt
        .query_map([], |row| {
            Ok(DailySummary {
                sale_date: row.get(0)?,
                transactions: row.get(1)?,
                items_sold: row.get(2)?,
                daily_revenue: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub fn overall_summary(conn: &Connection) -> SalesResult<OverallSummary> {
    let summary = conn.query_row(OVERALL_QUERY, [], |row| {
        Ok(OverallSummary {
            total_transactions: row.get(0)?,
            unique_products: row.get(1)?,
            unique_customers: row.get(2)?,
            total_items_sold: row.get::<_, Option<i64>>(3)?.unwrap_or(0),
            total_revenue: row.get::<_, Option<f64>>(4)?.unwrap_or(0.0),
            avg_transaction_value: row.get::<_, Option<f64>>(5)?.unwrap_or(0.0),
            first_sale_date: row.get(6)?,
            last_sale_date: row.get(7)?,
        })
    })?;
    Ok(summary)
}

/// Run all five queries against `conn`.
pub fn run_sales_queries(conn: &Connection) -> SalesResult<SalesQueryResults> {
    let results = SalesQueryResults {
        products: product_summary(conn)?,
        categories: category_summary(conn)?,
        reps: rep_summary(conn)?,
        daily: daily_summary(conn)?,
        overall: overall_summary(conn)?,
    };
    debug!(
        products = results.products.len(),
        categories = results.categories.len(),
        reps = results.reps.len(),
        days = results.daily.len(),
        "sales queries complete"
    );
    if let Ok(json) = serde_json::to_string(&results) {
        debug!(results = %json, "sales query results");
    }
    Ok(results)
}

// ─── Console rendering ─────────────────────────────────────────────────

fn optional_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_owned(), |d| d.to_string())
}

impl SalesQueryResults {
    #[must_use]
    pub fn product_table(&self) -> TextTable {
        let mut table = TextTable::new(&["product", "total_qty", "revenue", "avg_price"]);
        for row in &self.products {
            table.push_row(vec![
                row.product.clone(),
                row.total_qty.to_string(),
                money(row.revenue),
                money(row.avg_price),
            ]);
        }
        table
    }

    #[must_use]
    pub fn category_table(&self) -> TextTable {
        let mut table = TextTable::new(&[
            "category",
            "num_transactions",
            "num_products",
            "total_qty",
            "revenue",
            "avg_transaction_value",
        ]);
        for row in &self.categories {
            table.push_row(vec![
                row.category.clone(),
                row.num_transactions.to_string(),
                row.num_products.to_string(),
                row.total_qty.to_string(),
                money(row.revenue),
                money(row.avg_transaction_value),
            ]);
        }
        table
    }

    #[must_use]
    pub fn rep_table(&self) -> TextTable {
        let mut table = TextTable::new(&[
            "sales_rep",
            "transactions",
            "total_items_sold",
            "total_revenue",
            "avg_sale_value",
        ]);
        for row in &self.reps {
            table.push_row(vec![
                row.sales_rep.clone(),
                row.transactions.to_string(),
                row.total_items_sold.to_string(),
                money(row.total_revenue),
                money(row.avg_sale_value),
            ]);
        }
        table
    }

    #[must_use]
    pub fn daily_table(&self) -> TextTable {
        let mut table =
            TextTable::new(&["sale_date", "transactions", "items_sold", "daily_revenue"]);
        for row in &self.daily {
            table.push_row(vec![
                row.sale_date.to_string(),
                row.transactions.to_string(),
                row.items_sold.to_string(),
                money(row.daily_revenue),
            ]);
        }
        table
    }

    /// Print every result set the way the console report shows it.
    pub fn render<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let sections = [
            (
                "QUERY 1: Sales Summary by Product",
                "SELECT product, SUM(quantity) AS total_qty, SUM(quantity * price) AS revenue FROM sales GROUP BY product ORDER BY revenue DESC",
                self.product_table(),
            ),
            (
                "QUERY 2: Sales Summary by Category",
                "SELECT category, COUNT(*) AS num_products, SUM(quantity) AS total_qty, SUM(quantity * price) AS revenue FROM sales GROUP BY category",
                self.category_table(),
            ),
            (
                "QUERY 3: Sales Representative Performance",
                "SELECT sales_rep, COUNT(*) AS transactions, SUM(quantity * price) AS total_revenue FROM sales GROUP BY sales_rep",
                self.rep_table(),
            ),
            (
                "QUERY 4: Daily Sales Trend",
                "SELECT sale_date, SUM(quantity * price) AS daily_revenue FROM sales GROUP BY sale_date ORDER BY sale_date",
                self.daily_table(),
            ),
        ];
        for (title, sql, table) in sections {
            writeln!(out, "\n{title}")?;
            writeln!(out, "SQL: {sql}")?;
            writeln!(out, "\nResults:")?;
            write!(out, "{}", table.render())?;
        }

        let overall = &self.overall;
        writeln!(out, "\nQUERY 5: Overall Business Summary")?;
        writeln!(
            out,
            "SQL: SELECT COUNT(*) AS total_transactions, SUM(quantity) AS total_items, SUM(quantity * price) AS total_revenue FROM sales"
        )?;
        writeln!(out, "\nResults:")?;
        writeln!(out, "   total_transactions: {}", overall.total_transactions)?;
        writeln!(out, "   unique_products: {}", overall.unique_products)?;
        writeln!(out, "   unique_customers: {}", overall.unique_customers)?;
        writeln!(out, "   total_items_sold: {}", overall.total_items_sold)?;
        writeln!(out, "   total_revenue: {}", money(overall.total_revenue))?;
        writeln!(
            out,
            "   avg_transaction_value: {}",
            money(overall.avg_transaction_value)
        )?;
        writeln!(out, "   first_sale_date: {}", optional_date(overall.first_sale_date))?;
        writeln!(out, "   last_sale_date: {}", optional_date(overall.last_sale_date))
    }
}

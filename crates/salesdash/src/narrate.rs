//! Canned interview questions and answers about the analysis.

use std::io::Write;

/// One question with its prepared answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterviewAnswer {
    pub question: &'static str,
    pub answer: &'static str,
}

const fn qa(question: &'static str, answer: &'static str) -> InterviewAnswer {
    InterviewAnswer { question, answer }
}

pub const INTERVIEW_ANSWERS: [InterviewAnswer; 8] = [
    qa(
        "1. How did you connect the program to a database?",
        "\
The program opens the SQLite file through the rusqlite driver:

    let conn = rusqlite::Connection::open(\"sales_data.db\")?;

The connection handle is used to:
- execute SQL statements
- prepare statements and map result rows into structs
- group inserts into a transaction
- close the file explicitly once the queries are done

SQLite is bundled into the binary, so there is no server to install.",
    ),
    qa(
        "2. What SQL query did you run?",
        "\
Five aggregation queries in total. The main one:

    SELECT
        product,
        SUM(quantity) AS total_qty,
        SUM(quantity * price) AS revenue,
        ROUND(AVG(price), 2) AS avg_price
    FROM sales
    GROUP BY product
    ORDER BY revenue DESC

It selects each product, totals the quantity sold, computes revenue as
quantity times price, averages the unit price, and lists the highest
earners first.",
    ),
    qa(
        "3. What does GROUP BY do?",
        "\
GROUP BY collapses rows that share a value into one summary row.

Without GROUP BY:
| product | quantity | price  |
|---------|----------|--------|
| Laptop  | 2        | 999.99 |
| Laptop  | 3        | 999.99 |
| Mouse   | 10       | 29.99  |

With GROUP BY product:
| product | total_qty | revenue |
|---------|-----------|---------|
| Laptop  | 5         | 4999.95 |
| Mouse   | 10        | 299.90  |

Aggregate functions such as SUM(), COUNT() and AVG() then run once per
group instead of once over the whole table.",
    ),
    qa(
        "4. How did you calculate revenue?",
        "\
Revenue is computed inside SQL:

    SUM(quantity * price) AS revenue

1. For each row, quantity is multiplied by price.
2. SUM() adds those per-row amounts.
3. GROUP BY decides which rows are added together (per product,
   category, rep or day).

Example:
- Laptop: 5 units x $999.99 = $4,999.95
- Mouse: 25 units x $29.99 = $749.75",
    ),
    qa(
        "5. How did you visualize the result?",
        "\
With the plotters crate, rendering straight to PNG:

    let root = BitMapBackend::new(\"simple_sales_chart.png\", (1000, 600))
        .into_drawing_area();

Two images are produced:
- a dashboard with a horizontal bar chart of the top products, a pie
  chart of revenue by category, a bar chart per sales rep, and a line
  chart of daily revenue with a fitted trend line
- a simple bar chart of the eight best-selling products by revenue

Each chart carries a title, axis descriptions and value labels.",
    ),
    qa(
        "6. How are the query results held in memory?",
        "\
Each query maps its rows into a typed struct:

    stmt.query_map([], |row| {
        Ok(ProductSummary {
            product: row.get(0)?,
            total_qty: row.get(1)?,
            revenue: row.get(2)?,
            avg_price: row.get(3)?,
        })
    })?

The typed rows give:
1. column types checked when the row is read
2. plain vectors that are easy to sort, slice and iterate
3. direct input for the charts and the console tables",
    ),
    qa(
        "7. What's the benefit of running SQL from a program?",
        "\
SQL is good at:
- filtering and aggregating data close to where it is stored
- expressing grouping and joins declaratively
- using the engine's optimized execution

The surrounding program is good at:
- rendering charts and reports
- automating the whole workflow end to end
- combining results from several sources

Together, the database does the heavy aggregation and the program turns
the results into something people can read, repeatably.",
    ),
    qa(
        "8. Could you run the same SQL query directly in DB Browser for SQLite?",
        "\
Yes. The queries are plain SQLite SQL:

1. Open DB Browser for SQLite.
2. Open the 'sales_data.db' file.
3. Go to the 'Execute SQL' tab.
4. Paste:
       SELECT product, SUM(quantity) AS total_qty,
              SUM(quantity * price) AS revenue
       FROM sales GROUP BY product ORDER BY revenue DESC
5. Click 'Execute' and the same rows appear.

DB Browser suits quick manual exploration; the program suits repeatable,
automated reporting with charts.",
    ),
];

pub fn write_interview_answers<W: Write>(out: &mut W) -> std::io::Result<()> {
    let rule = "-".repeat(70);
    for item in &INTERVIEW_ANSWERS {
        writeln!(out, "\nQ: {}", item.question)?;
        writeln!(out, "A:\n{}", item.answer)?;
        writeln!(out, "{rule}")?;
    }
    Ok(())
}

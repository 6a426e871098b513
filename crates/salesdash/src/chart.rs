//! PNG charts drawn from the query results.
//!
//! Two artifacts per run:
//! - a 2x2 dashboard: top products (horizontal bars), category share (pie),
//!   rep revenue (bars), and daily revenue with a least-squares trend line
//! - a single bar chart of the top eight products
//!
//! Both files are overwritten if they already exist.

use std::f64::consts::{FRAC_PI_2, TAU};
use std::fmt::Display;
use std::path::Path;
use std::sync::OnceLock;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::register_font;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::info;

use crate::query::{CategorySummary, DailySummary, ProductSummary, RepSummary, SalesQueryResults};
use crate::table::dollars;
use crate::trend::fit_line;
use crate::{SalesError, SalesResult};

pub const DASHBOARD_SIZE: (u32, u32) = (1500, 1200);
pub const TOP_PRODUCTS_SIZE: (u32, u32) = (1000, 600);

/// Bars shown in the dashboard's product panel.
pub const DASHBOARD_PRODUCTS: usize = 10;
/// Bars shown in the standalone product chart.
pub const TOP_PRODUCTS: usize = 8;

const FONT: &str = "sans-serif";
/// DejaVu Sans (Bitstream Vera license, see `assets/DejaVuSans.LICENSE`).
static SANS_SERIF_TTF: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");
static FONTS_REGISTERED: OnceLock<bool> = OnceLock::new();

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const LIGHT_GREEN: RGBColor = RGBColor(144, 238, 144);
const STEEL_BLUE: RGBColor = RGBColor(70, 130, 180);
const TREND_RED: RGBColor = RGBColor(214, 39, 40);

/// Folds any plotters error into [`SalesError::Chart`].
trait ChartResultExt<T> {
    fn chart(self) -> SalesResult<T>;
}

impl<T, E: Display> ChartResultExt<T> for Result<T, E> {
    fn chart(self) -> SalesResult<T> {
        self.map_err(|err| SalesError::Chart(err.to_string()))
    }
}

/// Register the embedded face under [`FONT`]. Every text element resolves
/// through this table, so it must run before any chart is drawn.
pub fn register_fonts() -> SalesResult<()> {
    let registered = *FONTS_REGISTERED
        .get_or_init(|| register_font(FONT, FontStyle::Normal, SANS_SERIF_TTF).is_ok());
    if registered {
        Ok(())
    } else {
        Err(SalesError::Chart("embedded font could not be parsed".to_owned()))
    }
}

/// Upper bound for a value axis: leaves headroom for the value labels and
/// never collapses to an empty range.
fn axis_max(values: impl Iterator<Item = f64>) -> f64 {
    let max = values.fold(0.0_f64, f64::max);
    if max > 0.0 { max * 1.15 } else { 1.0 }
}

/// Name of the bar occupying slot `floor(pos)`, or blank between slots.
fn slot_label(names: &[&str], pos: f64) -> String {
    if pos < 0.0 {
        return String::new();
    }
    names
        .get(pos.floor() as usize)
        .map_or_else(String::new, |name| (*name).to_owned())
}

fn centered_label() -> TextStyle<'static> {
    TextStyle::from((FONT, 12).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom))
}

pub fn render_dashboard(results: &SalesQueryResults, path: &Path) -> SalesResult<()> {
    register_fonts()?;
    let root = BitMapBackend::new(path, DASHBOARD_SIZE).into_drawing_area();
    root.fill(&WHITE).chart()?;
    let body = root
        .titled("Sales Analysis Dashboard - SQLite + Rust", (FONT, 32).into_font())
        .chart()?;
    let panels = body.split_evenly((2, 2));

    draw_product_bars(&panels[0], &results.products)?;
    draw_category_pie(&panels[1], &results.categories)?;
    draw_rep_bars(&panels[2], &results.reps)?;
    draw_daily_trend(&panels[3], &results.daily)?;

    root.present().chart()?;
    info!(path = %path.display(), "dashboard written");
    Ok(())
}

pub fn render_top_products(results: &SalesQueryResults, path: &Path) -> SalesResult<()> {
    register_fonts()?;
    let root = BitMapBackend::new(path, TOP_PRODUCTS_SIZE).into_drawing_area();
    root.fill(&WHITE).chart()?;

    let top: Vec<&ProductSummary> = results.products.iter().take(TOP_PRODUCTS).collect();
    let names: Vec<&str> = top.iter().map(|p| p.product.as_str()).collect();
    let y_max = axis_max(top.iter().map(|p| p.revenue));

    let mut chart = ChartBuilder::on(&root)
        .caption(
            "Sales Revenue by Product - Simple Bar Chart",
            (FONT, 24).into_font(),
        )
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..top.len().max(1) as f64, 0f64..y_max)
        .chart()?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(top.len().max(1))
        .x_label_formatter(&|x| slot_label(&names, *x))
        .x_desc("Product")
        .y_desc("Revenue ($)")
        .draw()
        .chart()?;

    chart
        .draw_series(top.iter().enumerate().map(|(i, p)| {
            let x = i as f64;
            Rectangle::new([(x + 0.1, 0.0), (x + 0.9, p.revenue)], STEEL_BLUE.filled())
        }))
        .chart()?;
    chart
        .draw_series(top.iter().enumerate().map(|(i, p)| {
            Text::new(
                dollars(p.revenue),
                (i as f64 + 0.5, p.revenue),
                centered_label(),
            )
        }))
        .chart()?;

    root.present().chart()?;
    info!(path = %path.display(), bars = top.len(), "top products chart written");
    Ok(())
}

fn draw_product_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    products: &[ProductSummary],
) -> SalesResult<()> {
    let top: Vec<&ProductSummary> = products.iter().take(DASHBOARD_PRODUCTS).collect();
    // Highest revenue at the top of the panel.
    let names: Vec<&str> = top.iter().rev().map(|p| p.product.as_str()).collect();
    let slots = top.len().max(1);
    let x_max = axis_max(top.iter().map(|p| p.revenue));

    let mut chart = ChartBuilder::on(area)
        .caption("Top 10 Products by Revenue", (FONT, 20).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(100)
        .build_cartesian_2d(0f64..x_max, 0f64..slots as f64)
        .chart()?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(slots)
        .y_label_formatter(&|y| slot_label(&names, *y))
        .x_desc("Revenue ($)")
        .draw()
        .chart()?;

    let n = top.len();
    chart
        .draw_series(top.iter().enumerate().map(|(i, p)| {
            let y = (n - 1 - i) as f64;
            Rectangle::new([(0.0, y + 0.15), (p.revenue, y + 0.85)], SKY_BLUE.filled())
        }))
        .chart()?;
    chart
        .draw_series(top.iter().enumerate().map(|(i, p)| {
            let y = (n - 1 - i) as f64;
            Text::new(
                format!(" {}", dollars(p.revenue)),
                (p.revenue, y + 0.5),
                TextStyle::from((FONT, 11).into_font()).pos(Pos::new(HPos::Left, VPos::Center)),
            )
        }))
        .chart()?;
    Ok(())
}

/// Pixel outline of one pie wedge, starting and ending at the centre.
fn wedge(center: (i32, i32), radius: f64, start: f64, sweep: f64) -> Vec<(i32, i32)> {
    let steps = ((sweep.abs() / TAU) * 120.0).ceil().max(2.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push(center);
    for step in 0..=steps {
        let angle = sweep.mul_add(step as f64 / steps as f64, start);
        points.push(polar(center, radius, angle));
    }
    points.push(center);
    points
}

/// Counter-clockwise angle, screen coordinates (y grows downward).
fn polar(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 - (radius * angle.sin()).round() as i32,
    )
}

fn draw_category_pie<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    categories: &[CategorySummary],
) -> SalesResult<()> {
    let body = area
        .titled("Revenue Distribution by Category", (FONT, 20).into_font())
        .chart()?;
    let total: f64 = categories.iter().map(|c| c.revenue.max(0.0)).sum();
    if total <= 0.0 {
        return Ok(());
    }

    let (width, height) = body.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);
    let radius = f64::from(width.min(height)) * 0.35;

    // Twelve o'clock, sweeping counter-clockwise.
    let mut start = FRAC_PI_2;
    for (idx, category) in categories.iter().enumerate() {
        let share = category.revenue.max(0.0) / total;
        let sweep = share * TAU;
        let color = Palette99::pick(idx);
        body.draw(&Polygon::new(wedge(center, radius, start, sweep), color.filled()))
            .chart()?;

        let mid = sweep.mul_add(0.5, start);
        let centered = TextStyle::from((FONT, 14).into_font()).pos(Pos::new(HPos::Center, VPos::Center));
        body.draw(&Text::new(
            format!("{:.1}%", share * 100.0),
            polar(center, radius * 0.6, mid),
            centered.clone(),
        ))
        .chart()?;
        body.draw(&Text::new(
            category.category.clone(),
            polar(center, radius * 1.18, mid),
            centered,
        ))
        .chart()?;
        start += sweep;
    }
    Ok(())
}

fn draw_rep_bars<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    reps: &[RepSummary],
) -> SalesResult<()> {
    let names: Vec<&str> = reps.iter().map(|r| r.sales_rep.as_str()).collect();
    let slots = reps.len().max(1);
    let y_max = axis_max(reps.iter().map(|r| r.total_revenue));

    let mut chart = ChartBuilder::on(area)
        .caption("Sales Representative Performance", (FONT, 20).into_font())
        .margin(10)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0f64..slots as f64, 0f64..y_max)
        .chart()?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(slots)
        .x_label_formatter(&|x| slot_label(&names, *x))
        .x_desc("Sales Representative")
        .y_desc("Total Revenue ($)")
        .draw()
        .chart()?;

    chart
        .draw_series(reps.iter().enumerate().map(|(i, r)| {
            let x = i as f64;
            Rectangle::new(
                [(x + 0.2, 0.0), (x + 0.8, r.total_revenue)],
                LIGHT_GREEN.filled(),
            )
        }))
        .chart()?;
    chart
        .draw_series(reps.iter().enumerate().map(|(i, r)| {
            Text::new(
                dollars(r.total_revenue),
                (i as f64 + 0.5, r.total_revenue),
                centered_label(),
            )
        }))
        .chart()?;
    Ok(())
}

/// Split a straight line into `dashes` visible segments with equal gaps.
fn dashes(from: (f64, f64), to: (f64, f64), count: usize) -> Vec<Vec<(f64, f64)>> {
    let count = count.max(1);
    let pieces = count * 2 - 1;
    let lerp = |t: f64| ((to.0 - from.0).mul_add(t, from.0), (to.1 - from.1).mul_add(t, from.1));
    (0..count)
        .map(|d| {
            let t0 = (2 * d) as f64 / pieces as f64;
            let t1 = (2 * d + 1) as f64 / pieces as f64;
            vec![lerp(t0), lerp(t1)]
        })
        .collect()
}

fn draw_daily_trend<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    daily: &[DailySummary],
) -> SalesResult<()> {
    let revenues: Vec<f64> = daily.iter().map(|d| d.daily_revenue).collect();
    let last_x = revenues.len().saturating_sub(1) as f64;
    let y_max = axis_max(revenues.iter().copied());

    let mut chart = ChartBuilder::on(area)
        .caption("Daily Sales Trend", (FONT, 20).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(-0.5f64..last_x + 0.5, 0f64..y_max)
        .chart()?;

    chart
        .configure_mesh()
        .x_desc("Days")
        .y_desc("Daily Revenue ($)")
        .draw()
        .chart()?;

    let points: Vec<(f64, f64)> = revenues
        .iter()
        .enumerate()
        .map(|(i, y)| (i as f64, *y))
        .collect();
    chart
        .draw_series(std::iter::once(PathElement::new(
            points.clone(),
            BLUE.stroke_width(2),
        )))
        .chart()?
        .label("Daily revenue")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE.stroke_width(2)));
    chart
        .draw_series(points.iter().map(|p| Circle::new(*p, 4, BLUE.filled())))
        .chart()?;

    if let Some(fit) = fit_line(&revenues) {
        let segments = dashes((0.0, fit.at(0.0)), (last_x, fit.at(last_x)), 24);
        chart
            .draw_series(
                segments
                    .into_iter()
                    .map(|seg| PathElement::new(seg, TREND_RED.mix(0.8).stroke_width(1))),
            )
            .chart()?
            .label("Trend")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], TREND_RED.stroke_width(1)));
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .chart()?;
    Ok(())
}

//! Visualization utilities: render the chart views to **SVG** or **PNG**.
//!
//! - Time series and year-over-year change as multi-series line charts
//! - Per-country averages as a bar chart
//! - Fixed per-country colors, locale-aware tick labels
//! - Missing years leave gaps instead of being interpolated

mod bar;
mod line;
pub mod types;
pub mod util;

pub use types::{ChartOptions, DEFAULT_HEIGHT, DEFAULT_WIDTH, ImageFormat};

use crate::format::format_number;
use crate::models::{FilterState, UNIT};
use crate::projection::{AggregateResult, CountryDeltas, CountrySeries};
use crate::view::{Projection, ViewMode};
use anyhow::{Result, anyhow, bail};
use bar::BarChart;
use line::{LineChart, LineData};
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;
use std::path::Path;
use std::sync::Once;
use util::country_color;

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        if plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        )
        .is_err()
        {
            log::warn!("bundled font could not be registered; chart text may fail to render");
        }
    });
}

/// A chart that can draw itself onto any Plotters backend.
trait ChartDraw {
    fn draw<DB: DrawingBackend>(&self, root: DrawingArea<DB, Shift>) -> Result<()>;
}

fn render_to_file<C: ChartDraw>(chart: &C, out_path: &Path, width: u32, height: u32) -> Result<()> {
    let format = out_path
        .extension()
        .and_then(|s| s.to_str())
        .and_then(ImageFormat::from_extension)
        .ok_or_else(|| {
            anyhow!(
                "unsupported chart format for {} (use .svg or .png)",
                out_path.display()
            )
        })?;
    ensure_fonts_registered();
    let path_string = out_path.to_string_lossy().into_owned();
    match format {
        ImageFormat::Svg => {
            let root = SVGBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
            chart.draw(root)
        }
        ImageFormat::Png => {
            let root = BitMapBackend::new(path_string.as_str(), (width, height)).into_drawing_area();
            chart.draw(root)
        }
    }
}

/// Emissions over time, one line per country.
pub fn plot_time_series<P: AsRef<Path>>(
    series: &[CountrySeries],
    filter: &FilterState,
    out_path: P,
    opts: &ChartOptions,
) -> Result<()> {
    let range = filter.range();
    let chart = LineChart {
        title: opts
            .title
            .clone()
            .unwrap_or_else(|| ViewMode::Chart.title(range)),
        y_desc: format!("Emissions ({UNIT})"),
        years: (range.start(), range.end()),
        lines: series
            .iter()
            .map(|s| LineData {
                label: s.country.code().to_string(),
                color: country_color(s.country),
                points: s.points.iter().map(|p| (p.year, p.value)).collect(),
            })
            .collect(),
        locale: opts.locale.clone(),
        zero_line: false,
    };
    render_to_file(&chart, out_path.as_ref(), opts.width, opts.height)
}

/// Year-over-year change, one line per country, starting at `start + 1`.
pub fn plot_year_over_year<P: AsRef<Path>>(
    deltas: &[CountryDeltas],
    filter: &FilterState,
    out_path: P,
    opts: &ChartOptions,
) -> Result<()> {
    let range = filter.range();
    let first = if range.is_single_year() {
        range.start()
    } else {
        range.start() + 1
    };
    let chart = LineChart {
        title: opts
            .title
            .clone()
            .unwrap_or_else(|| ViewMode::Yoy.title(range)),
        y_desc: format!("YoY Emissions Change ({UNIT})"),
        years: (first, range.end()),
        lines: deltas
            .iter()
            .map(|d| LineData {
                label: format!("{} (YoY Diff)", d.country.code()),
                color: country_color(d.country),
                points: d.points.iter().map(|p| (p.year, p.delta)).collect(),
            })
            .collect(),
        locale: opts.locale.clone(),
        zero_line: true,
    };
    render_to_file(&chart, out_path.as_ref(), opts.width, opts.height)
}

/// Average emissions per country over the filter range.
pub fn plot_aggregates<P: AsRef<Path>>(
    results: &[AggregateResult],
    filter: &FilterState,
    out_path: P,
    opts: &ChartOptions,
) -> Result<()> {
    if results.is_empty() {
        bail!("no countries to plot");
    }
    let chart = BarChart {
        title: opts
            .title
            .clone()
            .unwrap_or_else(|| ViewMode::Aggregated.title(filter.range())),
        y_desc: format!("Avg Emissions ({UNIT})"),
        bars: results
            .iter()
            .map(|r| bar::BarData {
                label: r.country.code().to_string(),
                color: country_color(r.country),
                value: r.mean,
                annotation: if r.has_data() {
                    format_number(r.mean, &opts.locale)
                } else {
                    "No Data / 0".to_string()
                },
            })
            .collect(),
        locale: opts.locale.clone(),
    };
    render_to_file(&chart, out_path.as_ref(), opts.width, opts.height)
}

/// Render whichever chart view `projection` holds. The table view has no chart.
pub fn plot_projection<P: AsRef<Path>>(
    projection: &Projection,
    filter: &FilterState,
    out_path: P,
    opts: &ChartOptions,
) -> Result<()> {
    match projection {
        Projection::Chart(series) => plot_time_series(series, filter, out_path, opts),
        Projection::Yoy(deltas) => plot_year_over_year(deltas, filter, out_path, opts),
        Projection::Aggregated(results) => plot_aggregates(results, filter, out_path, opts),
        Projection::Table(_) => bail!("the table view has no chart; export it as CSV or JSON"),
    }
}

//! Utility functions for visualization: colors, axis bounds, label sizing, gap handling.

use crate::format::format_number;
use crate::models::Country;
use plotters::prelude::*;

/// Series color for a country as a Plotters color.
#[inline]
pub fn country_color(country: Country) -> RGBAColor {
    let (r, g, b, a) = country.rgba();
    RGBAColor(r, g, b, a)
}

/// Heuristic: estimate pixel width of text (Plotters has no built-in text measuring).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Y-axis bounds covering `values`, padded by 5%.
///
/// `include_zero` anchors the axis at zero (bar charts). With no values the axis is `0..1`;
/// a flat series is widened by one unit each way.
pub fn value_bounds(values: impl IntoIterator<Item = f64>, include_zero: bool) -> (f64, f64) {
    let (mut lo, mut hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if lo > hi {
        return (0.0, 1.0);
    }
    if include_zero {
        lo = lo.min(0.0);
        hi = hi.max(0.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }
    let pad = (hi - lo) * 0.05;
    let lo = if include_zero && lo == 0.0 { 0.0 } else { lo - pad };
    let hi = if include_zero && hi == 0.0 { 0.0 } else { hi + pad };
    (lo, hi)
}

/// Year axis bounds; a single year gets one year of room on each side.
pub fn year_bounds(start: i32, end: i32) -> (f64, f64) {
    if start == end {
        (start as f64 - 1.0, end as f64 + 1.0)
    } else {
        (start as f64, end as f64)
    }
}

/// Width of the left label area: tick labels at both ends of the axis plus the axis title.
///
/// Clamped to a sensible range to avoid extremes.
pub fn left_label_area_px(lo: f64, hi: f64, locale: &str, font_px: u32) -> u32 {
    let widest = [lo, hi, (lo + hi) / 2.0]
        .iter()
        .map(|v| estimate_text_width_px(&format_number(*v, locale), font_px))
        .max()
        .unwrap_or(0);
    // tick marks plus room for the rotated axis description
    widest.saturating_add(40).clamp(56, 160)
}

/// Split year-ordered points into runs of consecutive present values.
///
/// Absent values break the line, so each run is drawn as its own segment.
pub fn contiguous_runs(points: &[(i32, Option<f64>)]) -> Vec<Vec<(f64, f64)>> {
    let mut runs: Vec<Vec<(f64, f64)>> = Vec::new();
    let mut cur: Vec<(f64, f64)> = Vec::new();
    for (year, value) in points {
        match value {
            Some(v) => cur.push((*year as f64, *v)),
            None if !cur.is_empty() => runs.push(std::mem::take(&mut cur)),
            None => {}
        }
    }
    if !cur.is_empty() {
        runs.push(cur);
    }
    runs
}

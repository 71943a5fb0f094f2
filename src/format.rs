//! Locale-aware number formatting and plain-text rendering of projections.

use crate::models::UNIT;
use crate::view::Projection;
use num_format::{Locale, ToFormattedString};
use std::fmt::Write as _;

/// Shown wherever a value is absent.
pub const NO_DATA: &str = "No Data";

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Format with thousands separators and up to two decimals, trailing zeros trimmed.
pub fn format_number(v: f64, locale_tag: &str) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    let (locale, dec_sep) = map_locale(locale_tag);
    let cents = (v.abs() * 100.0).round() as i64;
    let (whole, frac) = (cents / 100, cents % 100);
    let sign = if v < 0.0 && cents != 0 { "-" } else { "" };
    let mut s = format!("{sign}{}", whole.to_formatted_string(locale));
    if frac != 0 {
        let digits = format!("{frac:02}");
        s.push(dec_sep);
        s.push_str(digits.trim_end_matches('0'));
    }
    s
}

/// Like [`format_number`] with an explicit `+` for positive changes.
pub fn format_signed(v: f64, locale_tag: &str) -> String {
    let s = format_number(v, locale_tag);
    if v > 0.0 && !s.starts_with('-') && s != "0" {
        format!("+{s}")
    } else {
        s
    }
}

pub fn format_value(v: Option<f64>, locale_tag: &str) -> String {
    match v {
        Some(x) => format_number(x, locale_tag),
        None => NO_DATA.to_string(),
    }
}

/// Render a projection as aligned plain text (one line per row).
pub fn render_text(projection: &Projection, locale_tag: &str) -> String {
    let mut out = String::new();
    match projection {
        Projection::Chart(series) => {
            let _ = write!(out, "{:<6}", "Year");
            for s in series {
                let _ = write!(out, "{:>14}", s.country.code());
            }
            out.push('\n');
            let years = series.first().map(|s| s.points.len()).unwrap_or(0);
            for i in 0..years {
                let _ = write!(out, "{:<6}", series[0].points[i].year);
                for s in series {
                    let _ = write!(out, "{:>14}", format_value(s.points[i].value, locale_tag));
                }
                out.push('\n');
            }
        }
        Projection::Yoy(deltas) => {
            let _ = write!(out, "{:<6}", "Year");
            for d in deltas {
                let _ = write!(out, "{:>14}", d.country.code());
            }
            out.push('\n');
            let years = deltas.first().map(|d| d.points.len()).unwrap_or(0);
            for i in 0..years {
                let _ = write!(out, "{:<6}", deltas[0].points[i].year);
                for d in deltas {
                    let cell = match d.points[i].delta {
                        Some(v) => format_signed(v, locale_tag),
                        None => NO_DATA.to_string(),
                    };
                    let _ = write!(out, "{cell:>14}");
                }
                out.push('\n');
            }
        }
        Projection::Aggregated(results) => {
            for r in results {
                let mean = if r.has_data() {
                    format!("{} {UNIT} (avg)", format_number(r.mean, locale_tag))
                } else {
                    "No Data / 0".to_string()
                };
                let _ = writeln!(
                    out,
                    "{:<4} {mean:<28} samples={}",
                    r.country.code(),
                    r.sample_count
                );
            }
        }
        Projection::Table(rows) => {
            let _ = writeln!(out, "{:<8}{:<6}Emissions ({UNIT})", "Country", "Year");
            for r in rows {
                let _ = writeln!(
                    out,
                    "{:<8}{:<6}{}",
                    r.country,
                    r.year,
                    format_value(r.value, locale_tag)
                );
            }
            if rows.is_empty() {
                out.push_str("No data for selected countries.\n");
            }
        }
    }
    out
}

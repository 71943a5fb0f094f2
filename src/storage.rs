use crate::models::Observation;
use crate::view::Projection;
use anyhow::{Context, Result, bail};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save table rows as CSV with header `country,year,value`.
pub fn save_csv<P: AsRef<Path>>(rows: &[Observation], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize(("country", "year", "value"))?;
    for r in rows {
        wtr.serialize((&r.country, r.year, r.value))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save anything serializable as pretty JSON.
pub fn save_json<T: Serialize + ?Sized, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(value)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Save a projection as CSV, one row per cell of the view.
///
/// Columns: chart `country,year,value`; yoy `country,year,delta`;
/// aggregated `country,mean,sample_count`; table `country,year,value`.
pub fn save_projection_csv<P: AsRef<Path>>(projection: &Projection, path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    match projection {
        Projection::Chart(series) => {
            wtr.serialize(("country", "year", "value"))?;
            for s in series {
                for p in &s.points {
                    wtr.serialize((s.country.code(), p.year, p.value))?;
                }
            }
        }
        Projection::Yoy(deltas) => {
            wtr.serialize(("country", "year", "delta"))?;
            for d in deltas {
                for p in &d.points {
                    wtr.serialize((d.country.code(), p.year, p.delta))?;
                }
            }
        }
        Projection::Aggregated(results) => {
            wtr.serialize(("country", "mean", "sample_count"))?;
            for r in results {
                wtr.serialize((r.country.code(), r.mean, r.sample_count))?;
            }
        }
        Projection::Table(rows) => {
            wtr.serialize(("country", "year", "value"))?;
            for r in rows {
                wtr.serialize((&r.country, r.year, r.value))?;
            }
        }
    }
    wtr.flush()?;
    Ok(())
}

/// Save a projection, choosing CSV or JSON from the file extension.
pub fn save_projection<P: AsRef<Path>>(projection: &Projection, path: P) -> Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("csv")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => save_projection_csv(projection, path),
        "json" => save_json(projection, path),
        other => bail!("unsupported format: {}", other),
    }
    .with_context(|| format!("write {}", path.display()))
}

use super::index::ObservationIndex;
use crate::models::{Country, Observation, YearRange};
use serde::{Deserialize, Serialize};

/// One year slot of a time series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: Option<f64>,
}

/// Year-aligned values for one country.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySeries {
    pub country: Country,
    pub points: Vec<SeriesPoint>,
}

impl CountrySeries {
    /// Values only, in year order.
    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }
}

/// Align observations into one slot per year for every country, in caller order.
///
/// Each sequence has exactly `range.len()` slots in ascending year order; years without
/// an observation (or with a null value) are `None`.
pub fn time_series(
    observations: &[Observation],
    countries: &[Country],
    range: YearRange,
) -> Vec<CountrySeries> {
    let index = ObservationIndex::build(observations);
    countries
        .iter()
        .map(|&country| series_for(&index, country, range))
        .collect()
}

pub(crate) fn series_for(index: &ObservationIndex<'_>, country: Country, range: YearRange) -> CountrySeries {
    let points = range
        .years()
        .map(|year| SeriesPoint {
            year,
            value: index.get(country, year),
        })
        .collect();
    CountrySeries { country, points }
}

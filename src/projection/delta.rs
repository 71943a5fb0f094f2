use super::index::ObservationIndex;
use super::series::series_for;
use crate::models::{Country, Observation, YearRange};
use serde::{Deserialize, Serialize};

/// Change versus the previous year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaPoint {
    pub year: i32,
    pub delta: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryDeltas {
    pub country: Country,
    pub points: Vec<DeltaPoint>,
}

/// Year-over-year differences for `start+1..=end`, per country in caller order.
///
/// Each sequence has `range.len() - 1` points; a delta is absent unless both the year
/// and its predecessor have a value. A single-year range yields empty sequences.
pub fn year_over_year(
    observations: &[Observation],
    countries: &[Country],
    range: YearRange,
) -> Vec<CountryDeltas> {
    let index = ObservationIndex::build(observations);
    countries
        .iter()
        .map(|&country| {
            let series = series_for(&index, country, range);
            let points = series
                .points
                .windows(2)
                .map(|w| DeltaPoint {
                    year: w[1].year,
                    delta: match (w[0].value, w[1].value) {
                        (Some(prev), Some(cur)) => Some(cur - prev),
                        _ => None,
                    },
                })
                .collect();
            CountryDeltas { country, points }
        })
        .collect()
}

use super::index::ObservationIndex;
use crate::models::{Country, Observation, YearRange};
use serde::{Deserialize, Serialize};

/// Average of the available values for one country over a range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AggregateResult {
    pub country: Country,
    /// `0.0` when `sample_count == 0`.
    pub mean: f64,
    pub sample_count: usize,
}

impl AggregateResult {
    /// Distinguishes "no data" from a genuine zero mean.
    pub fn has_data(&self) -> bool {
        self.sample_count > 0
    }
}

/// Compute the arithmetic mean of non-absent values in `range` for every country.
///
/// Countries without data keep their slot with `mean = 0.0, sample_count = 0`.
/// Duplicate (country, year) observations count once (first wins).
pub fn aggregate_range(
    observations: &[Observation],
    countries: &[Country],
    range: YearRange,
) -> Vec<AggregateResult> {
    let index = ObservationIndex::build(observations);
    countries
        .iter()
        .map(|&country| {
            let (sum, count) = range
                .years()
                .filter_map(|year| index.get(country, year))
                .fold((0.0f64, 0usize), |(s, n), v| (s + v, n + 1));
            let mean = if count > 0 { sum / count as f64 } else { 0.0 };
            AggregateResult {
                country,
                mean,
                sample_count: count,
            }
        })
        .collect()
}

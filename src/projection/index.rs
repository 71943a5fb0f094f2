//! Direct (country, year) lookup over a flat observation list.

use crate::models::{Country, Observation};
use ahash::AHashMap;

/// Observations keyed by (ISO3 code, year). The first observation for a key wins.
#[derive(Debug, Clone, Default)]
pub struct ObservationIndex<'a> {
    values: AHashMap<(&'a str, i32), Option<f64>>,
}

impl<'a> ObservationIndex<'a> {
    pub fn build(observations: &'a [Observation]) -> Self {
        let mut values = AHashMap::with_capacity(observations.len());
        for o in observations {
            values.entry((o.country.as_str(), o.year)).or_insert(o.value);
        }
        Self { values }
    }

    /// Value for (country, year); absent when there is no observation or its value is null.
    pub fn get(&self, country: Country, year: i32) -> Option<f64> {
        self.values
            .get(&(country.code(), year))
            .copied()
            .flatten()
    }
}

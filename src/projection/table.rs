use crate::models::{Country, Observation};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Column the table is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Country,
    #[default]
    Year,
    Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    /// Header marker for the active column.
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

/// Active sort column and direction. Defaults to year ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TableSort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl TableSort {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Header click: the active column flips direction, any other column starts ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == key {
            self.direction = self.direction.flipped();
        } else {
            self.key = key;
            self.direction = SortDirection::Asc;
        }
    }

    /// Arrow to show next to `key`'s header, if it is the active column.
    pub fn marker(&self, key: SortKey) -> &'static str {
        if self.key == key { self.direction.arrow() } else { "" }
    }

    /// Total order over rows. Absent values sort last in either direction.
    pub fn compare(&self, a: &Observation, b: &Observation) -> Ordering {
        let dir = |o: Ordering| match self.direction {
            SortDirection::Asc => o,
            SortDirection::Desc => o.reverse(),
        };
        match self.key {
            SortKey::Country => dir(a.country.cmp(&b.country)),
            SortKey::Year => dir(a.year.cmp(&b.year)),
            SortKey::Value => match (a.value, b.value) {
                (Some(x), Some(y)) => dir(x.total_cmp(&y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        }
    }
}

/// Rows for the selected countries, sorted stably by `sort`.
pub fn sorted_table(
    observations: &[Observation],
    countries: &[Country],
    sort: TableSort,
) -> Vec<Observation> {
    let mut rows: Vec<Observation> = observations
        .iter()
        .filter(|o| countries.iter().any(|&c| o.is_for(c)))
        .cloned()
        .collect();
    rows.sort_by(|a, b| sort.compare(a, b));
    rows
}

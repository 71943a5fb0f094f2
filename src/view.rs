//! View modes and the dispatch from a mode to the one projection it renders.

use crate::models::{FilterState, Observation, UNIT, YearRange};
use crate::projection::{
    self, AggregateResult, CountryDeltas, CountrySeries, TableSort,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Chart,
    Table,
    Aggregated,
    Yoy,
}

impl ViewMode {
    pub const ALL: [ViewMode; 4] = [
        ViewMode::Chart,
        ViewMode::Table,
        ViewMode::Aggregated,
        ViewMode::Yoy,
    ];

    pub fn button_label(self) -> &'static str {
        match self {
            ViewMode::Chart => "Chart View",
            ViewMode::Table => "Table View",
            ViewMode::Aggregated => "Aggregated View",
            ViewMode::Yoy => "YoY Change",
        }
    }

    /// Chart caption for this view.
    pub fn title(self, range: YearRange) -> String {
        match self {
            ViewMode::Chart => format!("Greenhouse Emissions Over Time ({UNIT})"),
            ViewMode::Table => format!("Greenhouse Emissions ({UNIT})"),
            ViewMode::Aggregated => format!(
                "Average Emissions by Country ({} - {})",
                range.start(),
                range.end()
            ),
            ViewMode::Yoy => format!("Year-Over-Year Emissions Change ({UNIT})"),
        }
    }

    /// Whether the view is drawn as a chart (everything but the table).
    pub fn is_chart(self) -> bool {
        !matches!(self, ViewMode::Table)
    }
}

/// Output of exactly one projector, tagged by the view that asked for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "view", content = "data", rename_all = "lowercase")]
pub enum Projection {
    Chart(Vec<CountrySeries>),
    Table(Vec<Observation>),
    Aggregated(Vec<AggregateResult>),
    Yoy(Vec<CountryDeltas>),
}

impl Projection {
    pub fn mode(&self) -> ViewMode {
        match self {
            Projection::Chart(_) => ViewMode::Chart,
            Projection::Table(_) => ViewMode::Table,
            Projection::Aggregated(_) => ViewMode::Aggregated,
            Projection::Yoy(_) => ViewMode::Yoy,
        }
    }
}

/// Compute only what `mode` displays. `table_sort` is ignored by the chart views.
pub fn project(
    mode: ViewMode,
    observations: &[Observation],
    filter: &FilterState,
    table_sort: TableSort,
) -> Projection {
    let countries = filter.countries();
    let range = filter.range();
    match mode {
        ViewMode::Chart => Projection::Chart(projection::time_series(observations, countries, range)),
        ViewMode::Table => {
            Projection::Table(projection::sorted_table(observations, countries, table_sort))
        }
        ViewMode::Aggregated => {
            Projection::Aggregated(projection::aggregate_range(observations, countries, range))
        }
        ViewMode::Yoy => Projection::Yoy(projection::year_over_year(observations, countries, range)),
    }
}

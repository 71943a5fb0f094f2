//! Pure projections from an observation list to the shapes each view renders.
//!
//! Every function here takes the observations, the countries in display order and
//! the year range explicitly. Nothing is cached between calls, so the same inputs
//! always give the same output.

pub mod aggregate;
pub mod delta;
pub mod index;
pub mod series;
pub mod table;

pub use aggregate::{AggregateResult, aggregate_range};
pub use delta::{CountryDeltas, DeltaPoint, year_over_year};
pub use index::ObservationIndex;
pub use series::{CountrySeries, SeriesPoint, time_series};
pub use table::{SortDirection, SortKey, TableSort, sorted_table};

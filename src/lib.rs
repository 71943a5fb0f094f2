//! ghg_dashboard
//!
//! Fetch World Bank greenhouse-gas emissions (`EN.GHG.ALL.MT.CE.AR5`, Mt CO2e) for a
//! fixed set of countries and derive the shapes a dashboard needs. Pairs with the
//! `ghg` CLI and the `ghg-gui` desktop dashboard.
//!
//! ### Features
//! - Single bulk fetch per filter change, with stale responses discarded
//! - Time-aligned series with explicit "no data" slots
//! - Per-country averages over a year range (with sample counts)
//! - Year-over-year deltas
//! - Filtered, sortable table rows (absent values always sort last)
//! - SVG/PNG charts and CSV/JSON export of any view
//!
//! ### Example
//! ```no_run
//! use ghg_dashboard::{Client, Country, FilterState, projection};
//!
//! let filter = FilterState::new(vec![Country::Usa, Country::Jpn], 2010, 2020)?;
//! let observations = Client::default().fetch(&filter)?;
//! let series = projection::time_series(&observations, filter.countries(), filter.range());
//! let averages = projection::aggregate_range(&observations, filter.countries(), filter.range());
//! println!("{:#?}\n{:#?}", series, averages);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod config;
pub mod format;
pub mod models;
pub mod projection;
pub mod storage;
pub mod store;
pub mod view;
pub mod viz;

pub use api::{Client, FetchError};
pub use config::Config;
pub use models::{Country, FilterState, Observation, YearRange};
pub use store::{LoadState, ObservationStore, RequestToken};
pub use view::{Projection, ViewMode};

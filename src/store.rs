//! The observation store: the single source of fetched rows for the current filter.
//!
//! Every filter change starts a new generation. Only a response carrying the latest
//! generation's [`RequestToken`] is applied, so a slow response for an old filter can
//! never replace the rows of a newer one.

use crate::api::FetchError;
use crate::models::{FilterState, Observation};
use chrono::{DateTime, Utc};
use log::{debug, warn};

/// What the dashboard should show, independent of how many rows there are.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No countries selected; nothing is fetched.
    #[default]
    NoSelection,
    Loading,
    /// Fetch failed; holds the user-facing message.
    Failed(String),
    /// Fetch succeeded with zero records.
    Empty,
    Populated,
}

/// Identifies one fetch. Carries the filter the fetch was started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestToken {
    generation: u64,
    filter: FilterState,
}

impl RequestToken {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }
}

#[derive(Debug, Clone, Default)]
pub struct ObservationStore {
    generation: u64,
    state: LoadState,
    observations: Vec<Observation>,
    /// Filter of the latest fetch; the rows always belong to it.
    filter: Option<FilterState>,
    fetched_at: Option<DateTime<Utc>>,
}

impl ObservationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Invalidate the current rows for a new filter.
    ///
    /// Returns the token to fetch with, or `None` when nothing is selected (the
    /// state becomes [`LoadState::NoSelection`]). Either way older tokens go stale.
    pub fn begin_fetch(&mut self, filter: &FilterState) -> Option<RequestToken> {
        self.generation += 1;
        self.observations.clear();
        self.fetched_at = None;
        self.filter = Some(filter.clone());
        if filter.is_empty() {
            self.state = LoadState::NoSelection;
            return None;
        }
        self.state = LoadState::Loading;
        debug!("fetch generation {} started", self.generation);
        Some(RequestToken {
            generation: self.generation,
            filter: filter.clone(),
        })
    }

    pub fn is_current(&self, token: &RequestToken) -> bool {
        token.generation == self.generation
    }

    /// Apply a fetch result. Returns `false` (and changes nothing) for a stale token.
    pub fn complete(
        &mut self,
        token: &RequestToken,
        result: Result<Vec<Observation>, FetchError>,
    ) -> bool {
        if !self.is_current(token) {
            debug!(
                "discarding stale response: generation {} (current {})",
                token.generation, self.generation
            );
            return false;
        }
        match result {
            Ok(rows) => {
                self.state = if rows.is_empty() {
                    LoadState::Empty
                } else {
                    LoadState::Populated
                };
                self.observations = rows;
                self.fetched_at = Some(Utc::now());
            }
            Err(err) => {
                warn!("fetch generation {} failed: {err}", token.generation);
                self.state = LoadState::Failed(err.user_message());
                self.observations.clear();
            }
        }
        true
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The filter the current state and rows were fetched for. Project with this one.
    pub fn filter(&self) -> Option<&FilterState> {
        self.filter.as_ref()
    }

    /// When the current rows arrived, if they did.
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }
}

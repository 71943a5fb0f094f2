/// Synchronous client for the emissions series of the **World Bank Indicators API (v2)**.
///
/// One filter change means one request: all selected countries are joined into a single
/// `country/{codes}/indicator/{id}` call with a large `per_page` cap, and the
/// `[metadata, records]` envelope is decoded into [`Observation`] rows.
///
/// ### Notes
/// - The API sometimes serializes `per_page` as a **string**; we accept both string/number.
/// - A `null` or missing records element means "no results" and is reported as
///   [`FetchError::NoResults`].
/// - Failures are not retried; the caller decides when to fetch again.
///
/// Typical usage:
/// ```no_run
/// # use ghg_dashboard::{Client, Country, FilterState};
/// let filter = FilterState::new(vec![Country::Fra], 2000, 2020)?;
/// let rows = Client::default().fetch(&filter)?;
/// # Ok::<(), anyhow::Error>(())
/// ```
use crate::config::Config;
use crate::models::{Entry, FilterState, Meta, Observation};
use log::{debug, info, warn};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Why a fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("request failed with HTTP {0}")]
    Status(StatusCode),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("world bank api error: {0}")]
    Api(String),
    #[error("no results found for the selected filters")]
    NoResults,
}

impl FetchError {
    /// The single message shown to users. Detail stays in `Display` for logs.
    pub fn user_message(&self) -> String {
        match self {
            // An API message replaces the records element, which reads as "no results".
            FetchError::NoResults | FetchError::Api(_) => {
                "No results found for the selected filters.".to_string()
            }
            _ => "Failed to fetch data from World Bank API".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    pub indicator: String,
    pub per_page: u32,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::from_config(&Config::default()).expect("reqwest client build")
    }
}

// Allow -, _, . unescaped in codes (common for indicator ids)
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc_join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .map(|s| percent_encoding::utf8_percent_encode(s.trim(), SAFE).to_string())
        .collect::<Vec<_>>()
        .join(";")
}

impl Client {
    pub fn from_config(cfg: &Config) -> Result<Self, FetchError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs)) // total request timeout
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("ghg_dashboard/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            indicator: cfg.indicator.clone(),
            per_page: cfg.per_page,
            http,
        })
    }

    /// URL of the single bulk request for `filter`.
    pub fn request_url(&self, filter: &FilterState) -> String {
        let country_spec = enc_join(filter.countries().iter().map(|c| c.code()));
        let indicator_spec = enc_join([self.indicator.as_str()]);
        format!(
            "{}/country/{}/indicator/{}?format=json&date={}&per_page={}",
            self.base_url,
            country_spec,
            indicator_spec,
            filter.range().to_query_param(),
            self.per_page
        )
    }

    /// Fetch all observations for `filter` in one request.
    ///
    /// An empty selection returns `Ok(vec![])` without touching the network.
    ///
    /// ### Errors
    /// - Network/transport error
    /// - Non-2xx HTTP status
    /// - Body that is not the `[metadata, records]` envelope, or an API error payload
    /// - [`FetchError::NoResults`] when the records element is missing or `null`
    pub fn fetch(&self, filter: &FilterState) -> Result<Vec<Observation>, FetchError> {
        if filter.is_empty() {
            return Ok(Vec::new());
        }
        let url = self.request_url(filter);
        debug!("GET {url}");

        let resp = self.http.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            warn!("GET {url} -> HTTP {status}");
            return Err(FetchError::Status(status));
        }
        let v: Value = resp
            .json()
            .map_err(|e| FetchError::Decode(format!("decode json: {e}")))?;

        let out = parse_envelope(&v)?;
        info!(
            "fetched {} observations for {} ({})",
            out.len(),
            filter.country_codes(),
            filter.range().to_query_param()
        );
        Ok(out)
    }
}

/// Decode the API envelope `[Meta, [Entry, ...]]` into observations, in response order.
pub fn parse_envelope(v: &Value) -> Result<Vec<Observation>, FetchError> {
    let arr = v
        .as_array()
        .ok_or_else(|| FetchError::Decode("not a top-level array".into()))?;
    let first = arr
        .first()
        .ok_or_else(|| FetchError::Decode("empty array".into()))?;

    // If first element has "message", surface API error.
    if first.get("message").is_some() {
        return Err(FetchError::Api(first.to_string()));
    }

    match serde_json::from_value::<Meta>(first.clone()) {
        Ok(meta) if meta.pages > 1 => warn!(
            "response holds page {} of {} ({} records in total); only this page is used",
            meta.page, meta.pages, meta.total
        ),
        Ok(_) => {}
        Err(e) => debug!("ignoring unparsable metadata: {e}"),
    }

    let records = match arr.get(1) {
        None | Some(Value::Null) => return Err(FetchError::NoResults),
        Some(r @ Value::Array(_)) => r,
        Some(other) => {
            return Err(FetchError::Decode(format!(
                "records element is not an array: {other}"
            )));
        }
    };

    let entries: Vec<Entry> = serde_json::from_value(records.clone())
        .map_err(|e| FetchError::Decode(format!("parse entries: {e}")))?;
    entries
        .into_iter()
        .map(|e| {
            let date = e.date.clone();
            Observation::try_from(e)
                .map_err(|err| FetchError::Decode(format!("invalid year {date:?}: {err}")))
        })
        .collect()
}

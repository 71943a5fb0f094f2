//! Runtime configuration: API endpoint, indicator, year bounds and defaults.
//!
//! Values come from (lowest to highest priority) the built-in defaults, an optional
//! JSON file, and command-line flags applied by the binaries. Unknown keys in the file
//! are rejected so typos surface early.

use crate::models::{Country, FilterState, INDICATOR};
use anyhow::{Context, Result, bail};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub base_url: String,
    pub indicator: String,
    /// Page-size cap of the single bulk request.
    pub per_page: u32,
    pub min_year: i32,
    pub max_year: i32,
    pub default_countries: Vec<Country>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Number formatting tag (`en`, `de`, ...).
    pub locale: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "https://api.worldbank.org/v2".into(),
            indicator: INDICATOR.into(),
            per_page: 2000,
            min_year: 1972,
            max_year: 2022,
            default_countries: Country::ALL.to_vec(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
            locale: "en".into(),
        }
    }
}

impl Config {
    /// `<config_dir>/ghg-dashboard/config.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("ghg-dashboard").join("config.json"))
    }

    /// Load from `path` if given (it must exist), else from [`Config::default_path`]
    /// when that file exists, else the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let cfg = match path {
            Some(p) => Self::from_json_file(p)?,
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(p) => Self::from_json_file(&p)?,
                None => Self::default(),
            },
        };
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let cfg: Config = serde_json::from_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        log::debug!("loaded config from {}", path.display());
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_year > self.max_year {
            bail!(
                "min_year ({}) must not be after max_year ({})",
                self.min_year,
                self.max_year
            );
        }
        if self.per_page == 0 {
            bail!("per_page must be at least 1");
        }
        let indicator_re = Regex::new(r"^[A-Za-z0-9_.]+$")?;
        if !indicator_re.is_match(&self.indicator) {
            bail!("invalid indicator code: {:?}", self.indicator);
        }
        if self.base_url.trim().is_empty() {
            bail!("base_url must not be empty");
        }
        Ok(())
    }

    /// The filter the dashboard starts with: default countries over the full bounds.
    pub fn default_filter(&self) -> Result<FilterState> {
        Ok(FilterState::new(
            self.default_countries.clone(),
            self.min_year,
            self.max_year,
        )?)
    }

    /// Clamp a year into the configured bounds.
    pub fn clamp_year(&self, year: i32) -> i32 {
        year.clamp(self.min_year, self.max_year)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;
use thiserror::Error;

/// World Bank indicator: total greenhouse-gas emissions excluding LULUCF (Mt CO2e).
pub const INDICATOR: &str = "EN.GHG.ALL.MT.CE.AR5";

/// Unit label used on axes and table headers.
pub const UNIT: &str = "Mt CO2e";

/// Errors raised while building a filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("start year {start} is after end year {end}")]
    InvertedRange { start: i32, end: i32 },
    #[error("unknown country code: {0:?}")]
    UnknownCountry(String),
}

/// The fixed set of countries the dashboard can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Country {
    Usa,
    Jpn,
    Chn,
    Ind,
    Fra,
    Bra,
}

/// Color for series whose country is not part of the fixed set.
pub const FALLBACK_RGBA: (u8, u8, u8, f64) = (0, 0, 0, 0.8);

impl Country {
    pub const ALL: [Country; 6] = [
        Country::Usa,
        Country::Jpn,
        Country::Chn,
        Country::Ind,
        Country::Fra,
        Country::Bra,
    ];

    /// ISO3 code as used by the API.
    pub fn code(self) -> &'static str {
        match self {
            Country::Usa => "USA",
            Country::Jpn => "JPN",
            Country::Chn => "CHN",
            Country::Ind => "IND",
            Country::Fra => "FRA",
            Country::Bra => "BRA",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Country::Usa => "United States",
            Country::Jpn => "Japan",
            Country::Chn => "China",
            Country::Ind => "India",
            Country::Fra => "France",
            Country::Bra => "Brazil",
        }
    }

    /// Series color as (r, g, b, alpha).
    pub fn rgba(self) -> (u8, u8, u8, f64) {
        match self {
            Country::Usa => (255, 99, 132, 0.8),
            Country::Jpn => (54, 162, 235, 0.8),
            Country::Chn => (255, 206, 86, 0.8),
            Country::Ind => (75, 192, 192, 0.8),
            Country::Fra => (153, 102, 255, 0.8),
            Country::Bra => (255, 159, 64, 0.8),
        }
    }

    /// Color for an arbitrary ISO3 code, falling back to [`FALLBACK_RGBA`].
    pub fn rgba_for_code(code: &str) -> (u8, u8, u8, f64) {
        code.parse::<Country>()
            .map(Country::rgba)
            .unwrap_or(FALLBACK_RGBA)
    }
}

impl fmt::Display for Country {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Country {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Country::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| FilterError::UnknownCountry(code.to_string()))
    }
}

/// Inclusive year range with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, FilterError> {
        if start > end {
            return Err(FilterError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    /// Number of years in the range (never zero).
    pub fn len(&self) -> usize {
        (i64::from(self.end) - i64::from(self.start) + 1) as usize
    }

    pub fn is_single_year(&self) -> bool {
        self.start == self.end
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }

    /// Query parameter form, e.g. `1990:2020`.
    pub fn to_query_param(&self) -> String {
        format!("{}:{}", self.start, self.end)
    }
}

/// User-chosen countries and year range. Drives both the fetch and every projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    countries: Vec<Country>,
    range: YearRange,
}

impl FilterState {
    /// Build a filter. Duplicate countries are dropped, keeping the first occurrence.
    pub fn new(countries: Vec<Country>, start_year: i32, end_year: i32) -> Result<Self, FilterError> {
        let range = YearRange::new(start_year, end_year)?;
        let mut unique = Vec::with_capacity(countries.len());
        for c in countries {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }
        Ok(Self {
            countries: unique,
            range,
        })
    }

    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    pub fn range(&self) -> YearRange {
        self.range
    }

    /// No countries selected: a valid "show nothing" state.
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    pub fn contains(&self, country: Country) -> bool {
        self.countries.contains(&country)
    }

    /// Select or deselect a country. Newly selected countries go to the end.
    pub fn toggle_country(&mut self, country: Country) {
        if let Some(pos) = self.countries.iter().position(|c| *c == country) {
            self.countries.remove(pos);
        } else {
            self.countries.push(country);
        }
    }

    pub fn set_countries(&mut self, countries: Vec<Country>) {
        self.countries.clear();
        for c in countries {
            if !self.contains(c) {
                self.countries.push(c);
            }
        }
    }

    /// Move the start year; the end year follows if it would fall behind.
    pub fn set_start_year(&mut self, year: i32) {
        let end = self.range.end.max(year);
        self.range = YearRange { start: year, end };
    }

    /// Move the end year; the start year follows if it would overtake it.
    pub fn set_end_year(&mut self, year: i32) {
        let start = self.range.start.min(year);
        self.range = YearRange { start, end: year };
    }

    /// Semicolon-joined ISO3 codes in selection order, e.g. `USA;JPN`.
    pub fn country_codes(&self) -> String {
        self.countries
            .iter()
            .map(|c| c.code())
            .collect::<Vec<_>>()
            .join(";")
    }
}

/// One (country, year, value-or-absent) data point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// ISO3 code as returned by the API.
    pub country: String,
    pub year: i32,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(country: impl Into<String>, year: i32, value: Option<f64>) -> Self {
        Self {
            country: country.into(),
            year,
            value,
        }
    }

    pub fn is_for(&self, country: Country) -> bool {
        self.country == country.code()
    }
}

/// Metadata section returned by the API (position 0).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meta {
    pub page: u32,
    pub pages: u32,
    /// Some responses encode `per_page` as a string, others as a number.
    #[serde(deserialize_with = "de_u32_from_string_or_number")]
    pub per_page: u32,
    pub total: u32,
}

/// Serde helper: parse `u32` from either a JSON number or a string.
fn de_u32_from_string_or_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct U32Visitor;

    impl<'de> Visitor<'de> for U32Visitor {
        type Value = u32;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a string or integer representing a non-negative number")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(E::custom)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u32::try_from(v).map_err(|_| E::custom("value out of range for u32"))
        }

        fn visit_str<E>(self, s: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            s.trim().parse::<u32>().map_err(E::custom)
        }
    }

    deserializer.deserialize_any(U32Visitor)
}

/// Raw record from the API (position 1 array). Other fields are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entry {
    pub countryiso3code: String,
    pub date: String,
    pub value: Option<f64>,
}

impl TryFrom<Entry> for Observation {
    type Error = std::num::ParseIntError;

    fn try_from(e: Entry) -> Result<Self, Self::Error> {
        let year = e.date.trim().parse::<i32>()?;
        Ok(Self {
            country: e.countryiso3code,
            year,
            value: e.value,
        })
    }
}

//! # Life Expectancy Table (LifeExpectancyTable)
//!
//! Immutable lookup of expected remaining years of life, keyed by country, gender and age band.
//!
//! This module provides the `LifeExpectancyTable` struct and related types:
//! - Country records (uppercase country codes) plus a reserved `global` record
//! - Gender selectors (`male`, `female`, `all`) per record
//! - Four fixed age bands (`0-19`, `20-39`, `40-59`, `60-79`, the last one open-ended)
//! - Remaining-years lookup with country/gender fallback to the global average
//!
//! ## Quick Start
//! ```rust
//! # use readlife::prelude::*;
//! let table = LifeExpectancyTable::new()
//!     .with_entry(
//!         "global",
//!         Gender::All,
//!         LifeExpectancyEntry::new(73.0).with_band(AgeBand::Age20To39, 47.0),
//!     )
//!     .with_entry(
//!         "us",
//!         Gender::Female,
//!         LifeExpectancyEntry::new(81.0).with_band(AgeBand::Age20To39, 52.0),
//!     );
//!
//! let years = table
//!     .remaining_years()
//!     .age(30.0)
//!     .country_code("US")
//!     .gender(Gender::Female)
//!     .call();
//! assert_eq!(years, 52.0);
//! # ReadLifeResult::Ok(())
//! ```
//!
//! ## See Also
//! - [`crate::le_table::le_data`] for loading tables from DataFrames and spreadsheets
//! - [`crate::reading_lifetime`] for the reading projection built on top of the lookup

pub mod le_data;
mod spreadsheet_helpers;

use self::le_data::LifeExpectancyData;
use crate::ReadLifeResult;
use crate::helpers::{is_global_key, normalize_country_code};
use bon::bon;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

/// Reserved table key holding the global average record.
pub const GLOBAL_KEY: &str = "global";

/// Expected age used when the table has no global average for an age band.
pub const DEFAULT_EXPECTED_AGE: f64 = 80.0;

// ===============================================
// GENDER
// ===============================================

/// Gender selector for a life expectancy record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Gender {
    Male,
    Female,
    /// Both genders combined - the record used when no gender matches.
    All,
}

impl Gender {
    pub const ALL_VARIANTS: [Gender; 3] = [Gender::Male, Gender::Female, Gender::All];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::All => "all",
        }
    }

    /// Parse a gender selector, treating anything unrecognized as "no gender context".
    pub fn parse_lenient(value: Option<&str>) -> Option<Gender> {
        value.and_then(|v| v.parse().ok())
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "all" => Ok(Gender::All),
            other => Err(format!(
                "Unknown gender '{other}', expected one of 'male', 'female', 'all'"
            )),
        }
    }
}

// ===============================================
// AGE BANDS
// ===============================================

/// Fixed age bands indexing remaining-years data.
///
/// Bands are half-open on the real line: `[0, 20)`, `[20, 40)`, `[40, 60)` and `[60, ∞)`.
/// Every age at or above 60 lands in [`AgeBand::Age60To79`], however large.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBand {
    Age0To19,
    Age20To39,
    Age40To59,
    /// Open-ended upward despite its label.
    Age60To79,
}

impl AgeBand {
    /// Bands in resolution order.
    pub const ALL: [AgeBand; 4] = [
        AgeBand::Age0To19,
        AgeBand::Age20To39,
        AgeBand::Age40To59,
        AgeBand::Age60To79,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AgeBand::Age0To19 => "0-19",
            AgeBand::Age20To39 => "20-39",
            AgeBand::Age40To59 => "40-59",
            AgeBand::Age60To79 => "60-79",
        }
    }

    /// Lower bound (inclusive) and upper bound (exclusive) of the band.
    pub fn bounds(&self) -> (f64, f64) {
        match self {
            AgeBand::Age0To19 => (0.0, 20.0),
            AgeBand::Age20To39 => (20.0, 40.0),
            AgeBand::Age40To59 => (40.0, 60.0),
            AgeBand::Age60To79 => (60.0, f64::INFINITY),
        }
    }

    /// Resolve the band of an age by testing the bands in order.
    ///
    /// Bands are half-open, so fractional ages stay in the lower band: 19.5 resolves to `0-19`.
    /// Ages that match no band (negative or NaN) default to the last band.
    pub fn from_age(age: f64) -> AgeBand {
        Self::ALL
            .into_iter()
            .find(|band| {
                let (min, max) = band.bounds();
                age >= min && age < max
            })
            .unwrap_or(AgeBand::Age60To79)
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AgeBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|band| band.label() == s)
            .ok_or_else(|| format!("Unknown age band '{s}'"))
    }
}

// ===============================================
// ENTRIES
// ===============================================

/// Life expectancy of one (country, gender) pair.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LifeExpectancyEntry {
    /// Expected lifespan at birth. Informational only, the estimator never reads it.
    pub at_birth: f64,

    /// Expected remaining years for each age band. Bands may be missing.
    pub remaining_years_by_age_band: BTreeMap<AgeBand, f64>,
}

impl LifeExpectancyEntry {
    pub fn new(at_birth: f64) -> Self {
        Self {
            at_birth,
            remaining_years_by_age_band: BTreeMap::new(),
        }
    }

    pub fn with_band(mut self, band: AgeBand, remaining_years: f64) -> Self {
        self.remaining_years_by_age_band
            .insert(band, remaining_years);
        self
    }

    /// Remaining years for a band, `None` when the band has no numeric value.
    pub fn remaining_years(&self, band: AgeBand) -> Option<f64> {
        self.remaining_years_by_age_band
            .get(&band)
            .copied()
            .filter(|years| !years.is_nan())
    }
}

type CountryRecord = HashMap<Gender, LifeExpectancyEntry>;

// ===============================================
// TABLE
// ===============================================

/// Read-only mapping of country code to per-gender life expectancy entries.
///
/// Country keys are stored trimmed and uppercase. The reserved [`GLOBAL_KEY`] record is kept
/// apart from the countries, so a user country code never resolves to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LifeExpectancyTable {
    global: CountryRecord,
    countries: HashMap<String, CountryRecord>,
}

#[bon]
impl LifeExpectancyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from validated life expectancy data, one entry per row.
    pub fn from_data(data: &LifeExpectancyData) -> ReadLifeResult<Self> {
        let mut table = Self::new();
        for (country, gender, entry) in data.entries()? {
            table.insert(&country, gender, entry);
        }

        log::info!(
            "Loaded life expectancy table '{}' with {} countries (global record: {})",
            data.description,
            table.countries.len(),
            table.has_global()
        );

        Ok(table)
    }

    /// Insert or replace an entry. `country` may be the reserved [`GLOBAL_KEY`].
    pub fn insert(&mut self, country: &str, gender: Gender, entry: LifeExpectancyEntry) {
        if is_global_key(country) {
            self.global.insert(gender, entry);
            return;
        }

        let Some(key) = normalize_country_code(Some(country)) else {
            log::debug!("Ignoring life expectancy entry with blank country code");
            return;
        };
        self.countries.entry(key).or_default().insert(gender, entry);
    }

    /// Consuming form of [`LifeExpectancyTable::insert`] for building tables inline.
    pub fn with_entry(mut self, country: &str, gender: Gender, entry: LifeExpectancyEntry) -> Self {
        self.insert(country, gender, entry);
        self
    }

    /// Per-gender entries of a country (or of the global record).
    pub fn get(&self, country: &str) -> Option<&HashMap<Gender, LifeExpectancyEntry>> {
        if is_global_key(country) {
            return (!self.global.is_empty()).then_some(&self.global);
        }
        let key = normalize_country_code(Some(country))?;
        self.countries.get(&key)
    }

    pub fn entry(&self, country: &str, gender: Gender) -> Option<&LifeExpectancyEntry> {
        self.get(country)?.get(&gender)
    }

    /// Country codes present in the table, sorted. The global record is not listed.
    pub fn countries(&self) -> Vec<&str> {
        let mut countries: Vec<&str> = self.countries.keys().map(String::as_str).collect();
        countries.sort_unstable();
        countries
    }

    /// Whether the global/all fallback entry exists.
    pub fn has_global(&self) -> bool {
        self.global.contains_key(&Gender::All)
    }

    /// Global average remaining years for the age band of `age`.
    ///
    /// Falls back to `max(80 - age, 0)` when the table has no global/all value for the band.
    pub fn global_remaining_years(&self, age: f64) -> f64 {
        let band = AgeBand::from_age(age);
        match self
            .global
            .get(&Gender::All)
            .and_then(|entry| entry.remaining_years(band))
        {
            Some(years) => years,
            None => {
                log::debug!("No global/all value for age band {band}, using default expected age");
                (DEFAULT_EXPECTED_AGE - age).max(0.0)
            }
        }
    }

    /// Expected remaining years of life for a person.
    ///
    /// Resolution order:
    /// 1. The country's gender-specific entry when a gender is given and present,
    ///    else the country's `all` entry, if it has a value for the age band
    /// 2. The global/all value for the age band
    /// 3. `max(80 - age, 0)`
    ///
    /// Country codes are trimmed and uppercased; blank codes mean no country context.
    ///
    /// # Example
    /// ```rust
    /// # use readlife::prelude::*;
    /// let table = LifeExpectancyTable::new().with_entry(
    ///     "global",
    ///     Gender::All,
    ///     LifeExpectancyEntry::new(73.0).with_band(AgeBand::Age60To79, 16.0),
    /// );
    /// // Unknown countries fall back to the global average
    /// let years = table.remaining_years().age(95.0).country_code("ZZ").call();
    /// assert_eq!(years, 16.0);
    /// # ReadLifeResult::Ok(())
    /// ```
    #[builder]
    pub fn remaining_years(
        &self,
        age: f64,
        country_code: Option<&str>,
        gender: Option<Gender>,
    ) -> f64 {
        let band = AgeBand::from_age(age);
        let fallback_years = self.global_remaining_years(age);

        let Some(country) = normalize_country_code(country_code) else {
            return fallback_years;
        };

        let Some(record) = self.countries.get(&country) else {
            log::debug!("Country '{country}' not in life expectancy table, using global average");
            return fallback_years;
        };

        let entry = gender
            .and_then(|g| record.get(&g))
            .or_else(|| record.get(&Gender::All));

        match entry.and_then(|e| e.remaining_years(band)) {
            Some(years) => years,
            None => {
                log::debug!("No value for {country} in age band {band}, using global average");
                fallback_years
            }
        }
    }
}

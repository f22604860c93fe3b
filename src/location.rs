// src/location.rs
//! Turn what the user typed as a location into a city and state.
//!
//! Accepted inputs, tried in this order:
//! - a US postal code (`10001` or `10001-1234`), looked up by its first five digits
//! - `City, ST` or `City, State Name`, restricted to that state
//! - a bare city name, which picks the most populous postal area of that name
//!
//! The database is a CSV with `zipcode,city,state,population` columns. One
//! ships inside the binary; `location_db` in the config file replaces it.

use std::{fs, path::Path};

use tracing::debug;

use crate::config::ConfigError;
use crate::core::sanitize::{normalize_ws, title_case};
use crate::csv::{detect_headers, parse_rows};
use crate::error::{Error, Result};
use crate::states;

const EMBEDDED_DB: &str = include_str!("../assets/postal_areas.csv");
const DB_HEADER: &[&str] = &["zipcode", "city", "state", "population"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Place {
    pub city: String,
    /// Two-letter code.
    pub state: String,
}

impl Place {
    fn is_complete(&self) -> bool {
        !self.city.is_empty() && !self.state.is_empty()
    }
}

#[derive(Clone, Debug)]
struct PostalArea {
    zipcode: String,
    city: String,
    state: String,
    population: u64,
}

impl PostalArea {
    fn place(&self) -> Place {
        Place { city: self.city.clone(), state: self.state.clone() }
    }
}

#[derive(Clone, Debug)]
pub struct LocationResolver {
    areas: Vec<PostalArea>,
}

impl LocationResolver {
    /// Resolver over the database compiled into the binary.
    pub fn embedded() -> Self {
        Self { areas: parse_db(EMBEDDED_DB) }
    }

    /// Resolver over a replacement database file.
    pub fn from_csv_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let areas = parse_db(&text);
        if areas.is_empty() {
            return Err(ConfigError::Invalid(format!("location database {} has no usable rows", path.display())).into());
        }
        Ok(Self { areas })
    }

    /// Embedded database unless a replacement is configured.
    pub fn load(db: Option<&Path>) -> Result<Self> {
        match db {
            Some(p) => Self::from_csv_file(p),
            None => Ok(Self::embedded()),
        }
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn resolve(&self, input: &str) -> Result<Place> {
        let input = normalize_ws(input);
        if input.is_empty() {
            return Err(Error::LocationNotFound(input));
        }

        let mut found = postal_code(&input).and_then(|zip| self.by_postal_code(zip));
        if !found.as_ref().is_some_and(Place::is_complete) {
            found = self.by_city(&input);
        }

        match found {
            Some(place) if place.is_complete() => {
                debug!(%input, city = %place.city, state = %place.state, "location resolved");
                Ok(place)
            }
            _ => Err(Error::LocationNotFound(input)),
        }
    }

    fn by_postal_code(&self, zip: &str) -> Option<Place> {
        self.areas.iter().find(|a| a.zipcode == zip).map(PostalArea::place)
    }

    /// City lookup, optionally narrowed by a `, State` suffix.
    fn by_city(&self, input: &str) -> Option<Place> {
        let (city, state_hint) = match input.rsplit_once(',') {
            Some((city, state)) => (city.trim(), states::code_for(state)),
            None => (input.trim(), None),
        };
        if city.is_empty() {
            return None;
        }

        let mut best: Option<&PostalArea> = None;
        for area in &self.areas {
            if !area.city.eq_ignore_ascii_case(city) {
                continue;
            }
            if state_hint.is_some_and(|st| st != area.state) {
                continue;
            }
            // Strictly greater: ties keep the earlier row.
            if best.is_none_or(|b| area.population > b.population) {
                best = Some(area);
            }
        }

        match (best, state_hint) {
            (Some(area), _) => Some(area.place()),
            // A valid state was named; trust the city even if the database lacks it.
            (None, Some(state)) => Some(Place { city: title_case(city), state: s!(state) }),
            (None, None) => None,
        }
    }
}

/// The five-digit code of `NNNNN` or `NNNNN-NNNN`.
fn postal_code(s: &str) -> Option<&str> {
    let (head, tail) = match s.split_once('-') {
        Some((h, t)) => (h, Some(t)),
        None => (s, None),
    };
    let digits = |p: &str, n: usize| p.len() == n && p.bytes().all(|b| b.is_ascii_digit());
    if !digits(head, 5) || tail.is_some_and(|t| !digits(t, 4)) {
        return None;
    }
    Some(head)
}

fn parse_db(text: &str) -> Vec<PostalArea> {
    let (_, rows) = detect_headers(parse_rows(text, ','), DB_HEADER);
    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.into_iter().enumerate() {
        let [zipcode, city, state, population] = match <[String; 4]>::try_from(row) {
            Ok(cells) => cells,
            Err(_) => {
                debug!(row = i, "location database: wrong column count, skipped");
                continue;
            }
        };
        let state = state.trim().to_ascii_uppercase();
        if !states::is_code(&state) {
            debug!(row = i, %state, "location database: unknown state, skipped");
            continue;
        }
        out.push(PostalArea {
            zipcode: zipcode.trim().to_string(),
            city: normalize_ws(&city),
            state,
            population: population.trim().parse().unwrap_or(0),
        });
    }
    out
}

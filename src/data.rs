// src/data.rs
//
// Core records passed between the scrapers, the pipeline and the store.
//
// - JobPosting: one listing. Normalized once in `new`, never mutated after.
// - SearchQuery: what to look for, after the location has been resolved.
// - DedupKey: what "same posting" means inside a single source.

use std::fmt;

use serde::Deserialize;

use crate::config::consts::{MAX_POSTINGS, MIN_POSTINGS, POSTINGS_PER_PAGE_UNIT};
use crate::core::sanitize::{normalize_location, normalize_ws};

/// One extracted listing. Equality and hashing cover all three fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
}

impl JobPosting {
    pub fn new(title: &str, company: &str, location: &str) -> Self {
        Self {
            title: normalize_ws(title),
            company: normalize_ws(company),
            location: normalize_location(location),
        }
    }

    /// Like `new`, but refuses a posting without a title.
    pub fn try_new(title: &str, company: &str, location: &str) -> Option<Self> {
        let p = Self::new(title, company, location);
        if p.title.is_empty() { None } else { Some(p) }
    }

    pub fn has_location(&self) -> bool {
        !self.location.is_empty()
    }

    /// Fields in file/display order.
    pub fn fields(&self) -> [&str; 3] {
        [&self.title, &self.company, &self.location]
    }
}

impl fmt::Display for JobPosting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.title, self.company)?;
        if self.has_location() {
            write!(f, " [{}]", self.location)?;
        }
        Ok(())
    }
}

/// Identity used when dropping repeats inside one source's results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DedupKey {
    /// Title, company and location must all match.
    #[default]
    FullRecord,
    /// Title and company only; two offices of one opening collapse to one.
    TitleCompany,
}

impl DedupKey {
    pub fn key_of(self, p: &JobPosting) -> (String, String, String) {
        match self {
            DedupKey::FullRecord => (p.title.clone(), p.company.clone(), p.location.clone()),
            DedupKey::TitleCompany => (p.title.clone(), p.company.clone(), s!()),
        }
    }
}

/// Immutable input to every source adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchQuery {
    pub title: String,
    pub city: String,
    pub state: String,
    pub keywords: Vec<String>,
    desired_postings: u32,
}

impl SearchQuery {
    pub fn new(title: &str, city: &str, state: &str, keywords: Vec<String>, desired_postings: u32) -> Self {
        Self {
            title: normalize_ws(title),
            city: normalize_ws(city),
            state: normalize_ws(state).to_ascii_uppercase(),
            keywords,
            desired_postings: desired_postings.clamp(MIN_POSTINGS, MAX_POSTINGS),
        }
    }

    pub fn desired_postings(&self) -> u32 {
        self.desired_postings
    }

    pub fn page_count(&self) -> u32 {
        page_count(self.desired_postings)
    }
}

/// Pages to request for a desired number of postings:
/// clamp to [20, 100], then `ceil(n / 20) - 1`, but always at least one.
pub fn page_count(desired_postings: u32) -> u32 {
    let n = desired_postings.clamp(MIN_POSTINGS, MAX_POSTINGS);
    (n.div_ceil(POSTINGS_PER_PAGE_UNIT) - 1).max(1)
}

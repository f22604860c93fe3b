// src/config/file.rs
//! `findjobs.toml`: saved search parameters and source overrides.
//!
//! Every key is optional; whatever is present overrides the built-in
//! default, and command-line flags override the file in turn (see `cli`).
//!
//! ```toml
//! location_db = "data/postal_areas.csv"
//!
//! [search]
//! title = "data engineer"
//! location = "Austin, TX"
//! keywords = ["python", "remote"]
//! postings = 60
//! max_results = 25
//!
//! [http]
//! timeout_secs = 10
//!
//! [sources]
//! order = ["monster", "indeed"]
//! dedup_key = "title-company"
//!
//! [export]
//! path = "jobs.txt"
//! format = "lines"
//! append = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::ConfigError;
use super::options::{AppOptions, ExportFormat};
use crate::data::DedupKey;
use crate::engine::SourceSpec;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub location_db: Option<PathBuf>,
    #[serde(default)]
    pub search: SearchSection,
    #[serde(default)]
    pub http: HttpSection,
    #[serde(default)]
    pub sources: SourcesSection,
    #[serde(default)]
    pub export: ExportSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SearchSection {
    pub title: Option<String>,
    pub location: Option<String>,
    pub keywords: Option<Vec<String>>,
    pub postings: Option<u32>,
    pub max_results: Option<usize>,
    pub import: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HttpSection {
    pub timeout_secs: Option<u64>,
    pub user_agent: Option<String>,
    pub connectivity_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesSection {
    pub order: Option<Vec<String>>,
    pub dedup_key: Option<DedupKey>,
    #[serde(default)]
    pub custom: Vec<SourceSpec>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportSection {
    pub path: Option<PathBuf>,
    pub format: Option<ExportFormat>,
    pub append: Option<bool>,
}

pub fn parse_config(text: &str, path: &Path) -> Result<FileConfig, ConfigError> {
    toml::from_str(text).map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}

pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let text = std::fs::read_to_string(path)
        .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
    parse_config(&text, path)
}

/// Load `explicit` if given (must exist), else `default_name` if present.
pub fn load_optional(explicit: Option<&Path>, default_name: &str) -> Result<Option<FileConfig>, ConfigError> {
    match explicit {
        Some(p) if !p.exists() => Err(ConfigError::NotFound(p.to_path_buf())),
        Some(p) => load_config(p).map(Some),
        None => {
            let p = Path::new(default_name);
            if p.is_file() { load_config(p).map(Some) } else { Ok(None) }
        }
    }
}

impl FileConfig {
    /// Layer this file over `opts`.
    pub fn apply(self, opts: &mut AppOptions) -> Result<(), ConfigError> {
        if let Some(db) = self.location_db { opts.search.location_db = Some(db); }

        let s = self.search;
        if s.title.is_some() { opts.search.title = s.title; }
        if s.location.is_some() { opts.search.location = s.location; }
        if let Some(k) = s.keywords { opts.search.keywords = k; }
        if let Some(n) = s.postings { opts.search.postings = n; }
        if let Some(n) = s.max_results {
            if n == 0 { return Err(ConfigError::Invalid(s!("search.max_results must be at least 1"))); }
            opts.search.max_results = n;
        }
        if s.import.is_some() { opts.search.import = s.import; }

        let h = self.http;
        if let Some(t) = h.timeout_secs {
            if t == 0 { return Err(ConfigError::Invalid(s!("http.timeout_secs must be at least 1"))); }
            opts.http.timeout_secs = t;
        }
        if let Some(ua) = h.user_agent { opts.http.user_agent = ua; }
        if let Some(url) = h.connectivity_url { opts.http.connectivity_url = url; }

        let src = self.sources;
        if let Some(order) = src.order { opts.sources.order = order; }
        if let Some(k) = src.dedup_key { opts.sources.dedup = k; }
        opts.sources.custom.extend(src.custom);

        let e = self.export;
        if e.path.is_some() { opts.export.path = e.path; }
        if let Some(f) = e.format { opts.export.format = f; }
        if let Some(a) = e.append { opts.export.append = a; }

        Ok(())
    }
}

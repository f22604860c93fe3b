// src/config/options.rs
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::consts::*;
use crate::data::DedupKey;
use crate::engine::SourceSpec;

/// Everything a run needs, built once (defaults < config file < flags)
/// and handed down explicitly.
#[derive(Clone, Debug, Default)]
pub struct AppOptions {
    pub search: SearchOptions,
    pub http: HttpOptions,
    pub sources: SourceOptions,
    pub export: ExportOptions,
    pub output: OutputOptions,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOptions {
    pub title: Option<String>,
    /// City name, "City, ST", or a postal code.
    pub location: Option<String>,
    pub keywords: Vec<String>,
    /// Target number of postings per source; turned into a page count.
    pub postings: u32,
    pub max_results: usize,
    /// Results of an earlier run; matching postings are left out.
    pub import: Option<PathBuf>,
    /// Replacement postal-area database (CSV).
    pub location_db: Option<PathBuf>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            title: None,
            location: None,
            keywords: Vec::new(),
            postings: DEFAULT_POSTINGS,
            max_results: DEFAULT_MAX_RESULTS,
            import: None,
            location_db: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpOptions {
    pub timeout_secs: u64,
    pub user_agent: String,
    pub connectivity_url: String,
    pub check_connectivity: bool,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            timeout_secs: REQUEST_TIMEOUT_SECS,
            user_agent: s!(USER_AGENT),
            connectivity_url: s!(CONNECTIVITY_URL),
            check_connectivity: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceOptions {
    /// Source names in priority order; earlier sources win on duplicates.
    pub order: Vec<String>,
    pub dedup: DedupKey,
    /// Sources declared in the config file. Same name as a built-in replaces it.
    pub custom: Vec<SourceSpec>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            order: DEFAULT_SOURCES.iter().map(|s| s.to_string()).collect(),
            dedup: DedupKey::default(),
            custom: Vec::new(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    /// `Title, Company, Location` per line
    #[default]
    Lines,
    /// Space-delimited table, fields quoted when needed
    Table,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Lines => "txt", ExportFormat::Table => "tsv" }
    }
    /// Format implied by a file extension, if any.
    pub fn from_extension(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "txt" => Some(ExportFormat::Lines),
            "tsv" => Some(ExportFormat::Table),
            _ => None,
        }
    }
    /// Field separator for delimited formats; `Lines` has its own ", " layout.
    pub fn delimiter(&self) -> Option<char> {
        match self { ExportFormat::Lines => None, ExportFormat::Table => Some(' ') }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub path: Option<PathBuf>,
    pub format: ExportFormat,
    /// Add only postings not already in the file instead of overwriting.
    pub append: bool,
}

impl ExportOptions {
    /// Final file path. A directory (or a path ending in a separator) gets
    /// the default file name with the format's extension.
    pub fn out_path(&self) -> Option<PathBuf> {
        let p = self.path.as_ref()?;
        if crate::file::looks_like_dir_hint(p) || p.is_dir() {
            let stem = Path::new(DEFAULT_EXPORT_FILE).file_stem().unwrap_or_default();
            let mut name = stem.to_os_string();
            name.push(".");
            name.push(self.format.ext());
            Some(p.join(name))
        } else {
            Some(p.clone())
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OutputOptions {
    /// Off with `--quiet`: no banner, no listing, no prompts.
    pub enabled: bool,
    pub color: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self { enabled: true, color: true }
    }
}

// src/config/consts.rs

// Net config
pub const USER_AGENT: &str = concat!("findjobs/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 15;
pub const CONNECTIVITY_URL: &str = "https://www.google.com";

// Search sizing
pub const MIN_POSTINGS: u32 = 20;
pub const MAX_POSTINGS: u32 = 100;
pub const DEFAULT_POSTINGS: u32 = 100;
pub const POSTINGS_PER_PAGE_UNIT: u32 = 20;
pub const DEFAULT_MAX_RESULTS: usize = 50;

// Sources, in priority order
pub const DEFAULT_SOURCES: &[&str] = &["indeed", "monster"];

// Local files
pub const CONFIG_FILE: &str = "findjobs.toml";
pub const DEFAULT_EXPORT_FILE: &str = "jobs.txt";

// Concurrency
pub const MAX_SOURCE_WORKERS: usize = 4;

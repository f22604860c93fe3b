// src/scrape/mod.rs
mod scrape;

pub use scrape::collect_sources;
pub use scrape::search_source;
pub use scrape::SourceResult;

// src/specs/mod.rs
//! # Job board "specs"
//!
//! One module per supported board, each returning a `SourceSpec`: the
//! search URL template, how pagination works, and the `ExtractionRule`
//! saying *where the fields live in the HTML*.
//!
//! ## What lives here
//! - **Selectors and URL shapes** for each board. Nothing else.
//!
//! ## What does **not** live here
//! - **Fetching, pagination loops, dedup**: `scrape`.
//! - **Turning a page into postings**: `engine`, shared by every board.
//! - **Merging, filtering, reconciling**: `pipeline`.
//!
//! ## Conventions
//! - `name` is the lower-case key users type (`--sources indeed,monster`).
//! - Selectors should tolerate harmless markup noise: prefer class
//!   selectors over positional ones.
//! - A board declared in the config file (`[[sources.custom]]`) with the
//!   same name as a built-in replaces it, so a markup change can be
//!   patched without a rebuild.
//!
//! ## Testing notes
//! - Specs are tested offline against captured pages in `tests/fixtures/`.
pub mod indeed;
pub mod monster;

use crate::config::ConfigError;
use crate::config::options::SourceOptions;
use crate::engine::SourceSpec;

/// Built-in boards in default priority order.
pub fn builtin() -> Vec<SourceSpec> {
    vec![indeed::spec(), monster::spec()]
}

/// Specs to search, in the configured priority order.
/// Custom sources shadow built-ins of the same name.
pub fn resolve(opts: &SourceOptions) -> Result<Vec<SourceSpec>, ConfigError> {
    let mut known = builtin();
    for custom in &opts.custom {
        match known.iter_mut().find(|k| k.name.eq_ignore_ascii_case(&custom.name)) {
            Some(slot) => *slot = custom.clone(),
            None => known.push(custom.clone()),
        }
    }

    let mut out: Vec<SourceSpec> = Vec::with_capacity(opts.order.len());
    for name in &opts.order {
        let spec = known
            .iter()
            .find(|k| k.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ConfigError::UnknownSource(name.clone()))?;
        if !out.iter().any(|s| s.name == spec.name) {
            out.push(spec.clone());
        }
    }

    if out.is_empty() {
        return Err(ConfigError::Invalid(s!("no sources selected")));
    }
    Ok(out)
}

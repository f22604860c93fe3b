// src/engine/mod.rs
//! Generic, descriptor-driven extraction.
//!
//! A job board is described by a `SourceSpec` (URL template, pagination,
//! and an `ExtractionRule` of CSS selectors). The engine turns a `SourceSpec` and
//! a query into URLs, and a parsed page into postings. Board-specific
//! knowledge stays in `specs`; when a board changes its markup, only its
//! descriptor changes.

mod engine;
mod types;

pub use engine::{build_base_url, extract_postings, join_words, page_url};
pub use types::{CompiledField, CompiledRule, ExtractionRule, FieldRule, Pick, SourceSpec};

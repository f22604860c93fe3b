// src/engine/types.rs
use scraper::Selector;
use serde::Deserialize;

use crate::core::html;

/// Everything the engine needs to search one job board.
/// Built-ins live in `specs`; more can be declared in the config file.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceSpec {
    /// Lower-case key used in `--sources` and `[sources] order`.
    pub name: String,
    /// Human-facing name for notices; defaults to `name`.
    #[serde(default)]
    pub label: Option<String>,
    /// `{title}`, `{city}` and `{state}` are substituted.
    pub url_template: String,
    /// Joins the words of the title and city ('+' or '-').
    pub separator: char,
    /// Query parameter appended for pages after the first.
    pub page_param: String,
    /// Offset step per page: 10 means `start=10, 20, ...`; 1 means `page=1, 2, ...`.
    pub page_size: u32,
    pub rule: ExtractionRule,
}

impl SourceSpec {
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }
}

/// Where the fields of one posting live in a results page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExtractionRule {
    /// One match per posting.
    pub container: String,
    /// Title element, searched inside the container.
    pub title: String,
    /// When set, company and location are read from the first following
    /// sibling of the container matching this selector, not the container.
    #[serde(default)]
    pub details: Option<String>,
    pub company: FieldRule,
    pub location: FieldRule,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldRule {
    pub selector: String,
    #[serde(default)]
    pub pick: Pick,
    /// Keep only the first non-empty line of the element's text
    /// (drops ratings and badges rendered under a company name).
    #[serde(default)]
    pub first_line: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pick {
    #[default]
    First,
    Last,
}

/// `ExtractionRule` with its selectors parsed once per search.
pub struct CompiledRule {
    pub container: Selector,
    pub title: Selector,
    pub details: Option<Selector>,
    pub company: CompiledField,
    pub location: CompiledField,
}

pub struct CompiledField {
    pub selector: Selector,
    pub pick: Pick,
    pub first_line: bool,
}

impl FieldRule {
    fn compile(&self) -> Result<CompiledField, String> {
        Ok(CompiledField {
            selector: html::selector(&self.selector)?,
            pick: self.pick,
            first_line: self.first_line,
        })
    }
}

impl ExtractionRule {
    pub fn compile(&self) -> Result<CompiledRule, String> {
        Ok(CompiledRule {
            container: html::selector(&self.container)?,
            title: html::selector(&self.title)?,
            details: self.details.as_deref().map(html::selector).transpose()?,
            company: self.company.compile()?,
            location: self.location.compile()?,
        })
    }
}

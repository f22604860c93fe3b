// src/engine/engine.rs
use scraper::{ElementRef, Html};
use tracing::debug;

use crate::core::html;
use crate::core::sanitize::first_line;
use crate::data::{JobPosting, SearchQuery};
use crate::engine::types::*;

/// Page 0 URL: template with title/city/state filled in.
pub fn build_base_url(spec: &SourceSpec, query: &SearchQuery) -> String {
    spec.url_template
        .replace("{title}", &join_words(&query.title, spec.separator))
        .replace("{city}", &join_words(&query.city, spec.separator))
        .replace("{state}", &urlencoding::encode(&query.state))
}

/// Percent-encode each word and join with the source's separator.
pub fn join_words(s: &str, sep: char) -> String {
    let words: Vec<_> = s.split_whitespace().map(|w| urlencoding::encode(w).into_owned()).collect();
    words.join(&sep.to_string())
}

/// URL for page `page` (0-based). Page 0 is the base URL itself.
/// The offset is computed in `u64`, since `page_size` can come from a config file.
pub fn page_url(spec: &SourceSpec, base: &str, page: u32) -> String {
    if page == 0 {
        return base.to_string();
    }
    let joiner = if base.contains('?') { '&' } else { '?' };
    let offset = u64::from(page) * u64::from(spec.page_size);
    format!("{base}{joiner}{}={}", spec.page_param, offset)
}

/// All postings on one results page, in document order.
/// Containers without a usable title are skipped; missing company or
/// location become empty strings.
pub fn extract_postings(rule: &CompiledRule, doc: &Html) -> Vec<JobPosting> {
    let mut out = Vec::new();
    let mut skipped = 0usize;

    for container in doc.select(&rule.container) {
        let Some(title_el) = html::first_within(container, &rule.title) else {
            skipped += 1;
            continue;
        };

        let scope = match &rule.details {
            Some(sel) => html::next_sibling_matching(container, sel),
            None => Some(container),
        };

        let company_el = scope.and_then(|s| pick(s, &rule.company));
        let location_el = scope.and_then(|s| pick(s, &rule.location));

        // One element can't be both; with a single detail block it's the company.
        let location_el = match (company_el, location_el) {
            (Some(c), Some(l)) if c.id() == l.id() => None,
            (_, l) => l,
        };

        let title = html::text_of(title_el);
        let company = company_el.map(|el| field_text(el, &rule.company)).unwrap_or_default();
        let location = location_el.map(|el| field_text(el, &rule.location)).unwrap_or_default();

        match JobPosting::try_new(&title, &company, &location) {
            Some(p) => out.push(p),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        debug!(skipped, kept = out.len(), "containers without a title");
    }
    out
}

fn pick<'a>(scope: ElementRef<'a>, field: &CompiledField) -> Option<ElementRef<'a>> {
    match field.pick {
        Pick::First => html::first_within(scope, &field.selector),
        Pick::Last => html::last_within(scope, &field.selector),
    }
}

fn field_text(el: ElementRef<'_>, field: &CompiledField) -> String {
    if field.first_line {
        first_line(&html::raw_text_of(el)).to_string()
    } else {
        html::text_of(el)
    }
}

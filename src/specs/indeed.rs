// src/specs/indeed.rs
//! Indeed search results.
//!
//! Each posting is a `<div class="title">` holding the title link, followed
//! by a sibling `<div class="sjcl">` block: its first `<div>` is the company
//! (rating on a later line), its last `<div>` the location, sometimes
//! wrapped in brackets. Results come 10 per page via `&start=`.

use crate::engine::{ExtractionRule, FieldRule, Pick, SourceSpec};

pub fn spec() -> SourceSpec {
    SourceSpec {
        name: s!("indeed"),
        label: Some(s!("Indeed")),
        url_template: s!("https://www.indeed.com/jobs?q={title}&l={city}%2C+{state}"),
        separator: '+',
        page_param: s!("start"),
        page_size: 10,
        rule: ExtractionRule {
            container: s!("div.title"),
            title: s!("a"),
            details: Some(s!("div.sjcl")),
            company: FieldRule { selector: s!("div"), pick: Pick::First, first_line: true },
            location: FieldRule { selector: s!("div"), pick: Pick::Last, first_line: false },
        },
    }
}

// src/specs/monster.rs
//! Monster search results: one `<section class="card-content">` per posting
//! with title, company and location all inside the card. Pages are counted
//! one by one via `&page=`.

use crate::engine::{ExtractionRule, FieldRule, Pick, SourceSpec};

pub fn spec() -> SourceSpec {
    SourceSpec {
        name: s!("monster"),
        label: Some(s!("Monster")),
        url_template: s!("https://www.monster.com/jobs/search/?q={title}&where={city}__2C-{state}"),
        separator: '-',
        page_param: s!("page"),
        page_size: 1,
        rule: ExtractionRule {
            container: s!("section.card-content"),
            title: s!("h2.title a"),
            details: None,
            company: FieldRule { selector: s!(".company .name"), pick: Pick::First, first_line: false },
            location: FieldRule { selector: s!(".location .name"), pick: Pick::First, first_line: false },
        },
    }
}

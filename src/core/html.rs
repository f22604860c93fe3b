// src/core/html.rs
// Small helpers over `scraper` for tolerant field extraction.
// None of these fail: a missing element is `None` or an empty string.

use scraper::{ElementRef, Html, Selector};

use super::sanitize::normalize_ws;

pub fn parse(body: &str) -> Html {
    Html::parse_document(body)
}

pub fn selector(css: &str) -> Result<Selector, String> {
    Selector::parse(css).map_err(|e| format!("bad selector '{css}': {e}"))
}

/// Visible text with whitespace collapsed.
pub fn text_of(el: ElementRef<'_>) -> String {
    normalize_ws(&el.text().collect::<String>())
}

/// Raw text with line breaks kept, for "first line only" fields.
pub fn raw_text_of(el: ElementRef<'_>) -> String {
    el.text().collect::<String>()
}

pub fn first_within<'a>(el: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    el.select(sel).next()
}

pub fn last_within<'a>(el: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    el.select(sel).last()
}

/// First following sibling element matching `sel` (text nodes are skipped).
pub fn next_sibling_matching<'a>(el: ElementRef<'a>, sel: &Selector) -> Option<ElementRef<'a>> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sib| sel.matches(sib))
}

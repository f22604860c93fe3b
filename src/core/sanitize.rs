// src/core/sanitize.rs

/// Collapse runs of whitespace to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Remove a bracket pair that wraps the whole string: `(NY)` → `NY`, `[Remote]` → `Remote`.
/// Nested wrapping pairs go too, so the result is stable under a second call.
/// `(a) (b)` is left alone: its first `(` does not close at the end.
pub fn strip_surrounding_brackets(s: &str) -> String {
    let mut t = s.trim();
    while let Some(inner) = wrapped_inner(t) {
        t = inner.trim();
    }
    t.to_string()
}

fn wrapped_inner(s: &str) -> Option<&str> {
    let close = match s.chars().next()? {
        '(' => ')',
        '[' => ']',
        _ => return None,
    };
    if !s.ends_with(close) || s.len() < 2 { return None; }
    let open = s.chars().next()?;

    // The opener must match the final char, not some earlier one.
    let mut depth = 0usize;
    let last = s.len() - close.len_utf8();
    for (i, ch) in s.char_indices() {
        if ch == open { depth += 1; }
        else if ch == close {
            depth = depth.saturating_sub(1);
            if depth == 0 && i != last { return None; }
        }
    }
    Some(&s[open.len_utf8()..last])
}

/// Placeholders the boards print when no location is given.
pub fn is_placeholder(s: &str) -> bool {
    matches!(s, "NA" | "N/A" | "n/a" | "-")
}

/// Full location clean-up applied when a posting is created.
pub fn normalize_location(s: &str) -> String {
    let t = strip_surrounding_brackets(&normalize_ws(s));
    if is_placeholder(&t) { s!() } else { t }
}

/// First char upper-cased, the rest lower-cased ("rEMOTE" → "Remote").
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => s!(),
    }
}

/// Capitalize each whitespace-separated word ("new york" → "New York").
pub fn title_case(s: &str) -> String {
    s.split_whitespace().map(capitalize).collect::<Vec<_>>().join(" ")
}

/// First non-empty line of a multi-line text block.
pub fn first_line(s: &str) -> &str {
    s.lines().map(str::trim).find(|l| !l.is_empty()).unwrap_or("")
}

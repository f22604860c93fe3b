// src/csv.rs
use std::borrow::Cow;
use std::io::{self, Write};
use std::mem::take;

/* ---------------- Parsing ---------------- */

/// Minimal delimited-text parser (quotes + CRLF tolerant).
pub fn parse_rows(text: &str, sep: char) -> Vec<Vec<String>> {
    let mut rows = Vec::new();
    let mut field = s!();
    let mut row = Vec::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' => {
                if in_quotes {
                    if matches!(chars.peek(), Some('"')) {
                        chars.next(); // double-quote escape
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                } else {
                    in_quotes = true;
                }
            }
            c if c == sep && !in_quotes => {
                row.push(take(&mut field));
            }
            '\n' | '\r' if !in_quotes => {
                if ch == '\r' && matches!(chars.peek(), Some('\n')) { chars.next(); }
                row.push(take(&mut field));
                if !(row.len() == 1 && row[0].is_empty()) {
                    rows.push(take(&mut row));
                } else {
                    row.clear();
                }
            }
            _ => field.push(ch),
        }
    }

    // Flush a trailing row without a final newline.
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    rows
}

/// Split off the first row if it equals `header` (case-insensitive).
pub fn detect_headers(mut rows: Vec<Vec<String>>, header: &[&str]) -> (Option<Vec<String>>, Vec<Vec<String>>) {
    let is_header = rows.first().is_some_and(|first| {
        first.len() == header.len()
            && first.iter().zip(header).all(|(a, b)| a.trim().eq_ignore_ascii_case(b))
    });
    if is_header {
        let h = rows.remove(0);
        return (Some(h), rows);
    }
    (None, rows)
}

/* ---------------- Writing ---------------- */

fn needs_quotes(field: &str, sep: char) -> bool {
    // An empty field between spaces would vanish on re-read.
    (field.is_empty() && sep == ' ')
        || field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// `cell` as it must appear between separators, quoted and escaped if needed.
pub fn quote_field(cell: &str, sep: char) -> Cow<'_, str> {
    if needs_quotes(cell, sep) {
        Cow::Owned(format!("\"{}\"", cell.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(cell)
    }
}

/// Write a single delimited row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if !first { write!(w, "{}", sep)?; } else { first = false; }
        write!(w, "{}", quote_field(cell.as_ref(), sep))?;
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(rows: &[&[&str]], sep: char) -> String {
        let mut buf = Vec::new();
        for r in rows {
            write_row(&mut buf, *r, sep).unwrap();
        }
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn space_delimited_fields_are_quoted_when_needed() {
        let out = written(&[&["Data Engineer", "Acme", ""]], ' ');
        assert_eq!(out, "\"Data Engineer\" Acme \"\"\n");
        assert_eq!(parse_rows(&out, ' '), vec![vec!["Data Engineer", "Acme", ""]]);
    }

    #[test]
    fn embedded_quotes_survive() {
        let out = written(&[&["The \"Best\" Job", "Co"]], ' ');
        assert_eq!(parse_rows(&out, ' '), vec![vec!["The \"Best\" Job", "Co"]]);
    }

    #[test]
    fn quote_field_only_when_needed() {
        assert_eq!(quote_field("Acme", ','), "Acme");
        assert_eq!(quote_field("Austin, TX", ','), "\"Austin, TX\"");
        assert_eq!(quote_field("", ','), "");
        assert_eq!(quote_field("", ' '), "\"\"");
    }

    #[test]
    fn crlf_and_blank_lines_are_tolerated() {
        let rows = parse_rows("a,b\r\n\r\nc,d", ',');
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn header_row_is_detected() {
        let rows = parse_rows("Title Company Location\nA B C\n", ' ');
        let (h, rest) = detect_headers(rows, &["Title", "Company", "Location"]);
        assert!(h.is_some());
        assert_eq!(rest, vec![vec!["A", "B", "C"]]);
    }
}

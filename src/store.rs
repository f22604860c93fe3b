// src/store.rs
//! Result files: writing a run's postings and reading earlier ones back.
//!
//! Two layouts, picked by `ExportFormat`:
//! - `Lines`: `Title, Company, Location` per line. The location is always
//!   written, so a posting without one ends in `, `. A field holding a comma
//!   or a quote is written in double quotes, csv style, so `"Austin, TX"`
//!   reads back whole. Unquoted lines split on the last two `, `, which keeps
//!   hand-written titles like `Sales, Marketing Lead` intact. Blank lines and
//!   `#` lines are skipped.
//! - `Table`: space-delimited rows under a `Title Company Location` header,
//!   fields quoted by `csv::write_row` when they need it.

use std::{
    collections::HashSet,
    fs,
    io::{ErrorKind, Write},
    path::Path,
};

use tracing::info;

use crate::config::options::ExportFormat;
use crate::csv::{detect_headers, parse_rows, quote_field, write_row};
use crate::data::JobPosting;
use crate::error::{Error, Result};
use crate::file::{create_truncated, open_append};

pub const TABLE_HEADER: [&str; 3] = ["Title", "Company", "Location"];

/// Create or truncate `path` and write every posting.
pub fn write_results(path: &Path, format: ExportFormat, postings: &[JobPosting]) -> Result<()> {
    let mut out = create_truncated(path)?;
    let io = |e| Error::io(path, e);

    if let Some(sep) = format.delimiter() {
        write_row(&mut out, &TABLE_HEADER, sep).map_err(io)?;
    }
    for p in postings {
        write_posting(&mut out, format, p).map_err(io)?;
    }
    out.flush().map_err(io)?;

    info!(path = %path.display(), count = postings.len(), "results written");
    Ok(())
}

/// Add the postings the file does not hold yet; returns how many were added.
/// A missing file is created, as `write_results` would.
pub fn append_new(path: &Path, format: ExportFormat, postings: &[JobPosting]) -> Result<usize> {
    let existing = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let unique = unique(postings, &HashSet::new());
            write_results(path, format, &unique)?;
            return Ok(unique.len());
        }
        Err(e) => return Err(Error::io(path, e)),
    };

    let known: HashSet<JobPosting> = parse_results(&existing, format, path)?.into_iter().collect();
    let fresh = unique(postings, &known);
    if fresh.is_empty() {
        return Ok(0);
    }

    let mut out = open_append(path)?;
    let io = |e| Error::io(path, e);
    if !existing.is_empty() && !existing.ends_with('\n') {
        writeln!(out).map_err(io)?;
    }
    if existing.trim().is_empty() {
        if let Some(sep) = format.delimiter() {
            write_row(&mut out, &TABLE_HEADER, sep).map_err(io)?;
        }
    }
    for p in &fresh {
        write_posting(&mut out, format, p).map_err(io)?;
    }
    out.flush().map_err(io)?;

    info!(path = %path.display(), added = fresh.len(), "results appended");
    Ok(fresh.len())
}

/// Postings from an earlier run. A missing file is `ImportNotFound`.
pub fn read_results(path: &Path, format: ExportFormat) -> Result<Vec<JobPosting>> {
    let text = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound { Error::ImportNotFound(path.to_path_buf()) } else { Error::io(path, e) }
    })?;
    parse_results(&text, format, path)
}

/// `path` only labels errors.
pub fn parse_results(text: &str, format: ExportFormat, path: &Path) -> Result<Vec<JobPosting>> {
    match format.delimiter() {
        None => parse_lines(text, path),
        Some(sep) => parse_table(text, sep, path),
    }
}

fn write_posting<W: Write>(mut w: W, format: ExportFormat, p: &JobPosting) -> std::io::Result<()> {
    match format.delimiter() {
        None => {
            let fields: Vec<_> = p.fields().into_iter().map(|f| quote_field(f, ',')).collect();
            writeln!(w, "{}", fields.join(", "))
        }
        Some(sep) => write_row(w, &p.fields(), sep),
    }
}

fn parse_lines(text: &str, path: &Path) -> Result<Vec<JobPosting>> {
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let posting = if line.contains('"') {
            split_quoted(line)
        } else {
            split_line(line).and_then(|(t, c, l)| JobPosting::try_new(t, c, l))
        };
        match posting {
            Some(p) => out.push(p),
            None => return Err(Error::MalformedResults { path: path.to_path_buf(), line: i + 1 }),
        }
    }
    Ok(out)
}

/// `(title, company, location)`, splitting on the last two `, `.
/// Editors that strip trailing spaces turn `..., Acme, ` into `..., Acme,`.
fn split_line(line: &str) -> Option<(&str, &str, &str)> {
    let line = line.trim_end();
    if let Some(head) = line.strip_suffix(',') {
        let (title, company) = head.rsplit_once(", ")?;
        return Some((title, company, ""));
    }
    let mut parts = line.rsplitn(3, ", ");
    let last = parts.next()?;
    let middle = parts.next()?;
    match parts.next() {
        Some(title) => Some((title, middle, last)),
        None => Some((middle, last, "")),
    }
}

/// A line with quoted fields, read as one comma-separated csv row.
fn split_quoted(line: &str) -> Option<JobPosting> {
    let row = parse_rows(line, ',').into_iter().next()?;
    match row.as_slice() {
        [t, c, l] => JobPosting::try_new(t.trim(), c.trim(), l.trim()),
        [t, c] => JobPosting::try_new(t.trim(), c.trim(), ""),
        _ => None,
    }
}

fn parse_table(text: &str, sep: char, path: &Path) -> Result<Vec<JobPosting>> {
    let (header, rows) = detect_headers(parse_rows(text, sep), &TABLE_HEADER);
    let offset = if header.is_some() { 2 } else { 1 };
    let mut out = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let posting = match row.as_slice() {
            [t, c, l] => JobPosting::try_new(t, c, l),
            [t, c] => JobPosting::try_new(t, c, ""),
            _ => None,
        };
        match posting {
            Some(p) => out.push(p),
            None => return Err(Error::MalformedResults { path: path.to_path_buf(), line: i + offset }),
        }
    }
    Ok(out)
}

/// `postings` minus `known`, first occurrence of each kept.
fn unique(postings: &[JobPosting], known: &HashSet<JobPosting>) -> Vec<JobPosting> {
    let mut seen = HashSet::new();
    postings
        .iter()
        .filter(|p| !known.contains(*p) && seen.insert(*p))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn p() -> &'static Path {
        Path::new("mem")
    }

    fn lines_round_trip(posting: JobPosting) -> Vec<JobPosting> {
        let mut buf = Vec::new();
        write_posting(&mut buf, ExportFormat::Lines, &posting).unwrap();
        parse_lines(&String::from_utf8(buf).unwrap(), p()).unwrap()
    }

    #[test]
    fn lines_keep_a_location_with_a_comma() {
        let austin = posting!("Backend Engineer", "Acme Corp", "Austin, TX");
        let mut buf = Vec::new();
        write_posting(&mut buf, ExportFormat::Lines, &austin).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Backend Engineer, Acme Corp, \"Austin, TX\"\n");

        assert_eq!(lines_round_trip(austin.clone()), vec![austin]);
    }

    #[test]
    fn lines_round_trip_commas_and_quotes_in_any_field() {
        for posting in [
            posting!("Sales, Marketing Lead", "Acme, Inc.", "Round Rock, TX"),
            posting!("The \"Best\" Job", "Initech", "Remote"),
            posting!("Cook", "Diner, Bar & Grill"),
        ] {
            assert_eq!(lines_round_trip(posting.clone()), vec![posting]);
        }
    }

    #[test]
    fn unquoted_lines_split_from_the_right() {
        let got = parse_lines("Sales, Marketing Lead, Acme, Remote\n", p()).unwrap();
        assert_eq!(got, vec![posting!("Sales, Marketing Lead", "Acme", "Remote")]);
    }

    #[test]
    fn quoted_line_with_extra_fields_is_malformed() {
        let err = parse_lines("A, B, \"C, D\", E\n", p()).unwrap_err();
        assert!(matches!(err, Error::MalformedResults { line: 1, .. }));
    }

    #[test]
    fn lines_accept_missing_location() {
        let text = "# saved\n\nNurse, Mercy, \nCook, Diner,\nClerk, Shop\n";
        let got = parse_lines(text, p()).unwrap();
        assert_eq!(got, vec![posting!("Nurse", "Mercy"), posting!("Cook", "Diner"), posting!("Clerk", "Shop")]);
    }

    #[test]
    fn single_field_line_is_malformed() {
        let err = parse_lines("ok, fine, here\njust a title\n", p()).unwrap_err();
        assert!(matches!(err, Error::MalformedResults { line: 2, .. }));
    }

    #[test]
    fn table_rows_reported_with_file_line_numbers() {
        let err = parse_table("Title Company Location\nA B C\nlonely\n", ' ', p()).unwrap_err();
        assert!(matches!(err, Error::MalformedResults { line: 3, .. }));
    }

    #[test]
    fn lines_write_always_has_three_fields() {
        let mut buf = Vec::new();
        write_posting(&mut buf, ExportFormat::Lines, &posting!("Cook", "Diner")).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Cook, Diner, \n");
    }
}

// src/cli.rs
use std::{
    path::{Path, PathBuf},
    time::Instant,
};

use clap::Parser;
use console::style;
use dialoguer::Input;
use tracing::{info, warn};

use crate::config::{
    consts::CONFIG_FILE,
    file::load_optional,
    options::{AppOptions, ExportFormat},
};
use crate::core::net::{check_connectivity, Fetch, HttpFetcher};
use crate::data::{JobPosting, SearchQuery};
use crate::error::{Error, Result};
use crate::location::LocationResolver;
use crate::pipeline::{aggregate, Aggregate};
use crate::progress::Progress;
use crate::scrape::collect_sources;
use crate::{file, log, specs, store};

#[derive(Debug, Default, Parser)]
#[command(name = "findjobs", version, about = "Search job boards for postings near a location")]
pub struct Args {
    /// Job title to search for
    #[arg(short, long)]
    pub title: Option<String>,

    /// City, "City, ST" or a US postal code
    #[arg(short, long)]
    pub location: Option<String>,

    /// Keep only postings mentioning one of these (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    pub keywords: Vec<String>,

    /// Earlier results; postings found there are left out
    #[arg(short, long, value_name = "FILE")]
    pub import: Option<PathBuf>,

    /// Write results to this file (or directory)
    #[arg(short = 'o', long, value_name = "PATH")]
    pub export: Option<String>,

    /// Add new postings to the export file instead of overwriting it
    #[arg(long)]
    pub append: bool,

    /// Result file layout
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Show at most this many postings
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..))]
    pub max_results: Option<u32>,

    /// Postings to request per source (20-100)
    #[arg(short, long)]
    pub postings: Option<u32>,

    /// Sources in priority order (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub sources: Vec<String>,

    /// Config file [default: ./findjobs.toml if present]
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub no_color: bool,

    /// No banner, listing or prompts
    #[arg(short, long)]
    pub quiet: bool,

    /// Skip the connectivity check at startup
    #[arg(long)]
    pub no_check: bool,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Send log output to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Layer the flags over `opts`.
    pub fn apply(&self, opts: &mut AppOptions) {
        if self.title.is_some() { opts.search.title = self.title.clone(); }
        if self.location.is_some() { opts.search.location = self.location.clone(); }
        if !self.keywords.is_empty() {
            opts.search.keywords = self.keywords.iter().map(|k| k.trim().to_string()).filter(|k| !k.is_empty()).collect();
        }
        if let Some(n) = self.postings { opts.search.postings = n; }
        if let Some(n) = self.max_results { opts.search.max_results = n as usize; }
        if self.import.is_some() { opts.search.import = self.import.clone(); }

        if let Some(p) = &self.export { opts.export.path = Some(file::normalize_separators(p)); }
        if let Some(f) = self.format { opts.export.format = f; }
        if self.append { opts.export.append = true; }

        if !self.sources.is_empty() { opts.sources.order = self.sources.clone(); }

        if self.no_check { opts.http.check_connectivity = false; }
        if self.no_color { opts.output.color = false; }
        if self.quiet { opts.output.enabled = false; }
    }
}

/// Defaults, then the config file, then flags.
pub fn build_options(args: &Args) -> Result<AppOptions> {
    let mut opts = AppOptions::default();
    if let Some(fc) = load_optional(args.config.as_deref(), CONFIG_FILE)? {
        fc.apply(&mut opts)?;
    }
    args.apply(&mut opts);
    Ok(opts)
}

pub fn run() -> Result<()> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> Result<()> {
    log::init(args.verbose, args.log_file.as_deref())?;
    let opts = build_options(&args)?;
    console::set_colors_enabled(opts.output.color);
    console::set_colors_enabled_stderr(opts.output.color);
    search(opts)
}

/// One complete search run over the network.
pub fn search(opts: AppOptions) -> Result<()> {
    let fetcher = HttpFetcher::new(&opts.http).map_err(Error::HttpClient)?;
    search_with(opts, &fetcher)
}

/// `search` with every request going through `fetcher`.
pub fn search_with(mut opts: AppOptions, fetcher: &dyn Fetch) -> Result<()> {
    let ui = Ui { enabled: opts.output.enabled };
    let started = Instant::now();

    if opts.http.check_connectivity {
        check_connectivity(fetcher, &opts.http.connectivity_url).map_err(Error::Offline)?;
    }

    let title = required(opts.search.title.take(), "title", "Job title", &ui)?;
    let location = required(opts.search.location.take(), "location", "Location (city, \"City, ST\" or postal code)", &ui)?;

    let place = LocationResolver::load(opts.search.location_db.as_deref())?.resolve(&location)?;
    let query = SearchQuery::new(&title, &place.city, &place.state, opts.search.keywords.clone(), opts.search.postings);

    let prior = match &opts.search.import {
        Some(path) => {
            let format = ExportFormat::from_extension(path).unwrap_or(opts.export.format);
            let prior = store::read_results(path, format)?;
            info!(path = %path.display(), count = prior.len(), "imported earlier results");
            Some(prior)
        }
        None => None,
    };

    let sources = specs::resolve(&opts.sources)?;

    ui.banner(&query);
    let mut progress = ConsoleProgress { ui: &ui };
    let results = collect_sources(&sources, &query, fetcher, opts.sources.dedup, Some(&mut progress));

    let per_source: Vec<Vec<JobPosting>> = results
        .into_iter()
        .map(|r| match r.outcome {
            Ok(found) => found,
            Err(e) => {
                warn!(source = %r.label, error = %e, "source contributed nothing");
                Vec::new()
            }
        })
        .collect();

    let agg = aggregate(&per_source, &query.keywords, prior.as_deref(), opts.search.max_results);
    ui.results(&agg, prior.is_some(), &query.keywords);
    ui.summary(started, &agg);

    if agg.is_empty() {
        return Ok(());
    }
    if let Some(path) = opts.export.out_path() {
        export(&path, &opts, &agg.postings, &ui)?;
    }
    Ok(())
}

fn export(path: &Path, opts: &AppOptions, postings: &[JobPosting], ui: &Ui) -> Result<()> {
    let format = opts.export.format;
    let written = if opts.export.append {
        store::append_new(path, format, postings)?
    } else {
        store::write_results(path, format, postings)?;
        postings.len()
    };
    ui.line(format!("Saved {} posting(s) to {}", written, path.display()));
    Ok(())
}

/// Take the value if set, otherwise ask for it. Never asks under `--quiet`.
fn required(value: Option<String>, name: &'static str, prompt: &str, ui: &Ui) -> Result<String> {
    if let Some(v) = value.filter(|v| !v.trim().is_empty()) {
        return Ok(v);
    }
    if !ui.enabled {
        return Err(Error::MissingInput(name));
    }
    let v: String = Input::new().with_prompt(prompt).interact_text()?;
    Ok(v)
}

/* ---------------- Terminal output ---------------- */

struct Ui {
    enabled: bool,
}

impl Ui {
    fn line(&self, msg: impl AsRef<str>) {
        if self.enabled {
            println!("{}", msg.as_ref());
        }
    }

    fn notice(&self, msg: impl AsRef<str>) {
        if self.enabled {
            eprintln!("{}", style(msg.as_ref()).yellow());
        }
    }

    fn banner(&self, query: &SearchQuery) {
        if !self.enabled {
            return;
        }
        println!("{}", style(format!("findjobs {}", env!("CARGO_PKG_VERSION"))).bold());
        println!("Searching for '{}' jobs in {}, {}", query.title, query.city, query.state);
        println!("Please wait...");
    }

    fn results(&self, agg: &Aggregate, reconciled: bool, keywords: &[String]) {
        if agg.filter_fell_back {
            self.notice(format!("No posting matched {}; showing all results.", keywords.join(", ")));
        }
        if agg.reconciled > 0 {
            self.notice(format!("Left out {} posting(s) already in the imported results.", agg.reconciled));
        }
        if agg.is_empty() {
            self.line(if reconciled && agg.merged > 0 { "No new postings." } else { "No results." });
            return;
        }
        if !self.enabled {
            return;
        }
        println!();
        for (i, p) in agg.postings.iter().enumerate() {
            println!("{}", format_posting(i + 1, p));
        }
        if agg.truncated > 0 {
            println!("{}", style(format!("({} more not shown)", agg.truncated)).dim());
        }
    }

    fn summary(&self, started: Instant, agg: &Aggregate) {
        if !self.enabled {
            return;
        }
        println!();
        println!("Done in {:.1} s", started.elapsed().as_secs_f64());
        println!("Matches found: {}", agg.len());
    }
}

/// `(n) Title - Company [Location]`, title green and location dimmed.
pub fn format_posting(n: usize, p: &JobPosting) -> String {
    let mut out = format!("({n}) {} - {}", style(&p.title).green(), p.company);
    if p.has_location() {
        out.push_str(&format!(" {}", style(format!("[{}]", p.location)).dim()));
    }
    out
}

struct ConsoleProgress<'a> {
    ui: &'a Ui,
}

impl Progress for ConsoleProgress<'_> {
    fn source_done(&mut self, label: &str, found: usize) {
        self.ui.line(format!("  {label}: {found} posting(s)"));
    }

    fn source_failed(&mut self, label: &str, reason: &str) {
        self.ui.notice(format!("  {label} unavailable: {reason}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let args = Args::parse_from([
            "findjobs", "-t", "nurse", "-l", "10001", "-k", "night, icu", "-k", "remote",
            "-n", "5", "--sources", "monster", "-q", "--no-color", "--format", "table",
        ]);
        let mut opts = AppOptions::default();
        args.apply(&mut opts);
        assert_eq!(opts.search.title.as_deref(), Some("nurse"));
        assert_eq!(opts.search.keywords, vec!["night", "icu", "remote"]);
        assert_eq!(opts.search.max_results, 5);
        assert_eq!(opts.sources.order, vec!["monster"]);
        assert_eq!(opts.export.format, ExportFormat::Table);
        assert!(!opts.output.enabled);
        assert!(!opts.output.color);
    }

    #[test]
    fn unset_flags_leave_options_alone() {
        let args = Args::parse_from(["findjobs"]);
        let mut opts = AppOptions::default();
        args.apply(&mut opts);
        assert_eq!(opts.search, AppOptions::default().search);
        assert!(opts.http.check_connectivity);
    }

    #[test]
    fn zero_max_results_is_rejected() {
        assert!(Args::try_parse_from(["findjobs", "-n", "0"]).is_err());
    }

    #[test]
    fn quiet_run_without_title_is_a_usage_error() {
        let ui = Ui { enabled: false };
        let err = required(None, "title", "Job title", &ui).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(required(Some(s!("cook")), "title", "Job title", &ui).unwrap(), "cook");
    }

    #[test]
    fn posting_line_without_color() {
        console::set_colors_enabled(false);
        assert_eq!(format_posting(3, &posting!("Cook", "Diner", "NY")), "(3) Cook - Diner [NY]");
        assert_eq!(format_posting(1, &posting!("Cook", "Diner")), "(1) Cook - Diner");
    }
}

// tests/sources.rs
mod common;

use common::{fixture, query, two_page_query, FixtureFetcher, Reply};
use pretty_assertions::assert_eq;

use findjobs::config::file::parse_config;
use findjobs::config::AppOptions;
use findjobs::data::DedupKey;
use findjobs::error::SourceError;
use findjobs::pipeline::aggregate;
use findjobs::progress::Progress;
use findjobs::scrape::{collect_sources, search_source};
use findjobs::{posting, specs};

fn boards() -> FixtureFetcher {
    FixtureFetcher::new()
        .on("indeed.com", Reply::Body(fixture("indeed_page.html")))
        .on("monster.com", Reply::Body(fixture("monster_page.html")))
}

#[test]
fn indeed_page_is_extracted_and_deduplicated() {
    let got = search_source(&specs::indeed::spec(), &query(), &boards(), DedupKey::FullRecord).unwrap();
    assert_eq!(
        got,
        vec![
            posting!("Backend Engineer", "Acme Corp", "Austin, TX"),
            posting!("Remote Python Developer", "Initech", "Remote"),
            posting!("QA Analyst", "Globex"),
            posting!("Site Reliability Engineer", "Hooli"),
        ]
    );
}

#[test]
fn monster_page_is_extracted() {
    let got = search_source(&specs::monster::spec(), &query(), &boards(), DedupKey::FullRecord).unwrap();
    assert_eq!(
        got,
        vec![
            posting!("Backend Engineer", "Acme Corp", "Austin, TX"),
            posting!("Frontend Developer", "Umbrella", "Round Rock, TX"),
            posting!("Data Analyst", "Vandelay Industries"),
        ]
    );
}

#[test]
fn pages_are_requested_in_order() {
    let f = boards();
    search_source(&specs::indeed::spec(), &two_page_query(), &f, DedupKey::FullRecord).unwrap();
    assert_eq!(
        f.requested(),
        vec![
            "https://www.indeed.com/jobs?q=software+developer&l=Austin%2C+TX",
            "https://www.indeed.com/jobs?q=software+developer&l=Austin%2C+TX&start=10",
        ]
    );
}

#[test]
fn repeats_across_pages_keep_first_occurrence() {
    // Both pages serve the same document.
    let got = search_source(&specs::indeed::spec(), &two_page_query(), &boards(), DedupKey::FullRecord).unwrap();
    assert_eq!(got.len(), 4);
}

#[test]
fn title_company_key_collapses_offices() {
    let page = r#"
        <section class="card-content"><h2 class="title"><a>Nurse</a></h2>
          <div class="company"><span class="name">Mercy</span></div>
          <div class="location"><span class="name">Austin, TX</span></div></section>
        <section class="card-content"><h2 class="title"><a>Nurse</a></h2>
          <div class="company"><span class="name">Mercy</span></div>
          <div class="location"><span class="name">Dallas, TX</span></div></section>
    "#;
    let f = FixtureFetcher::new().on("monster.com", Reply::Body(page.to_string()));
    let spec = specs::monster::spec();
    assert_eq!(search_source(&spec, &query(), &f, DedupKey::FullRecord).unwrap().len(), 2);
    assert_eq!(
        search_source(&spec, &query(), &f, DedupKey::TitleCompany).unwrap(),
        vec![posting!("Nurse", "Mercy", "Austin, TX")]
    );
}

#[test]
fn unreachable_first_page_fails_the_source() {
    let f = FixtureFetcher::new().on("indeed.com", Reply::Refused);
    let err = search_source(&specs::indeed::spec(), &two_page_query(), &f, DedupKey::FullRecord).unwrap_err();
    assert!(matches!(err, SourceError::Unavailable { .. }));
    assert_eq!(err.source_name(), "Indeed");
    // No point asking for page 1.
    assert_eq!(f.requested().len(), 1);
}

#[test]
fn later_page_failure_costs_that_page_only() {
    let f = FixtureFetcher::new()
        .on("start=10", Reply::Refused)
        .on("indeed.com", Reply::Body(fixture("indeed_page.html")));
    let got = search_source(&specs::indeed::spec(), &two_page_query(), &f, DedupKey::FullRecord).unwrap();
    assert_eq!(got.len(), 4);
    assert_eq!(f.requested().len(), 2);
}

#[test]
fn http_error_status_is_an_empty_page() {
    let f = FixtureFetcher::new().on("indeed.com", Reply::Status(503));
    let got = search_source(&specs::indeed::spec(), &query(), &f, DedupKey::FullRecord).unwrap();
    assert!(got.is_empty());
}

#[derive(Default)]
struct Recorder {
    events: Vec<String>,
}

impl Progress for Recorder {
    fn begin(&mut self, sources: usize) {
        self.events.push(format!("begin {sources}"));
    }
    fn source_done(&mut self, label: &str, found: usize) {
        self.events.push(format!("{label} {found}"));
    }
    fn source_failed(&mut self, label: &str, _reason: &str) {
        self.events.push(format!("{label} failed"));
    }
    fn finish(&mut self) {
        self.events.push("finish".into());
    }
}

#[test]
fn results_keep_priority_order_and_failures_are_isolated() {
    let f = FixtureFetcher::new()
        .on("indeed.com", Reply::Refused)
        .on("monster.com", Reply::Body(fixture("monster_page.html")));
    let specs = specs::builtin();
    let mut rec = Recorder::default();

    let results = collect_sources(&specs, &query(), &f, DedupKey::FullRecord, Some(&mut rec));

    let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["indeed", "monster"]);
    let labels: Vec<_> = results.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["Indeed", "Monster"]);
    assert!(results[0].outcome.is_err());
    assert!(results[0].postings().is_empty());
    assert_eq!(results[1].postings().len(), 3);

    assert_eq!(rec.events.first().map(String::as_str), Some("begin 2"));
    assert_eq!(rec.events.last().map(String::as_str), Some("finish"));
    assert!(rec.events.contains(&"Indeed failed".to_string()));
    assert!(rec.events.contains(&"Monster 3".to_string()));
}

#[test]
fn same_posting_on_two_boards_is_listed_once() {
    let results = collect_sources(&specs::builtin(), &query(), &boards(), DedupKey::FullRecord, None);
    let per_source: Vec<_> = results.iter().map(|r| r.postings().to_vec()).collect();
    let agg = aggregate(&per_source, &[], None, 50);

    // 4 from Indeed, 3 from Monster, "Backend Engineer at Acme Corp" on both.
    assert_eq!(agg.merged, 6);
    assert_eq!(agg.postings[0], posting!("Backend Engineer", "Acme Corp", "Austin, TX"));
    assert_eq!(agg.postings[4], posting!("Frontend Developer", "Umbrella", "Round Rock, TX"));
}

#[test]
fn configured_board_replaces_builtin() {
    let cfg = parse_config(
        r#"
        [sources]
        order = ["indeed"]

        [[sources.custom]]
        name = "indeed"
        label = "Indeed (patched)"
        url_template = "https://www.indeed.com/m/jobs?q={title}&l={city}+{state}"
        separator = "+"
        page_param = "start"
        page_size = 10

        [sources.custom.rule]
        container = "li.job"
        title = "h3"
        company = { selector = ".org" }
        location = { selector = ".where" }
        "#,
        std::path::Path::new("findjobs.toml"),
    )
    .unwrap();
    let mut opts = AppOptions::default();
    cfg.apply(&mut opts).unwrap();
    let specs = specs::resolve(&opts.sources).unwrap();

    let page = r#"<ul><li class="job"><h3>Welder</h3><p class="org">Forge</p><p class="where">Austin, TX</p></li></ul>"#;
    let f = FixtureFetcher::new().on("/m/jobs", Reply::Body(page.to_string()));
    let got = search_source(&specs[0], &query(), &f, opts.sources.dedup).unwrap();
    assert_eq!(got, vec![posting!("Welder", "Forge", "Austin, TX")]);
}

#[test]
fn broken_selector_is_reported_not_panicked() {
    let mut spec = specs::monster::spec();
    spec.rule.container = "section[".into();
    let err = search_source(&spec, &query(), &boards(), DedupKey::FullRecord).unwrap_err();
    assert!(matches!(err, SourceError::BadRule { .. }));
}

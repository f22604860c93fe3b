// src/scrape/scrape.rs
use std::{
    collections::HashSet, thread,
    sync::{ mpsc, atomic::{ AtomicUsize, Ordering }}
};

use tracing::{info, warn};

use crate::{
    config::consts::MAX_SOURCE_WORKERS,
    core::net::{fetch_document, Fetch},
    data::{DedupKey, JobPosting, SearchQuery},
    engine::{build_base_url, extract_postings, page_url, SourceSpec},
    error::SourceError,
    progress::Progress,
};

/// What one source produced.
#[derive(Debug)]
pub struct SourceResult {
    pub name: String,
    pub label: String,
    pub outcome: Result<Vec<JobPosting>, SourceError>,
}

impl SourceResult {
    pub fn postings(&self) -> &[JobPosting] {
        match &self.outcome {
            Ok(v) => v,
            Err(_) => &[],
        }
    }
}

/// Search one board across its pages, in page order.
///
/// - Status errors and later-page transport errors cost that page only.
/// - A transport error on page 0 means the board is unreachable: the whole
///   source fails with `SourceError::Unavailable`.
/// - Repeats within this source (per `dedup`) keep their first occurrence.
pub fn search_source(
    spec: &SourceSpec,
    query: &SearchQuery,
    fetcher: &dyn Fetch,
    dedup: DedupKey,
) -> Result<Vec<JobPosting>, SourceError> {
    let rule = spec.rule.compile().map_err(|detail| SourceError::BadRule {
        source_name: spec.label().to_string(),
        detail,
    })?;

    let base = build_base_url(spec, query);
    let pages = query.page_count();

    let mut seen = HashSet::new();
    let mut postings = Vec::new();

    for page in 0..pages {
        let url = page_url(spec, &base, page);
        let doc = match fetch_document(fetcher, &url) {
            Ok(Some(doc)) => doc,
            Ok(None) => continue,
            Err(reason) if page == 0 => {
                return Err(SourceError::Unavailable { source_name: spec.label().to_string(), reason });
            }
            Err(e) => {
                warn!(source = %spec.name, page, error = %e, "page failed, skipping");
                continue;
            }
        };

        let before = postings.len();
        for p in extract_postings(&rule, &doc) {
            if seen.insert(dedup.key_of(&p)) {
                postings.push(p);
            }
        }
        info!(source = %spec.name, page, new = postings.len() - before, "page parsed");
    }

    Ok(postings)
}

/// Search every source concurrently. Results come back in `specs` order,
/// whatever order the workers finish in.
pub fn collect_sources(
    specs: &[SourceSpec],
    query: &SearchQuery,
    fetcher: &dyn Fetch,
    dedup: DedupKey,
    mut progress: Option<&mut dyn Progress>,
) -> Vec<SourceResult> {
    if let Some(p) = progress.as_deref_mut() {
        p.begin(specs.len());
    }

    let mut slots: Vec<Option<Result<Vec<JobPosting>, SourceError>>> =
        specs.iter().map(|_| None).collect();

    let counter = AtomicUsize::new(0);
    let workers = MAX_SOURCE_WORKERS.min(specs.len()).max(1);
    let (res_tx, res_rx) = mpsc::channel::<(usize, Result<Vec<JobPosting>, SourceError>)>();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let idx = &counter;
            scope.spawn(move || {
                loop {
                    let i = idx.fetch_add(1, Ordering::Relaxed);
                    if i >= specs.len() {
                        break;
                    }
                    let result = search_source(&specs[i], query, fetcher, dedup);
                    if tx.send((i, result)).is_err() {
                        break;
                    }
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for (i, result) in res_rx.iter() {
            if let Some(p) = progress.as_deref_mut() {
                let label = specs[i].label();
                match &result {
                    Ok(found) => p.source_done(label, found.len()),
                    Err(e) => p.source_failed(label, &e.to_string()),
                }
            }
            slots[i] = Some(result);
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    specs
        .iter()
        .zip(slots)
        .map(|(spec, slot)| SourceResult {
            name: spec.name.clone(),
            label: spec.label().to_string(),
            outcome: slot.unwrap_or_else(|| {
                Err(SourceError::BadRule {
                    source_name: spec.label().to_string(),
                    detail: s!("search worker stopped before reporting"),
                })
            }),
        })
        .collect()
}

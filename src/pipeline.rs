// src/pipeline.rs
//! Merge → reconcile → keyword filter → cap.
//!
//! Every step keeps insertion order, and every step after the merge only
//! removes postings. Equality here is always full-record (`JobPosting: Eq`),
//! whatever key the sources deduplicated with.
//!
//! Reconciliation against earlier results runs before the keyword filter,
//! so a fall-back never brings back a posting from the earlier results.

use std::collections::HashSet;

use tracing::info;

use crate::core::sanitize::capitalize;
use crate::data::JobPosting;

/// Result of `aggregate`, with counters for the summary.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Aggregate {
    pub postings: Vec<JobPosting>,
    /// Size after the cross-source merge.
    pub merged: usize,
    /// Postings dropped because they were in the prior results.
    pub reconciled: usize,
    /// Keywords matched nothing, so the filter was not applied.
    pub filter_fell_back: bool,
    /// Postings cut by `max_results`.
    pub truncated: usize,
}

impl Aggregate {
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.postings.len()
    }
}

pub fn aggregate(
    per_source: &[Vec<JobPosting>],
    keywords: &[String],
    prior: Option<&[JobPosting]>,
    max_results: usize,
) -> Aggregate {
    let merged = merge_all(per_source);
    let merged_len = merged.len();

    let (reconciled, removed) = match prior {
        Some(prior) => {
            let kept = reconcile(merged, prior);
            let removed = merged_len - kept.len();
            (kept, removed)
        }
        None => (merged, 0),
    };
    if removed > 0 {
        info!(removed, "dropped postings found in earlier results");
    }

    let (filtered, fell_back) = filter_keywords(reconciled, keywords);
    if fell_back {
        info!(?keywords, "no posting matched the keywords, keeping all results");
    }

    let (postings, truncated) = cap(filtered, max_results);

    Aggregate { postings, merged: merged_len, reconciled: removed, filter_fell_back: fell_back, truncated }
}

/// `a` followed by the postings of `b` not already present. Order within
/// each input is kept; repeats inside `b` collapse too.
pub fn merge(a: Vec<JobPosting>, b: &[JobPosting]) -> Vec<JobPosting> {
    let mut seen: HashSet<JobPosting> = a.iter().cloned().collect();
    let mut out = a;
    for p in b {
        if seen.insert(p.clone()) {
            out.push(p.clone());
        }
    }
    out
}

/// Fold `merge` over sources in priority order.
pub fn merge_all(per_source: &[Vec<JobPosting>]) -> Vec<JobPosting> {
    per_source.iter().fold(Vec::new(), |acc, src| merge(acc, src))
}

/// Drop every posting equal to one in `prior`. May return an empty set.
pub fn reconcile(results: Vec<JobPosting>, prior: &[JobPosting]) -> Vec<JobPosting> {
    let prior: HashSet<&JobPosting> = prior.iter().collect();
    results.into_iter().filter(|p| !prior.contains(p)).collect()
}

/// Keep postings where any field contains any keyword, as typed or
/// capitalized. With no keywords, or no match at all, the input comes
/// back unchanged and the flag tells which case it was.
pub fn filter_keywords(postings: Vec<JobPosting>, keywords: &[String]) -> (Vec<JobPosting>, bool) {
    let needles: Vec<(String, String)> = keywords
        .iter()
        .map(|k| k.trim())
        .filter(|k| !k.is_empty())
        .map(|k| (k.to_string(), capitalize(k)))
        .collect();
    if needles.is_empty() {
        return (postings, false);
    }

    let matched: Vec<JobPosting> = postings.iter().filter(|p| matches_any(p, &needles)).cloned().collect();
    if matched.is_empty() {
        (postings, true)
    } else {
        (matched, false)
    }
}

fn matches_any(p: &JobPosting, needles: &[(String, String)]) -> bool {
    p.fields().iter().any(|field| {
        needles.iter().any(|(raw, cap)| field.contains(raw.as_str()) || field.contains(cap.as_str()))
    })
}

/// First `max` postings, and how many were cut.
pub fn cap(mut postings: Vec<JobPosting>, max: usize) -> (Vec<JobPosting>, usize) {
    let cut = postings.len().saturating_sub(max);
    postings.truncate(max);
    (postings, cut)
}

// tests/common/mod.rs
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use findjobs::core::{Fetch, FetchError};
use findjobs::data::SearchQuery;

pub fn fixture(name: &str) -> String {
    let p = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    std::fs::read_to_string(&p).unwrap_or_else(|e| panic!("read {}: {e}", p.display()))
}

pub enum Reply {
    Body(String),
    Status(u16),
    Refused,
}

/// Serves canned replies by URL substring; first matching rule wins.
/// Unmatched URLs get a 404. Every requested URL is recorded.
pub struct FixtureFetcher {
    rules: Vec<(String, Reply)>,
    pub requested: Mutex<Vec<String>>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self { rules: Vec::new(), requested: Mutex::new(Vec::new()) }
    }

    pub fn on(mut self, url_part: &str, reply: Reply) -> Self {
        self.rules.push((url_part.to_string(), reply));
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Fetch for FixtureFetcher {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        let reply = self.rules.iter().find(|(part, _)| url.contains(part.as_str())).map(|(_, r)| r);
        match reply {
            Some(Reply::Body(b)) => Ok(b.clone()),
            Some(Reply::Status(s)) => Err(FetchError::Status { url: url.to_string(), status: *s }),
            Some(Reply::Refused) => Err(FetchError::Transport { url: url.to_string(), reason: "connection refused".into() }),
            None => Err(FetchError::Status { url: url.to_string(), status: 404 }),
        }
    }
}

/// One page per source (20 postings requested).
pub fn query() -> SearchQuery {
    SearchQuery::new("software developer", "Austin", "TX", vec![], 20)
}

/// Two pages per source.
pub fn two_page_query() -> SearchQuery {
    SearchQuery::new("software developer", "Austin", "TX", vec![], 60)
}

// src/core/net.rs
// One-shot HTTPS GETs. Each call blocks until the response or the timeout.

use std::time::Duration;

use scraper::Html;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::options::HttpOptions;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Server answered, but not with 2xx.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// Timeout, DNS failure, refused connection, bad TLS, ...
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    /// The client itself could not be built (bad user agent, TLS backend).
    #[error("invalid HTTP client settings: {reason}")]
    Client { reason: String },
}

impl FetchError {
    pub fn is_transport(&self) -> bool {
        matches!(self, FetchError::Transport { .. })
    }
}

/// Anything that can turn a URL into a response body.
/// `HttpFetcher` is the real one; tests plug in canned pages.
pub trait Fetch: Send + Sync {
    fn get(&self, url: &str) -> Result<String, FetchError>;
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(http: &HttpOptions) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .connect_timeout(Duration::from_secs(http.timeout_secs))
            .user_agent(http.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Client { reason: e.to_string() })?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn get(&self, url: &str) -> Result<String, FetchError> {
        debug!(%url, "GET");
        let resp = self.client.get(url).send().map_err(|e| FetchError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: url.to_string(), status: status.as_u16() });
        }
        resp.text().map_err(|e| FetchError::Transport { url: url.to_string(), reason: e.to_string() })
    }
}

/// Fetch and parse one page.
///
/// A non-2xx answer is logged and comes back as `Ok(None)`: the page simply
/// has no postings. Transport errors are returned so the caller can decide
/// whether the whole source is down.
pub fn fetch_document(fetcher: &dyn Fetch, url: &str) -> Result<Option<Html>, FetchError> {
    match fetcher.get(url) {
        Ok(body) => Ok(Some(super::html::parse(&body))),
        Err(FetchError::Status { url, status }) => {
            warn!(%url, status, "unable to connect, skipping page");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Startup check. Any answer at all, even a 404, proves the network is up.
pub fn check_connectivity(fetcher: &dyn Fetch, url: &str) -> Result<(), FetchError> {
    match fetcher.get(url) {
        Ok(_) | Err(FetchError::Status { .. }) => Ok(()),
        Err(e) => Err(e),
    }
}

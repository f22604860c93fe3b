// src/error.rs
//! Run-level errors.
//!
//! Only the variants here stop a search. Page and posting failures are
//! handled where they happen (see `scrape`), and a whole source failing is
//! a `SourceError` collected into the run report rather than an `Error`.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::core::net::FetchError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("could not resolve location '{0}' to a city and state")]
    LocationNotFound(String),

    #[error("no network connection ({0})")]
    Offline(#[source] FetchError),

    #[error("could not set up the HTTP client: {0}")]
    HttpClient(#[source] FetchError),

    #[error("missing required input: {0} (pass it as a flag or drop --quiet)")]
    MissingInput(&'static str),

    #[error("import file not found: {}", .0.display())]
    ImportNotFound(PathBuf),

    #[error("malformed results file {}: line {line}", path.display())]
    MalformedResults { path: PathBuf, line: usize },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("interactive prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// Process exit code: 2 for usage errors, 1 for everything else.
    pub fn exit_code(&self) -> u8 {
        match self {
            Error::MissingInput(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Why a whole source contributed nothing.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("{source_name} is unavailable: {reason}")]
    Unavailable {
        source_name: String,
        #[source]
        reason: FetchError,
    },

    #[error("{source_name} has an invalid extraction rule: {detail}")]
    BadRule { source_name: String, detail: String },
}

impl SourceError {
    pub fn source_name(&self) -> &str {
        match self {
            SourceError::Unavailable { source_name, .. } => source_name,
            SourceError::BadRule { source_name, .. } => source_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_setup_failure_is_not_reported_as_offline() {
        let err = Error::HttpClient(FetchError::Client { reason: s!("bad header") });
        let msg = err.to_string();
        assert!(msg.starts_with("could not set up the HTTP client"), "{msg}");
        assert!(!msg.contains("network"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn only_missing_input_is_a_usage_error() {
        assert_eq!(Error::MissingInput("title").exit_code(), 2);
        assert_eq!(Error::LocationNotFound(s!("Nowhere")).exit_code(), 1);
    }
}

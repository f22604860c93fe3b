// src/config/mod.rs

pub mod consts;
pub mod file;
pub mod options;

use std::path::PathBuf;

use thiserror::Error;

pub use options::AppOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("could not read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("unknown source '{0}'")]
    UnknownSource(String),

    #[error("invalid setting: {0}")]
    Invalid(String),
}

// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod core;
pub mod csv;
pub mod data;
pub mod engine;
pub mod error;
pub mod file;
pub mod location;
pub mod log;
pub mod pipeline;
pub mod progress;
pub mod scrape;
pub mod specs;
pub mod states;
pub mod store;

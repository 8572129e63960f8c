// ABOUTME: Public library API for exporting hosted deployment source trees
// ABOUTME: Re-exports core modules for the CLI and integration tests

pub mod api;
pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod flatten;
pub mod model;
pub mod observer;
pub mod progress;
pub mod storage;

pub use error::{Error, Result};
pub use model::{Deployment, ExportResult, FlatEntry, SkippedEntry, TreeEntry};

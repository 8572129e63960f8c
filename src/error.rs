// ABOUTME: Error types with structured exit codes for CLI
// ABOUTME: Separates fatal export failures from per-file ones by variant

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication failed on {endpoint}: {message}")]
    Auth { endpoint: String, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API error {status} on {endpoint}: {message}")]
    Api {
        endpoint: String,
        status: u16,
        message: String,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid response from {endpoint}: {message}")]
    InvalidResponse { endpoint: String, message: String },

    #[error("Filesystem error: {0}")]
    Filesystem(#[from] std::io::Error),

    #[error("Refusing to write outside output directory: {0}")]
    UnsafePath(String),
}

impl Error {
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) => 2,
            Error::Auth { .. } => 3,
            Error::NotFound(_) => 4,
            Error::Network(_) => 5,
            Error::Api { .. } => 6,
            Error::Parse(_) | Error::InvalidResponse { .. } => 7,
            Error::Filesystem(_) | Error::UnsafePath(_) => 8,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

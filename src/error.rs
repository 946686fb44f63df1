//! Common error type and result alias.
//!
//! Every failure is fatal for a run; binaries print the message and exit 1.
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse {} at line {line}: {source}", file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Image endpoint returned {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Unexpected image response: {0}")]
    ResponseShape(String),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Invalid base64 image payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("File system error at {}: {source}", path.display())]
    FileSystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to serialize records: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn fs(path: impl Into<PathBuf>, source: io::Error) -> Self {
        AppError::FileSystem { path: path.into(), source }
    }
}

//! Error types
//!
//! Extraction itself never fails; everything here comes from the layers around it.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while building [`Settings`](crate::config::Settings).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Configuration error: marker '{0}' must not be empty")]
    EmptyMarker(&'static str),
}

/// Errors that can occur while processing a document.
#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("Could not read {}: {source}", path.display())]
    DocumentUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid format: {0} (expected 'plain' or 'json')")]
    InvalidFormat(String),

    #[error("Output error: {0}")]
    Output(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, ProcessingError>;

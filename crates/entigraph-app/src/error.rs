//! Application errors.

use entigraph_core::GraphError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to read stdin: {0}")]
    Stdin(std::io::Error),
    #[error("Invalid script: {0}")]
    Script(String),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

pub type AppResult<T> = Result<T, AppError>;

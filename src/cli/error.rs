//! Error type for CLI operations

use std::path::PathBuf;

use crate::client::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read file {0}: {1}")]
    FileReadError(PathBuf, String),

    #[error("Failed to write file {0}: {1}")]
    FileWriteError(PathBuf, String),

    #[error("Timed out after {0} seconds")]
    Timeout(u64),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

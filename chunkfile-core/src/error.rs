use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to {op} {}: {source}", .path.display())]
    Fs {
        op: &'static str,
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("no chunk files found")]
    NoChunks,

    #[error("{0}")]
    Invalid(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, ChunkError>;

/// Wraps an I/O failure with the operation and the path it hit.
pub(crate) fn fs_context(op: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> ChunkError {
    let path = path.to_path_buf();
    move |source| ChunkError::Fs { op, path, source }
}

use std::io;
use std::str::Utf8Error;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChunkError>;

/// Errors produced while chunking a readable source.
#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("chunk size must be positive, got {0}")]
    InvalidChunkSize(usize),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid UTF-8 in byte source: {0}")]
    Utf8(#[from] Utf8Error),
    #[error("byte source ended in the middle of a UTF-8 sequence")]
    TruncatedUtf8,
    #[error("read was cancelled")]
    Cancelled,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

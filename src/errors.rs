use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure while reading the request transcript. Malformed lines inside the
/// file are not parse errors; only I/O problems are reported here.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("couldn't open request file {path}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("read error in request file: {0}")]
    Read(#[from] io::Error),
}

/// Failure of a single execution. Each execution carries its own error back
/// to the dispatcher; one failing execution never panics the process.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("invalid request: {0}")]
    Request(String),
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("decompression failed: {0}")]
    Decompress(#[from] io::Error),
}

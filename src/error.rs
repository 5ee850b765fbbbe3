//! Error types for vidprobe.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for vidprobe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for vidprobe operations.
///
/// Only the filesystem variants ([`Error::FileNotFound`], [`Error::Io`]) ever
/// reach callers. Structural parse failures are recovered inside the probe,
/// which degrades to a partial or empty [`VideoInfo`](crate::VideoInfo)
/// instead of failing.
#[derive(Debug, Error)]
pub enum Error {
    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A read or seek would pass the end of the buffer.
    #[error("Buffer underflow: need {need} bytes, have {have}")]
    Truncated { need: usize, have: usize },

    /// An atom's declared size violates its enclosing scope.
    #[error("Invalid atom: {0}")]
    InvalidAtom(String),
}

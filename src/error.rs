//! Error types for the search engine
//!
//! Configuration errors are reported before any candidate is tried. The
//! keyspace errors (`OutOfRange`, `LengthMismatch`, `CharNotInCharset`) only
//! surface from the public enumerator API; inside a worker they cannot occur
//! because partitions never extend past the space.

use thiserror::Error;

/// Errors produced while configuring or running a search
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("unsupported algorithm: {0} (expected plain, sha256, sha1, md5 or blake3)")]
    UnsupportedAlgorithm(String),

    #[error("charset must contain at least one character")]
    EmptyCharset,

    #[error("candidate length must be at least 1")]
    ZeroLength,

    #[error("invalid length range: min {min} > max {max}")]
    InvalidLengthRange { min: usize, max: usize },

    #[error("worker budget must be at least 1")]
    ZeroWorkers,

    #[error("target digest is not valid hex: {0}")]
    InvalidDigest(String),

    #[error("{algorithm} digests are {expected} bytes, got {actual}")]
    DigestLength {
        algorithm: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("keyspace of {charset_len}^{length} candidates does not fit in 128 bits")]
    SpaceOverflow { charset_len: usize, length: usize },

    #[error("index {index} out of range for keyspace of size {size}")]
    OutOfRange { index: u128, size: u128 },

    #[error("candidate has length {actual}, keyspace length is {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("character {0:?} is not part of the charset")]
    CharNotInCharset(char),

    /// Only reachable when panics unwind (not under `panic = "abort"`)
    #[error("worker {worker} panicked while searching length {length}")]
    WorkerPanicked { worker: usize, length: usize },

    #[error("search task failed: {0}")]
    TaskFailed(String),
}

pub type SearchResult<T> = std::result::Result<T, SearchError>;

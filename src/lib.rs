//! Keydrill Library
//!
//! Password strength checking and a brute-force credential recovery
//! demonstrator. The search engine enumerates every string of each length
//! over a charset, splits the keyspace across worker threads and stops as
//! soon as one of them matches the target.
//!
//! # Features
//!
//! - **Random-access keyspace**: mixed-radix decoding, no materialized lists
//! - **Deterministic partitioning**: contiguous, disjoint ranges per worker
//! - **Plain or digest targets**: sha256, sha1, md5, blake3
//! - **Adaptive dispatch**: inline for small spaces, scoped threads otherwise
//! - **Budgets**: attempt cap across the run, coarse wall-clock limit
//!
//! # Example
//!
//! ```no_run
//! use keydrill::engine::{run_search, Algorithm, AlgorithmChoice, SearchRequest};
//!
//! fn main() -> anyhow::Result<()> {
//!     let digest = Algorithm::Sha256.hex_digest(b"cab");
//!     let request = SearchRequest::new(digest, AlgorithmChoice::Sha256, "abc")
//!         .with_lengths(1, 3)
//!         .with_workers(4);
//!
//!     let result = run_search(&request)?;
//!     println!("cracked: {:?}", result.password);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod spinner;
pub mod strength;

// Re-export commonly used types
pub use config::Config;
pub use engine::{
    run_search, run_search_async, Algorithm, AlgorithmChoice, DispatchPolicy, RunResult,
    SearchOrchestrator, SearchOutcome, SearchRequest, SearchSpace, Target,
};
pub use error::SearchError;
pub use spinner::{KeySpinner, StatusIcons};
pub use strength::{StrengthEvaluator, StrengthReport};

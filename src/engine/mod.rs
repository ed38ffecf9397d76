//! Engine module - The brute-force search engine
//!
//! Leaf first: keyspace enumeration, partition planning, target matching,
//! the per-partition worker and the orchestrator driving them.

pub mod charset;
pub mod keyspace;
pub mod matcher;
pub mod orchestrator;
pub mod partition;
pub mod worker;

pub use charset::{detect_charset, CharsetPreset};
pub use keyspace::{decode, encode, SearchSpace};
pub use matcher::{matches, Algorithm, AlgorithmChoice, Matcher, Target};
pub use orchestrator::{
    run_search, run_search_async, DispatchMode, DispatchPolicy, RunResult, SearchOrchestrator,
    SearchOutcome, SearchProgress, SearchRequest, WorkerCap,
};
pub use partition::{plan, Partition};
pub use worker::{AbortOnPanic, TerminationState, Winner};

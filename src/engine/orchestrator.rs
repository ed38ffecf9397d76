//! Search Orchestrator - Length escalation and worker dispatch
//!
//! For each length from `min_length` to `max_length`:
//! - builds the [`SearchSpace`] and a fresh [`TerminationState`]
//! - runs one inline worker for small spaces, or scoped worker threads
//!   over planned partitions for large ones
//! - joins every worker before looking at the result
//!
//! A `max_attempts` budget is enforced by planning only the indices the
//! budget still allows, so the run never tries more candidates than that.

use std::thread;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::charset::dedup_charset;
use super::keyspace::SearchSpace;
use super::matcher::{AlgorithmChoice, Matcher, Target};
use super::partition::{plan, Partition};
use super::worker::{self, AbortOnPanic, TerminationState};
use crate::error::{SearchError, SearchResult};

// ============================================================================
// Dispatch Policy
// ============================================================================

/// How many threads a parallel length iteration uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkerCap {
    /// `min(worker_budget, available cores)`
    #[default]
    Parallelism,
    /// `worker_budget` as given
    Budget,
    /// `min(worker_budget, length)`
    Length,
}

/// Tunables for choosing sequential or parallel execution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchPolicy {
    /// Spaces with at most this many candidates run inline
    pub sequential_space_threshold: u64,
    /// Lengths up to this bound run inline regardless of space size
    pub sequential_max_length: usize,
    /// Worker count rule for parallel iterations
    pub worker_cap: WorkerCap,
}

impl Default for DispatchPolicy {
    fn default() -> Self {
        Self {
            sequential_space_threshold: 10_000,
            sequential_max_length: 3,
            worker_cap: WorkerCap::Parallelism,
        }
    }
}

impl DispatchPolicy {
    /// Inline when the space is small or the candidates are short
    pub fn is_sequential(&self, space: &SearchSpace) -> bool {
        space.size() <= self.sequential_space_threshold as u128
            || space.length() <= self.sequential_max_length
    }

    /// Workers for a parallel iteration (before clamping to the space)
    pub fn worker_count(&self, worker_budget: usize, length: usize) -> usize {
        let workers = match self.worker_cap {
            WorkerCap::Parallelism => worker_budget.min(num_cpus::get()),
            WorkerCap::Budget => worker_budget,
            WorkerCap::Length => worker_budget.min(length),
        };
        workers.max(1)
    }
}

/// Execution mode chosen for one length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    Sequential,
    Parallel,
}

// ============================================================================
// Request / Result
// ============================================================================

/// Input of [`run_search`]
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Plaintext, or the hex digest for digest algorithms
    pub target: String,
    pub algorithm: AlgorithmChoice,
    pub min_length: usize,
    pub max_length: usize,
    pub charset: Vec<char>,
    pub worker_budget: usize,
    pub max_attempts: Option<u64>,
}

impl SearchRequest {
    pub fn new(target: impl Into<String>, algorithm: AlgorithmChoice, charset: &str) -> Self {
        Self {
            target: target.into(),
            algorithm,
            min_length: 1,
            max_length: 6,
            charset: charset.chars().collect(),
            worker_budget: num_cpus::get(),
            max_attempts: None,
        }
    }

    pub fn with_lengths(mut self, min: usize, max: usize) -> Self {
        self.min_length = min;
        self.max_length = max;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.worker_budget = workers;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchOutcome {
    Found,
    SpaceExhausted,
    BudgetExhausted,
    TimedOut,
}

/// Result of one full run across all attempted lengths
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub success: bool,
    pub password: Option<String>,
    pub elapsed: Duration,
    /// Winning worker's attempt count on success, candidates tried otherwise
    pub total_attempts: u64,
    pub algorithm: AlgorithmChoice,
    /// Every candidate compared across all lengths and workers
    pub attempts_enumerated: u64,
    pub lengths_searched: Vec<usize>,
    pub outcome: SearchOutcome,
    pub started_at: DateTime<Utc>,
}

/// Progress updates emitted during a run
#[derive(Debug, Clone)]
pub enum SearchProgress {
    /// A length iteration is about to dispatch
    LengthStarted {
        length: usize,
        space_size: u128,
        planned: u128,
        mode: DispatchMode,
        workers: usize,
    },
    /// A length iteration finished without a match
    LengthFinished { length: usize, attempts: u64 },
    /// The target was found
    Found { length: usize, password: String },
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Validated search, ready to run
#[derive(Debug, Clone)]
pub struct SearchOrchestrator {
    matcher: Matcher,
    charset: Vec<char>,
    min_length: usize,
    max_length: usize,
    worker_budget: usize,
    max_attempts: Option<u64>,
    policy: DispatchPolicy,
    time_limit: Option<Duration>,
}

/// Totals of one length iteration
struct LengthOutcome {
    attempts: u64,
    winner: Option<(String, u64)>,
}

impl SearchOrchestrator {
    /// Validate `request`. Every configuration error surfaces here, before
    /// any candidate is tried.
    pub fn new(request: &SearchRequest) -> SearchResult<Self> {
        let target = Target::parse(&request.target, request.algorithm)?;

        if request.charset.is_empty() {
            return Err(SearchError::EmptyCharset);
        }
        if request.min_length == 0 {
            return Err(SearchError::ZeroLength);
        }
        if request.max_length < request.min_length {
            return Err(SearchError::InvalidLengthRange {
                min: request.min_length,
                max: request.max_length,
            });
        }
        if request.worker_budget == 0 {
            return Err(SearchError::ZeroWorkers);
        }

        let charset = dedup_charset(&request.charset);
        // Fail on oversized spaces now rather than mid-run
        SearchSpace::new(&charset, request.max_length)?;

        Ok(Self {
            matcher: Matcher::new(target),
            charset,
            min_length: request.min_length,
            max_length: request.max_length,
            worker_budget: request.worker_budget,
            max_attempts: request.max_attempts,
            policy: DispatchPolicy::default(),
            time_limit: None,
        })
    }

    pub fn with_policy(mut self, policy: DispatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Stop escalating once this much time has passed. Checked between
    /// lengths only; an in-flight length always completes.
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn policy(&self) -> &DispatchPolicy {
        &self.policy
    }

    /// Run the search
    pub fn run(&self) -> SearchResult<RunResult> {
        self.run_with_progress(|_| {})
    }

    /// Run the search, reporting progress from the orchestrating thread
    pub fn run_with_progress<F>(&self, on_progress: F) -> SearchResult<RunResult>
    where
        F: Fn(SearchProgress),
    {
        let started_at = Utc::now();
        let start = Instant::now();
        let algorithm = self.matcher.target().algorithm();

        info!(
            algorithm = %algorithm,
            charset_len = self.charset.len(),
            min_length = self.min_length,
            max_length = self.max_length,
            worker_budget = self.worker_budget,
            max_attempts = ?self.max_attempts,
            "Starting search"
        );

        let mut enumerated = 0u64;
        let mut lengths_searched = Vec::new();
        let mut outcome = SearchOutcome::SpaceExhausted;
        let mut winner: Option<(String, u64)> = None;

        for length in self.min_length..=self.max_length {
            if let Some(limit) = self.time_limit {
                if start.elapsed() >= limit {
                    info!(length, elapsed = ?start.elapsed(), "Time limit reached");
                    outcome = SearchOutcome::TimedOut;
                    break;
                }
            }

            let remaining = self.max_attempts.map(|max| max.saturating_sub(enumerated));
            if remaining == Some(0) {
                outcome = SearchOutcome::BudgetExhausted;
                break;
            }

            let space = SearchSpace::new(&self.charset, length)?;
            let planned = match remaining {
                Some(r) => space.size().min(r as u128),
                None => space.size(),
            };

            let result = self.search_length(&space, planned, &on_progress)?;
            enumerated += result.attempts;
            lengths_searched.push(length);

            if let Some((password, attempts)) = result.winner {
                info!(length, attempts, "Match found");
                on_progress(SearchProgress::Found {
                    length,
                    password: password.clone(),
                });
                winner = Some((password, attempts));
                outcome = SearchOutcome::Found;
                break;
            }

            on_progress(SearchProgress::LengthFinished {
                length,
                attempts: result.attempts,
            });

            if planned < space.size() {
                info!(length, enumerated, "Attempt budget exhausted");
                outcome = SearchOutcome::BudgetExhausted;
                break;
            }
        }

        let elapsed = start.elapsed();
        let (success, password, total_attempts) = match winner {
            Some((password, attempts)) => (true, Some(password), attempts),
            None => (false, None, enumerated),
        };

        info!(
            success,
            outcome = ?outcome,
            attempts = enumerated,
            elapsed = %humantime::format_duration(elapsed),
            "Search finished"
        );

        Ok(RunResult {
            success,
            password,
            elapsed,
            total_attempts,
            algorithm,
            attempts_enumerated: enumerated,
            lengths_searched,
            outcome,
            started_at,
        })
    }

    /// Search the first `planned` indices of `space`
    fn search_length<F>(
        &self,
        space: &SearchSpace,
        planned: u128,
        on_progress: &F,
    ) -> SearchResult<LengthOutcome>
    where
        F: Fn(SearchProgress),
    {
        let termination = TerminationState::new();
        let sequential = self.policy.is_sequential(space);
        let (mode, partitions) = if sequential {
            (DispatchMode::Sequential, plan(planned, 1))
        } else {
            let workers = self.policy.worker_count(self.worker_budget, space.length());
            (DispatchMode::Parallel, plan(planned, workers))
        };

        debug!(
            length = space.length(),
            space_size = %space.size(),
            planned = %planned,
            mode = ?mode,
            workers = partitions.len(),
            "Dispatching length"
        );
        on_progress(SearchProgress::LengthStarted {
            length: space.length(),
            space_size: space.size(),
            planned,
            mode,
            workers: partitions.len(),
        });

        let attempts: u64 = match mode {
            DispatchMode::Sequential => partitions
                .iter()
                .map(|&p| worker::run(space, &self.matcher, p, &termination))
                .sum(),
            DispatchMode::Parallel => self.run_parallel(space, &partitions, &termination)?,
        };

        let winner = termination
            .winner()
            .map(|w| (w.password.clone(), w.attempts));

        Ok(LengthOutcome { attempts, winner })
    }

    /// One scoped thread per partition; all are joined before returning
    fn run_parallel(
        &self,
        space: &SearchSpace,
        partitions: &[Partition],
        termination: &TerminationState,
    ) -> SearchResult<u64> {
        let length = space.length();

        thread::scope(|scope| -> SearchResult<u64> {
            let mut handles = Vec::with_capacity(partitions.len());
            for (id, &partition) in partitions.iter().enumerate() {
                let spawned = thread::Builder::new()
                    .name(format!("keydrill-worker-{id}"))
                    .spawn_scoped(scope, move || {
                        let _guard = AbortOnPanic(termination);
                        worker::run(space, &self.matcher, partition, termination)
                    });
                match spawned {
                    Ok(handle) => handles.push((id, handle)),
                    Err(e) => {
                        // Already-running workers are joined by the scope
                        termination.abort();
                        return Err(SearchError::TaskFailed(e.to_string()));
                    }
                }
            }

            let mut total = 0u64;
            let mut panicked = None;
            for (id, handle) in handles {
                match handle.join() {
                    Ok(attempts) => total += attempts,
                    Err(_) => {
                        panicked.get_or_insert(id);
                    }
                }
            }

            match panicked {
                Some(worker) => Err(SearchError::WorkerPanicked { worker, length }),
                None => Ok(total),
            }
        })
    }
}

// ============================================================================
// Quick Functions
// ============================================================================

/// Validate and run a search with the default dispatch policy
pub fn run_search(request: &SearchRequest) -> SearchResult<RunResult> {
    SearchOrchestrator::new(request)?.run()
}

/// Async wrapper for running a search inside a tokio runtime
pub async fn run_search_async(request: SearchRequest) -> SearchResult<RunResult> {
    tokio::task::spawn_blocking(move || run_search(&request))
        .await
        .map_err(|e| SearchError::TaskFailed(e.to_string()))?
}

// ============================================================================
// Tests
// ============================================================================

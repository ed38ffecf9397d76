//! Worker - Walks one partition of the keyspace
//!
//! Workers share a [`TerminationState`] per length. The winner is claimed
//! through a single-assignment cell, and the `found` flag is raised only
//! after the cell holds the payload, so a reader that sees `found` always
//! sees a password. A separate `aborted` flag stops every worker when a
//! sibling fails.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use tracing::trace;

use super::keyspace::SearchSpace;
use super::matcher::Matcher;
use super::partition::Partition;

/// The candidate that matched and the winning worker's 1-based attempt count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Winner {
    pub password: String,
    pub attempts: u64,
}

/// Shared stop flag and winner slot for one length iteration
#[derive(Debug, Default)]
pub struct TerminationState {
    found: AtomicBool,
    aborted: AtomicBool,
    winner: OnceLock<Winner>,
}

impl TerminationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cheap poll used by workers between candidates
    pub fn is_found(&self) -> bool {
        self.found.load(Ordering::Relaxed)
    }

    /// Tell every worker to stop without a result
    pub fn abort(&self) {
        self.aborted.store(true, Ordering::Relaxed);
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted.load(Ordering::Relaxed)
    }

    /// Checked by workers before each candidate
    pub fn should_stop(&self) -> bool {
        self.is_found() || self.is_aborted()
    }

    /// Try to record `password` as the result. Only the first call wins;
    /// later callers get `false` and their result is dropped.
    pub fn try_claim(&self, password: String, attempts: u64) -> bool {
        let claimed = self.winner.set(Winner { password, attempts }).is_ok();
        if claimed {
            self.found.store(true, Ordering::Release);
        }
        claimed
    }

    /// The winning candidate, if any worker has claimed one
    pub fn winner(&self) -> Option<&Winner> {
        self.winner.get()
    }
}

/// Aborts the shared state if dropped while its thread is unwinding
pub struct AbortOnPanic<'a>(pub &'a TerminationState);

impl Drop for AbortOnPanic<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            self.0.abort();
        }
    }
}

/// Search `partition` in increasing index order.
///
/// Returns the number of candidates compared, including the winning one.
/// Stops before the next candidate once any worker has found the target
/// or the search was aborted.
pub fn run(
    space: &SearchSpace,
    matcher: &Matcher,
    partition: Partition,
    termination: &TerminationState,
) -> u64 {
    let mut attempts = 0u64;
    let mut candidate = String::with_capacity(space.length());

    for index in partition.start..partition.end {
        if termination.should_stop() {
            break;
        }

        // Partitions never reach past the space, so this cannot fail
        space
            .decode_into(index, &mut candidate)
            .unwrap_or_else(|e| panic!("partition escaped keyspace: {e}"));
        attempts += 1;

        if matcher.matches(&candidate) {
            if termination.try_claim(candidate.clone(), attempts) {
                trace!(index = %index, attempts, "Worker claimed match");
            }
            break;
        }
    }

    attempts
}

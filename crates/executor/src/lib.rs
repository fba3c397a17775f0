//! Concurrent execution for batches of independent requests.
//!
//! A batch is "settled": every future runs to completion and its outcome is
//! kept, so one failure never cancels its siblings. Results come back in
//! input order regardless of completion order.
//!
//! ## Usage
//!
//! ```ignore
//! use folio_executor::SettleExecutor;
//!
//! let executor = SettleExecutor::new(4);
//! let settled = executor.settle_all(requests.into_iter().map(|r| provider.enhance(r))).await;
//! let contents: Vec<_> = settled.successes().collect();
//! ```

use futures::stream::{self, StreamExt};
use std::future::Future;

/// Runs futures with a cap on how many are in flight at once.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettleExecutor {
    max_in_flight: usize,
}

impl SettleExecutor {
    /// Default cap on concurrent outbound requests.
    pub const DEFAULT_CONCURRENCY: usize = 4;

    /// Creates an executor that keeps at most `max_in_flight` futures running.
    /// A cap of zero is treated as one.
    pub fn new(max_in_flight: usize) -> Self {
        Self {
            max_in_flight: max_in_flight.max(1),
        }
    }

    /// Runs one future at a time.
    pub fn sequential() -> Self {
        Self::new(1)
    }

    pub fn parallelism(&self) -> usize {
        self.max_in_flight
    }

    /// Drives every future to completion and returns all outcomes in input order.
    pub async fn settle_all<I, Fut, T, E>(&self, futures: I) -> Settled<T, E>
    where
        I: IntoIterator<Item = Fut>,
        Fut: Future<Output = Result<T, E>>,
    {
        let results: Vec<Result<T, E>> = stream::iter(futures)
            .buffered(self.max_in_flight)
            .collect()
            .await;
        let settled = Settled(results);
        log::debug!(
            "Settled batch of {}: {} succeeded, {} failed",
            settled.len(),
            settled.success_count(),
            settled.len() - settled.success_count()
        );
        settled
    }
}

impl Default for SettleExecutor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CONCURRENCY)
    }
}

/// The outcomes of a settled batch, one per input, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Settled<T, E>(pub Vec<Result<T, E>>);

impl<T, E> Settled<T, E> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn success_count(&self) -> usize {
        self.0.iter().filter(|r| r.is_ok()).count()
    }

    pub fn results(&self) -> &[Result<T, E>] {
        &self.0
    }

    pub fn into_results(self) -> Vec<Result<T, E>> {
        self.0
    }

    /// Keeps the successful values, dropping failures.
    pub fn successes(self) -> impl Iterator<Item = T> {
        self.0.into_iter().filter_map(Result::ok)
    }

    pub fn failures(self) -> impl Iterator<Item = E> {
        self.0.into_iter().filter_map(Result::err)
    }
}

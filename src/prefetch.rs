//! Prefetch Module
//!
//! Best-effort warm-up of commonly used reads, e.g. reference data right
//! after sign-in. Runs every warm-up concurrently and never fails.

use std::fmt::Display;
use std::future::Future;

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;
use tracing::{debug, warn};

/// Outcome of a prefetch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrefetchReport {
    /// Names of the warm-ups that completed
    pub warmed: Vec<String>,
    /// Names of the warm-ups that failed
    pub failed: Vec<String>,
}

impl PrefetchReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

// == Prefetch ==
/// A set of named warm-up calls to run together.
///
/// ```ignore
/// let report = Prefetch::new()
///     .add("categories", categories.call(()))
///     .add("payment_methods", payment_methods.call(()))
///     .run()
///     .await;
/// ```
#[derive(Default)]
pub struct Prefetch<'a> {
    tasks: Vec<(String, BoxFuture<'a, Result<(), String>>)>,
}

impl<'a> Prefetch<'a> {
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Adds a warm-up. Its result is discarded; only success or failure is kept.
    pub fn add<T, E, Fut>(mut self, name: impl Into<String>, warmup: Fut) -> Self
    where
        Fut: Future<Output = Result<T, E>> + Send + 'a,
        T: 'a,
        E: Display + 'a,
    {
        let task = async move { warmup.await.map(|_| ()).map_err(|e| e.to_string()) };
        self.tasks.push((name.into(), task.boxed()));
        self
    }

    /// Number of warm-ups queued.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    // == Run ==
    /// Runs every warm-up concurrently, logging failures instead of returning them.
    pub async fn run(self) -> PrefetchReport {
        let (names, tasks): (Vec<String>, Vec<_>) = self.tasks.into_iter().unzip();
        let results = join_all(tasks).await;

        let mut report = PrefetchReport::default();
        for (name, result) in names.into_iter().zip(results) {
            match result {
                Ok(()) => report.warmed.push(name),
                Err(e) => {
                    warn!("Failed to prefetch {}: {}", name, e);
                    report.failed.push(name);
                }
            }
        }

        debug!(
            "Prefetch finished: {} warmed, {} failed",
            report.warmed.len(),
            report.failed.len()
        );
        report
    }
}

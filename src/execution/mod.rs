//! Execution engine for grouped summaries.
//!
//! Groups are disjoint and [`crate::summary::summarize`] is a pure function, so groups are the
//! one axis that can be summarized in parallel. Within one group, columns are still visited
//! sequentially so first-seen tie-breaking is unaffected. This module provides:
//!
//! - Optional parallel summarization of groups on a dedicated rayon pool
//! - Real-time metrics + observer hooks for monitoring
//!
//! Output order never depends on scheduling: groups always come back in first-seen order.

mod observer;

use std::sync::Arc;
use std::time::Instant;

use indexmap::IndexMap;
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::error::SummaryResult;
use crate::summary::{partition, summarize, GroupKey, GroupedSummary, RowSetSummary};
use crate::types::{Header, Row};

pub use observer::{
    ExecutionEvent, ExecutionMetrics, ExecutionMetricsSnapshot, ExecutionObserver, StdErrExecutionObserver,
};

/// Configuration for the [`ExecutionEngine`].
#[derive(Debug, Clone, Default)]
pub struct ExecutionOptions {
    /// Summarize groups on a worker pool instead of the calling thread.
    pub parallel_groups: bool,
    /// Number of worker threads when `parallel_groups` is set.
    ///
    /// If `None`, uses the platform's available parallelism.
    pub num_threads: Option<usize>,
}

/// Runs grouped summaries, sequentially or across a worker pool.
pub struct ExecutionEngine {
    pool: Option<ThreadPool>,
    observer: Option<Arc<dyn ExecutionObserver>>,
    metrics: Arc<ExecutionMetrics>,
}

impl ExecutionEngine {
    /// Create a new engine with the given options.
    ///
    /// A worker pool is only built when `parallel_groups` is set.
    pub fn new(opts: &ExecutionOptions) -> SummaryResult<Self> {
        let pool = if opts.parallel_groups {
            let n_threads = opts
                .num_threads
                .unwrap_or_else(|| std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1))
                .max(1);
            Some(ThreadPoolBuilder::new().num_threads(n_threads).build()?)
        } else {
            None
        };

        Ok(Self {
            pool,
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        })
    }

    /// A sequential engine; never fails.
    pub fn sequential() -> Self {
        Self {
            pool: None,
            observer: None,
            metrics: Arc::new(ExecutionMetrics::new()),
        }
    }

    /// Attach an observer for execution events (metrics/logging).
    pub fn with_observer(mut self, observer: Arc<dyn ExecutionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Get a handle to real-time execution metrics.
    pub fn metrics(&self) -> Arc<ExecutionMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Whether groups are summarized on a worker pool.
    pub fn is_parallel(&self) -> bool {
        self.pool.is_some()
    }

    /// Group `rows` by `keys` and summarize each group over the full header.
    ///
    /// Produces the same result as [`crate::summary::grouped_summary`]. Key validation happens
    /// before any row is partitioned.
    pub fn grouped_summary<S: AsRef<str>>(
        &self,
        header: &Header,
        rows: &[Row],
        keys: &[S],
    ) -> SummaryResult<GroupedSummary> {
        let (key_columns, buckets) = partition(header, rows, keys)?.into_parts();
        let buckets: Vec<(GroupKey, Vec<&Row>)> = buckets.into_iter().collect();

        let start = Instant::now();
        self.metrics.begin_run();
        self.emit(ExecutionEvent::RunStarted {
            groups: buckets.len(),
            parallel: self.is_parallel(),
        });

        let summarized: Vec<(GroupKey, RowSetSummary)> = match &self.pool {
            Some(pool) => pool.install(|| {
                buckets
                    .into_par_iter()
                    .enumerate()
                    .map(|(index, (key, group_rows))| (key, self.summarize_group(header, index, &group_rows)))
                    .collect()
            }),
            None => buckets
                .into_iter()
                .enumerate()
                .map(|(index, (key, group_rows))| (key, self.summarize_group(header, index, &group_rows)))
                .collect(),
        };
        let groups: IndexMap<GroupKey, RowSetSummary> = summarized.into_iter().collect();

        self.metrics.end_run(start.elapsed());
        self.emit(ExecutionEvent::RunFinished {
            elapsed: start.elapsed(),
            metrics: self.metrics.snapshot(),
        });

        Ok(GroupedSummary::new(key_columns, groups))
    }

    fn summarize_group(&self, header: &Header, index: usize, rows: &[&Row]) -> RowSetSummary {
        self.metrics.on_group_start(rows.len());
        self.emit(ExecutionEvent::GroupStarted {
            index,
            row_count: rows.len(),
        });

        let summary = summarize(header, rows);

        self.emit(ExecutionEvent::GroupFinished { index });
        self.metrics.on_group_end();
        summary
    }

    fn emit(&self, event: ExecutionEvent) {
        if let Some(obs) = &self.observer {
            obs.on_event(&event);
        }
    }
}

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::Duration;

/// Execution events emitted while summarizing groups.
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    RunStarted { groups: usize, parallel: bool },
    GroupStarted { index: usize, row_count: usize },
    GroupFinished { index: usize },
    RunFinished {
        elapsed: Duration,
        metrics: ExecutionMetricsSnapshot,
    },
}

/// Observer hook for execution events.
pub trait ExecutionObserver: Send + Sync {
    fn on_event(&self, event: &ExecutionEvent);
}

/// A simple stderr logger for execution events.
#[derive(Default)]
pub struct StdErrExecutionObserver;

impl ExecutionObserver for StdErrExecutionObserver {
    fn on_event(&self, event: &ExecutionEvent) {
        eprintln!("{event:?}");
    }
}

/// Real-time metrics for a grouped-summary run.
///
/// The engine updates these counters while groups are summarized; callers can snapshot them at
/// any time.
pub struct ExecutionMetrics {
    run_id: AtomicU64,
    elapsed_ns: AtomicU64,

    rows_processed: AtomicU64,
    groups_started: AtomicU64,
    groups_finished: AtomicU64,

    active_groups: AtomicUsize,
    max_active_groups: AtomicUsize,
}

impl ExecutionMetrics {
    pub fn new() -> Self {
        Self {
            run_id: AtomicU64::new(0),
            elapsed_ns: AtomicU64::new(0),
            rows_processed: AtomicU64::new(0),
            groups_started: AtomicU64::new(0),
            groups_finished: AtomicU64::new(0),
            active_groups: AtomicUsize::new(0),
            max_active_groups: AtomicUsize::new(0),
        }
    }

    pub fn begin_run(&self) {
        let _ = self.run_id.fetch_add(1, Ordering::SeqCst);

        self.elapsed_ns.store(0, Ordering::SeqCst);
        self.rows_processed.store(0, Ordering::SeqCst);
        self.groups_started.store(0, Ordering::SeqCst);
        self.groups_finished.store(0, Ordering::SeqCst);
        self.active_groups.store(0, Ordering::SeqCst);
        self.max_active_groups.store(0, Ordering::SeqCst);
    }

    pub fn end_run(&self, elapsed: Duration) {
        self.elapsed_ns
            .store(elapsed.as_nanos().min(u64::MAX as u128) as u64, Ordering::SeqCst);
    }

    pub fn on_group_start(&self, row_count: usize) {
        let _ = self.groups_started.fetch_add(1, Ordering::SeqCst);
        let _ = self.rows_processed.fetch_add(row_count as u64, Ordering::SeqCst);
        let now = self.active_groups.fetch_add(1, Ordering::SeqCst) + 1;
        update_max_usize(&self.max_active_groups, now);
    }

    pub fn on_group_end(&self) {
        let _ = self.groups_finished.fetch_add(1, Ordering::SeqCst);
        let _ = self.active_groups.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn snapshot(&self) -> ExecutionMetricsSnapshot {
        let elapsed_ns = self.elapsed_ns.load(Ordering::SeqCst);
        let elapsed = if elapsed_ns > 0 {
            Some(Duration::from_nanos(elapsed_ns))
        } else {
            None
        };

        ExecutionMetricsSnapshot {
            run_id: self.run_id.load(Ordering::SeqCst),
            elapsed,
            rows_processed: self.rows_processed.load(Ordering::SeqCst),
            groups_started: self.groups_started.load(Ordering::SeqCst),
            groups_finished: self.groups_finished.load(Ordering::SeqCst),
            max_active_groups: self.max_active_groups.load(Ordering::SeqCst),
        }
    }
}

impl Default for ExecutionMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn update_max_usize(dst: &AtomicUsize, now: usize) {
    loop {
        let cur = dst.load(Ordering::SeqCst);
        if now <= cur {
            break;
        }
        if dst
            .compare_exchange(cur, now, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            break;
        }
    }
}

/// Immutable snapshot of [`ExecutionMetrics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionMetricsSnapshot {
    pub run_id: u64,
    pub elapsed: Option<Duration>,
    pub rows_processed: u64,
    pub groups_started: u64,
    pub groups_finished: u64,
    pub max_active_groups: usize,
}

impl fmt::Display for ExecutionMetricsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "run_id={}, rows_processed={}, groups={}/{}, max_active_groups={}, elapsed={:?}",
            self.run_id,
            self.rows_processed,
            self.groups_finished,
            self.groups_started,
            self.max_active_groups,
            self.elapsed
        )
    }
}

//! Dispatching policies for the ready set.
//!
//! A policy decides which ready process runs next. Every policy maps a
//! process to a [`DispatchKey`]; the smallest key wins. Keys end in the
//! process id, which is unique within a batch, so ordering is a strict
//! total order and every run is reproducible.
//!
//! # Usage
//!
//! ```
//! use cpu_schedule::dispatching::{rules, SchedulingPolicy};
//! use cpu_schedule::models::ProcessBatch;
//!
//! let batch = ProcessBatch::from_specs([(0, 8, 1), (0, 3, 2)]).unwrap();
//! let next = rules::Sjf.select_next(batch.records(), 0).unwrap();
//! assert_eq!(batch.records()[next].id(), 1);
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

mod queue;
pub mod rules;

pub use queue::ReadyQueue;
pub use rules::{Fcfs, Priority, PriorityOrder, Sjf};

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Debug};

use crate::models::{ProcessId, ProcessRecord, Ticks};
use crate::{Result, ScheduleError};

/// Ordering key a policy assigns to a ready process.
///
/// Compared lexicographically: `primary`, then `arrival_time`, then `id`.
/// **Lower key = dispatched first.**
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DispatchKey {
    /// Policy-specific criterion (arrival, burst, or signed priority).
    pub primary: i64,
    /// First tie-breaker.
    pub arrival_time: Ticks,
    /// Final tie-breaker.
    pub id: ProcessId,
}

impl DispatchKey {
    /// Builds a key with the standard tie-breakers taken from `record`.
    pub fn new(primary: i64, record: &ProcessRecord) -> Self {
        Self {
            primary,
            arrival_time: record.arrival_time(),
            id: record.id(),
        }
    }
}

/// A non-preemptive ready-set selection policy.
///
/// # Key Convention
/// **Lower key = higher precedence.** Implementations only define
/// [`dispatch_key`](Self::dispatch_key); comparison and selection are
/// derived from it.
pub trait SchedulingPolicy: Send + Sync + Debug {
    /// Short name (e.g., "FCFS", "SJF").
    fn name(&self) -> &'static str;

    /// Ordering key for a process.
    fn dispatch_key(&self, record: &ProcessRecord) -> DispatchKey;

    /// Long name used in reports.
    fn description(&self) -> &'static str {
        self.name()
    }

    /// Compares two processes; `Less` means `a` runs first.
    fn compare(&self, a: &ProcessRecord, b: &ProcessRecord) -> Ordering {
        self.dispatch_key(a).cmp(&self.dispatch_key(b))
    }

    /// Picks the next process among those eligible at `clock`.
    ///
    /// Eligible means arrived (`arrival_time <= clock`) and not terminated.
    /// Returns an index into `ready`; the slice is never modified.
    ///
    /// # Errors
    /// `EmptyReadySet` if no process is eligible.
    fn select_next(&self, ready: &[ProcessRecord], clock: Ticks) -> Result<usize> {
        ready
            .iter()
            .enumerate()
            .filter(|(_, r)| r.arrival_time() <= clock && !r.is_terminated())
            .min_by_key(|(_, r)| self.dispatch_key(r))
            .map(|(idx, _)| idx)
            .ok_or(ScheduleError::EmptyReadySet { clock })
    }
}

/// Built-in policy selector, used by configuration and reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// First-Come-First-Served.
    Fcfs,
    /// Shortest-Job-First.
    Sjf,
    /// Priority.
    Priority,
}

impl PolicyKind {
    /// All built-in policies, in report order.
    pub fn all() -> [PolicyKind; 3] {
        [PolicyKind::Fcfs, PolicyKind::Sjf, PolicyKind::Priority]
    }

    /// Instantiates the policy. `order` only affects `Priority`.
    pub fn build(self, order: PriorityOrder) -> Box<dyn SchedulingPolicy> {
        match self {
            PolicyKind::Fcfs => Box::new(Fcfs),
            PolicyKind::Sjf => Box::new(Sjf),
            PolicyKind::Priority => Box::new(Priority::new(order)),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyKind::Fcfs => "FCFS",
            PolicyKind::Sjf => "SJF",
            PolicyKind::Priority => "PRIORITY",
        };
        f.write_str(name)
    }
}

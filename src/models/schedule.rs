//! Dispatch timeline model.
//!
//! A schedule is the ordered list of CPU dispatches a run produced. On a
//! single non-preemptive CPU every process appears exactly once and the
//! intervals never overlap; gaps between them are idle time.

use serde::{Deserialize, Serialize};

use super::{ProcessId, Ticks};

/// A complete dispatch timeline for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Dispatches in execution order.
    pub dispatches: Vec<Dispatch>,
}

/// One process occupying the CPU over `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dispatch {
    /// Dispatched process.
    pub process_id: ProcessId,
    /// Clock value at dispatch.
    pub start: Ticks,
    /// Clock value at completion.
    pub end: Ticks,
}

impl Dispatch {
    /// Creates a dispatch.
    pub fn new(process_id: ProcessId, start: Ticks, end: Ticks) -> Self {
        Self {
            process_id,
            start,
            end,
        }
    }

    /// Length of the interval.
    #[inline]
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }

    /// Whether two intervals share any instant.
    #[inline]
    pub fn overlaps(&self, other: &Dispatch) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl Schedule {
    /// Creates an empty schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a dispatch.
    pub fn push(&mut self, dispatch: Dispatch) {
        self.dispatches.push(dispatch);
    }

    /// Number of dispatches.
    pub fn len(&self) -> usize {
        self.dispatches.len()
    }

    /// Whether nothing was dispatched.
    pub fn is_empty(&self) -> bool {
        self.dispatches.is_empty()
    }

    /// Makespan: latest end time (0 for an empty schedule).
    pub fn makespan(&self) -> Ticks {
        self.dispatches.iter().map(|d| d.end).max().unwrap_or(0)
    }

    /// Total time the CPU was busy.
    pub fn busy_time(&self) -> Ticks {
        self.dispatches.iter().map(Dispatch::duration).sum()
    }

    /// Time within `[0, makespan)` the CPU was idle.
    pub fn idle_time(&self) -> Ticks {
        self.makespan() - self.busy_time()
    }

    /// Process ids in the order they ran.
    pub fn execution_order(&self) -> Vec<ProcessId> {
        self.dispatches.iter().map(|d| d.process_id).collect()
    }

    /// Finds the dispatch for a process.
    pub fn dispatch_for(&self, process_id: ProcessId) -> Option<&Dispatch> {
        self.dispatches.iter().find(|d| d.process_id == process_id)
    }

    /// CPU utilization over the makespan (`None` for an empty schedule).
    pub fn utilization(&self) -> Option<f64> {
        let makespan = self.makespan();
        if makespan <= 0 {
            return None;
        }
        Some(self.busy_time() as f64 / makespan as f64)
    }
}

//! Built-in dispatching policies.
//!
//! | Policy | Primary key | Tie-breakers |
//! |--------|-------------|--------------|
//! | FCFS | arrival time | id |
//! | SJF | burst time | arrival time, id |
//! | PRIORITY | priority (per [`PriorityOrder`]) | arrival time, id |
//!
//! All policies are non-preemptive: keys only matter at dispatch points.
//!
//! # References
//! - Silberschatz et al. (2018), "Operating System Concepts", §5.3

use serde::{Deserialize, Serialize};

use super::{DispatchKey, SchedulingPolicy};
use crate::models::ProcessRecord;

/// First-Come-First-Served.
///
/// Runs processes in arrival order; simultaneous arrivals run in input
/// order. Burst time and priority are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl SchedulingPolicy for Fcfs {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn dispatch_key(&self, record: &ProcessRecord) -> DispatchKey {
        DispatchKey::new(record.arrival_time(), record)
    }

    fn description(&self) -> &'static str {
        "First Come First Serve (FCFS) Scheduling"
    }
}

/// Shortest-Job-First (non-preemptive).
///
/// Among arrived processes, runs the one with the smallest burst time.
/// Minimizes average waiting time when all processes arrive together.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on a single machine.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl SchedulingPolicy for Sjf {
    fn name(&self) -> &'static str {
        "SJF"
    }

    fn dispatch_key(&self, record: &ProcessRecord) -> DispatchKey {
        DispatchKey::new(record.burst_time(), record)
    }

    fn description(&self) -> &'static str {
        "Shortest Job First (SJF) Scheduling"
    }
}

/// Which end of the priority scale is more important.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityOrder {
    /// Larger value runs first (default).
    #[default]
    HigherFirst,
    /// Smaller value runs first (Unix nice-style).
    LowerFirst,
}

/// Priority scheduling (non-preemptive).
///
/// Among arrived processes, runs the most important one according to
/// [`PriorityOrder`]. A more important process arriving while another
/// runs waits for the next dispatch point.
#[derive(Debug, Clone, Copy, Default)]
pub struct Priority {
    order: PriorityOrder,
}

impl Priority {
    /// Creates a priority policy with the given convention.
    pub fn new(order: PriorityOrder) -> Self {
        Self { order }
    }

    /// The priority convention in use.
    pub fn order(&self) -> PriorityOrder {
        self.order
    }
}

impl SchedulingPolicy for Priority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn dispatch_key(&self, record: &ProcessRecord) -> DispatchKey {
        let priority = i64::from(record.priority());
        let primary = match self.order {
            PriorityOrder::HigherFirst => -priority,
            PriorityOrder::LowerFirst => priority,
        };
        DispatchKey::new(primary, record)
    }

    fn description(&self) -> &'static str {
        "Priority Scheduling"
    }
}

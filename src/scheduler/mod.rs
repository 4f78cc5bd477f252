//! Scheduling engine, policy comparison and run metrics.
//!
//! # Algorithm
//!
//! `Simulator` drives a single non-preemptive CPU: it admits arrived
//! processes, lets a dispatching policy pick one, runs it to completion
//! and repeats. Runs are pure functions of `(batch, policy)`.
//!
//! # Metrics
//!
//! `SchedulingMetrics` computes average waiting, turnaround and response
//! times, CPU utilization and throughput over the run's makespan.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 3

mod compare;
mod engine;
mod metrics;

pub use compare::{compare_policies, compare_policies_parallel, CompareOptions};
pub use engine::{simulate, ClockMode, SimulationRun, Simulator, SimulatorConfig};
pub use metrics::SchedulingMetrics;

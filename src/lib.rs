//! Non-preemptive CPU scheduling simulator.
//!
//! Simulates First-Come-First-Served, Shortest-Job-First and Priority
//! scheduling on a single CPU and reports waiting time, turnaround time,
//! CPU utilization and throughput for each run.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessRecord`, `ProcessBatch`, `Schedule`
//! - **`dispatching`**: `SchedulingPolicy` trait and the FCFS, SJF and
//!   Priority policies
//! - **`scheduler`**: The simulation engine, policy comparison and metrics
//! - **`validation`**: Descriptor checks and post-run invariant checks
//! - **`workload`**: Seeded random workloads for benchmarking
//! - **`report`**: Text and JSON report sinks
//!
//! # Example
//!
//! ```
//! use cpu_schedule::dispatching::PolicyKind;
//! use cpu_schedule::models::ProcessBatch;
//! use cpu_schedule::scheduler::{compare_policies, CompareOptions};
//!
//! let batch = ProcessBatch::from_specs([(0, 5, 1), (1, 3, 5), (2, 8, 2)])?;
//! let runs = compare_policies(&batch, &PolicyKind::all(), CompareOptions::default())?;
//!
//! for run in &runs {
//!     assert!((run.metrics.avg_waiting_time - 10.0 / 3.0).abs() < 1e-10);
//! }
//! # Ok::<(), cpu_schedule::ScheduleError>(())
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod config;
pub mod dispatching;
mod error;
pub mod models;
pub mod report;
pub mod scheduler;
pub mod telemetry;
pub mod validation;
pub mod workload;

pub use error::{Result, ScheduleError};

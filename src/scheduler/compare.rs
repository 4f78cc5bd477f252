//! Side-by-side policy comparison.
//!
//! Runs several policies over the same batch. Each run gets its own
//! snapshot, so the order policies run in never changes their results.

use std::thread;

use tracing::info;

use super::{ClockMode, SimulationRun, Simulator, SimulatorConfig};
use crate::dispatching::{PolicyKind, PriorityOrder};
use crate::models::ProcessBatch;
use crate::Result;

/// Options shared by every run in a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompareOptions {
    /// Priority convention for the `Priority` policy.
    pub priority_order: PriorityOrder,
    /// Idle clock behaviour for every run.
    pub clock_mode: ClockMode,
}

impl CompareOptions {
    fn simulator(&self, kind: PolicyKind) -> Simulator {
        Simulator::from_kind(kind, self.priority_order)
            .with_config(SimulatorConfig::default().with_clock_mode(self.clock_mode))
    }
}

/// Runs each policy in turn; results follow `kinds` order.
pub fn compare_policies(
    batch: &ProcessBatch,
    kinds: &[PolicyKind],
    options: CompareOptions,
) -> Result<Vec<SimulationRun>> {
    kinds
        .iter()
        .map(|&kind| {
            let run = options.simulator(kind).run(batch)?;
            log_run(&run);
            Ok(run)
        })
        .collect()
}

/// Runs each policy on its own scoped thread; results follow `kinds` order.
///
/// Produces exactly what [`compare_policies`] produces.
pub fn compare_policies_parallel(
    batch: &ProcessBatch,
    kinds: &[PolicyKind],
    options: CompareOptions,
) -> Result<Vec<SimulationRun>> {
    let results: Vec<Result<SimulationRun>> = thread::scope(|scope| {
        let handles: Vec<_> = kinds
            .iter()
            .map(|&kind| scope.spawn(move || options.simulator(kind).run(batch)))
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(panic) => std::panic::resume_unwind(panic),
            })
            .collect()
    });

    results
        .into_iter()
        .map(|result| {
            let run = result?;
            log_run(&run);
            Ok(run)
        })
        .collect()
}

fn log_run(run: &SimulationRun) {
    info!(
        policy = %run.policy,
        processes = run.metrics.process_count,
        avg_waiting = run.metrics.avg_waiting_time,
        avg_turnaround = run.metrics.avg_turnaround_time,
        utilization = run.metrics.cpu_utilization,
        "policy run finished"
    );
}

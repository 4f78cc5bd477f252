//! Non-preemptive single-CPU scheduling engine.
//!
//! # Algorithm
//!
//! 1. Start at `clock = 0` with every process pending, sorted by arrival.
//! 2. **Admit**: move every pending process with `arrival <= clock` into
//!    the ready set.
//! 3. **Idle advance**: if nothing is ready, move the clock forward (see
//!    [`ClockMode`]).
//! 4. **Dispatch**: otherwise let the policy pick one ready process, run it
//!    to completion at `clock`, and advance `clock` by its burst.
//! 5. Stop when nothing is pending or ready.
//!
//! Every run works on a fresh [`ProcessBatch::snapshot`]; the caller's
//! batch is never mutated.
//!
//! # Complexity
//! `ClockMode::Jump`: O(n log n) (heap-backed ready set).
//! `ClockMode::Tick`: O(n² + makespan) (linear scan per dispatch, one step
//! per idle tick).

use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span};

use super::SchedulingMetrics;
use crate::dispatching::{PolicyKind, PriorityOrder, ReadyQueue, SchedulingPolicy};
use crate::models::{Dispatch, ProcessBatch, ProcessRecord, Schedule, Ticks};
use crate::{Result, ScheduleError};

/// How the clock moves while the CPU is idle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockMode {
    /// Jump straight to the next arrival (default).
    #[default]
    Jump,
    /// Advance one tick at a time. Produces identical runs, only slower.
    ///
    /// Each idle tick is one loop iteration, so the run time grows with the
    /// length of the idle gaps, not the number of processes. An arrival gap
    /// of 10^12 ticks is effectively unbounded; use `Jump` for such inputs.
    Tick,
}

/// Engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Idle clock behaviour.
    pub clock_mode: ClockMode,
}

impl SimulatorConfig {
    /// Sets the clock mode.
    pub fn with_clock_mode(mut self, clock_mode: ClockMode) -> Self {
        self.clock_mode = clock_mode;
        self
    }
}

/// Outcome of one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationRun {
    /// Short policy name (e.g., "SJF").
    pub policy: String,
    /// Terminated records, in input order.
    pub records: Vec<ProcessRecord>,
    /// Dispatches in execution order.
    pub schedule: Schedule,
    /// Aggregated metrics (the empty sentinel for an empty batch).
    pub metrics: SchedulingMetrics,
}

impl SimulationRun {
    /// Process ids in the order they ran.
    pub fn execution_order(&self) -> Vec<crate::models::ProcessId> {
        self.schedule.execution_order()
    }

    /// Waiting time per process, in input order.
    pub fn waiting_times(&self) -> Vec<Ticks> {
        self.records.iter().map(ProcessRecord::waiting_time).collect()
    }
}

/// Single-CPU, non-preemptive scheduling simulator.
///
/// # Example
///
/// ```
/// use cpu_schedule::dispatching::rules::Sjf;
/// use cpu_schedule::models::ProcessBatch;
/// use cpu_schedule::scheduler::Simulator;
///
/// let batch = ProcessBatch::from_specs([(0, 5, 1), (1, 3, 5), (2, 8, 2)]).unwrap();
/// let run = Simulator::new(Sjf).run(&batch).unwrap();
///
/// assert_eq!(run.execution_order(), vec![0, 1, 2]);
/// assert_eq!(run.waiting_times(), vec![0, 4, 6]);
/// assert_eq!(run.metrics.makespan, 16);
/// ```
#[derive(Debug)]
pub struct Simulator {
    policy: Box<dyn SchedulingPolicy>,
    config: SimulatorConfig,
}

impl Simulator {
    /// Creates a simulator for `policy` with default configuration.
    pub fn new<P: SchedulingPolicy + 'static>(policy: P) -> Self {
        Self::from_boxed(Box::new(policy))
    }

    /// Creates a simulator from a boxed policy.
    pub fn from_boxed(policy: Box<dyn SchedulingPolicy>) -> Self {
        Self {
            policy,
            config: SimulatorConfig::default(),
        }
    }

    /// Creates a simulator for a built-in policy.
    pub fn from_kind(kind: PolicyKind, order: PriorityOrder) -> Self {
        Self::from_boxed(kind.build(order))
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: SimulatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the clock mode.
    pub fn with_clock_mode(mut self, clock_mode: ClockMode) -> Self {
        self.config.clock_mode = clock_mode;
        self
    }

    /// The policy driving this simulator.
    pub fn policy(&self) -> &dyn SchedulingPolicy {
        self.policy.as_ref()
    }

    /// The active configuration.
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Simulates `batch` to completion.
    ///
    /// An empty batch completes immediately with empty-sentinel metrics.
    ///
    /// # Errors
    /// - `TimeOverflow` if a completion time would exceed `Ticks::MAX`.
    /// - `EmptyReadySet` only if the engine's own invariants are broken.
    pub fn run(&self, batch: &ProcessBatch) -> Result<SimulationRun> {
        simulate(batch, self.policy.as_ref(), &self.config)
    }
}

/// Simulates `batch` under `policy`.
///
/// Pure function of its inputs: the batch is snapshotted and no state
/// survives the call.
pub fn simulate(
    batch: &ProcessBatch,
    policy: &dyn SchedulingPolicy,
    config: &SimulatorConfig,
) -> Result<SimulationRun> {
    let span = debug_span!("simulate", policy = policy.name(), processes = batch.len());
    let _enter = span.enter();

    // Sorted descending so the earliest arrival sits at the end.
    let mut pending = batch.snapshot().into_records();
    pending.sort_by(|a, b| (b.arrival_time(), b.id()).cmp(&(a.arrival_time(), a.id())));

    let mut run = RunState {
        clock: 0,
        finished: Vec::with_capacity(pending.len()),
        schedule: Schedule::new(),
    };

    match config.clock_mode {
        ClockMode::Jump => run.drive_heap(policy, pending)?,
        ClockMode::Tick => run.drive_scan(policy, pending)?,
    }

    let RunState {
        clock,
        mut finished,
        schedule,
    } = run;
    finished.sort_by_key(ProcessRecord::id);

    let metrics = SchedulingMetrics::calculate_or_empty(policy.description(), &finished)?;
    debug!(
        makespan = clock,
        avg_waiting = metrics.avg_waiting_time,
        "run complete"
    );

    Ok(SimulationRun {
        policy: policy.name().to_string(),
        records: finished,
        schedule,
        metrics,
    })
}

struct RunState {
    clock: Ticks,
    finished: Vec<ProcessRecord>,
    schedule: Schedule,
}

impl RunState {
    /// Heap-backed ready set, clock jumps over idle gaps.
    fn drive_heap(
        &mut self,
        policy: &dyn SchedulingPolicy,
        mut pending: Vec<ProcessRecord>,
    ) -> Result<()> {
        let mut ready = ReadyQueue::with_capacity(policy, pending.len());

        loop {
            while let Some(record) = take_arrived(&mut pending, self.clock) {
                ready.push(record);
            }

            if let Some(record) = ready.pop() {
                self.dispatch(record)?;
            } else if let Some(next) = pending.last() {
                debug!(from = self.clock, to = next.arrival_time(), "cpu idle");
                self.clock = next.arrival_time();
            } else {
                return Ok(());
            }
        }
    }

    /// Vector ready set scanned by the policy, clock ticks over idle gaps.
    fn drive_scan(
        &mut self,
        policy: &dyn SchedulingPolicy,
        mut pending: Vec<ProcessRecord>,
    ) -> Result<()> {
        let mut ready: Vec<ProcessRecord> = Vec::new();

        while !(pending.is_empty() && ready.is_empty()) {
            while let Some(record) = take_arrived(&mut pending, self.clock) {
                ready.push(record);
            }

            if ready.is_empty() {
                self.clock += 1;
                continue;
            }

            let idx = policy.select_next(&ready, self.clock)?;
            let record = ready.swap_remove(idx);
            self.dispatch(record)?;
        }

        Ok(())
    }

    fn dispatch(&mut self, mut record: ProcessRecord) -> Result<()> {
        let start = self.clock;
        let end = start
            .checked_add(record.burst_time())
            .ok_or(ScheduleError::TimeOverflow { id: record.id() })?;
        record.run_at(start);

        debug!(
            pid = record.id(),
            start,
            end,
            waiting = record.waiting_time(),
            "dispatch"
        );

        self.schedule.push(Dispatch::new(record.id(), start, end));
        self.clock = end;
        self.finished.push(record);
        Ok(())
    }
}

/// Pops the earliest pending process if it has arrived by `clock`.
fn take_arrived(pending: &mut Vec<ProcessRecord>, clock: Ticks) -> Option<ProcessRecord> {
    match pending.last() {
        Some(record) if record.arrival_time() <= clock => pending.pop(),
        _ => None,
    }
}

//! Process record model.
//!
//! A process record is one simulated process: the immutable descriptor
//! supplied by the caller (arrival, burst, priority) plus the timing
//! fields the engine fills in when the process runs.
//!
//! # Priority Convention
//! By default a **higher numeric priority is more important**. The
//! `Priority` dispatching policy can be configured for the inverse
//! convention; the record itself only stores the raw value.

use serde::{Deserialize, Serialize};

/// Position of a process in the input sequence (0-based).
pub type ProcessId = usize;

/// Simulated time unit.
pub type Ticks = i64;

/// Lifecycle state of a process.
///
/// Only `Ready` and `Terminated` are reachable: processes run to completion
/// in one contiguous span. `Running` and `Blocked` are kept so the state
/// space matches a preemptive scheduler's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProcessState {
    /// Arrived or waiting to arrive; not yet dispatched.
    #[default]
    Ready,
    /// Currently on the CPU.
    Running,
    /// Waiting on an external event.
    Blocked,
    /// Ran to completion; timing fields are final.
    Terminated,
}

/// Input descriptor for one process.
///
/// The id is not part of the descriptor; it is assigned from the
/// descriptor's position when a batch is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessSpec {
    /// Time the process becomes ready.
    pub arrival_time: Ticks,
    /// CPU time required (must be at least 1).
    pub burst_time: Ticks,
    /// Scheduling priority.
    pub priority: i32,
}

impl ProcessSpec {
    /// Creates a descriptor.
    pub fn new(arrival_time: Ticks, burst_time: Ticks, priority: i32) -> Self {
        Self {
            arrival_time,
            burst_time,
            priority,
        }
    }
}

impl From<(Ticks, Ticks, i32)> for ProcessSpec {
    fn from((arrival_time, burst_time, priority): (Ticks, Ticks, i32)) -> Self {
        Self::new(arrival_time, burst_time, priority)
    }
}

/// A simulated process.
///
/// Descriptor fields are private and never change after construction.
/// Timing fields are zero (and `start_time` is `None`) until the engine
/// dispatches the process.
///
/// Records serialize but do not deserialize; read input as [`ProcessSpec`]
/// and build records through [`ProcessRecord::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessRecord {
    id: ProcessId,
    arrival_time: Ticks,
    burst_time: Ticks,
    priority: i32,
    start_time: Option<Ticks>,
    waiting_time: Ticks,
    turnaround_time: Ticks,
    response_time: Ticks,
    state: ProcessState,
}

impl ProcessRecord {
    /// Creates a process record from a descriptor.
    ///
    /// # Errors
    /// `InvalidProcess` if `burst_time < 1` or `arrival_time < 0`.
    pub fn new(id: ProcessId, spec: ProcessSpec) -> crate::Result<Self> {
        if spec.burst_time < 1 {
            return Err(crate::ScheduleError::invalid_process(
                id,
                format!("burst time must be at least 1 (got {})", spec.burst_time),
            ));
        }
        if spec.arrival_time < 0 {
            return Err(crate::ScheduleError::invalid_process(
                id,
                format!("arrival time must not be negative (got {})", spec.arrival_time),
            ));
        }

        Ok(Self {
            id,
            arrival_time: spec.arrival_time,
            burst_time: spec.burst_time,
            priority: spec.priority,
            start_time: None,
            waiting_time: 0,
            turnaround_time: 0,
            response_time: 0,
            state: ProcessState::Ready,
        })
    }

    #[inline]
    pub fn id(&self) -> ProcessId {
        self.id
    }

    #[inline]
    pub fn arrival_time(&self) -> Ticks {
        self.arrival_time
    }

    #[inline]
    pub fn burst_time(&self) -> Ticks {
        self.burst_time
    }

    #[inline]
    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Clock value when the process started, if it has run.
    #[inline]
    pub fn start_time(&self) -> Option<Ticks> {
        self.start_time
    }

    #[inline]
    pub fn waiting_time(&self) -> Ticks {
        self.waiting_time
    }

    #[inline]
    pub fn turnaround_time(&self) -> Ticks {
        self.turnaround_time
    }

    #[inline]
    pub fn response_time(&self) -> Ticks {
        self.response_time
    }

    #[inline]
    pub fn state(&self) -> ProcessState {
        self.state
    }

    /// Whether the process has run to completion.
    #[inline]
    pub fn is_terminated(&self) -> bool {
        self.state == ProcessState::Terminated
    }

    /// Completion time (`start + burst`), if the process has run.
    pub fn completion_time(&self) -> Option<Ticks> {
        self.start_time.map(|start| start + self.burst_time)
    }

    /// Execution interval `[start, end)`, if the process has run.
    pub fn execution_interval(&self) -> Option<(Ticks, Ticks)> {
        self.start_time.map(|start| (start, start + self.burst_time))
    }

    /// The descriptor this record was built from.
    pub fn spec(&self) -> ProcessSpec {
        ProcessSpec::new(self.arrival_time, self.burst_time, self.priority)
    }

    /// Runs the process to completion starting at `start`.
    ///
    /// Called exactly once per run by the engine. `start` is never earlier
    /// than the arrival time.
    pub(crate) fn run_at(&mut self, start: Ticks) {
        debug_assert!(start >= self.arrival_time);
        debug_assert!(!self.is_terminated());

        self.start_time = Some(start);
        self.waiting_time = start - self.arrival_time;
        self.turnaround_time = self.waiting_time + self.burst_time;
        // Non-preemptive: first scheduled == started.
        self.response_time = self.waiting_time;
        self.state = ProcessState::Terminated;
    }

    /// Clears timing fields and returns the record to `Ready`.
    pub fn reset(&mut self) {
        self.start_time = None;
        self.waiting_time = 0;
        self.turnaround_time = 0;
        self.response_time = 0;
        self.state = ProcessState::Ready;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScheduleError;

    #[test]
    fn test_new_record_is_ready() {
        let p = ProcessRecord::new(2, ProcessSpec::new(3, 5, 7)).unwrap();
        assert_eq!(p.id(), 2);
        assert_eq!(p.arrival_time(), 3);
        assert_eq!(p.burst_time(), 5);
        assert_eq!(p.priority(), 7);
        assert_eq!(p.state(), ProcessState::Ready);
        assert_eq!(p.waiting_time(), 0);
        assert_eq!(p.turnaround_time(), 0);
        assert_eq!(p.response_time(), 0);
        assert!(p.start_time().is_none());
        assert!(p.completion_time().is_none());
    }

    #[test]
    fn test_zero_burst_rejected() {
        let err = ProcessRecord::new(0, ProcessSpec::new(0, 0, 1)).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidProcess { id: 0, .. }));
    }

    #[test]
    fn test_negative_burst_rejected() {
        let err = ProcessRecord::new(4, ProcessSpec::new(0, -3, 1)).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidProcess { id: 4, .. }));
    }

    #[test]
    fn test_negative_arrival_rejected() {
        let err = ProcessRecord::new(1, ProcessSpec::new(-1, 3, 1)).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidProcess { id: 1, .. }));
    }

    #[test]
    fn test_run_at_populates_timings() {
        let mut p = ProcessRecord::new(0, ProcessSpec::new(2, 4, 0)).unwrap();
        p.run_at(5);

        assert_eq!(p.start_time(), Some(5));
        assert_eq!(p.waiting_time(), 3);
        assert_eq!(p.turnaround_time(), 7);
        assert_eq!(p.response_time(), 3);
        assert_eq!(p.completion_time(), Some(9));
        assert_eq!(p.execution_interval(), Some((5, 9)));
        assert!(p.is_terminated());
    }

    #[test]
    fn test_reset() {
        let mut p = ProcessRecord::new(0, ProcessSpec::new(0, 4, 0)).unwrap();
        p.run_at(10);
        p.reset();

        assert_eq!(p, ProcessRecord::new(0, ProcessSpec::new(0, 4, 0)).unwrap());
    }

    #[test]
    fn test_spec_from_tuple() {
        let spec: ProcessSpec = (1, 3, 5).into();
        assert_eq!(spec, ProcessSpec::new(1, 3, 5));
    }

    #[test]
    fn test_spec_serde_roundtrip() {
        let json = r#"{"arrival_time":1,"burst_time":3,"priority":5}"#;
        let spec: ProcessSpec = serde_json::from_str(json).unwrap();
        assert_eq!(spec, ProcessSpec::new(1, 3, 5));
    }
}

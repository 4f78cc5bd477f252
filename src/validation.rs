//! Input and schedule validation.
//!
//! Checks process descriptors before a batch is built, and checks a
//! finished run against the single-CPU invariants afterwards. Both
//! collect every problem found instead of stopping at the first.
//!
//! Input checks:
//! - Negative arrival times
//! - Burst times below 1
//!
//! Run checks:
//! - Every process terminated and dispatched exactly once
//! - `turnaround = waiting + burst` and `response = waiting`
//! - No process starts before it arrives
//! - No two execution intervals overlap
//! - Busy time equals the sum of burst times

use std::collections::HashSet;

use crate::models::{ProcessRecord, ProcessSpec};
use crate::scheduler::SimulationRun;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Arrival time below zero.
    NegativeArrival,
    /// Burst time below one.
    NonPositiveBurst,
    /// Two records share an id.
    DuplicateId,
    /// A record never reached `Terminated`.
    Unfinished,
    /// A record has no dispatch, or a dispatch disagrees with its record.
    DispatchMismatch,
    /// Derived timing fields are inconsistent.
    TimingMismatch,
    /// A process started before it arrived.
    StartBeforeArrival,
    /// Two processes held the CPU at the same instant.
    OverlappingExecution,
    /// Busy time differs from the sum of burst times.
    BusyTimeMismatch,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates process descriptors (ids are positions in `specs`).
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_specs(specs: &[ProcessSpec]) -> ValidationResult {
    let mut errors = Vec::new();

    for (id, spec) in specs.iter().enumerate() {
        if spec.arrival_time < 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NegativeArrival,
                format!("Process {id} has negative arrival time {}", spec.arrival_time),
            ));
        }
        if spec.burst_time < 1 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NonPositiveBurst,
                format!("Process {id} has burst time {} (must be >= 1)", spec.burst_time),
            ));
        }
    }

    finish(errors)
}

/// Validates a finished run against the single-CPU invariants.
pub fn validate_run(run: &SimulationRun) -> ValidationResult {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for record in &run.records {
        if !seen.insert(record.id()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate process ID: {}", record.id()),
            ));
        }
        check_record(record, &mut errors);

        match run.schedule.dispatch_for(record.id()) {
            Some(d) if record.execution_interval() == Some((d.start, d.end)) => {}
            Some(d) => errors.push(ValidationError::new(
                ValidationErrorKind::DispatchMismatch,
                format!(
                    "Process {} dispatched over [{}, {}) but recorded {:?}",
                    record.id(),
                    d.start,
                    d.end,
                    record.execution_interval()
                ),
            )),
            None => errors.push(ValidationError::new(
                ValidationErrorKind::DispatchMismatch,
                format!("Process {} was never dispatched", record.id()),
            )),
        }
    }

    if run.schedule.len() != run.records.len() {
        errors.push(ValidationError::new(
            ValidationErrorKind::DispatchMismatch,
            format!(
                "{} dispatches for {} processes",
                run.schedule.len(),
                run.records.len()
            ),
        ));
    }

    let mut intervals = run.schedule.dispatches.clone();
    intervals.sort_by_key(|d| (d.start, d.end));
    for pair in intervals.windows(2) {
        if pair[0].overlaps(&pair[1]) {
            errors.push(ValidationError::new(
                ValidationErrorKind::OverlappingExecution,
                format!(
                    "Processes {} and {} overlap at [{}, {})",
                    pair[0].process_id,
                    pair[1].process_id,
                    pair[1].start,
                    pair[0].end.min(pair[1].end)
                ),
            ));
        }
    }

    let total_burst: i64 = run.records.iter().map(ProcessRecord::burst_time).sum();
    if run.schedule.busy_time() != total_burst {
        errors.push(ValidationError::new(
            ValidationErrorKind::BusyTimeMismatch,
            format!(
                "Busy time {} differs from total burst time {total_burst}",
                run.schedule.busy_time()
            ),
        ));
    }

    finish(errors)
}

fn check_record(record: &ProcessRecord, errors: &mut Vec<ValidationError>) {
    let id = record.id();

    let Some(start) = record.start_time().filter(|_| record.is_terminated()) else {
        errors.push(ValidationError::new(
            ValidationErrorKind::Unfinished,
            format!("Process {id} did not terminate"),
        ));
        return;
    };

    if start < record.arrival_time() {
        errors.push(ValidationError::new(
            ValidationErrorKind::StartBeforeArrival,
            format!(
                "Process {id} started at {start} before arriving at {}",
                record.arrival_time()
            ),
        ));
    }

    let consistent = record.waiting_time() == start - record.arrival_time()
        && record.turnaround_time() == record.waiting_time() + record.burst_time()
        && record.response_time() == record.waiting_time();
    if !consistent {
        errors.push(ValidationError::new(
            ValidationErrorKind::TimingMismatch,
            format!(
                "Process {id}: waiting/turnaround/response {}/{}/{} disagree with start {start}",
                record.waiting_time(),
                record.turnaround_time(),
                record.response_time()
            ),
        ));
    }
}

fn finish(errors: Vec<ValidationError>) -> ValidationResult {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules::Sjf;
    use crate::models::{Dispatch, ProcessBatch};
    use crate::scheduler::Simulator;

    fn sample_run() -> SimulationRun {
        let batch = ProcessBatch::from_specs([(0, 5, 1), (1, 3, 5), (2, 8, 2)]).unwrap();
        Simulator::new(Sjf).run(&batch).unwrap()
    }

    fn kinds(result: ValidationResult) -> Vec<ValidationErrorKind> {
        result.unwrap_err().into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn test_valid_specs() {
        let specs = vec![ProcessSpec::new(0, 1, 0), ProcessSpec::new(3, 7, -2)];
        assert!(validate_specs(&specs).is_ok());
    }

    #[test]
    fn test_invalid_specs_collects_all() {
        let specs = vec![
            ProcessSpec::new(-1, 5, 0),
            ProcessSpec::new(0, 0, 0),
            ProcessSpec::new(-4, -1, 0),
        ];
        let errors = validate_specs(&specs).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors[0].kind, ValidationErrorKind::NegativeArrival);
        assert_eq!(errors[1].kind, ValidationErrorKind::NonPositiveBurst);
        assert!(errors[2].message.contains("Process 2"));
    }

    #[test]
    fn test_valid_run() {
        assert!(validate_run(&sample_run()).is_ok());
    }

    #[test]
    fn test_empty_run_is_valid() {
        let run = Simulator::new(Sjf).run(&ProcessBatch::new()).unwrap();
        assert!(validate_run(&run).is_ok());
    }

    #[test]
    fn test_detects_overlap() {
        let mut run = sample_run();
        // Pull P2's dispatch back into P1's slot.
        run.schedule.dispatches[2] = Dispatch::new(2, 7, 15);
        let found = kinds(validate_run(&run));
        assert!(found.contains(&ValidationErrorKind::OverlappingExecution));
        assert!(found.contains(&ValidationErrorKind::DispatchMismatch));
    }

    #[test]
    fn test_detects_missing_dispatch() {
        let mut run = sample_run();
        run.schedule.dispatches.pop();
        let found = kinds(validate_run(&run));
        assert!(found.contains(&ValidationErrorKind::DispatchMismatch));
        assert!(found.contains(&ValidationErrorKind::BusyTimeMismatch));
    }

    #[test]
    fn test_detects_unfinished() {
        let mut run = sample_run();
        run.records[1].reset();
        let found = kinds(validate_run(&run));
        assert!(found.contains(&ValidationErrorKind::Unfinished));
    }

    #[test]
    fn test_detects_duplicate_id() {
        let mut run = sample_run();
        let dup = run.records[0].clone();
        run.records.push(dup);
        let found = kinds(validate_run(&run));
        assert!(found.contains(&ValidationErrorKind::DuplicateId));
    }
}

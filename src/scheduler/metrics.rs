//! Run performance metrics.
//!
//! Reduces a terminated batch into summary statistics.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Avg Waiting Time | mean(start - arrival) |
//! | Avg Turnaround Time | mean(completion - arrival) |
//! | Avg Response Time | mean(first run - arrival) |
//! | Makespan | latest completion time (clock starts at 0) |
//! | CPU Utilization | sum(burst) / makespan, in 0.0..=1.0 |
//! | Throughput | processes / makespan |
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", §5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{ProcessRecord, Ticks};
use crate::{Result, ScheduleError};

/// Summary statistics for one scheduling run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingMetrics {
    /// Algorithm that produced the run.
    pub algorithm: String,
    /// Number of completed processes.
    pub process_count: usize,
    /// Mean waiting time.
    pub avg_waiting_time: f64,
    /// Mean turnaround time.
    pub avg_turnaround_time: f64,
    /// Mean response time.
    pub avg_response_time: f64,
    /// Busy time over makespan (0.0..=1.0).
    pub cpu_utilization: f64,
    /// Completed processes per unit of simulated time.
    pub throughput: f64,
    /// Time the last process finished.
    pub makespan: Ticks,
    /// Sum of burst times.
    pub busy_time: Ticks,
}

impl SchedulingMetrics {
    /// Computes metrics from a terminated batch.
    ///
    /// # Errors
    /// - `EmptyBatch` if `records` is empty.
    /// - `Unfinished` if any record has not terminated.
    /// - `TimeOverflow` if the summed burst times exceed `Ticks::MAX`.
    pub fn calculate(algorithm: impl Into<String>, records: &[ProcessRecord]) -> Result<Self> {
        if records.is_empty() {
            return Err(ScheduleError::EmptyBatch);
        }

        // Per-process times fit in `Ticks`; their sums may not.
        let mut total_waiting: i128 = 0;
        let mut total_turnaround: i128 = 0;
        let mut total_response: i128 = 0;
        let mut busy_time: Ticks = 0;
        let mut makespan: Ticks = 0;

        for record in records {
            let completion = record
                .completion_time()
                .filter(|_| record.is_terminated())
                .ok_or(ScheduleError::Unfinished { id: record.id() })?;

            total_waiting += i128::from(record.waiting_time());
            total_turnaround += i128::from(record.turnaround_time());
            total_response += i128::from(record.response_time());
            busy_time = busy_time
                .checked_add(record.burst_time())
                .ok_or(ScheduleError::TimeOverflow { id: record.id() })?;
            makespan = makespan.max(completion);
        }

        let count = records.len() as f64;
        // Records only come from validated descriptors, so every burst is at
        // least 1 and a terminated batch has makespan >= 1.
        let elapsed = makespan as f64;

        Ok(Self {
            algorithm: algorithm.into(),
            process_count: records.len(),
            avg_waiting_time: total_waiting as f64 / count,
            avg_turnaround_time: total_turnaround as f64 / count,
            avg_response_time: total_response as f64 / count,
            cpu_utilization: busy_time as f64 / elapsed,
            throughput: count / elapsed,
            makespan,
            busy_time,
        })
    }

    /// Like [`calculate`](Self::calculate), but an empty batch yields the
    /// all-zero [`empty`](Self::empty) record instead of an error.
    pub fn calculate_or_empty(
        algorithm: impl Into<String>,
        records: &[ProcessRecord],
    ) -> Result<Self> {
        let algorithm = algorithm.into();
        match Self::calculate(algorithm.clone(), records) {
            Err(ScheduleError::EmptyBatch) => Ok(Self::empty(algorithm)),
            other => other,
        }
    }

    /// All-zero metrics for a run that completed no processes.
    pub fn empty(algorithm: impl Into<String>) -> Self {
        Self {
            algorithm: algorithm.into(),
            process_count: 0,
            avg_waiting_time: 0.0,
            avg_turnaround_time: 0.0,
            avg_response_time: 0.0,
            cpu_utilization: 0.0,
            throughput: 0.0,
            makespan: 0,
            busy_time: 0,
        }
    }

    /// Whether this is the empty-batch sentinel.
    pub fn is_empty(&self) -> bool {
        self.process_count == 0
    }

    /// CPU utilization as a percentage (0.0..=100.0).
    pub fn utilization_percent(&self) -> f64 {
        self.cpu_utilization * 100.0
    }

    /// Idle time within the makespan.
    pub fn idle_time(&self) -> Ticks {
        self.makespan - self.busy_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessBatch;

    fn terminated(specs: &[(i64, i64, i32)], starts: &[i64]) -> Vec<ProcessRecord> {
        let mut records = ProcessBatch::from_specs(specs.iter().copied())
            .unwrap()
            .into_records();
        for (record, &start) in records.iter_mut().zip(starts) {
            record.run_at(start);
        }
        records
    }

    #[test]
    fn test_metrics_basic() {
        // FCFS over (0,5) (1,3) (2,8): starts 0, 5, 8.
        let records = terminated(&[(0, 5, 1), (1, 3, 5), (2, 8, 2)], &[0, 5, 8]);
        let m = SchedulingMetrics::calculate("FCFS", &records).unwrap();

        assert_eq!(m.algorithm, "FCFS");
        assert_eq!(m.process_count, 3);
        assert!((m.avg_waiting_time - 10.0 / 3.0).abs() < 1e-10);
        assert!((m.avg_turnaround_time - 26.0 / 3.0).abs() < 1e-10);
        assert!((m.avg_response_time - m.avg_waiting_time).abs() < 1e-10);
        assert_eq!(m.makespan, 16);
        assert_eq!(m.busy_time, 16);
        assert!((m.cpu_utilization - 1.0).abs() < 1e-10);
        assert!((m.throughput - 3.0 / 16.0).abs() < 1e-10);
    }

    #[test]
    fn test_utilization_with_idle_gap() {
        // P0 runs 0..2, CPU idle 2..6, P1 runs 6..8.
        let records = terminated(&[(0, 2, 0), (6, 2, 0)], &[0, 6]);
        let m = SchedulingMetrics::calculate("FCFS", &records).unwrap();

        assert_eq!(m.makespan, 8);
        assert_eq!(m.busy_time, 4);
        assert_eq!(m.idle_time(), 4);
        assert!((m.cpu_utilization - 0.5).abs() < 1e-10);
        assert!((m.utilization_percent() - 50.0).abs() < 1e-10);
        assert!((m.throughput - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_utilization_with_late_first_arrival() {
        // Clock starts at 0, so idle time before the first arrival counts.
        let records = terminated(&[(10, 5, 0)], &[10]);
        let m = SchedulingMetrics::calculate("SJF", &records).unwrap();
        assert_eq!(m.makespan, 15);
        assert!((m.cpu_utilization - 5.0 / 15.0).abs() < 1e-10);
    }

    #[test]
    fn test_empty_batch_error() {
        let err = SchedulingMetrics::calculate("FCFS", &[]).unwrap_err();
        assert!(matches!(err, ScheduleError::EmptyBatch));
    }

    #[test]
    fn test_empty_batch_sentinel() {
        let m = SchedulingMetrics::calculate_or_empty("FCFS", &[]).unwrap();
        assert!(m.is_empty());
        assert_eq!(m, SchedulingMetrics::empty("FCFS"));
        assert!(m.avg_waiting_time.is_finite());
        assert!(m.throughput.is_finite());
    }

    #[test]
    fn test_unfinished_record() {
        let records = terminated(&[(0, 2, 0), (0, 3, 0)], &[0]);
        let err = SchedulingMetrics::calculate("SJF", &records).unwrap_err();
        assert!(matches!(err, ScheduleError::Unfinished { id: 1 }));
    }

    #[test]
    fn test_calculate_or_empty_propagates_other_errors() {
        let records = terminated(&[(0, 2, 0)], &[]);
        let err = SchedulingMetrics::calculate_or_empty("SJF", &records).unwrap_err();
        assert!(matches!(err, ScheduleError::Unfinished { id: 0 }));
    }

    #[test]
    fn test_large_times_do_not_overflow_sums() {
        let near_max = Ticks::MAX / 2;
        let records = terminated(&[(0, 1, 0), (0, 1, 0), (0, 1, 0)], &[near_max; 3]);
        let m = SchedulingMetrics::calculate("FCFS", &records).unwrap();

        assert_eq!(m.makespan, near_max + 1);
        assert!(m.avg_waiting_time > 0.0);
        assert!((m.avg_waiting_time - near_max as f64).abs() / (near_max as f64) < 1e-12);
        assert!(m.avg_turnaround_time.is_finite());
    }

    #[test]
    fn test_busy_time_overflow() {
        let records = terminated(&[(0, Ticks::MAX, 0), (0, 1, 0)], &[0, 0]);
        let err = SchedulingMetrics::calculate("SJF", &records).unwrap_err();
        assert!(matches!(err, ScheduleError::TimeOverflow { id: 1 }));
    }

    #[test]
    fn test_metrics_serde() {
        let records = terminated(&[(0, 4, 0)], &[0]);
        let m = SchedulingMetrics::calculate("FCFS", &records).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let back: SchedulingMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}

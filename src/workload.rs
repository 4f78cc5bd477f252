//! Random workload generation for benchmarking.
//!
//! Produces process descriptors with uniformly distributed arrival,
//! burst and priority values. Defaults follow the classic textbook
//! benchmark: arrivals in `[0, 100)`, bursts in `[1, 20]`, priorities in
//! `[0, 10)`.

use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{ProcessSpec, Ticks};

/// Workload generator settings.
///
/// Ranges are half-open. With `seed` set, the same config always yields
/// the same workload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Arrival times.
    pub arrival_range: Range<Ticks>,
    /// Burst times (start must be at least 1).
    pub burst_range: Range<Ticks>,
    /// Priorities.
    pub priority_range: Range<i32>,
    /// RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            arrival_range: 0..100,
            burst_range: 1..21,
            priority_range: 0..10,
            seed: None,
        }
    }
}

impl WorkloadConfig {
    /// Sets the arrival range.
    pub fn with_arrival_range(mut self, range: Range<Ticks>) -> Self {
        self.arrival_range = range;
        self
    }

    /// Sets the burst range. The start is clamped to 1.
    pub fn with_burst_range(mut self, range: Range<Ticks>) -> Self {
        self.burst_range = range.start.max(1)..range.end;
        self
    }

    /// Sets the priority range.
    pub fn with_priority_range(mut self, range: Range<i32>) -> Self {
        self.priority_range = range;
        self
    }

    /// Sets the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Generates `count` descriptors.
    ///
    /// Empty ranges collapse to their start value instead of panicking.
    pub fn generate(&self, count: usize) -> Vec<ProcessSpec> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        self.generate_with(&mut rng, count)
    }

    /// Generates `count` descriptors from a caller-supplied RNG.
    pub fn generate_with<R: Rng>(&self, rng: &mut R, count: usize) -> Vec<ProcessSpec> {
        (0..count)
            .map(|_| ProcessSpec {
                arrival_time: sample(rng, &self.arrival_range),
                burst_time: sample(rng, &self.burst_range).max(1),
                priority: sample(rng, &self.priority_range),
            })
            .collect()
    }
}

fn sample<R, T>(rng: &mut R, range: &Range<T>) -> T
where
    R: Rng,
    T: rand::distr::uniform::SampleUniform + PartialOrd + Copy,
{
    if range.is_empty() {
        range.start
    } else {
        rng.random_range(range.clone())
    }
}

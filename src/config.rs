//! Command-line configuration.
//!
//! Every flag can also be set through an environment variable.
//!
//! ```bash
//! cpu-schedule --sizes 10,100 --seed 7 --output analysis.txt
//! SCHED_PRIORITY_ORDER=lower cpu-schedule --input batch.json --format json
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::dispatching::PriorityOrder;
use crate::scheduler::{ClockMode, CompareOptions};
use crate::workload::WorkloadConfig;

/// Report file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Plain-text blocks.
    Text,
    /// One JSON object per line.
    Json,
}

/// Priority convention flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PriorityFlag {
    /// Larger value runs first.
    Higher,
    /// Smaller value runs first.
    Lower,
}

/// Idle clock flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ClockFlag {
    /// Jump to the next arrival.
    Jump,
    /// Advance one tick at a time; costs one step per idle tick, so avoid
    /// it for inputs with very large arrival gaps.
    Tick,
}

/// Simulator configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "cpu-schedule")]
#[command(about = "Non-preemptive CPU scheduling simulator (FCFS, SJF, Priority)")]
#[command(version)]
pub struct Config {
    /// Batch sizes to generate and benchmark (ignored with --input)
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "1,10,100,1000,10000,100000",
        env = "SCHED_SIZES"
    )]
    pub sizes: Vec<usize>,

    /// Seed for generated workloads (random if unset)
    #[arg(long, env = "SCHED_SEED")]
    pub seed: Option<u64>,

    /// JSON file with an array of {arrival_time, burst_time, priority}
    #[arg(long, env = "SCHED_INPUT")]
    pub input: Option<PathBuf>,

    /// Skip invalid descriptors in --input instead of aborting
    #[arg(long, env = "SCHED_SKIP_INVALID")]
    pub skip_invalid: bool,

    /// Report file (truncated at start)
    #[arg(short, long, default_value = "analysis.txt", env = "SCHED_OUTPUT")]
    pub output: PathBuf,

    /// Report format
    #[arg(long, value_enum, default_value = "text", env = "SCHED_FORMAT")]
    pub format: ReportFormat,

    /// Which end of the priority scale runs first
    #[arg(
        long = "priority-order",
        value_enum,
        default_value = "higher",
        env = "SCHED_PRIORITY_ORDER"
    )]
    pub priority_order: PriorityFlag,

    /// How the clock advances while the CPU is idle
    #[arg(long, value_enum, default_value = "jump", env = "SCHED_CLOCK")]
    pub clock: ClockFlag,

    /// Run the three policies on separate threads
    #[arg(long, env = "SCHED_PARALLEL")]
    pub parallel: bool,
}

impl Config {
    /// Parses configuration from the process arguments and environment.
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Engine options for policy comparison.
    pub fn compare_options(&self) -> CompareOptions {
        CompareOptions {
            priority_order: match self.priority_order {
                PriorityFlag::Higher => PriorityOrder::HigherFirst,
                PriorityFlag::Lower => PriorityOrder::LowerFirst,
            },
            clock_mode: match self.clock {
                ClockFlag::Jump => ClockMode::Jump,
                ClockFlag::Tick => ClockMode::Tick,
            },
        }
    }

    /// Workload generator settings.
    pub fn workload(&self) -> WorkloadConfig {
        let config = WorkloadConfig::default();
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

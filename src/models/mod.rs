//! Scheduling domain models.
//!
//! Provides the data types for a CPU scheduling simulation: the process
//! records under simulation, the batch a run owns, and the dispatch
//! timeline a run produces.
//!
//! # Domain Mappings
//!
//! | cpu-schedule | OS textbook | Job shop |
//! |--------------|-------------|----------|
//! | ProcessRecord | PCB | Job |
//! | ProcessBatch | Job queue | Order book |
//! | Dispatch | CPU burst | Operation slot |
//! | Schedule | Gantt chart | Production plan |

mod batch;
mod process;
mod schedule;

pub use batch::ProcessBatch;
pub use process::{ProcessId, ProcessRecord, ProcessSpec, ProcessState, Ticks};
pub use schedule::{Dispatch, Schedule};

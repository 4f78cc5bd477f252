//! Heap-backed ready set.
//!
//! Owns admitted, not-yet-dispatched process records ordered by a
//! policy's [`DispatchKey`]. Keys are computed once at admission; they
//! only depend on immutable descriptor fields, so they never go stale.
//!
//! # Complexity
//! `push` and `pop` are O(log n).

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::{DispatchKey, SchedulingPolicy};
use crate::models::ProcessRecord;

#[derive(Debug)]
struct Entry {
    key: DispatchKey,
    record: ProcessRecord,
}

// Keys carry the process id, so equal keys mean the same process.
impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Entry {}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.key.cmp(&other.key)
    }
}

/// A ready set ordered by a scheduling policy.
///
/// # Example
/// ```
/// use cpu_schedule::dispatching::{rules, ReadyQueue};
/// use cpu_schedule::models::ProcessBatch;
///
/// let batch = ProcessBatch::from_specs([(0, 5, 1), (0, 2, 1)]).unwrap();
/// let mut queue = ReadyQueue::new(&rules::Sjf);
/// for record in batch.into_records() {
///     queue.push(record);
/// }
/// assert_eq!(queue.pop().map(|r| r.id()), Some(1));
/// assert_eq!(queue.pop().map(|r| r.id()), Some(0));
/// assert!(queue.pop().is_none());
/// ```
#[derive(Debug)]
pub struct ReadyQueue<'p> {
    policy: &'p dyn SchedulingPolicy,
    heap: BinaryHeap<Reverse<Entry>>,
}

impl<'p> ReadyQueue<'p> {
    /// Creates an empty queue ordered by `policy`.
    pub fn new(policy: &'p dyn SchedulingPolicy) -> Self {
        Self {
            policy,
            heap: BinaryHeap::new(),
        }
    }

    /// Creates an empty queue with room for `capacity` processes.
    pub fn with_capacity(policy: &'p dyn SchedulingPolicy, capacity: usize) -> Self {
        Self {
            policy,
            heap: BinaryHeap::with_capacity(capacity),
        }
    }

    /// Admits a process.
    pub fn push(&mut self, record: ProcessRecord) {
        let key = self.policy.dispatch_key(&record);
        self.heap.push(Reverse(Entry { key, record }));
    }

    /// Removes and returns the next process to dispatch.
    pub fn pop(&mut self) -> Option<ProcessRecord> {
        self.heap.pop().map(|Reverse(entry)| entry.record)
    }

    /// The next process to dispatch, without removing it.
    pub fn peek(&self) -> Option<&ProcessRecord> {
        self.heap.peek().map(|Reverse(entry)| &entry.record)
    }

    /// Number of ready processes.
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Whether the ready set is empty.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
}

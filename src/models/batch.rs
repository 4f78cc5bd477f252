//! Process batch model.
//!
//! A batch is the ordered set of process records one simulation run
//! owns. Runs never share records: the engine always works on a
//! [`ProcessBatch::snapshot`], so running several policies over the same
//! batch cannot leak timing fields from one run into the next.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{ProcessId, ProcessRecord, ProcessSpec, Ticks};
use crate::validation::validate_specs;
use crate::{Result, ScheduleError};

/// An ordered, validated set of process records.
///
/// Serializes as the JSON array of its descriptors. Deserializing goes
/// through [`ProcessBatch::from_specs`], so invalid descriptors are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ProcessSpec>", into = "Vec<ProcessSpec>")]
pub struct ProcessBatch {
    records: Vec<ProcessRecord>,
}

impl ProcessBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a batch from descriptors, assigning ids by position.
    ///
    /// # Errors
    /// Fails on the first invalid descriptor; nothing is simulated.
    pub fn from_specs<I>(specs: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<ProcessSpec>,
    {
        let records = specs
            .into_iter()
            .enumerate()
            .map(|(id, spec)| ProcessRecord::new(id, spec.into()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { records })
    }

    /// Builds a batch from descriptors, skipping invalid ones.
    ///
    /// Ids stay positional in the input, so a skipped descriptor leaves a
    /// gap. Every rejection is returned (and logged) so the caller can see
    /// what was dropped.
    pub fn from_specs_lossy<I>(specs: I) -> (Self, Vec<ScheduleError>)
    where
        I: IntoIterator,
        I::Item: Into<ProcessSpec>,
    {
        let mut records = Vec::new();
        let mut rejected = Vec::new();

        for (id, spec) in specs.into_iter().enumerate() {
            match ProcessRecord::new(id, spec.into()) {
                Ok(record) => records.push(record),
                Err(err) => {
                    warn!(error = %err, "skipping invalid process descriptor");
                    rejected.push(err);
                }
            }
        }

        (Self { records }, rejected)
    }

    /// Reads a batch from a JSON array of descriptors.
    ///
    /// With `skip_invalid` set, invalid descriptors are dropped as in
    /// [`from_specs_lossy`](Self::from_specs_lossy). Otherwise every problem
    /// is logged and the load fails on the first invalid descriptor.
    ///
    /// # Errors
    /// `Json` for malformed input, `InvalidProcess` in strict mode.
    pub fn from_json_reader<R: Read>(reader: R, skip_invalid: bool) -> Result<Self> {
        let specs: Vec<ProcessSpec> = serde_json::from_reader(reader)?;

        if skip_invalid {
            let (batch, rejected) = Self::from_specs_lossy(specs);
            if !rejected.is_empty() {
                warn!(skipped = rejected.len(), "dropped invalid process descriptors");
            }
            return Ok(batch);
        }

        if let Err(errors) = validate_specs(&specs) {
            for e in &errors {
                warn!(kind = ?e.kind, "{}", e.message);
            }
        }
        Self::from_specs(specs)
    }

    /// Reads a batch from a JSON file. See [`from_json_reader`](Self::from_json_reader).
    ///
    /// # Errors
    /// `Io` if the file cannot be opened, otherwise as `from_json_reader`.
    pub fn from_json_file(path: impl AsRef<Path>, skip_invalid: bool) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file), skip_invalid)
    }

    /// Returns an independent copy with every record reset to `Ready`.
    pub fn snapshot(&self) -> Self {
        let mut copy = self.clone();
        copy.records.iter_mut().for_each(ProcessRecord::reset);
        copy
    }

    /// Records in input order.
    pub fn records(&self) -> &[ProcessRecord] {
        &self.records
    }

    /// Consumes the batch, returning its records.
    pub fn into_records(self) -> Vec<ProcessRecord> {
        self.records
    }

    /// Finds a record by id.
    pub fn get(&self, id: ProcessId) -> Option<&ProcessRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Number of processes.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the batch has no processes.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of all burst times.
    pub fn total_burst_time(&self) -> Ticks {
        self.records.iter().map(ProcessRecord::burst_time).sum()
    }

    /// Descriptors in input order.
    pub fn specs(&self) -> Vec<ProcessSpec> {
        self.records.iter().map(ProcessRecord::spec).collect()
    }
}

impl TryFrom<Vec<ProcessSpec>> for ProcessBatch {
    type Error = ScheduleError;

    fn try_from(specs: Vec<ProcessSpec>) -> Result<Self> {
        Self::from_specs(specs)
    }
}

impl From<ProcessBatch> for Vec<ProcessSpec> {
    fn from(batch: ProcessBatch) -> Self {
        batch.specs()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_ids_by_position() {
        let batch = ProcessBatch::from_specs([(0, 5, 1), (1, 3, 5), (2, 8, 2)]).unwrap();
        assert_eq!(batch.len(), 3);
        for (i, record) in batch.records().iter().enumerate() {
            assert_eq!(record.id(), i);
        }
        assert_eq!(batch.total_burst_time(), 16);
    }

    #[test]
    fn test_strict_aborts_on_invalid() {
        let err = ProcessBatch::from_specs([(0, 5, 1), (1, 0, 5)]).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidProcess { id: 1, .. }));
    }

    #[test]
    fn test_lossy_skips_invalid() {
        let (batch, rejected) =
            ProcessBatch::from_specs_lossy([(0, 5, 1), (1, 0, 5), (-2, 4, 0), (3, 2, 2)]);

        assert_eq!(batch.len(), 2);
        assert_eq!(rejected.len(), 2);
        assert!(batch.get(0).is_some());
        assert!(batch.get(1).is_none());
        assert!(batch.get(3).is_some());
    }

    #[test]
    fn test_empty_batch() {
        let batch = ProcessBatch::from_specs(Vec::<ProcessSpec>::new()).unwrap();
        assert!(batch.is_empty());
        assert_eq!(batch, ProcessBatch::new());
    }

    #[test]
    fn test_snapshot_resets_records() {
        let mut batch = ProcessBatch::from_specs([(0, 5, 1), (1, 3, 5)]).unwrap();
        batch.records[0].run_at(0);
        batch.records[1].run_at(5);

        let snap = batch.snapshot();
        assert!(snap.records().iter().all(|r| !r.is_terminated()));
        assert!(snap.records().iter().all(|r| r.start_time().is_none()));
        // The source batch keeps its timings.
        assert!(batch.records().iter().all(ProcessRecord::is_terminated));
    }

    #[test]
    fn test_specs_roundtrip() {
        let specs = vec![ProcessSpec::new(0, 5, 1), ProcessSpec::new(4, 2, 0)];
        let batch = ProcessBatch::from_specs(specs.clone()).unwrap();
        assert_eq!(batch.specs(), specs);
    }

    #[test]
    fn test_deserialize_validates_descriptors() {
        let json = r#"[
            {"arrival_time": 0, "burst_time": 0, "priority": 1},
            {"arrival_time": -5, "burst_time": -3, "priority": 0}
        ]"#;
        let err = serde_json::from_str::<ProcessBatch>(json).unwrap_err();
        assert!(err.to_string().contains("invalid process 0"));

        let json = r#"[{"arrival_time": -5, "burst_time": 3, "priority": 0}]"#;
        assert!(serde_json::from_str::<ProcessBatch>(json).is_err());
    }

    #[test]
    fn test_serde_as_descriptor_array() {
        let batch = ProcessBatch::from_specs([(0, 5, 1), (2, 3, 4)]).unwrap();
        let value = serde_json::to_value(&batch).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"arrival_time": 0, "burst_time": 5, "priority": 1},
                {"arrival_time": 2, "burst_time": 3, "priority": 4}
            ])
        );
        let back: ProcessBatch = serde_json::from_value(value).unwrap();
        assert_eq!(back, batch);
    }

    fn json_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    const MIXED: &str = r#"[
        {"arrival_time": 0, "burst_time": 5, "priority": 1},
        {"arrival_time": 1, "burst_time": 0, "priority": 5},
        {"arrival_time": 2, "burst_time": 8, "priority": 2}
    ]"#;

    #[test]
    fn test_json_file_strict() {
        let file = json_file(r#"[{"arrival_time": 0, "burst_time": 5, "priority": 1}]"#);
        let batch = ProcessBatch::from_json_file(file.path(), false).unwrap();
        assert_eq!(batch.specs(), vec![ProcessSpec::new(0, 5, 1)]);

        let file = json_file(MIXED);
        let err = ProcessBatch::from_json_file(file.path(), false).unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidProcess { id: 1, .. }));
    }

    #[test]
    fn test_json_file_skip_invalid() {
        let file = json_file(MIXED);
        let batch = ProcessBatch::from_json_file(file.path(), true).unwrap();
        assert_eq!(batch.len(), 2);
        assert!(batch.get(1).is_none());
        assert_eq!(batch.get(2).map(ProcessRecord::burst_time), Some(8));
    }

    #[test]
    fn test_json_file_errors() {
        let file = json_file("{not json");
        let err = ProcessBatch::from_json_file(file.path(), true).unwrap_err();
        assert!(matches!(err, ScheduleError::Json(_)));

        let dir = tempfile::tempdir().unwrap();
        let err = ProcessBatch::from_json_file(dir.path().join("missing.json"), false).unwrap_err();
        assert!(matches!(err, ScheduleError::Io(_)));
    }
}

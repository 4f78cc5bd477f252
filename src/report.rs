//! Metrics report sinks.
//!
//! The engine only returns [`SchedulingMetrics`]; sinks decide where they
//! go. `TextFileSink` appends the classic plain-text block, `JsonLinesSink`
//! writes one JSON object per line, `MemorySink` keeps records in memory.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::scheduler::SchedulingMetrics;
use crate::Result;

/// Destination for metrics records.
pub trait ReportSink {
    /// Emits one metrics record.
    fn emit(&mut self, metrics: &SchedulingMetrics) -> Result<()>;

    /// Flushes buffered output.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Plain-text rendering of a metrics record.
///
/// ```text
/// Scheduling Algorithm: Shortest Job First (SJF) Scheduling
/// Average Waiting Time: 3.3333333333333335
/// Average Turnaround Time: 8.666666666666666
/// CPU Utilization: 100%
/// Throughput: 0.1875
/// ```
pub struct TextReport<'a>(pub &'a SchedulingMetrics);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        writeln!(f, "Scheduling Algorithm: {}", m.algorithm)?;
        writeln!(f, "Average Waiting Time: {}", m.avg_waiting_time)?;
        writeln!(f, "Average Turnaround Time: {}", m.avg_turnaround_time)?;
        writeln!(f, "CPU Utilization: {}%", m.utilization_percent())?;
        write!(f, "Throughput: {}", m.throughput)
    }
}

/// Appends text reports to a file, one blank-line-separated block each.
#[derive(Debug)]
pub struct TextFileSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl TextFileSink {
    /// Opens `path` for appending, creating it if needed.
    pub fn append(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Creates `path`, discarding any previous contents.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = File::create(&path)?;
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// The file being written.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for TextFileSink {
    fn emit(&mut self, metrics: &SchedulingMetrics) -> Result<()> {
        write!(self.writer, "{}\n\n", TextReport(metrics))?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes each record as one JSON line.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    /// Wraps a writer.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl JsonLinesSink<BufWriter<File>> {
    /// Creates (truncating) a JSON lines file.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?)))
    }
}

impl<W: Write> ReportSink for JsonLinesSink<W> {
    fn emit(&mut self, metrics: &SchedulingMetrics) -> Result<()> {
        serde_json::to_writer(&mut self.writer, metrics)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Collects records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    /// Records in emission order.
    pub records: Vec<SchedulingMetrics>,
}

impl ReportSink for MemorySink {
    fn emit(&mut self, metrics: &SchedulingMetrics) -> Result<()> {
        self.records.push(metrics.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::{PolicyKind, PriorityOrder};
    use crate::models::ProcessBatch;
    use crate::scheduler::Simulator;

    fn metrics(kind: PolicyKind) -> SchedulingMetrics {
        let batch = ProcessBatch::from_specs([(0, 2, 0), (6, 2, 0)]).unwrap();
        Simulator::from_kind(kind, PriorityOrder::HigherFirst)
            .run(&batch)
            .unwrap()
            .metrics
    }

    #[test]
    fn test_text_report_format() {
        let text = TextReport(&metrics(PolicyKind::Fcfs)).to_string();
        assert_eq!(
            text,
            "Scheduling Algorithm: First Come First Serve (FCFS) Scheduling\n\
             Average Waiting Time: 0\n\
             Average Turnaround Time: 2\n\
             CPU Utilization: 50%\n\
             Throughput: 0.25"
        );
    }

    #[test]
    fn test_text_file_sink_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.txt");

        {
            let mut sink = TextFileSink::create(&path).unwrap();
            sink.emit(&metrics(PolicyKind::Fcfs)).unwrap();
            sink.flush().unwrap();
        }
        {
            let mut sink = TextFileSink::append(&path).unwrap();
            assert_eq!(sink.path(), path.as_path());
            sink.emit(&metrics(PolicyKind::Sjf)).unwrap();
            sink.flush().unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents.matches("Scheduling Algorithm:").count(), 2);
        assert!(contents.contains("(FCFS)"));
        assert!(contents.contains("(SJF)"));
        assert!(contents.ends_with("\n\n"));
    }

    #[test]
    fn test_create_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analysis.txt");
        std::fs::write(&path, "stale").unwrap();

        let mut sink = TextFileSink::create(&path).unwrap();
        sink.flush().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_json_lines_sink() {
        let mut sink = JsonLinesSink::new(Vec::new());
        for kind in PolicyKind::all() {
            sink.emit(&metrics(kind)).unwrap();
        }
        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);

        let first: SchedulingMetrics = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first, metrics(PolicyKind::Fcfs));
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemorySink::default();
        sink.emit(&metrics(PolicyKind::Priority)).unwrap();
        assert_eq!(sink.records.len(), 1);
        assert_eq!(sink.records[0].algorithm, "Priority Scheduling");
    }
}

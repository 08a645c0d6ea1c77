use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;

use super::types::ProbeOutcome;

/// Destination for probe outcomes.
pub trait ResultSink: Send + Sync {
    /// Append one outcome to durable storage.
    fn record(&self, outcome: &ProbeOutcome) -> Result<()>;
}

/// Append-only plain-text probe log.
///
/// One multi-line entry per outcome; prior entries are never rewritten.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ResultSink for FileSink {
    fn record(&self, outcome: &ProbeOutcome) -> Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;

        writeln!(
            file,
            "<{}>\nName: {}\n{}\nResponse time: {}\n",
            outcome.timestamp.format("%H:%M:%S"),
            outcome.target,
            outcome.status,
            outcome.latency_display(),
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Target;
    use std::fs;
    use std::time::Duration;
    use tempfile::TempDir;

    fn outcome_received(url: &str, code: u16) -> ProbeOutcome {
        ProbeOutcome::received(Target { url: url.into() }, code, Duration::from_millis(123))
    }

    #[test]
    fn entries_are_appended_in_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("probes.log");
        let sink = FileSink::new(path.clone());

        sink.record(&outcome_received("https://one.test/", 200)).unwrap();
        sink.record(&outcome_received("https://two.test/", 503)).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let first = contents.find("Name: https://one.test/").unwrap();
        let second = contents.find("Name: https://two.test/").unwrap();
        assert!(first < second);
        assert!(contents.contains("OK\nResponse time: 0.123"));
        assert!(contents.contains("Server error\nResponse time: 0.123"));
    }

    #[test]
    fn failed_probe_is_logged_with_the_latency_sentinel() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("probes.log");
        let sink = FileSink::new(path.clone());

        let outcome =
            ProbeOutcome::failed(Target { url: "https://down.test/".into() }, "connection refused");
        sink.record(&outcome).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("Error: connection refused\nResponse time: -"));
    }

    #[test]
    fn missing_parent_directory_surfaces_an_error() {
        let dir = TempDir::new().unwrap();
        let sink = FileSink::new(dir.path().join("missing").join("probes.log"));

        let result = sink.record(&outcome_received("https://one.test/", 200));
        assert!(result.is_err());
    }
}

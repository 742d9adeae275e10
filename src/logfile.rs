//! Append-only CSV run log.
//!
//! One row per reconciliation outcome, columns `Policy,Error,Step,Time`.
//! The log directory is created up front; the file itself is created on the
//! first append, header included. Rows are never deduplicated or rotated.

use std::borrow::Cow;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::reconcile::Outcome;

const FILE_NAME: &str = "InformationBarriers-Logs.csv";
const HEADER: &str = "Policy,Error,Step,Time";
const TIME_FORMAT: &str = "%Y-%m-%d-%H%M-%S";

/// Append-only CSV sink for reconciliation outcomes.
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    /// Open the run log under `dir`, creating the directory if absent.
    pub fn open(dir: &Path) -> Result<Self, Error> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(FILE_NAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one outcome row, writing the header first when the file is new.
    pub fn append(&self, outcome: &Outcome) -> Result<(), Error> {
        let write_header = !self.path.exists();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        if write_header {
            writeln!(file, "{}", HEADER)?;
        }

        writeln!(
            file,
            "{},{},{},{}",
            csv_field(&outcome.policy),
            csv_field(outcome.error.as_deref().unwrap_or("Success")),
            csv_field(outcome.step.label()),
            outcome.time.format(TIME_FORMAT),
        )?;
        Ok(())
    }
}

/// Quote a field when it contains a separator, quote, or line break.
fn csv_field(value: &str) -> Cow<'_, str> {
    if value.contains(['"', ',', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::Step;

    fn outcome(policy: &str, error: Option<&str>) -> Outcome {
        Outcome {
            policy: policy.to_string(),
            step: Step::CreateNew,
            error: error.map(String::from),
            time: chrono::Local::now(),
        }
    }

    #[test]
    fn test_header_written_once_then_one_row_per_append() {
        let dir = tempfile::tempdir().unwrap();
        let log = RunLog::open(dir.path()).unwrap();

        log.append(&outcome("Block hr to non-corporate segments", None))
            .unwrap();
        log.append(&outcome("Block sales to non-corporate segments", Some("boom")))
            .unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Policy,Error,Step,Time");
        assert!(lines[1].starts_with("Block hr to non-corporate segments,Success,Creating New Policy,"));
        assert!(lines[2].starts_with("Block sales to non-corporate segments,boom,Creating New Policy,"));
    }

    #[test]
    fn test_log_directory_created_if_absent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs").join("barriers");
        let log = RunLog::open(&nested).unwrap();
        log.append(&outcome("p", None)).unwrap();
        assert!(log.path().exists());
    }

    #[test]
    fn test_fields_with_separators_are_quoted() {
        let dir = tempfile::tempdir().unwrap();
        let log = RunLog::open(dir.path()).unwrap();
        log.append(&outcome("p", Some("status 500: {\"code\":\"oops\", \"hint\":\"x\"}")))
            .unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        assert!(content.contains("\"status 500: {\"\"code\"\":\"\"oops\"\", \"\"hint\"\":\"\"x\"\"}\""));
    }

    #[test]
    fn test_timestamp_format() {
        let dir = tempfile::tempdir().unwrap();
        let log = RunLog::open(dir.path()).unwrap();
        log.append(&outcome("p", None)).unwrap();

        let content = fs::read_to_string(log.path()).unwrap();
        let time = content.lines().nth(1).unwrap().rsplit(',').next().unwrap();
        // yyyy-MM-dd-HHmm-ss
        assert_eq!(time.len(), 18);
        assert_eq!(time.matches('-').count(), 4);
    }
}

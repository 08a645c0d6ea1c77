//! Day-scoped probe schedule loading.
//!
//! The schedule file is a JSON record holding a file-wide timeout and one
//! entry per weekday. It is re-read at the start of every round so edits
//! take effect without a restart.

use std::path::PathBuf;
use std::time::Duration;
use std::{fmt, fs};

use serde::Deserialize;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("schedule file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read schedule file: {0}")]
    Read(#[from] std::io::Error),
    #[error("malformed schedule: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid schedule: {0}")]
    Invalid(String),
    #[error("no schedule entry for weekday {0}")]
    NoEntryForToday(u32),
}

/// Raw shape of the schedule file.
#[derive(Debug, Clone, Deserialize)]
pub struct ScheduleFile {
    pub timeout_seconds: u64,
    pub days: Vec<DayEntry>,
}

/// One weekday's worth of probing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DayEntry {
    /// ISO weekday, 1 = Monday .. 7 = Sunday
    pub day: u8,
    pub interval_seconds: u64,
    pub urls: Vec<Target>,
    pub log: bool,
}

/// A single URL to probe. The URL doubles as the display name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Target {
    pub url: String,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

/// The matched day entry merged with the file-wide timeout.
///
/// Owned by the round that loaded it; the next round loads its own copy.
#[derive(Debug, Clone)]
pub struct ActiveSchedule {
    pub timeout: Duration,
    pub interval: Duration,
    pub targets: Vec<Target>,
    pub log_enabled: bool,
}

/// Source of the day's schedule.
///
/// Any store that can produce an [`ActiveSchedule`] for a weekday satisfies
/// the loop; the file-backed implementation below is the default.
pub trait ScheduleProvider: Send + Sync {
    /// Load the schedule entry for the given ISO weekday (1 = Monday).
    fn load(&self, weekday: u32) -> Result<ActiveSchedule, ScheduleError>;
}

/// Schedule provider backed by a JSON file on disk.
pub struct FileScheduleProvider {
    path: PathBuf,
}

impl FileScheduleProvider {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl ScheduleProvider for FileScheduleProvider {
    fn load(&self, weekday: u32) -> Result<ActiveSchedule, ScheduleError> {
        if !self.path.exists() {
            return Err(ScheduleError::NotFound(self.path.clone()));
        }

        let raw = fs::read_to_string(&self.path)?;
        let file: ScheduleFile = serde_json::from_str(&raw)?;
        file.validate()?;
        file.for_weekday(weekday)
    }
}

impl ScheduleFile {
    /// Reject value errors the type system cannot express.
    fn validate(&self) -> Result<(), ScheduleError> {
        if self.timeout_seconds == 0 {
            return Err(ScheduleError::Invalid("timeout_seconds must be positive".into()));
        }

        for entry in &self.days {
            if !(1..=7).contains(&entry.day) {
                return Err(ScheduleError::Invalid(format!(
                    "day {} is outside the ISO weekday range 1..=7",
                    entry.day
                )));
            }
            if entry.interval_seconds == 0 {
                return Err(ScheduleError::Invalid(format!(
                    "interval_seconds must be positive for day {}",
                    entry.day
                )));
            }
            for target in &entry.urls {
                validate_target_url(&target.url)?;
            }
        }

        Ok(())
    }

    /// Select the entry matching `weekday`, merged with the file-wide
    /// timeout. There is no fallback to another day.
    fn for_weekday(&self, weekday: u32) -> Result<ActiveSchedule, ScheduleError> {
        self.days
            .iter()
            .find(|entry| u32::from(entry.day) == weekday)
            .map(|entry| ActiveSchedule {
                timeout: Duration::from_secs(self.timeout_seconds),
                interval: Duration::from_secs(entry.interval_seconds),
                targets: entry.urls.clone(),
                log_enabled: entry.log,
            })
            .ok_or(ScheduleError::NoEntryForToday(weekday))
    }
}

/// Validate that a target is an absolute http(s) URL with a host.
fn validate_target_url(target: &str) -> Result<(), ScheduleError> {
    let url = Url::parse(target)
        .map_err(|e| ScheduleError::Invalid(format!("invalid url '{target}': {e}")))?;

    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(ScheduleError::Invalid(format!(
            "invalid scheme '{scheme}' in '{target}': must be http or https"
        )));
    }

    if url.host_str().is_none() {
        return Err(ScheduleError::Invalid(format!("url '{target}' must have a host")));
    }

    Ok(())
}

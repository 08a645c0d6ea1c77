use std::path::PathBuf;
use std::time::Duration;

/// Pause before retrying after a failed schedule load, so a broken or
/// missing file never busy-spins the loop.
const RELOAD_BACKOFF: Duration = Duration::from_secs(5);

/// Runtime settings for the service, assembled from the command line.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Schedule file consulted at the start of every round
    pub schedule_path: PathBuf,

    /// Destination of the append-only probe log
    pub log_path: PathBuf,

    /// Wait between schedule load attempts when loading fails
    pub reload_backoff: Duration,
}

impl Settings {
    pub fn new(schedule_path: PathBuf, log_path: PathBuf) -> Self {
        Self { schedule_path, log_path, reload_backoff: RELOAD_BACKOFF }
    }
}

//! Probing engine.
//!
//! This module is responsible for:
//! - Classifying HTTP responses and transport failures
//! - Executing single GET probes with a timeout
//! - Appending outcomes to the probe log
//! - Driving rounds of probes on the day's interval

pub mod prober;
pub mod scheduler;
pub mod sink;
pub mod types;

pub use prober::HttpProber;
pub use scheduler::Scheduler;
pub use sink::FileSink;
pub use types::{ProbeOutcome, ProbeStatus};

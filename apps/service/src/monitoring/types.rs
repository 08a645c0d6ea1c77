use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Local};

use crate::schedule::Target;

/// Classification of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    Ok,
    Redirected,
    ClientError,
    ServerError,
    UnknownStatus(u16),
    TransportError(String),
}

impl ProbeStatus {
    /// Map an HTTP status code onto its category.
    ///
    /// Total over all of `u16`; anything outside the standard 2xx-5xx
    /// ranges (1xx included) falls through to [`ProbeStatus::UnknownStatus`].
    pub fn classify(code: u16) -> Self {
        match code {
            200..=299 => ProbeStatus::Ok,
            300..=399 => ProbeStatus::Redirected,
            400..=499 => ProbeStatus::ClientError,
            500..=599 => ProbeStatus::ServerError,
            other => ProbeStatus::UnknownStatus(other),
        }
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProbeStatus::Ok => write!(f, "OK"),
            ProbeStatus::Redirected => write!(f, "Redirected"),
            ProbeStatus::ClientError => write!(f, "Client error"),
            ProbeStatus::ServerError => write!(f, "Server error"),
            ProbeStatus::UnknownStatus(code) => write!(f, "Unknown code: {code}"),
            ProbeStatus::TransportError(reason) => write!(f, "Error: {reason}"),
        }
    }
}

/// Result of one probe against one target.
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    /// When the probe was issued
    pub timestamp: DateTime<Local>,

    /// The target that was probed
    pub target: Target,

    /// Classified result
    pub status: ProbeStatus,

    /// Wall-clock time to response headers; `None` when the probe failed
    /// before any response arrived
    pub latency: Option<Duration>,

    /// Raw HTTP status code (if a response arrived)
    pub status_code: Option<u16>,
}

impl ProbeOutcome {
    /// Outcome for a probe that received an HTTP response.
    pub fn received(target: Target, code: u16, latency: Duration) -> Self {
        Self {
            timestamp: Local::now(),
            target,
            status: ProbeStatus::classify(code),
            latency: Some(latency),
            status_code: Some(code),
        }
    }

    /// Outcome for a probe that failed at the transport level.
    pub fn failed(target: Target, reason: impl Into<String>) -> Self {
        Self {
            timestamp: Local::now(),
            target,
            status: ProbeStatus::TransportError(reason.into()),
            latency: None,
            status_code: None,
        }
    }

    /// Latency in seconds with millisecond precision, or the `-` sentinel
    /// when the probe produced no meaningful latency.
    pub fn latency_display(&self) -> String {
        match self.latency {
            Some(latency) => format!("{:.3}", latency.as_secs_f64()),
            None => "-".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Target {
        Target { url: "https://example.test".into() }
    }

    #[test]
    fn classify_covers_the_standard_ranges() {
        assert_eq!(ProbeStatus::classify(200), ProbeStatus::Ok);
        assert_eq!(ProbeStatus::classify(299), ProbeStatus::Ok);
        assert_eq!(ProbeStatus::classify(300), ProbeStatus::Redirected);
        assert_eq!(ProbeStatus::classify(399), ProbeStatus::Redirected);
        assert_eq!(ProbeStatus::classify(400), ProbeStatus::ClientError);
        assert_eq!(ProbeStatus::classify(499), ProbeStatus::ClientError);
        assert_eq!(ProbeStatus::classify(500), ProbeStatus::ServerError);
        assert_eq!(ProbeStatus::classify(599), ProbeStatus::ServerError);
    }

    #[test]
    fn classify_is_total_over_out_of_range_codes() {
        assert_eq!(ProbeStatus::classify(0), ProbeStatus::UnknownStatus(0));
        assert_eq!(ProbeStatus::classify(100), ProbeStatus::UnknownStatus(100));
        assert_eq!(ProbeStatus::classify(199), ProbeStatus::UnknownStatus(199));
        assert_eq!(ProbeStatus::classify(600), ProbeStatus::UnknownStatus(600));
        assert_eq!(ProbeStatus::classify(u16::MAX), ProbeStatus::UnknownStatus(u16::MAX));
    }

    #[test]
    fn received_outcome_carries_latency_and_raw_code() {
        let outcome = ProbeOutcome::received(target(), 503, Duration::from_millis(42));

        assert_eq!(outcome.status, ProbeStatus::ServerError);
        assert_eq!(outcome.status_code, Some(503));
        assert_eq!(outcome.latency_display(), "0.042");
    }

    #[test]
    fn failed_outcome_uses_the_latency_sentinel() {
        let outcome = ProbeOutcome::failed(target(), "connection refused");

        assert_eq!(outcome.status, ProbeStatus::TransportError("connection refused".into()));
        assert_eq!(outcome.status_code, None);
        assert_eq!(outcome.latency_display(), "-");
    }

    #[test]
    fn status_display_matches_logged_text() {
        assert_eq!(ProbeStatus::Ok.to_string(), "OK");
        assert_eq!(ProbeStatus::UnknownStatus(99).to_string(), "Unknown code: 99");
        assert_eq!(
            ProbeStatus::TransportError("timed out".into()).to_string(),
            "Error: timed out"
        );
    }
}

use std::error::Error as _;
use std::time::{Duration, Instant};

use anyhow::Result;
use async_trait::async_trait;

use super::types::ProbeOutcome;
use crate::schedule::Target;

/// User agent advertised on every probe request.
const USER_AGENT: &str = concat!("daywatch/", env!("CARGO_PKG_VERSION"));

/// A prober issues one liveness check against one target.
///
/// Probing is infallible at this boundary: every failure mode is folded
/// into the returned [`ProbeOutcome`].
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, target: &Target, timeout: Duration) -> ProbeOutcome;
}

/// HTTP prober backed by a shared reqwest client.
pub struct HttpProber {
    client: reqwest::Client,
}

impl HttpProber {
    /// Build the shared client. The timeout is applied per request since it
    /// is re-read with the schedule on every round.
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, target: &Target, timeout: Duration) -> ProbeOutcome {
        let start = Instant::now();

        match self.client.get(&target.url).timeout(timeout).send().await {
            Ok(response) => {
                // send() resolves once response headers arrive, which is the
                // point latency is measured to.
                let latency = round_to_millis(start.elapsed());
                ProbeOutcome::received(target.clone(), response.status().as_u16(), latency)
            }
            Err(e) => ProbeOutcome::failed(target.clone(), describe_error(&e)),
        }
    }
}

/// Reported latency carries exactly millisecond precision.
fn round_to_millis(elapsed: Duration) -> Duration {
    Duration::from_millis((elapsed.as_secs_f64() * 1000.0).round() as u64)
}

/// Reason recorded on a failed outcome. reqwest's outer message repeats the
/// URL, which the surrounding log line already carries, so keep the
/// innermost cause.
fn describe_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        return "request timed out".to_string();
    }

    let mut reason = error.to_string();
    let mut source = error.source();
    while let Some(inner) = source {
        reason = inner.to_string();
        source = inner.source();
    }
    reason
}

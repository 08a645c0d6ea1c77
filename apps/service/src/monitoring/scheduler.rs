use std::time::Duration;

use chrono::{Datelike, Local};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::prober::Prober;
use super::sink::ResultSink;
use super::types::ProbeOutcome;
use crate::config::Settings;
use crate::schedule::{ActiveSchedule, ScheduleProvider};

/// Sequential polling loop.
///
/// Each round loads a fresh schedule for today's weekday, probes every
/// target in configuration order, then sleeps the configured interval.
/// A failed schedule load is retried after a short backoff instead of
/// aborting. Cancellation is observed before each target and during every
/// sleep; an in-flight probe is always allowed to finish.
pub struct Scheduler<P, B, S> {
    settings: Settings,
    provider: P,
    prober: B,
    sink: S,
}

impl<P, B, S> Scheduler<P, B, S>
where
    P: ScheduleProvider,
    B: Prober,
    S: ResultSink,
{
    pub fn new(settings: Settings, provider: P, prober: B, sink: S) -> Self {
        Self { settings, provider, prober, sink }
    }

    /// Drive rounds until the token is cancelled.
    pub async fn run(&self, shutdown: CancellationToken) {
        loop {
            if shutdown.is_cancelled() {
                break;
            }

            let weekday = Local::now().weekday().number_from_monday();
            let schedule = match self.provider.load(weekday) {
                Ok(schedule) => schedule,
                Err(e) => {
                    warn!(
                        "Schedule unavailable: {e}; retrying in {}s",
                        self.settings.reload_backoff.as_secs()
                    );
                    if sleep_or_cancel(self.settings.reload_backoff, &shutdown).await {
                        break;
                    }
                    continue;
                }
            };

            let outcomes = self.run_round(&schedule, &shutdown).await;

            info!(
                "Round complete ({} probes). Waiting {}s until the next round",
                outcomes.len(),
                schedule.interval.as_secs()
            );
            if sleep_or_cancel(schedule.interval, &shutdown).await {
                break;
            }
        }

        info!("Scheduler stopped");
    }

    /// Probe every target once, in the schedule's order.
    ///
    /// Produces one outcome per visited target regardless of individual
    /// failures. Stops early only when cancellation is observed between
    /// targets.
    async fn run_round(
        &self,
        schedule: &ActiveSchedule,
        shutdown: &CancellationToken,
    ) -> Vec<ProbeOutcome> {
        let mut outcomes = Vec::with_capacity(schedule.targets.len());

        for target in &schedule.targets {
            if shutdown.is_cancelled() {
                info!("Cancellation observed, ending round early");
                break;
            }

            info!("Checking {target}");
            let outcome = self.prober.probe(target, schedule.timeout).await;
            info!("{}: {}, response time {}", outcome.target, outcome.status, outcome.latency_display());

            if schedule.log_enabled {
                if let Err(e) = self.sink.record(&outcome) {
                    warn!("Could not record outcome for {target}: {e:#}");
                }
            }

            outcomes.push(outcome);
        }

        outcomes
    }
}

/// Sleep for `duration`, returning `true` if cancellation ended the wait
/// before the duration elapsed.
async fn sleep_or_cancel(duration: Duration, shutdown: &CancellationToken) -> bool {
    tokio::select! {
        _ = shutdown.cancelled() => true,
        _ = tokio::time::sleep(duration) => false,
    }
}

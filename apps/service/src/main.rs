use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use logger::init_tracing;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod config;
mod monitoring;
mod schedule;

use config::Settings;
use monitoring::{FileSink, HttpProber, Scheduler};
use schedule::FileScheduleProvider;

/// Availability monitor driven by a day-scoped schedule file.
#[derive(Debug, Parser)]
#[command(name = "daywatch", version, about)]
struct Cli {
    /// Path to the schedule file
    #[arg(short, long, default_value = "daywatch.json")]
    config: PathBuf,

    /// Path to the probe log file
    #[arg(short, long, default_value = "daywatch.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let settings = Settings::new(cli.config, cli.log_file);

    let shutdown = CancellationToken::new();
    let signal_token = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupt received, finishing current round...");
            signal_token.cancel();
        }
    });

    let provider = FileScheduleProvider::new(settings.schedule_path.clone());
    let prober = HttpProber::new()?;
    let sink = FileSink::new(settings.log_path.clone());

    let scheduler = Scheduler::new(settings, provider, prober, sink);
    scheduler.run(shutdown).await;

    info!("Program closed");
    Ok(())
}

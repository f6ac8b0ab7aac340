//! Pace probe - explains where a completion-date forecast comes from.

mod report;
mod scenario;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::scenario::Scenario;

#[derive(Parser)]
#[command(name = "pace-probe")]
#[command(about = "Sweep the completion estimator around one student record", long_about = None)]
#[command(version)]
struct Cli {}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let _cli = Cli::parse();

    let scenario = Scenario::reference()?;
    info!(
        base_date = %scenario.base_date,
        target_date = %scenario.target_date,
        "Running completion diagnostic"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report::render(&mut out, &scenario)?;

    Ok(())
}

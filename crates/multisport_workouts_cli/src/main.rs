use anyhow::Context;
use clap::Parser;
use multisport_workouts_cli::{Cli, LogConfig, run};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_config = LogConfig::from_env();
    tracing_subscriber::fmt()
        .compact()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .with_env_filter(log_config.env_filter())
        .init();
    tracing::debug!("log filter: {}", log_config.filter);

    let mut stdout = std::io::stdout().lock();
    run(cli, &mut stdout).await.context("multisport-workouts failed")?;
    Ok(())
}

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

use autosign_infrastructure::config::{load_settings, Settings};
use autosign_infrastructure::logging::{init_logger, RunLogger};
use autosign_lib::application::services::{SignJob, SignScheduler};
use autosign_lib::presentation::bootstrap::{build_app_state, build_sign_job};
use autosign_lib::presentation::cli::{Cli, Commands};
use autosign_lib::presentation::http;

#[tokio::main]
async fn main() {
    if let Err(e) = run(Cli::parse()).await {
        error!("{:#}", e);
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref()).context("Failed to load configuration")?;
    init_logger(settings.log_dir.clone())?;

    let job = Arc::new(build_sign_job(&settings)?);

    match cli.subcommand() {
        Commands::Run => {
            let summary = job.run(&RunLogger::process_only()).await;
            info!(
                total = summary.total,
                succeeded = summary.succeeded,
                failed = summary.failed,
                already_signed = summary.already_signed,
                "Run finished"
            );
            Ok(())
        }
        Commands::Serve => serve(&settings, job).await,
    }
}

async fn serve(settings: &Settings, job: Arc<SignJob>) -> Result<()> {
    let scheduler = SignScheduler::start(&settings.schedule, Arc::clone(&job)).await?;
    let state = Arc::new(build_app_state(settings, job));

    http::serve(&settings.listen, state, shutdown_signal()).await?;

    scheduler.shutdown().await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}

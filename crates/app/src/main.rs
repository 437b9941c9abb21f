mod cli;
mod config;
mod jobs;
mod pipeline;
mod state;
mod wiring;

use clap::Parser;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::ConfigError;
use crate::jobs::JobError;
use crate::pipeline::StoreError;
use crate::wiring::WiringError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("wiring error: {0}")]
    Wiring(#[from] WiringError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("job error: {0}")]
    Jobs(#[from] JobError),
    #[error("task join error: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    config::load_dotenv()?;
    let config = config::AppConfig::from_env()?;
    let state = wiring::build_state(config).await?;
    state.store.ensure_collection().await?;

    if cli.setup_only {
        info!(collection = %state.config.collection, "collection ready; exiting");
        return Ok(());
    }

    if cli.once {
        let stats = jobs::run_once(&state).await?;
        info!(?stats, "single poll complete");
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let worker_state = state.clone();
    let mut worker = tokio::spawn(async move {
        info!("worker scheduler starting");
        jobs::start(worker_state, shutdown_rx).await
    });

    tokio::select! {
        _ = shutdown_signal() => {
            info!("shutdown signal received; waiting for the current poll to finish");
            let _ = shutdown_tx.send(true);
            worker.await?;
        }
        res = &mut worker => {
            res?;
        }
    }

    info!("postharvest stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!(error = %err, "failed to install ctrl-c handler");
        std::future::pending::<()>().await;
    }
}

pub mod scheduler;
pub mod tasks;

use thiserror::Error;
use tokio::sync::watch;
use tracing::info;

use crate::pipeline::{FeedError, StoreError};
use crate::state::AppState;
use tasks::post_ingest::IngestStats;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

pub async fn start(state: AppState, shutdown: watch::Receiver<bool>) {
    let interval = state.config.poll_interval;
    info!(
        topic = %state.config.topic,
        interval_secs = interval.as_secs(),
        page_limit = state.config.page_limit,
        "post ingest scheduled"
    );
    scheduler::run_interval("post_ingest", interval, shutdown, move || {
        let state = state.clone();
        async move {
            let stats = run_once(&state).await?;
            info!(?stats, "post ingest run complete");
            Ok(())
        }
    })
    .await;
}

pub async fn run_once(state: &AppState) -> Result<IngestStats, JobError> {
    tasks::post_ingest::run(
        state.feed.as_ref(),
        state.store.as_ref(),
        &state.config.topic,
        state.config.page_limit,
    )
    .await
}

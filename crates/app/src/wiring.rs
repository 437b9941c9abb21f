use std::sync::Arc;

use reqwest::Client;
use thiserror::Error;

use crate::config::AppConfig;
use crate::pipeline::pg_store::PgPostStore;
use crate::state::AppState;
use postharvest_infra::db::{self, DbPoolError};
use postharvest_infra::reddit::{RedditClient, RedditError};

#[derive(Debug, Error)]
pub enum WiringError {
    #[error("http client error: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("reddit error: {0}")]
    Reddit(#[from] RedditError),
    #[error("db error: {0}")]
    Db(#[from] DbPoolError),
}

pub async fn build_state(config: AppConfig) -> Result<AppState, WiringError> {
    let http = Client::builder()
        .timeout(config.request_timeout)
        .user_agent(config.user_agent.clone())
        .build()?;
    let reddit = RedditClient::new(http, config.credentials.clone(), config.user_agent.clone());
    reddit.authenticate().await?;

    let pool = db::connect(&config.database_url).await?;
    let store = PgPostStore::new(pool, config.collection.clone());

    Ok(AppState {
        config: Arc::new(config),
        feed: Arc::new(reddit),
        store: Arc::new(store),
    })
}

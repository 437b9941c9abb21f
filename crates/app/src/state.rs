use std::sync::Arc;

use crate::config::AppConfig;
use crate::pipeline::pg_store::PgPostStore;
use postharvest_infra::reddit::RedditClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub feed: Arc<RedditClient>,
    pub store: Arc<PgPostStore>,
}

use std::time::Duration;

use thiserror::Error;

use postharvest_core::error::CoreError;
use postharvest_core::types::{CollectionName, Topic};
use postharvest_infra::reddit::RedditCredentials;

const DEFAULT_COLLECTION: &str = "reddit_posts";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: RedditCredentials,
    pub user_agent: String,
    pub database_url: String,
    pub collection: CollectionName,
    pub topic: Topic,
    pub poll_interval: Duration,
    pub page_limit: usize,
    pub request_timeout: Duration,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting {0}")]
    Missing(&'static str),
    #[error("invalid integer for {0}: {1}")]
    InvalidNumber(&'static str, String),
    #[error("invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
    #[error("failed to load .env: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let env = Env { lookup };

        let credentials = RedditCredentials {
            client_id: env.required("POSTHARVEST_REDDIT_CLIENT_ID")?,
            client_secret: env.required("POSTHARVEST_REDDIT_CLIENT_SECRET")?,
            username: env.required("POSTHARVEST_REDDIT_USERNAME")?,
            password: env.required("POSTHARVEST_REDDIT_PASSWORD")?,
        };
        let user_agent = env
            .optional("POSTHARVEST_REDDIT_USER_AGENT")
            .unwrap_or_else(|| format!("postharvest/0.1 (by /u/{})", credentials.username));
        let database_url = env.required("POSTHARVEST_DATABASE_URL")?;

        let collection_raw = env
            .optional("POSTHARVEST_COLLECTION")
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());
        let collection = CollectionName::try_from(collection_raw.as_str())
            .map_err(|err| invalid("POSTHARVEST_COLLECTION", err))?;
        let topic_raw = env.required("POSTHARVEST_TOPIC")?;
        let topic = Topic::try_from(topic_raw.as_str())
            .map_err(|err| invalid("POSTHARVEST_TOPIC", err))?;

        let poll_interval_secs = env.positive_u64("POSTHARVEST_POLL_INTERVAL_SECS", 120)?;
        let page_limit = env.positive_u64("POSTHARVEST_PAGE_LIMIT", 200)?;
        let request_timeout_secs = env.positive_u64("POSTHARVEST_REQUEST_TIMEOUT_SECS", 15)?;

        Ok(Self {
            credentials,
            user_agent,
            database_url,
            collection,
            topic,
            poll_interval: Duration::from_secs(poll_interval_secs),
            page_limit: page_limit as usize,
            request_timeout: Duration::from_secs(request_timeout_secs),
        })
    }
}

pub fn load_dotenv() -> Result<(), ConfigError> {
    match dotenvy::dotenv() {
        Ok(_) => Ok(()),
        Err(err) if err.not_found() => Ok(()),
        Err(err) => Err(err.into()),
    }
}

fn invalid(key: &'static str, err: CoreError) -> ConfigError {
    ConfigError::InvalidValue(key, err.to_string())
}

struct Env<L> {
    lookup: L,
}

impl<L: Fn(&str) -> Option<String>> Env<L> {
    fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.optional(key).ok_or(ConfigError::Missing(key))
    }

    fn positive_u64(&self, key: &'static str, default: u64) -> Result<u64, ConfigError> {
        let Some(raw) = self.optional(key) else {
            return Ok(default);
        };
        match raw.parse::<u64>() {
            Ok(0) => Err(ConfigError::InvalidValue(key, raw)),
            Ok(value) => Ok(value),
            Err(_) => Err(ConfigError::InvalidNumber(key, raw)),
        }
    }
}

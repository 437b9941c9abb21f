use std::fmt;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info};

use super::error::RedditError;

const REFRESH_MARGIN: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for RedditCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedditCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug)]
struct CachedToken {
    value: String,
    expires_at: Instant,
}

#[derive(Debug)]
pub(crate) struct Session {
    http: reqwest::Client,
    token_url: String,
    credentials: RedditCredentials,
    user_agent: String,
    token: Mutex<Option<CachedToken>>,
}

impl Session {
    pub(crate) fn new(
        http: reqwest::Client,
        token_url: String,
        credentials: RedditCredentials,
        user_agent: String,
    ) -> Self {
        Self {
            http,
            token_url,
            credentials,
            user_agent,
            token: Mutex::new(None),
        }
    }

    pub(crate) async fn access_token(&self) -> Result<String, RedditError> {
        let mut guard = self.token.lock().await;
        if let Some(token) = guard.as_ref() {
            if token.expires_at > Instant::now() + REFRESH_MARGIN {
                return Ok(token.value.clone());
            }
            debug!("access token near expiry; refreshing");
        }
        let fresh = self.request_token().await?;
        let value = fresh.value.clone();
        *guard = Some(fresh);
        Ok(value)
    }

    pub(crate) async fn invalidate(&self) {
        let mut guard = self.token.lock().await;
        *guard = None;
    }

    async fn request_token(&self) -> Result<CachedToken, RedditError> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(&self.credentials.client_secret),
            )
            .header("User-Agent", &self.user_agent)
            .form(&[
                ("grant_type", "password"),
                ("username", self.credentials.username.as_str()),
                ("password", self.credentials.password.as_str()),
            ])
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(RedditError::Auth(format!(
                "token request failed: status {status}"
            )));
        }
        let payload: TokenResponse = serde_json::from_str(&body)
            .map_err(|_| RedditError::InvalidResponse("invalid token payload".to_string()))?;
        let token = parse_token(payload)?;
        info!(
            username = %self.credentials.username,
            expires_in_secs = token.1.as_secs(),
            "reddit session established"
        );
        Ok(CachedToken {
            value: token.0,
            expires_at: Instant::now() + token.1,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    expires_in: Option<u64>,
    error: Option<String>,
}

fn parse_token(payload: TokenResponse) -> Result<(String, Duration), RedditError> {
    if let Some(error) = payload.error {
        return Err(RedditError::Auth(error));
    }
    let token = payload
        .access_token
        .filter(|value| !value.trim().is_empty())
        .ok_or(RedditError::MissingData("access_token"))?;
    let expires_in = Duration::from_secs(payload.expires_in.unwrap_or(3600));
    Ok((token, expires_in))
}

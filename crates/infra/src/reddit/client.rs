use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use postharvest_core::domain::Post;

use super::error::RedditError;
use super::listing::{Listing, MoreChildrenResponse, Thing};
use super::session::{RedditCredentials, Session};
use super::walk::CommentWalk;

const API_BASE: &str = "https://oauth.reddit.com";
const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const LISTING_PAGE_MAX: usize = 100;
const THREAD_COMMENT_LIMIT: &str = "500";

#[derive(Debug, Clone)]
pub struct RedditEndpoints {
    pub api_base: String,
    pub token_url: String,
}

impl Default for RedditEndpoints {
    fn default() -> Self {
        Self {
            api_base: API_BASE.to_string(),
            token_url: TOKEN_URL.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct RedditClient {
    http: reqwest::Client,
    session: Session,
    api_base: String,
    user_agent: String,
}

impl RedditClient {
    pub fn new(http: reqwest::Client, credentials: RedditCredentials, user_agent: String) -> Self {
        Self::with_endpoints(http, credentials, user_agent, RedditEndpoints::default())
    }

    pub fn with_endpoints(
        http: reqwest::Client,
        credentials: RedditCredentials,
        user_agent: String,
        endpoints: RedditEndpoints,
    ) -> Self {
        let session = Session::new(
            http.clone(),
            endpoints.token_url,
            credentials,
            user_agent.clone(),
        );
        Self {
            http,
            session,
            api_base: endpoints.api_base.trim_end_matches('/').to_string(),
            user_agent,
        }
    }

    pub async fn authenticate(&self) -> Result<(), RedditError> {
        self.session.access_token().await?;
        Ok(())
    }

    pub async fn list_newest(&self, subreddit: &str, limit: usize) -> Result<Vec<Post>, RedditError> {
        let path = format!("/r/{subreddit}/new");
        let mut posts = Vec::with_capacity(limit);
        let mut after: Option<String> = None;
        while posts.len() < limit {
            let page_size = (limit - posts.len()).min(LISTING_PAGE_MAX);
            let mut query = vec![
                ("limit", page_size.to_string()),
                ("raw_json", "1".to_string()),
            ];
            if let Some(cursor) = after.as_ref() {
                query.push(("after", cursor.clone()));
            }
            let listing: Listing = self.get_json(&path, &query).await?;
            let received = listing.data.children.len();
            for thing in listing.data.children {
                let Thing::Link(link) = thing else {
                    continue;
                };
                let post_id = link.id.clone();
                match link.into_post() {
                    Ok(post) => posts.push(post),
                    Err(err) => warn!(error = %err, post_id = %post_id, "skipping unreadable post"),
                }
            }
            debug!(subreddit, received, total = posts.len(), "listing page fetched");
            after = listing.data.after;
            if received == 0 || after.is_none() {
                break;
            }
        }
        posts.truncate(limit);
        info!(subreddit, count = posts.len(), "fetched newest posts");
        Ok(posts)
    }

    pub async fn comment_walk(&self, post_id: &str) -> Result<CommentWalk<'_>, RedditError> {
        let roots = self.fetch_thread(post_id, None).await?;
        Ok(CommentWalk::new(self, post_id.to_string(), roots))
    }

    pub(crate) async fn fetch_thread(
        &self,
        post_id: &str,
        focus_comment: Option<&str>,
    ) -> Result<Vec<Thing>, RedditError> {
        let path = format!("/comments/{post_id}");
        let mut query = vec![
            ("limit", THREAD_COMMENT_LIMIT.to_string()),
            ("raw_json", "1".to_string()),
        ];
        if let Some(comment_id) = focus_comment {
            query.push(("comment", comment_id.to_string()));
        }
        let listings: Vec<Listing> = self.get_json(&path, &query).await?;
        let comments = listings
            .into_iter()
            .nth(1)
            .ok_or(RedditError::MissingData("comment listing"))?;
        Ok(comments.data.children)
    }

    pub(crate) async fn fetch_more_children(
        &self,
        link_fullname: &str,
        children: &[String],
    ) -> Result<Vec<Thing>, RedditError> {
        let query = vec![
            ("api_type", "json".to_string()),
            ("link_id", link_fullname.to_string()),
            ("children", children.join(",")),
            ("limit_children", "false".to_string()),
            ("raw_json", "1".to_string()),
        ];
        let response: MoreChildrenResponse = self.get_json("/api/morechildren", &query).await?;
        if !response.json.errors.is_empty() {
            let message = response
                .json
                .errors
                .iter()
                .map(|err| err.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            return Err(RedditError::Api(message));
        }
        Ok(response.json.data.map(|data| data.things).unwrap_or_default())
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, RedditError>
    where
        T: DeserializeOwned,
    {
        let token = self.session.access_token().await?;
        let response = self
            .http
            .get(format!("{}{path}", self.api_base))
            .bearer_auth(token)
            .header("User-Agent", &self.user_agent)
            .query(query)
            .send()
            .await?;
        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            warn!(path, "access token rejected; dropping cached session");
            self.session.invalidate().await;
            return Err(RedditError::Unauthorized(path.to_string()));
        }
        let response = response.error_for_status()?;
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|err| RedditError::InvalidResponse(format!("{path}: {err}")))
    }
}

pub mod flatten;
pub mod guard;
pub mod pg_store;
pub mod reddit_feed;

#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use thiserror::Error;

use postharvest_core::domain::{Comment, Post, PostRecord};
use postharvest_core::types::Topic;
use postharvest_infra::db::PostsRepoError;
use postharvest_infra::reddit::RedditError;

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("reddit error: {0}")]
    Reddit(#[from] RedditError),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("posts repo error: {0}")]
    Repo(#[from] PostsRepoError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommentNode {
    Comment(Comment),
    Placeholder,
}

#[async_trait]
pub trait CommentSource: Send {
    async fn next_node(&mut self) -> Result<Option<CommentNode>, FeedError>;
}

#[async_trait]
pub trait Feed: Send + Sync {
    async fn list_newest(&self, topic: &Topic, limit: usize) -> Result<Vec<Post>, FeedError>;

    async fn comment_tree<'a>(
        &'a self,
        post: &'a Post,
    ) -> Result<Box<dyn CommentSource + 'a>, FeedError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppendOutcome {
    Appended,
    Duplicate,
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn exists(&self, post_id: &str) -> Result<bool, StoreError>;

    async fn append(&self, record: &PostRecord) -> Result<AppendOutcome, StoreError>;
}

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::DateTime;

use postharvest_core::domain::{Comment, Post, PostRecord};
use postharvest_core::types::Topic;
use postharvest_infra::db::PostsRepoError;
use postharvest_infra::reddit::RedditError;

use super::{AppendOutcome, CommentNode, CommentSource, Feed, FeedError, PostStore, StoreError};

#[derive(Debug, Clone)]
pub enum FakeNode {
    Comment { id: String, children: Vec<FakeNode> },
    Placeholder,
}

impl FakeNode {
    pub fn comment(id: &str, children: Vec<FakeNode>) -> Self {
        FakeNode::Comment {
            id: id.to_string(),
            children,
        }
    }

    pub fn placeholder() -> Self {
        FakeNode::Placeholder
    }

    pub fn comment_count(&self) -> usize {
        match self {
            FakeNode::Comment { children, .. } => {
                1 + children.iter().map(FakeNode::comment_count).sum::<usize>()
            }
            FakeNode::Placeholder => 0,
        }
    }
}

pub struct TreeSource {
    pending: Vec<FakeNode>,
}

impl TreeSource {
    pub fn new(roots: Vec<FakeNode>) -> Self {
        Self {
            pending: roots.into_iter().rev().collect(),
        }
    }
}

#[async_trait]
impl CommentSource for TreeSource {
    async fn next_node(&mut self) -> Result<Option<CommentNode>, FeedError> {
        let Some(node) = self.pending.pop() else {
            return Ok(None);
        };
        match node {
            FakeNode::Comment { id, children } => {
                self.pending.extend(children.into_iter().rev());
                Ok(Some(CommentNode::Comment(Comment {
                    author: format!("user-{id}"),
                    body: format!("comment {id}"),
                    score: 1,
                    created: DateTime::from_timestamp(1_700_000_100, 0).unwrap_or_default(),
                    id,
                })))
            }
            FakeNode::Placeholder => Ok(Some(CommentNode::Placeholder)),
        }
    }
}

pub fn sample_post(id: &str) -> Post {
    Post {
        id: id.to_string(),
        title: format!("title {id}"),
        author: "alice".to_string(),
        score: 10,
        permalink: format!("/r/test/comments/{id}/"),
        url: format!("https://example.com/{id}"),
        body: String::new(),
        created: DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default(),
    }
}

#[derive(Default)]
pub struct FakeFeed {
    posts: Mutex<Vec<Post>>,
    trees: Mutex<HashMap<String, Vec<FakeNode>>>,
    broken_trees: Mutex<HashSet<String>>,
    listing_down: AtomicBool,
}

impl FakeFeed {
    pub fn with_posts(posts: Vec<Post>) -> Self {
        let feed = Self::default();
        feed.set_posts(posts);
        feed
    }

    pub fn set_posts(&self, posts: Vec<Post>) {
        *self.posts.lock().unwrap() = posts;
    }

    pub fn set_tree(&self, post_id: &str, roots: Vec<FakeNode>) {
        self.trees
            .lock()
            .unwrap()
            .insert(post_id.to_string(), roots);
    }

    pub fn break_tree(&self, post_id: &str) {
        self.broken_trees
            .lock()
            .unwrap()
            .insert(post_id.to_string());
    }

    pub fn take_listing_down(&self) {
        self.listing_down.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl Feed for FakeFeed {
    async fn list_newest(&self, _topic: &Topic, limit: usize) -> Result<Vec<Post>, FeedError> {
        if self.listing_down.load(Ordering::SeqCst) {
            return Err(FeedError::Reddit(RedditError::Api("listing offline".to_string())));
        }
        let posts = self.posts.lock().unwrap();
        Ok(posts.iter().take(limit).cloned().collect())
    }

    async fn comment_tree<'a>(
        &'a self,
        post: &'a Post,
    ) -> Result<Box<dyn CommentSource + 'a>, FeedError> {
        if self.broken_trees.lock().unwrap().contains(&post.id) {
            return Err(FeedError::Reddit(RedditError::MissingData("comment listing")));
        }
        let roots = self
            .trees
            .lock()
            .unwrap()
            .get(&post.id)
            .cloned()
            .unwrap_or_default();
        Ok(Box::new(TreeSource::new(roots)))
    }
}

#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<PostRecord>>,
    failing_appends: Mutex<HashSet<String>>,
    hidden_from_exists: Mutex<HashSet<String>>,
    exists_calls: AtomicUsize,
    append_calls: AtomicUsize,
}

impl MemoryStore {
    pub fn records(&self) -> Vec<PostRecord> {
        self.records.lock().unwrap().clone()
    }

    pub fn count_of(&self, post_id: &str) -> usize {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|record| record.id == post_id)
            .count()
    }

    pub fn fail_append(&self, post_id: &str) {
        self.failing_appends
            .lock()
            .unwrap()
            .insert(post_id.to_string());
    }

    pub fn hide_from_exists(&self, post_id: &str) {
        self.hidden_from_exists
            .lock()
            .unwrap()
            .insert(post_id.to_string());
    }

    pub fn insert_directly(&self, record: PostRecord) {
        self.records.lock().unwrap().push(record);
    }

    pub fn exists_calls(&self) -> usize {
        self.exists_calls.load(Ordering::SeqCst)
    }

    pub fn append_calls(&self) -> usize {
        self.append_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn exists(&self, post_id: &str) -> Result<bool, StoreError> {
        self.exists_calls.fetch_add(1, Ordering::SeqCst);
        if self.hidden_from_exists.lock().unwrap().contains(post_id) {
            return Ok(false);
        }
        Ok(self.count_of(post_id) > 0)
    }

    async fn append(&self, record: &PostRecord) -> Result<AppendOutcome, StoreError> {
        self.append_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_appends.lock().unwrap().contains(&record.id) {
            return Err(StoreError::Repo(PostsRepoError::Sqlx(sqlx::Error::PoolTimedOut)));
        }
        let mut records = self.records.lock().unwrap();
        if records.iter().any(|existing| existing.id == record.id) {
            return Ok(AppendOutcome::Duplicate);
        }
        records.push(record.clone());
        Ok(AppendOutcome::Appended)
    }
}

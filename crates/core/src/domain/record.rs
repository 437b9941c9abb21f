use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::post::{Comment, Post};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentRecord {
    pub id: String,
    pub author: String,
    pub body: String,
    pub score: i64,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: String,
    pub title: String,
    pub author: String,
    pub score: i64,
    pub permalink: String,
    pub url: String,
    pub description: String,
    pub created: DateTime<Utc>,
    pub comments: Vec<CommentRecord>,
}

impl PostRecord {
    pub fn build(post: &Post, comments: Vec<CommentRecord>) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            author: post.author.clone(),
            score: post.score,
            permalink: post.permalink.clone(),
            url: post.url.clone(),
            description: post.body.clone(),
            created: post.created,
            comments,
        }
    }
}

impl From<&Comment> for CommentRecord {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.clone(),
            author: comment.author.clone(),
            body: comment.body.clone(),
            score: comment.score,
            created: comment.created,
        }
    }
}

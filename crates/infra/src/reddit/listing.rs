use serde::Deserialize;

use postharvest_core::domain::{Comment, Post};
use postharvest_core::types::datetime_from_epoch;

use super::error::RedditError;

#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Thing>,
    #[serde(default)]
    pub after: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", content = "data")]
pub enum Thing {
    #[serde(rename = "t1")]
    Comment(CommentData),
    #[serde(rename = "t3")]
    Link(LinkData),
    #[serde(rename = "more")]
    More(MoreData),
}

impl Thing {
    pub fn parent_id(&self) -> &str {
        match self {
            Thing::Comment(comment) => &comment.parent_id,
            Thing::More(more) => &more.parent_id,
            Thing::Link(_) => "",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LinkData {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub score: i64,
    pub permalink: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub selftext: String,
    pub created_utc: f64,
}

impl LinkData {
    pub fn into_post(self) -> Result<Post, RedditError> {
        let created = datetime_from_epoch(self.created_utc)?;
        Ok(Post {
            id: self.id,
            title: self.title,
            author: self.author,
            score: self.score,
            permalink: self.permalink,
            url: self.url,
            body: self.selftext,
            created,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub score: i64,
    pub created_utc: f64,
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub replies: Option<Replies>,
}

// Reddit sends "" instead of a listing when a comment has no replies.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Replies {
    Listing(Box<Listing>),
    Empty(String),
}

impl CommentData {
    pub fn take_replies(&mut self) -> Vec<Thing> {
        match self.replies.take() {
            Some(Replies::Listing(listing)) => listing.data.children,
            _ => Vec::new(),
        }
    }

    pub fn set_replies(&mut self, children: Vec<Thing>) {
        self.replies = Some(Replies::Listing(Box::new(Listing {
            data: ListingData {
                children,
                after: None,
            },
        })));
    }

    pub fn to_comment(&self) -> Result<Comment, RedditError> {
        Ok(Comment {
            id: self.id.clone(),
            author: self.author.clone(),
            body: self.body.clone(),
            score: self.score,
            created: datetime_from_epoch(self.created_utc)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct MoreData {
    pub id: String,
    #[serde(default)]
    pub parent_id: String,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub children: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MoreChildrenResponse {
    pub json: MoreChildrenBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MoreChildrenBody {
    #[serde(default)]
    pub errors: Vec<serde_json::Value>,
    pub data: Option<MoreChildrenData>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MoreChildrenData {
    #[serde(default)]
    pub things: Vec<Thing>,
}

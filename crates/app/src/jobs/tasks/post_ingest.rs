use tracing::{error, info, warn};

use crate::jobs::JobError;
use crate::pipeline::flatten::flatten_comments;
use crate::pipeline::guard::already_stored;
use crate::pipeline::{AppendOutcome, Feed, PostStore};
use postharvest_core::domain::{Post, PostRecord};
use postharvest_core::types::Topic;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IngestStats {
    pub fetched: usize,
    pub stored: usize,
    pub duplicates: usize,
    pub raced: usize,
    pub failed: usize,
}

#[derive(Debug)]
enum PostOutcome {
    Stored { comments: usize },
    AlreadyStored,
    Raced,
}

pub async fn run<F, S>(
    feed: &F,
    store: &S,
    topic: &Topic,
    page_limit: usize,
) -> Result<IngestStats, JobError>
where
    F: Feed + ?Sized,
    S: PostStore + ?Sized,
{
    let posts = feed.list_newest(topic, page_limit).await?;
    let mut stats = IngestStats {
        fetched: posts.len(),
        ..IngestStats::default()
    };

    for post in &posts {
        match ingest_post(feed, store, post).await {
            Ok(PostOutcome::Stored { comments }) => {
                stats.stored += 1;
                info!(post_id = %post.id, title = %post.title, comments, "stored post and comments");
            }
            Ok(PostOutcome::AlreadyStored) => {
                stats.duplicates += 1;
                info!(post_id = %post.id, title = %post.title, "post already exists");
            }
            Ok(PostOutcome::Raced) => {
                stats.raced += 1;
                info!(
                    post_id = %post.id,
                    title = %post.title,
                    "post stored by another writer; skipping"
                );
            }
            Err(err) => {
                stats.failed += 1;
                match &err {
                    JobError::Store(_) => {
                        error!(error = %err, post_id = %post.id, "failed to persist post")
                    }
                    JobError::Feed(_) => {
                        warn!(error = %err, post_id = %post.id, "failed to load comments; post skipped")
                    }
                }
            }
        }
    }
    Ok(stats)
}

async fn ingest_post<F, S>(feed: &F, store: &S, post: &Post) -> Result<PostOutcome, JobError>
where
    F: Feed + ?Sized,
    S: PostStore + ?Sized,
{
    if already_stored(store, &post.id).await? {
        return Ok(PostOutcome::AlreadyStored);
    }
    let comments = {
        let mut tree = feed.comment_tree(post).await?;
        flatten_comments(tree.as_mut()).await?
    };
    let count = comments.len();
    let record = PostRecord::build(post, comments);
    match store.append(&record).await? {
        AppendOutcome::Appended => Ok(PostOutcome::Stored { comments: count }),
        AppendOutcome::Duplicate => Ok(PostOutcome::Raced),
    }
}

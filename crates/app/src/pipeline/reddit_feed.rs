use async_trait::async_trait;

use postharvest_core::domain::Post;
use postharvest_core::types::Topic;
use postharvest_infra::reddit::{CommentWalk, RedditClient, WalkNode};

use super::{CommentNode, CommentSource, Feed, FeedError};

#[async_trait]
impl Feed for RedditClient {
    async fn list_newest(&self, topic: &Topic, limit: usize) -> Result<Vec<Post>, FeedError> {
        Ok(RedditClient::list_newest(self, topic.as_str(), limit).await?)
    }

    async fn comment_tree<'a>(
        &'a self,
        post: &'a Post,
    ) -> Result<Box<dyn CommentSource + 'a>, FeedError> {
        let walk = self.comment_walk(&post.id).await?;
        Ok(Box::new(RedditCommentSource { walk }))
    }
}

struct RedditCommentSource<'a> {
    walk: CommentWalk<'a>,
}

#[async_trait]
impl CommentSource for RedditCommentSource<'_> {
    async fn next_node(&mut self) -> Result<Option<CommentNode>, FeedError> {
        let node = self.walk.next_node().await?;
        Ok(node.map(|node| match node {
            WalkNode::Comment(comment) => CommentNode::Comment(comment),
            WalkNode::More => CommentNode::Placeholder,
        }))
    }
}

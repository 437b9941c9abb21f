use postharvest_core::domain::CommentRecord;

use super::{CommentNode, CommentSource, FeedError};

pub async fn flatten_comments(
    source: &mut (dyn CommentSource + '_),
) -> Result<Vec<CommentRecord>, FeedError> {
    let mut records = Vec::new();
    while let Some(node) = source.next_node().await? {
        match node {
            CommentNode::Comment(comment) => records.push(CommentRecord::from(&comment)),
            CommentNode::Placeholder => {}
        }
    }
    Ok(records)
}

use std::collections::{HashMap, HashSet};

use tracing::debug;

use postharvest_core::domain::Comment;

use super::client::RedditClient;
use super::error::RedditError;
use super::listing::{MoreData, Thing};

const MORE_CHILDREN_BATCH: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub enum WalkNode {
    Comment(Comment),
    More,
}

#[derive(Debug)]
pub struct CommentWalk<'a> {
    client: &'a RedditClient,
    post_id: String,
    pending: Vec<Thing>,
    seen_comments: HashSet<String>,
    expanded: HashSet<String>,
}

impl<'a> CommentWalk<'a> {
    pub(crate) fn new(client: &'a RedditClient, post_id: String, roots: Vec<Thing>) -> Self {
        let mut walk = Self {
            client,
            post_id,
            pending: Vec::new(),
            seen_comments: HashSet::new(),
            expanded: HashSet::new(),
        };
        walk.push_front(roots);
        walk
    }

    pub async fn next_node(&mut self) -> Result<Option<WalkNode>, RedditError> {
        while let Some(thing) = self.pending.pop() {
            match thing {
                Thing::Comment(mut data) => {
                    if !self.seen_comments.insert(data.name.clone()) {
                        continue;
                    }
                    let replies = data.take_replies();
                    self.push_front(replies);
                    return Ok(Some(WalkNode::Comment(data.to_comment()?)));
                }
                Thing::More(more) => {
                    let key = format!("{}:{}", more.parent_id, more.id);
                    if self.expanded.insert(key) {
                        let expanded = self.expand(&more).await?;
                        debug!(
                            post_id = %self.post_id,
                            parent_id = %more.parent_id,
                            loaded = expanded.len(),
                            "expanded more stub"
                        );
                        self.push_front(expanded);
                    }
                    return Ok(Some(WalkNode::More));
                }
                Thing::Link(_) => continue,
            }
        }
        Ok(None)
    }

    fn push_front(&mut self, things: Vec<Thing>) {
        self.pending.extend(things.into_iter().rev());
    }

    async fn expand(&self, more: &MoreData) -> Result<Vec<Thing>, RedditError> {
        if more.children.is_empty() {
            // "continue this thread": reload the thread rooted at the parent.
            let Some(parent_id) = more.parent_id.strip_prefix("t1_") else {
                return Ok(Vec::new());
            };
            let roots = self.client.fetch_thread(&self.post_id, Some(parent_id)).await?;
            return Ok(replies_of(roots, &more.parent_id));
        }

        let link_fullname = format!("t3_{}", self.post_id);
        let mut things = Vec::with_capacity(more.children.len());
        for batch in more.children.chunks(MORE_CHILDREN_BATCH) {
            let loaded = self
                .client
                .fetch_more_children(&link_fullname, batch)
                .await?;
            things.extend(loaded);
        }
        Ok(nest_things(&more.parent_id, things))
    }
}

// Things whose parent is missing from the batch are kept after the regular roots.
pub(crate) fn nest_things(root_parent: &str, things: Vec<Thing>) -> Vec<Thing> {
    let names: HashSet<String> = things
        .iter()
        .filter_map(|thing| match thing {
            Thing::Comment(comment) => Some(comment.name.clone()),
            _ => None,
        })
        .collect();

    let mut roots = Vec::new();
    let mut orphans = Vec::new();
    let mut by_parent: HashMap<String, Vec<Thing>> = HashMap::new();
    for thing in things {
        let parent = thing.parent_id().to_string();
        if parent == root_parent {
            roots.push(thing);
        } else if names.contains(&parent) {
            by_parent.entry(parent).or_default().push(thing);
        } else {
            orphans.push(thing);
        }
    }
    roots.extend(orphans);
    attach_children(&mut roots, &mut by_parent);
    roots
}

fn attach_children(nodes: &mut [Thing], by_parent: &mut HashMap<String, Vec<Thing>>) {
    for node in nodes.iter_mut() {
        if let Thing::Comment(comment) = node {
            if let Some(mut children) = by_parent.remove(&comment.name) {
                attach_children(&mut children, by_parent);
                comment.set_replies(children);
            }
        }
    }
}

fn replies_of(things: Vec<Thing>, parent_fullname: &str) -> Vec<Thing> {
    for thing in things {
        if let Thing::Comment(mut comment) = thing {
            let replies = comment.take_replies();
            if comment.name == parent_fullname {
                return replies;
            }
            let found = replies_of(replies, parent_fullname);
            if !found.is_empty() {
                return found;
            }
        }
    }
    Vec::new()
}

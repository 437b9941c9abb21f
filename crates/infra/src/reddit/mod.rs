pub mod client;
pub mod error;
pub mod listing;
pub mod session;
pub mod walk;

pub use client::{RedditClient, RedditEndpoints};
pub use error::RedditError;
pub use session::RedditCredentials;
pub use walk::{CommentWalk, WalkNode};

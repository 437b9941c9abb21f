pub mod post;
pub mod record;

pub use post::{Comment, Post};
pub use record::{CommentRecord, PostRecord};

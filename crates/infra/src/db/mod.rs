pub mod pool;
pub mod posts_repo;

pub use pool::{DbPool, DbPoolError, connect};
pub use posts_repo::{InsertOutcome, PostsRepoError, ensure_collection, insert_post, post_exists};

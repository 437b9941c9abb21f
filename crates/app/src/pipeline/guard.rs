use tracing::debug;

use super::{PostStore, StoreError};

pub async fn already_stored<S>(store: &S, post_id: &str) -> Result<bool, StoreError>
where
    S: PostStore + ?Sized,
{
    let exists = store.exists(post_id).await?;
    debug!(post_id, exists, "duplicate check");
    Ok(exists)
}

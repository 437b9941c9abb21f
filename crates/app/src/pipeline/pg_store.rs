use async_trait::async_trait;

use postharvest_core::domain::PostRecord;
use postharvest_core::types::CollectionName;
use postharvest_infra::db::{self, DbPool, InsertOutcome};

use super::{AppendOutcome, PostStore, StoreError};

#[derive(Debug, Clone)]
pub struct PgPostStore {
    pool: DbPool,
    collection: CollectionName,
}

impl PgPostStore {
    pub fn new(pool: DbPool, collection: CollectionName) -> Self {
        Self { pool, collection }
    }

    pub async fn ensure_collection(&self) -> Result<(), StoreError> {
        db::ensure_collection(&self.pool, &self.collection).await?;
        Ok(())
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn exists(&self, post_id: &str) -> Result<bool, StoreError> {
        Ok(db::post_exists(&self.pool, &self.collection, post_id).await?)
    }

    async fn append(&self, record: &PostRecord) -> Result<AppendOutcome, StoreError> {
        let outcome = db::insert_post(&self.pool, &self.collection, record).await?;
        Ok(match outcome {
            InsertOutcome::Inserted => AppendOutcome::Appended,
            InsertOutcome::Duplicate => AppendOutcome::Duplicate,
        })
    }
}

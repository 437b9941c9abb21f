use sqlx::PgPool;
use sqlx::types::Json;
use thiserror::Error;
use tracing::info;

use postharvest_core::domain::PostRecord;
use postharvest_core::types::CollectionName;

#[derive(Debug, Error)]
pub enum PostsRepoError {
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

pub async fn ensure_collection(
    pool: &PgPool,
    collection: &CollectionName,
) -> Result<(), PostsRepoError> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1
            FROM information_schema.tables
            WHERE table_schema = current_schema()
              AND table_name = $1
        )
        "#,
    )
    .bind(collection.as_str())
    .fetch_one(pool)
    .await?;

    sqlx::query(&create_table_sql(collection))
        .execute(pool)
        .await?;
    sqlx::query(&create_time_index_sql(collection))
        .execute(pool)
        .await?;

    if exists {
        info!(collection = %collection, "collection already present");
    } else {
        info!(collection = %collection, time_field = "created", "collection created");
    }
    Ok(())
}

pub async fn post_exists(
    pool: &PgPool,
    collection: &CollectionName,
    post_id: &str,
) -> Result<bool, PostsRepoError> {
    let sql = format!("SELECT EXISTS (SELECT 1 FROM {collection} WHERE post_id = $1)");
    let exists: bool = sqlx::query_scalar(&sql)
        .bind(post_id)
        .fetch_one(pool)
        .await?;
    Ok(exists)
}

pub async fn insert_post(
    pool: &PgPool,
    collection: &CollectionName,
    record: &PostRecord,
) -> Result<InsertOutcome, PostsRepoError> {
    let sql = format!(
        r#"
        INSERT INTO {collection} (
            post_id,
            title,
            author,
            score,
            permalink,
            url,
            description,
            created,
            comments
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (post_id) DO NOTHING
        "#
    );
    let result = sqlx::query(&sql)
        .bind(&record.id)
        .bind(&record.title)
        .bind(&record.author)
        .bind(record.score)
        .bind(&record.permalink)
        .bind(&record.url)
        .bind(&record.description)
        .bind(record.created)
        .bind(Json(&record.comments))
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        Ok(InsertOutcome::Duplicate)
    } else {
        Ok(InsertOutcome::Inserted)
    }
}

fn create_table_sql(collection: &CollectionName) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {collection} (
            post_id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            score BIGINT NOT NULL,
            permalink TEXT NOT NULL,
            url TEXT NOT NULL,
            description TEXT NOT NULL,
            created TIMESTAMPTZ NOT NULL,
            comments JSONB NOT NULL DEFAULT '[]'::jsonb,
            ingested_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#
    )
}

fn create_time_index_sql(collection: &CollectionName) -> String {
    format!("CREATE INDEX IF NOT EXISTS {collection}_created_idx ON {collection} (created)")
}

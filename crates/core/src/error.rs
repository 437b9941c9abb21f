use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid topic: {0}")]
    InvalidTopic(String),
    #[error("invalid collection name: {0}")]
    InvalidCollection(String),
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

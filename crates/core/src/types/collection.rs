use std::fmt;

use crate::error::CoreError;

const MAX_IDENTIFIER_LEN: usize = 63;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CollectionName(String);

impl CollectionName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for CollectionName {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        let Some(first) = trimmed.chars().next() else {
            return Err(CoreError::InvalidCollection("empty name".to_string()));
        };
        if first.is_ascii_digit() || trimmed.len() > MAX_IDENTIFIER_LEN {
            return Err(CoreError::InvalidCollection(trimmed.to_string()));
        }
        if !trimmed
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_')
        {
            return Err(CoreError::InvalidCollection(trimmed.to_string()));
        }
        Ok(CollectionName(trimmed.to_string()))
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

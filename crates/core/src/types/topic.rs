use std::fmt;

use crate::error::CoreError;

const MAX_TOPIC_LEN: usize = 21;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topic(String);

impl Topic {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Topic {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim().trim_start_matches('/');
        let trimmed = trimmed.strip_prefix("r/").unwrap_or(trimmed);
        let trimmed = trimmed.trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(CoreError::InvalidTopic("empty topic".to_string()));
        }
        if trimmed.len() > MAX_TOPIC_LEN
            || !trimmed
                .chars()
                .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
        {
            return Err(CoreError::InvalidTopic(trimmed.to_string()));
        }
        Ok(Topic(trimmed.to_string()))
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Topic;

    #[test]
    fn accepts_plain_name() {
        let topic = Topic::try_from("mongodb").unwrap();
        assert_eq!(topic.as_str(), "mongodb");
    }

    #[test]
    fn strips_prefix_and_slashes() {
        let topic = Topic::try_from(" /r/rust/ ").unwrap();
        assert_eq!(topic.as_str(), "rust");
    }

    #[test]
    fn rejects_empty_and_invalid() {
        assert!(Topic::try_from("  ").is_err());
        assert!(Topic::try_from("r/").is_err());
        assert!(Topic::try_from("two words").is_err());
        assert!(Topic::try_from("a".repeat(22).as_str()).is_err());
    }

    #[test]
    fn bare_prefix_is_not_a_topic() {
        for raw in ["r/", "/r/", " /r// "] {
            assert!(Topic::try_from(raw).is_err(), "{raw:?} should be rejected");
        }
        assert_eq!(Topic::try_from("r").unwrap().as_str(), "r");
    }
}

use chrono::{DateTime, Utc};

use crate::error::CoreError;

pub fn datetime_from_epoch(seconds: f64) -> Result<DateTime<Utc>, CoreError> {
    if !seconds.is_finite() {
        return Err(CoreError::InvalidTimestamp(seconds.to_string()));
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1_000_000_000.0).round() as u32;
    DateTime::from_timestamp(whole as i64, nanos.min(999_999_999))
        .ok_or_else(|| CoreError::InvalidTimestamp(seconds.to_string()))
}

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{ChartError, ChartResult};

#[must_use]
pub fn datetime_to_unix_millis(time: DateTime<Utc>) -> f64 {
    time.timestamp_millis() as f64
}

pub fn unix_millis_to_datetime(millis: f64) -> ChartResult<DateTime<Utc>> {
    if !millis.is_finite() {
        return Err(ChartError::InvalidData(
            "timestamp must be finite".to_owned(),
        ));
    }

    Utc.timestamp_millis_opt(millis.round() as i64)
        .single()
        .ok_or_else(|| ChartError::InvalidData(format!("timestamp {millis} is out of range")))
}

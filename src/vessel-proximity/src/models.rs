use chrono::{DateTime, NaiveDateTime, Utc};
use itertools::Itertools;
use proximity_core::{Mmsi, ProcessingFault, ProximityEvent};
use serde::Serialize;

static NAIVE_TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProximityRow {
    pub mmsi: Mmsi,
    pub vessel_proximity: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorRow {
    pub index: usize,
    pub error: String,
}

impl From<&ProximityEvent> for ProximityRow {
    fn from(value: &ProximityEvent) -> Self {
        Self {
            mmsi: value.vessel_id,
            vessel_proximity: format!("[{}]", value.nearby_vessel_ids.iter().join(", ")),
            timestamp: value.timestamp,
        }
    }
}

impl From<&ProcessingFault> for ErrorRow {
    fn from(value: &ProcessingFault) -> Self {
        Self {
            index: value.report_index,
            error: value.message.clone(),
        }
    }
}

pub fn parse_mmsi(value: Option<&str>) -> Option<Mmsi> {
    value.filter(|v| !v.is_empty())?.parse().ok()
}

/// Accepts RFC 3339, or a timestamp without offset which is read as UTC.
pub fn parse_timestamp(value: Option<&str>) -> Option<DateTime<Utc>> {
    let value = value.filter(|v| !v.is_empty())?;

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
        .map(|v| v.and_utc())
}

/// Unreadable coordinates become NaN so that the distance matrix rejects the batch.
pub fn parse_coordinate(value: Option<&str>) -> f64 {
    value.and_then(|v| v.parse().ok()).unwrap_or(f64::NAN)
}

use std::{fmt::Display, num::ParseIntError, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const LATITUDE_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
pub const LONGITUDE_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub struct Mmsi(i32);

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// A single row of an input batch.
///
/// `vessel_id` and `timestamp` are optional because the loader may fail to read them for a
/// given row, such rows are reported as processing faults instead of aborting the batch.
#[derive(Debug, Clone, PartialEq)]
pub struct VesselReport {
    pub vessel_id: Option<Mmsi>,
    pub timestamp: Option<DateTime<Utc>>,
    pub position: Position,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// NaN is never contained in a range, so this also rejects non-numeric coordinates.
    pub fn is_valid(&self) -> bool {
        LATITUDE_RANGE.contains(&self.latitude) && LONGITUDE_RANGE.contains(&self.longitude)
    }
}

impl From<Position> for geo::Point<f64> {
    fn from(value: Position) -> Self {
        geo::Point::new(value.longitude, value.latitude)
    }
}

impl VesselReport {
    pub fn new(vessel_id: Mmsi, timestamp: DateTime<Utc>, position: Position) -> Self {
        Self {
            vessel_id: Some(vessel_id),
            timestamp: Some(timestamp),
            position,
        }
    }
}

impl Mmsi {
    pub fn into_inner(self) -> i32 {
        self.0
    }
}

impl FromStr for Mmsi {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<Mmsi> for i32 {
    fn from(value: Mmsi) -> Self {
        value.0
    }
}

impl Display for Mmsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(any(test, feature = "test"))]
mod test {
    use chrono::{DateTime, TimeZone, Utc};

    use super::*;

    impl Mmsi {
        pub fn test_new(mmsi: i32) -> Self {
            Self(mmsi)
        }
    }

    impl VesselReport {
        pub fn test_new(mmsi: i32, latitude: f64, longitude: f64) -> Self {
            Self::new(
                Mmsi(mmsi),
                test_timestamp(),
                Position::new(latitude, longitude),
            )
        }
    }

    pub fn test_timestamp() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }
}

#[cfg(any(test, feature = "test"))]
pub use test::test_timestamp;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::Mmsi;

/// One vessel report with at least one other vessel within the threshold distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProximityEvent {
    pub report_index: usize,
    pub vessel_id: Mmsi,
    pub timestamp: DateTime<Utc>,
    /// Ascending row order, the same vessel may be listed more than once.
    pub nearby_vessel_ids: Vec<Mmsi>,
    pub nearby_report_indices: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingFault {
    pub report_index: usize,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProximityOutput {
    pub events: Vec<ProximityEvent>,
    pub faults: Vec<ProcessingFault>,
}

impl ProximityOutput {
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.faults.is_empty()
    }

    pub(crate) fn extend(&mut self, other: ProximityOutput) {
        self.events.extend(other.events);
        self.faults.extend(other.faults);
    }
}

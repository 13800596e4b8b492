use crate::{ProcessingFault, ProximityEvent, VesselReport};

/// Supplies the ordered batch of reports to process.
pub trait ProximityOutboundPort {
    type Error: std::error::Error + Send + Sync + 'static;

    fn vessel_reports(&self) -> Result<Vec<VesselReport>, Self::Error>;
}

/// Receives the results of a batch.
pub trait ProximityInboundPort {
    type Error: std::error::Error + Send + Sync + 'static;

    fn add_proximity_events(&self, events: &[ProximityEvent]) -> Result<(), Self::Error>;
    /// Only called when the batch produced at least one fault.
    fn add_processing_faults(&self, faults: &[ProcessingFault]) -> Result<(), Self::Error>;
}

pub trait ProximityVisualizer {
    type Error: std::error::Error + Send + Sync + 'static;

    fn visualize(
        &self,
        reports: &[VesselReport],
        events: &[ProximityEvent],
    ) -> Result<(), Self::Error>;
}

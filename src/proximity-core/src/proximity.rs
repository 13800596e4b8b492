use std::sync::Arc;

use snafu::{OptionExt, ResultExt};
use tokio::task::JoinSet;
use tracing::{info, instrument, warn};

use crate::{
    DistanceMatrix, ProcessingFault, ProximityEvent, ProximityOutput, Result, RowError,
    VesselReport,
    error::{
        error::{InvalidThresholdSnafu, JoinSnafu, SizeMismatchSnafu, WorkQueueClosedSnafu},
        row_error::{MissingTimestampSnafu, MissingVesselIdSnafu},
    },
};

/// Converts a [`DistanceMatrix`] into per report proximity events.
///
/// Two reports are near each other if their distance is strictly less than `threshold_km` and
/// they belong to different vessels.
#[derive(Debug, Clone, Copy)]
pub struct ProximityExtractor {
    threshold_km: f64,
}

impl ProximityExtractor {
    pub fn new(threshold_km: f64) -> Result<Self> {
        if !threshold_km.is_finite() || threshold_km <= 0.0 {
            return InvalidThresholdSnafu { threshold_km }.fail();
        }
        Ok(Self { threshold_km })
    }

    pub fn threshold_km(&self) -> f64 {
        self.threshold_km
    }

    #[instrument(skip_all, fields(num_reports = reports.len(), threshold_km = self.threshold_km))]
    pub fn extract(
        &self,
        reports: &[VesselReport],
        matrix: &DistanceMatrix,
    ) -> Result<ProximityOutput> {
        check_size(reports, matrix)?;

        let output = self.extract_range(reports, matrix, 0..reports.len());

        info!(
            num_events = output.events.len(),
            num_faults = output.faults.len(),
            "extracted proximity events"
        );

        Ok(output)
    }

    /// Same output as [`Self::extract`], but rows are split into chunks and processed by
    /// `num_workers` blocking tasks. Chunks are merged back in row order.
    #[instrument(skip_all, fields(num_reports = reports.len(), threshold_km = self.threshold_km))]
    pub async fn extract_concurrent(
        self,
        reports: Arc<[VesselReport]>,
        matrix: Arc<DistanceMatrix>,
        num_workers: usize,
    ) -> Result<ProximityOutput> {
        check_size(&reports, &matrix)?;

        let num_reports = reports.len();
        if num_reports == 0 {
            return Ok(ProximityOutput::default());
        }

        let num_workers = num_workers.clamp(1, num_reports);
        let chunk_size = num_reports.div_ceil(num_workers);
        let num_chunks = num_reports.div_ceil(chunk_size);

        let (tx, rx) = async_channel::bounded(num_chunks);

        let mut set = JoinSet::new();

        for _ in 0..num_workers {
            let rx = rx.clone();
            let reports = reports.clone();
            let matrix = matrix.clone();
            set.spawn_blocking(move || {
                let mut done = Vec::new();
                while let Ok((chunk, range)) = rx.recv_blocking() {
                    done.push((chunk, self.extract_range(&reports, &matrix, range)));
                }
                done
            });
        }

        for chunk in 0..num_chunks {
            let start = chunk * chunk_size;
            let end = (start + chunk_size).min(num_reports);
            tx.send((chunk, start..end))
                .await
                .map_err(|_| WorkQueueClosedSnafu { chunk }.build())?;
        }

        drop(tx);
        drop(rx);

        let mut chunks = Vec::with_capacity(num_chunks);
        while let Some(done) = set.join_next().await {
            chunks.extend(done.context(JoinSnafu)?);
        }

        chunks.sort_unstable_by_key(|(chunk, _)| *chunk);

        let output = chunks
            .into_iter()
            .fold(ProximityOutput::default(), |mut output, (_, next)| {
                output.extend(next);
                output
            });

        info!(
            num_events = output.events.len(),
            num_faults = output.faults.len(),
            "extracted proximity events"
        );

        Ok(output)
    }

    fn extract_range(
        &self,
        reports: &[VesselReport],
        matrix: &DistanceMatrix,
        range: std::ops::Range<usize>,
    ) -> ProximityOutput {
        let mut output = ProximityOutput::default();

        for report_index in range {
            match self.proximity_event(reports, matrix, report_index) {
                Ok(Some(event)) => output.events.push(event),
                Ok(None) => {}
                Err(e) => {
                    warn!(report_index, "failed to process report: {e}");
                    output.faults.push(ProcessingFault {
                        report_index,
                        message: e.to_string(),
                    });
                }
            }
        }

        output
    }

    fn proximity_event(
        &self,
        reports: &[VesselReport],
        matrix: &DistanceMatrix,
        report_index: usize,
    ) -> std::result::Result<Option<ProximityEvent>, RowError> {
        let report = &reports[report_index];

        let vessel_id = report.vessel_id.context(MissingVesselIdSnafu)?;
        let timestamp = report.timestamp.context(MissingTimestampSnafu)?;

        // `check_size` guarantees a row for every report
        let Some(distances) = matrix.row(report_index) else {
            return Ok(None);
        };

        let (nearby_report_indices, nearby_vessel_ids) = distances
            .iter()
            .zip(reports)
            .enumerate()
            .filter(|(_, (distance, _))| **distance < self.threshold_km)
            .filter_map(|(i, (_, other))| other.vessel_id.map(|id| (i, id)))
            .filter(|(_, id)| *id != vessel_id)
            .unzip::<_, _, Vec<_>, Vec<_>>();

        if nearby_vessel_ids.is_empty() {
            return Ok(None);
        }

        Ok(Some(ProximityEvent {
            report_index,
            vessel_id,
            timestamp,
            nearby_vessel_ids,
            nearby_report_indices,
        }))
    }
}

fn check_size(reports: &[VesselReport], matrix: &DistanceMatrix) -> Result<()> {
    if reports.len() != matrix.size() {
        return SizeMismatchSnafu {
            reports: reports.len(),
            matrix: matrix.size(),
        }
        .fail();
    }
    Ok(())
}

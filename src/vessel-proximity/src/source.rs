use std::path::PathBuf;

use csv::StringRecord;
use proximity_core::{Position, ProximityOutboundPort, VesselReport};
use snafu::{OptionExt, ResultExt};
use tracing::{info, instrument, warn};

use crate::{
    Error, Result,
    error::error::{CsvSnafu, MissingColumnSnafu},
    models::{parse_coordinate, parse_mmsi, parse_timestamp},
    settings::CsvColumns,
};

/// Reads vessel reports from a CSV file with a header row.
#[derive(Debug, Clone)]
pub struct CsvReportSource {
    path: PathBuf,
    columns: CsvColumns,
}

#[derive(Debug, Clone, Copy)]
struct ColumnIndices {
    mmsi: usize,
    timestamp: usize,
    latitude: usize,
    longitude: usize,
}

impl CsvReportSource {
    pub fn new(path: impl Into<PathBuf>, columns: CsvColumns) -> Self {
        Self {
            path: path.into(),
            columns,
        }
    }

    fn column_indices(&self, headers: &StringRecord) -> Result<ColumnIndices> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .context(MissingColumnSnafu {
                    path: &self.path,
                    column,
                })
        };

        Ok(ColumnIndices {
            mmsi: find(&self.columns.mmsi)?,
            timestamp: find(&self.columns.timestamp)?,
            latitude: find(&self.columns.latitude)?,
            longitude: find(&self.columns.longitude)?,
        })
    }
}

impl ProximityOutboundPort for CsvReportSource {
    type Error = Error;

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn vessel_reports(&self) -> Result<Vec<VesselReport>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::Fields)
            .flexible(true)
            .from_path(&self.path)
            .context(CsvSnafu { path: &self.path })?;

        let headers = reader
            .headers()
            .context(CsvSnafu { path: &self.path })?
            .clone();
        let indices = self.column_indices(&headers)?;

        let mut reports = Vec::new();

        for (index, record) in reader.records().enumerate() {
            let record = record.context(CsvSnafu { path: &self.path })?;

            let report = VesselReport {
                vessel_id: parse_mmsi(record.get(indices.mmsi)),
                timestamp: parse_timestamp(record.get(indices.timestamp)),
                position: Position::new(
                    parse_coordinate(record.get(indices.latitude)),
                    parse_coordinate(record.get(indices.longitude)),
                ),
            };

            if report.vessel_id.is_none() || report.timestamp.is_none() {
                warn!(index, "report has an unreadable mmsi or timestamp");
            }

            reports.push(report);
        }

        info!(num_reports = reports.len(), "loaded vessel reports");

        Ok(reports)
    }
}

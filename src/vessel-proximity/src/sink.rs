use std::path::{Path, PathBuf};

use proximity_core::{ProcessingFault, ProximityEvent, ProximityInboundPort};
use serde::Serialize;
use snafu::ResultExt;
use tracing::{info, instrument};

use crate::{
    Error, Result,
    error::error::CsvSnafu,
    models::{ErrorRow, ProximityRow},
};

/// Writes proximity events to one CSV file and processing faults to a separate error log.
#[derive(Debug, Clone)]
pub struct CsvProximitySink {
    events_path: PathBuf,
    error_log_path: PathBuf,
}

impl CsvProximitySink {
    pub fn new(events_path: impl Into<PathBuf>, error_log_path: impl Into<PathBuf>) -> Self {
        Self {
            events_path: events_path.into(),
            error_log_path: error_log_path.into(),
        }
    }
}

fn write_rows<T: Serialize>(
    path: &Path,
    headers: &[&str],
    rows: impl Iterator<Item = T>,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .context(CsvSnafu { path })?;

    // Written explicitly so an empty batch still produces a header row
    writer.write_record(headers).context(CsvSnafu { path })?;

    for row in rows {
        writer.serialize(row).context(CsvSnafu { path })?;
    }

    writer
        .flush()
        .map_err(csv::Error::from)
        .context(CsvSnafu { path })
}

impl ProximityInboundPort for CsvProximitySink {
    type Error = Error;

    #[instrument(skip_all, fields(path = %self.events_path.display()))]
    fn add_proximity_events(&self, events: &[ProximityEvent]) -> Result<()> {
        write_rows(
            &self.events_path,
            &["mmsi", "vessel_proximity", "timestamp"],
            events.iter().map(ProximityRow::from),
        )?;
        info!(num_events = events.len(), "wrote proximity events");
        Ok(())
    }

    #[instrument(skip_all, fields(path = %self.error_log_path.display()))]
    fn add_processing_faults(&self, faults: &[ProcessingFault]) -> Result<()> {
        write_rows(
            &self.error_log_path,
            &["index", "error"],
            faults.iter().map(ErrorRow::from),
        )?;
        info!(num_faults = faults.len(), "wrote processing faults");
        Ok(())
    }
}

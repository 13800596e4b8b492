use snafu::{Location, Snafu};
use tokio::task::JoinError;

pub type Result<T> = std::result::Result<T, Error>;

/// Batch level errors, any of these aborts the whole computation.
#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display(
        "Report '{index}' has an invalid position, latitude: '{latitude}', longitude: '{longitude}'"
    ))]
    InvalidPosition {
        #[snafu(implicit)]
        location: Location,
        index: usize,
        latitude: f64,
        longitude: f64,
    },
    #[snafu(display(
        "Number of reports '{reports}' does not match distance matrix size '{matrix}'"
    ))]
    SizeMismatch {
        #[snafu(implicit)]
        location: Location,
        reports: usize,
        matrix: usize,
    },
    #[snafu(display("Threshold must be a positive number of kilometers, got '{threshold_km}'"))]
    InvalidThreshold {
        #[snafu(implicit)]
        location: Location,
        threshold_km: f64,
    },
    #[snafu(display("Work queue closed before chunk '{chunk}' was queued"))]
    WorkQueueClosed {
        #[snafu(implicit)]
        location: Location,
        chunk: usize,
    },
    #[snafu(display("Failed to join tasks"))]
    Join {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: JoinError,
    },
}

/// Errors scoped to a single report, these become [`crate::ProcessingFault`]s.
#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum RowError {
    #[snafu(display("Report is missing a vessel id"))]
    MissingVesselId {
        #[snafu(implicit)]
        location: Location,
    },
    #[snafu(display("Report is missing a timestamp"))]
    MissingTimestamp {
        #[snafu(implicit)]
        location: Location,
    },
}

use snafu::{Location, Snafu};
use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Proximity computation failed"))]
    Core {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: proximity_core::Error,
    },
    #[snafu(display("CSV error, path: '{}'", path.display()))]
    Csv {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: csv::Error,
    },
    #[snafu(display("Input '{}' is missing column '{column}'", path.display()))]
    MissingColumn {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        column: String,
    },
    #[snafu(display("IO error, path: '{}'", path.display()))]
    Io {
        #[snafu(implicit)]
        location: Location,
        path: PathBuf,
        #[snafu(source)]
        error: std::io::Error,
    },
    #[snafu(display("Failed to serialize json"))]
    Json {
        #[snafu(implicit)]
        location: Location,
        #[snafu(source)]
        error: serde_json::Error,
    },
}

use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::Deserialize;
use strum::{AsRefStr, EnumString};

static CONFIG_ENV_PREFIX: &str = "VESSEL_PROXIMITY";
static ENVIRONMENT_VAR: &str = "APP_ENVIRONMENT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, EnumString, AsRefStr)]
#[strum(ascii_case_insensitive)]
pub enum Environment {
    #[default]
    Local,
    Development,
    Production,
    Test,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default = "default_threshold_km")]
    pub threshold_km: f64,
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub error_log_path: PathBuf,
    pub visualization_path: Option<PathBuf>,
    /// Values above 1 spread row extraction over this many workers.
    pub num_workers: Option<usize>,
    #[serde(default)]
    pub csv_columns: CsvColumns,
    pub environment: Environment,
}

/// Names of the input columns read by [`crate::source::CsvReportSource`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CsvColumns {
    pub mmsi: String,
    pub timestamp: String,
    pub latitude: String,
    pub longitude: String,
}

impl Default for CsvColumns {
    fn default() -> Self {
        Self {
            mmsi: "mmsi".into(),
            timestamp: "timestamp".into(),
            latitude: "lat".into(),
            longitude: "lon".into(),
        }
    }
}

fn default_threshold_km() -> f64 {
    5.0
}

impl Environment {
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(ENVIRONMENT_VAR) {
            Ok(v) => Self::parse(&v),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        value
            .parse()
            .map_err(|_| ConfigError::Message(format!("invalid {ENVIRONMENT_VAR} '{value}'")))
    }

    pub fn config_file(&self) -> String {
        format!("config/{}", self.as_ref().to_lowercase())
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Self::with_environment(Environment::from_env()?)
    }

    pub fn with_environment(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(&environment.config_file()).required(true))
            .add_source(config::Environment::with_prefix(CONFIG_ENV_PREFIX).separator("__"))
            .set_override("environment", environment.as_ref())?
            .build()?
            .try_deserialize()
    }
}

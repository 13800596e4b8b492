#![deny(warnings)]
#![deny(rust_2018_idioms)]

use config::{Config, File};
use vessel_proximity::settings::{Environment, Settings};

pub mod helper;
pub mod proximity;

#[test]
fn test_local_settings_are_valid() {
    let settings = Config::builder()
        .add_source(File::with_name("config/local.yml").required(true))
        .set_override("environment", "Local")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize::<Settings>()
        .unwrap();

    assert_eq!(settings.threshold_km, 5.0);
    assert_eq!(settings.csv_columns.latitude, "lat");
}

#[test]
fn test_production_settings_are_valid() {
    let settings = Config::builder()
        .add_source(File::with_name("config/production.yml").required(true))
        .set_override("environment", "Production")
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize::<Settings>()
        .unwrap();

    assert_eq!(settings.environment, Environment::Production);
    assert_eq!(settings.num_workers, Some(8));
    assert!(settings.visualization_path.is_none());
}

#[test]
fn test_settings_resolve_config_file_from_environment() {
    let settings = Settings::with_environment(Environment::Local).unwrap();
    assert_eq!(settings.environment, Environment::Local);
}

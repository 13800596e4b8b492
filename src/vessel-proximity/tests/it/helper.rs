use std::path::{Path, PathBuf};

use vessel_proximity::{
    Result,
    settings::{CsvColumns, Environment, Settings},
    startup::{App, RunSummary},
};

pub struct TestHelper {
    dir: PathBuf,
    pub settings: Settings,
}

impl TestHelper {
    pub fn new(input: &str) -> Self {
        let dir = std::env::temp_dir().join(format!("vessel-proximity-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();

        let input_path = dir.join("input.csv");
        std::fs::write(&input_path, input).unwrap();

        let settings = Settings {
            threshold_km: 5.0,
            input_path,
            output_path: dir.join("events.csv"),
            error_log_path: dir.join("errors.csv"),
            visualization_path: Some(dir.join("events.geojson")),
            num_workers: None,
            csv_columns: CsvColumns::default(),
            environment: Environment::Test,
        };

        Self { dir, settings }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        App::build(&self.settings)?.run().await
    }

    pub fn events(&self) -> String {
        read(&self.settings.output_path)
    }

    pub fn errors(&self) -> Option<String> {
        self.settings
            .error_log_path
            .exists()
            .then(|| read(&self.settings.error_log_path))
    }

    pub fn visualization(&self) -> serde_json::Value {
        let path = self.settings.visualization_path.as_ref().unwrap();
        serde_json::from_str(&read(path)).unwrap()
    }
}

impl Drop for TestHelper {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.dir);
    }
}

fn read(path: &Path) -> String {
    std::fs::read_to_string(path).unwrap()
}

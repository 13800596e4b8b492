use std::sync::Arc;

use proximity_core::{
    DistanceMatrix, ProximityExtractor, ProximityInboundPort, ProximityOutboundPort,
    ProximityVisualizer, VesselReport,
};
use snafu::ResultExt;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

use crate::{
    Error, Result,
    error::error::CoreSnafu,
    settings::{Environment, Settings},
    sink::CsvProximitySink,
    source::CsvReportSource,
    visualizer::GeoJsonVisualizer,
};

pub struct App<S, I, V> {
    source: S,
    sink: I,
    visualizer: Option<V>,
    extractor: ProximityExtractor,
    num_workers: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub num_reports: usize,
    pub num_events: usize,
    pub num_faults: usize,
}

pub fn init_tracing(environment: Environment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match environment {
        Environment::Local | Environment::Test => {
            tracing_subscriber::fmt().with_env_filter(filter).init()
        }
        Environment::Development | Environment::Production => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

impl App<CsvReportSource, CsvProximitySink, GeoJsonVisualizer> {
    pub fn build(settings: &Settings) -> Result<Self> {
        let extractor = ProximityExtractor::new(settings.threshold_km).context(CoreSnafu)?;

        Ok(Self::new(
            CsvReportSource::new(&settings.input_path, settings.csv_columns.clone()),
            CsvProximitySink::new(&settings.output_path, &settings.error_log_path),
            settings
                .visualization_path
                .as_ref()
                .map(GeoJsonVisualizer::new),
            extractor,
            settings.num_workers.unwrap_or(1),
        ))
    }
}

impl<S, I, V> App<S, I, V>
where
    S: ProximityOutboundPort<Error = Error>,
    I: ProximityInboundPort<Error = Error>,
    V: ProximityVisualizer<Error = Error>,
{
    pub fn new(
        source: S,
        sink: I,
        visualizer: Option<V>,
        extractor: ProximityExtractor,
        num_workers: usize,
    ) -> Self {
        Self {
            source,
            sink,
            visualizer,
            extractor,
            num_workers,
        }
    }

    #[instrument(skip_all, fields(threshold_km = self.extractor.threshold_km()))]
    pub async fn run(self) -> Result<RunSummary> {
        let reports = self.source.vessel_reports()?;

        let positions = reports.iter().map(|r| r.position).collect::<Vec<_>>();
        let matrix = DistanceMatrix::build(&positions).context(CoreSnafu)?;

        let (reports, output) = if self.num_workers > 1 {
            let reports: Arc<[VesselReport]> = reports.into();
            let output = self
                .extractor
                .extract_concurrent(reports.clone(), Arc::new(matrix), self.num_workers)
                .await
                .context(CoreSnafu)?;
            (reports, output)
        } else {
            let output = self
                .extractor
                .extract(&reports, &matrix)
                .context(CoreSnafu)?;
            (reports.into(), output)
        };

        self.sink.add_proximity_events(&output.events)?;
        if !output.faults.is_empty() {
            self.sink.add_processing_faults(&output.faults)?;
        }

        if let Some(visualizer) = &self.visualizer {
            visualizer.visualize(&reports, &output.events)?;
        }

        let summary = RunSummary {
            num_reports: reports.len(),
            num_events: output.events.len(),
            num_faults: output.faults.len(),
        };

        info!(
            num_reports = summary.num_reports,
            num_events = summary.num_events,
            num_faults = summary.num_faults,
            "finished proximity run"
        );

        Ok(summary)
    }
}

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::PathBuf,
};

use proximity_core::{ProximityEvent, ProximityVisualizer, VesselReport, haversine_km};
use serde_json::{Value, json};
use snafu::ResultExt;
use tracing::{info, instrument, warn};

use crate::{
    Error, Result,
    error::error::{IoSnafu, JsonSnafu},
};

static TITLE: &str = "Vessel Proximity Events";
static POSITION_COLOR: &str = "#0000ff";
static CONNECTOR_COLOR: &str = "#ff0000";

/// Renders reports as points and every reported proximity as a dashed connector in a GeoJSON
/// `FeatureCollection`.
#[derive(Debug, Clone)]
pub struct GeoJsonVisualizer {
    path: PathBuf,
}

impl GeoJsonVisualizer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Connectors whose report indices fall outside `reports` are skipped.
pub fn feature_collection(reports: &[VesselReport], events: &[ProximityEvent]) -> Value {
    let positions = reports.iter().enumerate().map(|(index, r)| {
        json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [r.position.longitude, r.position.latitude],
            },
            "properties": {
                "label": "Vessel Position",
                "index": index,
                "mmsi": r.vessel_id,
                "timestamp": r.timestamp,
                "marker-color": POSITION_COLOR,
                "marker-size": "small",
            },
        })
    });

    let connectors = events
        .iter()
        .filter_map(|e| match reports.get(e.report_index) {
            Some(r) => Some((e, r.position)),
            None => {
                warn!(report_index = e.report_index, "event refers to an unknown report");
                None
            }
        })
        .flat_map(|(e, from)| {
            e.nearby_report_indices
                .iter()
                .zip(&e.nearby_vessel_ids)
                .filter_map(move |(index, mmsi)| {
                    let Some(to) = reports.get(*index).map(|r| r.position) else {
                        warn!(report_index = index, "nearby vessel refers to an unknown report");
                        return None;
                    };
                    Some(json!({
                        "type": "Feature",
                        "geometry": {
                            "type": "LineString",
                            "coordinates": [
                                [from.longitude, from.latitude],
                                [to.longitude, to.latitude],
                            ],
                        },
                        "properties": {
                            "mmsi": e.vessel_id,
                            "nearby_mmsi": mmsi,
                            "timestamp": e.timestamp,
                            "distance_km": haversine_km(from.into(), to.into()),
                            "stroke": CONNECTOR_COLOR,
                            "stroke-width": 0.5,
                            "stroke-dasharray": "4 2",
                        },
                    }))
                })
        });

    json!({
        "type": "FeatureCollection",
        "name": TITLE,
        "features": positions.chain(connectors).collect::<Vec<_>>(),
    })
}

impl ProximityVisualizer for GeoJsonVisualizer {
    type Error = Error;

    #[instrument(skip_all, fields(path = %self.path.display()))]
    fn visualize(&self, reports: &[VesselReport], events: &[ProximityEvent]) -> Result<()> {
        let collection = feature_collection(reports, events);

        let file = File::create(&self.path).context(IoSnafu { path: &self.path })?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, &collection).context(JsonSnafu)?;
        writer.flush().context(IoSnafu { path: &self.path })?;

        info!("wrote proximity visualization");

        Ok(())
    }
}

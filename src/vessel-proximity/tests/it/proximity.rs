use vessel_proximity::{Error, startup::RunSummary};

use crate::helper::TestHelper;

static HEADER: &str = "mmsi,timestamp,lat,lon\n";

#[tokio::test]
async fn test_close_vessels_are_written_as_proximity_events() {
    let helper = TestHelper::new(&format!(
        "{HEADER}\
         1,2023-06-01 12:00:00,0.0,0.0\n\
         2,2023-06-01 12:00:00,0.0,0.001\n\
         3,2023-06-01 12:00:00,10.0,10.0\n"
    ));

    let summary = helper.run().await.unwrap();

    assert_eq!(
        summary,
        RunSummary {
            num_reports: 3,
            num_events: 2,
            num_faults: 0,
        }
    );
    assert_eq!(
        helper.events(),
        "mmsi,vessel_proximity,timestamp\n\
         1,[2],2023-06-01T12:00:00Z\n\
         2,[1],2023-06-01T12:00:00Z\n"
    );
    assert!(helper.errors().is_none());
}

#[tokio::test]
async fn test_faulty_rows_are_written_to_error_log() {
    let helper = TestHelper::new(&format!(
        "{HEADER}\
         1,2023-06-01 12:00:00,0.0,0.0\n\
         ,2023-06-01 12:00:00,0.0,0.001\n\
         3,not-a-time,0.0,0.002\n\
         4,2023-06-01 12:00:00,0.0,0.003\n"
    ));

    let summary = helper.run().await.unwrap();

    assert_eq!(summary.num_events, 2);
    assert_eq!(summary.num_faults, 2);
    assert_eq!(
        helper.events(),
        "mmsi,vessel_proximity,timestamp\n\
         1,\"[3, 4]\",2023-06-01T12:00:00Z\n\
         4,\"[1, 3]\",2023-06-01T12:00:00Z\n"
    );
    assert_eq!(
        helper.errors().unwrap(),
        "index,error\n\
         1,Report is missing a vessel id\n\
         2,Report is missing a timestamp\n"
    );
}

#[tokio::test]
async fn test_invalid_position_aborts_the_run() {
    let helper = TestHelper::new(&format!(
        "{HEADER}\
         1,2023-06-01 12:00:00,0.0,0.0\n\
         2,2023-06-01 12:00:00,95.0,0.0\n"
    ));

    let err = helper.run().await.unwrap_err();

    assert!(matches!(
        err,
        Error::Core {
            error: proximity_core::Error::InvalidPosition { index: 1, .. },
            ..
        }
    ));
    assert!(!helper.settings.output_path.exists());
}

#[tokio::test]
async fn test_empty_input_writes_empty_output() {
    let helper = TestHelper::new(HEADER);

    let summary = helper.run().await.unwrap();

    assert_eq!(
        summary,
        RunSummary {
            num_reports: 0,
            num_events: 0,
            num_faults: 0,
        }
    );
    assert_eq!(helper.events(), "mmsi,vessel_proximity,timestamp\n");
    assert!(helper.errors().is_none());
    assert_eq!(helper.visualization()["features"], serde_json::json!([]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_concurrent_run_matches_sequential_run() {
    let input = (0..60).fold(HEADER.to_string(), |mut input, i| {
        input.push_str(&format!(
            "{},2023-06-01 12:00:00,{},{}\n",
            100 + i % 17,
            (i % 6) as f64 * 0.01,
            (i % 5) as f64 * 0.015,
        ));
        input
    });

    let sequential = TestHelper::new(&input);
    let mut concurrent = TestHelper::new(&input);
    concurrent.settings.num_workers = Some(4);

    assert_eq!(
        sequential.run().await.unwrap(),
        concurrent.run().await.unwrap()
    );
    assert_eq!(sequential.events(), concurrent.events());
}

#[tokio::test]
async fn test_visualization_connects_nearby_vessels() {
    let helper = TestHelper::new(&format!(
        "{HEADER}\
         1,2023-06-01 12:00:00,69.6500,18.9500\n\
         2,2023-06-01 12:00:00,69.6520,18.9610\n\
         3,2023-06-01 12:00:00,63.4300,10.3900\n"
    ));

    helper.run().await.unwrap();

    let visualization = helper.visualization();
    let features = visualization["features"].as_array().unwrap();
    let lines = features
        .iter()
        .filter(|f| f["geometry"]["type"] == "LineString")
        .count();

    assert_eq!(features.len(), 5);
    assert_eq!(lines, 2);
}

#[tokio::test]
async fn test_invalid_threshold_is_rejected_at_build() {
    let mut helper = TestHelper::new(HEADER);
    helper.settings.threshold_km = 0.0;

    let err = helper.run().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Core {
            error: proximity_core::Error::InvalidThreshold { .. },
            ..
        }
    ));
}

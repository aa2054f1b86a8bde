//! Focused unit tests covering solve configuration and request loading.

use super::helpers::{sample_request, write_request, write_utf8};
use super::*;
use crate::solve::{SolveConfig, load_optimize_request};
use camino::Utf8PathBuf;
use routewise_core::{DistanceMetric, UnknownMetric};
use rstest::{fixture, rstest};
use tempfile::TempDir;

struct Workspace {
    _tmp: TempDir,
    root: Utf8PathBuf,
}

#[fixture]
fn workspace() -> Workspace {
    let tmp = TempDir::new().expect("tempdir");
    let root = Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf-8 workspace");
    Workspace { _tmp: tmp, root }
}

fn config_for(request_path: Utf8PathBuf) -> SolveConfig {
    SolveConfig::try_from(SolveArgs {
        request_path: Some(request_path),
        ..SolveArgs::default()
    })
    .expect("config should build")
}

#[rstest]
fn converting_without_request_errors() {
    let err = SolveConfig::try_from(SolveArgs::default()).expect_err("missing request should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_REQUEST);
            assert_eq!(env, ENV_REQUEST);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn config_fills_defaults(workspace: Workspace) {
    let request_path = workspace.root.join("request.json");
    let config = config_for(request_path.clone());
    assert_eq!(config.request_path, request_path);
    assert_eq!(config.metric, DistanceMetric::Haversine);
    assert_eq!(config.time_limit, None);
    assert!(!config.pretty);
    assert_eq!(
        config.optimizer_config().average_speed_kmh,
        routewise_core::DEFAULT_AVERAGE_SPEED_KMH
    );
}

#[rstest]
#[case("geodesic", DistanceMetric::Geodesic)]
#[case("Haversine", DistanceMetric::Haversine)]
fn metric_names_are_parsed(#[case] name: &str, #[case] expected: DistanceMetric) {
    let config = SolveConfig::try_from(SolveArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        metric: Some(name.to_owned()),
        ..SolveArgs::default()
    })
    .expect("known metric");
    assert_eq!(config.metric, expected);
    assert_eq!(config.optimizer_config().distance_metric, expected);
}

#[rstest]
fn unknown_metric_is_rejected() {
    let err = SolveConfig::try_from(SolveArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        metric: Some("manhattan".to_owned()),
        ..SolveArgs::default()
    })
    .expect_err("unknown metric");
    match err {
        CliError::InvalidMetric(UnknownMetric(name)) => assert_eq!(name, "manhattan"),
        other => panic!("expected InvalidMetric, found {other:?}"),
    }
}

#[rstest]
fn overrides_replace_request_fields(workspace: Workspace) {
    let mut config = config_for(workspace.root.join("request.json"));
    config.depot = Some(2);
    config.max_route_minutes = Some(90);
    config.time_limit = Some(3);
    let request = config.apply(sample_request());
    assert_eq!(request.depot_id, Some(2));
    assert_eq!(request.max_route_minutes, 90);
    assert_eq!(request.solve_seconds, 3);
}

#[rstest]
fn validate_sources_reports_missing_request(workspace: Workspace) {
    let config = config_for(workspace.root.join("absent.json"));
    match config.validate_sources().expect_err("missing file") {
        CliError::MissingSourceFile { field, .. } => assert_eq!(field, ARG_REQUEST),
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn validate_sources_reports_not_file(workspace: Workspace) {
    let request_path = workspace.root.join("request.json");
    std::fs::create_dir(&request_path).expect("request directory");
    let config = config_for(request_path.clone());
    match config.validate_sources().expect_err("directory is not a file") {
        CliError::SourcePathNotFile { field, path } => {
            assert_eq!(field, ARG_REQUEST);
            assert_eq!(path, request_path);
        }
        other => panic!("expected SourcePathNotFile, found {other:?}"),
    }
}

#[rstest]
fn load_optimize_request_decodes_json(workspace: Workspace) {
    let request_path = workspace.root.join("request.json");
    let request = sample_request();
    write_request(&request_path, &request);
    let loaded = load_optimize_request(&request_path).expect("request should load");
    assert_eq!(loaded, request);
}

#[rstest]
fn load_optimize_request_applies_serde_defaults(workspace: Workspace) {
    let request_path = workspace.root.join("request.json");
    write_utf8(
        &request_path,
        br#"{"stops": [{"id": 4, "location": {"x": 73.85, "y": 18.52}, "demand": 12.5}]}"#,
    );
    let loaded = load_optimize_request(&request_path).expect("request should load");
    assert_eq!(loaded.max_route_minutes, routewise_core::DEFAULT_MAX_ROUTE_MINUTES);
    assert_eq!(loaded.solve_seconds, routewise_core::DEFAULT_SOLVE_SECONDS);
    assert_eq!(loaded.vehicle.capacity, None);
    assert_eq!(loaded.stops.first().map(|stop| stop.id), Some(Some(4)));
}

#[rstest]
fn load_optimize_request_reports_parse_errors(workspace: Workspace) {
    let request_path = workspace.root.join("request.json");
    write_utf8(&request_path, b"[1, 2");
    match load_optimize_request(&request_path).expect_err("invalid JSON") {
        CliError::ParseRequest { path, .. } => assert_eq!(path, request_path),
        other => panic!("expected ParseRequest, found {other:?}"),
    }
}

#![expect(
    clippy::expect_used,
    reason = "regression tests use expect for readable failures"
)]

//! Golden route regression tests for the optimizer.
//!
//! Each test loads a request and a fixed distance matrix from JSON, runs the
//! optimizer, and checks the visiting order and route length. Matrices are
//! given in prepared order: the origin first, then the remaining stops.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use routewise_core::test_support::FixedMatrixProvider;
use routewise_core::{OptimizeRequest, RouteOptimizer};
use routewise_solver::{CvrpOptimizer, OptimizerConfig, SearchConfig};
use rstest::rstest;
use serde::Deserialize;

/// Deserialised golden route test case.
#[derive(Debug, Deserialize)]
struct GoldenRoute {
    name: String,
    #[expect(dead_code, reason = "kept for documentation in JSON files")]
    description: String,
    request: OptimizeRequest,
    distance_matrix_m: Vec<Vec<u64>>,
    expected: ExpectedRoute,
}

/// Expected result from JSON.
#[derive(Debug, Deserialize)]
struct ExpectedRoute {
    visited_ids: Vec<u64>,
    total_distance_m: u64,
    #[serde(default)]
    capacity_relaxed: bool,
}

/// Load a golden route from the data directory.
fn load_golden_route(filename: &str) -> GoldenRoute {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/golden_routes/data")
        .join(filename);
    let content = fs::read_to_string(&path).expect("failed to read golden route file");
    serde_json::from_str(&content).expect("failed to parse golden route JSON")
}

fn optimizer_for(golden: &GoldenRoute) -> CvrpOptimizer<FixedMatrixProvider> {
    let config = OptimizerConfig {
        search: SearchConfig::default().with_stall_rounds(Some(30)),
        preview_budget: Duration::from_secs(1),
        ..OptimizerConfig::default()
    };
    CvrpOptimizer::with_provider(
        FixedMatrixProvider::new(golden.distance_matrix_m.clone()),
        config,
    )
}

#[rstest]
#[case("linear_three_stops.json")]
#[case("detour_avoidance.json")]
#[case("designated_depot.json")]
#[case("time_window_reorder.json")]
#[case("relaxed_capacity.json")]
fn golden_route_regression(#[case] filename: &str) {
    let golden = load_golden_route(filename);
    let route = optimizer_for(&golden)
        .optimize(&golden.request)
        .expect("golden route should solve successfully");

    assert_eq!(
        route.visited_ids(),
        golden.expected.visited_ids,
        "{}: unexpected visiting order",
        golden.name
    );
    assert_eq!(
        route.total_distance_m, golden.expected.total_distance_m,
        "{}: unexpected route length",
        golden.name
    );
    assert_eq!(
        route.diagnostics.capacity_relaxed, golden.expected.capacity_relaxed,
        "{}: unexpected capacity relaxation",
        golden.name
    );
    assert!(route.is_complete(), "{}: walk was interrupted", golden.name);
}

#[rstest]
fn golden_preview_matches_full_route() {
    let golden = load_golden_route("detour_avoidance.json");
    let optimizer = optimizer_for(&golden);
    let route = optimizer.optimize(&golden.request).expect("route");
    let preview = optimizer.preview(&golden.request).expect("preview");
    assert_eq!(preview.path, route.path);
    assert_eq!(preview.segments, route.segments);
    assert_eq!(preview.fuel_consumption, route.fuel.consumption);
}

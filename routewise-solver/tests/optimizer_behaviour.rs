//! Behavioural tests for `CvrpOptimizer` using rstest-bdd.

use std::cell::RefCell;
use std::time::Duration;

use routewise_core::test_support::{FixedMatrixProvider, stop, stops_along_meridian};
use routewise_core::{
    DistanceMatrix, DistanceMetric, DistanceProvider, GreatCircleProvider, MatrixError,
    OptimizeError, OptimizeRequest, RouteOptimizer, RouteResult, Stop, Vehicle,
};
use routewise_solver::{CvrpOptimizer, OptimizerConfig, SearchConfig};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

#[derive(Debug, Clone)]
enum ProviderChoice {
    GreatCircle(GreatCircleProvider),
    Fixed(FixedMatrixProvider),
    Failing,
}

impl Default for ProviderChoice {
    fn default() -> Self {
        Self::GreatCircle(GreatCircleProvider::new(DistanceMetric::Haversine))
    }
}

impl DistanceProvider for ProviderChoice {
    fn distance_matrix(&self, stops: &[Stop]) -> Result<DistanceMatrix, MatrixError> {
        match self {
            Self::GreatCircle(provider) => provider.distance_matrix(stops),
            Self::Fixed(provider) => provider.distance_matrix(stops),
            Self::Failing => Err(MatrixError::EmptyInput),
        }
    }
}

#[derive(Debug, Default)]
struct OptimizerWorld {
    stops: RefCell<Vec<Stop>>,
    vehicle: RefCell<Vehicle>,
    provider: RefCell<ProviderChoice>,
    outcome: RefCell<Option<Result<RouteResult, OptimizeError>>>,
}

impl OptimizerWorld {
    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_outcome(&self) -> Result<RouteResult, OptimizeError> {
        self.outcome
            .borrow()
            .as_ref()
            .cloned()
            .expect("outcome should be recorded before assertions")
    }

    #[expect(
        clippy::expect_used,
        reason = "behaviour tests use expect for readable failures"
    )]
    fn expect_route(&self) -> RouteResult {
        self.expect_outcome().expect("optimizer should produce a route")
    }
}

#[fixture]
fn world() -> OptimizerWorld {
    OptimizerWorld::default()
}

#[given("stops at 0, 10 and 20 km north of the equator")]
fn given_meridian_stops(world: &OptimizerWorld) {
    world
        .stops
        .replace(stops_along_meridian(&[0.0, 10.0, 20.0], 10.0));
}

#[given("two stops 1 km apart with demands 600 and 400")]
fn given_heavy_stops(world: &OptimizerWorld) {
    world.stops.replace(vec![
        stop(1, 18.50, 73.80, 600.0),
        stop(2, 18.51, 73.80, 400.0),
    ]);
    world.provider.replace(ProviderChoice::Fixed(FixedMatrixProvider::new(vec![
        vec![0, 0, 1_000],
        vec![0, 0, 1_000],
        vec![1_000, 1_000, 0],
    ])));
}

#[given("no stops")]
fn given_no_stops(world: &OptimizerWorld) {
    world.stops.replace(Vec::new());
}

#[given("a failing distance provider")]
fn given_failing_provider(world: &OptimizerWorld) {
    world.provider.replace(ProviderChoice::Failing);
}

#[given("a vehicle with capacity 500")]
fn given_vehicle(world: &OptimizerWorld) {
    world.vehicle.replace(Vehicle::new(500.0));
}

#[when("the optimizer runs")]
fn when_optimizer_runs(world: &OptimizerWorld) {
    let config = OptimizerConfig {
        search: SearchConfig::default().with_stall_rounds(Some(20)),
        preview_budget: Duration::from_secs(1),
        ..OptimizerConfig::default()
    };
    let optimizer = CvrpOptimizer::with_provider(world.provider.borrow().clone(), config);
    let request = OptimizeRequest::new(world.stops.borrow().clone(), *world.vehicle.borrow())
        .with_solve_seconds(1);
    world.outcome.replace(Some(optimizer.optimize(&request)));
}

#[then("the stops are visited in order 1, 2, 3")]
fn then_visited_in_order(world: &OptimizerWorld) {
    assert_eq!(world.expect_route().visited_ids(), vec![1, 2, 3]);
}

#[then("the route is about 20 km long")]
fn then_about_twenty_km(world: &OptimizerWorld) {
    let km = world.expect_route().total_distance_km;
    assert!((km - 20.0).abs() < 0.1, "route was {km} km");
}

#[then("every stop is visited")]
fn then_every_stop_visited(world: &OptimizerWorld) {
    let route = world.expect_route();
    assert_eq!(route.visited.len(), world.stops.borrow().len());
}

#[then("1000 units of waste are collected")]
#[expect(clippy::float_cmp, reason = "demands are whole numbers")]
fn then_waste_collected(world: &OptimizerWorld) {
    assert_eq!(world.expect_route().total_waste, 1000.0);
}

#[then("the capacity bound was relaxed")]
fn then_capacity_relaxed(world: &OptimizerWorld) {
    let diagnostics = world.expect_route().diagnostics;
    assert!(diagnostics.capacity_relaxed);
    assert_eq!(diagnostics.capacity_bound, 1000);
}

#[then("the optimizer reports \"no valid locations provided\"")]
fn then_no_locations(world: &OptimizerWorld) {
    let Err(err) = world.expect_outcome() else {
        panic!("expected an error");
    };
    assert_eq!(err.to_string(), "no valid locations provided");
}

#[then("the optimizer reports a matrix error")]
fn then_matrix_error(world: &OptimizerWorld) {
    assert!(matches!(
        world.expect_outcome(),
        Err(OptimizeError::Matrix(MatrixError::EmptyInput))
    ));
}

#[scenario(path = "tests/features/optimizer.feature", index = 0)]
fn stops_along_a_road(world: OptimizerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/optimizer.feature", index = 1)]
fn demand_above_capacity(world: OptimizerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/optimizer.feature", index = 2)]
fn no_stops_supplied(world: OptimizerWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/optimizer.feature", index = 3)]
fn provider_failure(world: OptimizerWorld) {
    let _ = world;
}

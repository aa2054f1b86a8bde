//! `CvrpOptimizer`: the end-to-end optimization pipeline.
//!
//! A call validates the request, puts the route origin first, builds the
//! matrices, sizes the capacity bound, solves, walks the assignment and
//! annotates the walk with fuel and quality figures.
//!
//! When the stops' total demand exceeds the vehicle's capacity the bound is
//! raised to the total so a route is always produced. A relaxed solve that
//! fails on an inconsistent model is retried once with the vehicle's own
//! capacity.

use std::time::{Duration, Instant};

use routewise_core::{
    Diagnostics, DistanceProvider, GreatCircleProvider, OptimizeError, OptimizeRequest,
    RouteMatrices, RouteOptimizer, RoutePreview, RouteResult, prepare_stops,
};

use crate::assignment::SolvedAssignment;
use crate::config::OptimizerConfig;
use crate::model::{ModelError, RoutingModel};
use crate::search::{SolveError, solve};
use crate::walker::walk;

/// Label recorded in [`Diagnostics::algorithm`].
pub const ALGORITHM: &str = "path-cheapest-arc + guided-local-search";

impl From<SolveError> for OptimizeError {
    fn from(err: SolveError) -> Self {
        match err {
            SolveError::NoSolution { elapsed } => Self::NoSolution { elapsed },
            SolveError::Model(model) => model.into(),
        }
    }
}

impl From<ModelError> for OptimizeError {
    fn from(err: ModelError) -> Self {
        Self::Model {
            reason: err.to_string(),
        }
    }
}

/// Single-vehicle capacitated route optimizer.
///
/// Generic over the [`DistanceProvider`] so road-network distances can
/// replace the default great-circle ones.
///
/// # Examples
/// ```rust,no_run
/// use geo::Coord;
/// use routewise_core::{OptimizeRequest, RouteOptimizer, Stop, Vehicle};
/// use routewise_solver::CvrpOptimizer;
///
/// let stops = vec![
///     Stop::new(1, Coord { x: 73.85, y: 18.52 }, 40.0),
///     Stop::new(2, Coord { x: 73.86, y: 18.53 }, 60.0),
/// ];
/// let request = OptimizeRequest::new(stops, Vehicle::new(500.0)).with_solve_seconds(1);
/// let route = CvrpOptimizer::new().optimize(&request)?;
/// assert_eq!(route.visited.len(), 2);
/// # Ok::<(), routewise_core::OptimizeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CvrpOptimizer<P = GreatCircleProvider> {
    provider: P,
    config: OptimizerConfig,
}

impl CvrpOptimizer {
    /// Optimizer with default configuration and great-circle distances.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(OptimizerConfig::default())
    }

    /// Optimizer with explicit configuration and great-circle distances.
    #[must_use]
    pub const fn with_config(config: OptimizerConfig) -> Self {
        Self {
            provider: GreatCircleProvider::new(config.distance_metric),
            config,
        }
    }
}

impl Default for CvrpOptimizer {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> CvrpOptimizer<P>
where
    P: DistanceProvider,
{
    /// Optimizer using a custom distance provider.
    #[must_use]
    pub const fn with_provider(provider: P, config: OptimizerConfig) -> Self {
        Self { provider, config }
    }

    /// Configuration in use.
    #[must_use]
    pub const fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    fn plan(
        &self,
        request: &OptimizeRequest,
        budget: Duration,
    ) -> Result<RouteResult, OptimizeError> {
        request.validate()?;
        let prepared = prepare_stops(request.stops.clone(), request.depot_id)?;
        let matrices =
            RouteMatrices::build(&self.provider, &prepared.stops, self.config.average_speed_kmh)?;

        let plan = CapacityPlan::for_request(request, self.config.default_capacity);
        let search = self.config.search.with_time_limit(budget);
        let started = Instant::now();
        let attempt = |capacity: u64| -> Result<SolvedAssignment, SolveError> {
            let model = RoutingModel::from_stops(
                &matrices,
                &prepared.stops,
                prepared.depot_index,
                capacity,
                request.max_route_minutes,
            )?;
            solve(&model, &search)
        };

        let (assignment, capacity_bound) = plan.solve_with(attempt)?;
        let solve_time = started.elapsed();

        let route_walk = walk(&assignment, &prepared.stops, &matrices);
        let diagnostics = Diagnostics {
            solve_time,
            stops_evaluated: prepared.stops.len(),
            capacity_bound,
            capacity_relaxed: capacity_bound != plan.vehicle_bound,
            depot_index: prepared.depot_index,
            origin: prepared.origin,
            algorithm: ALGORITHM.to_owned(),
            iterations: assignment.iterations(),
            objective: assignment.objective(),
        };
        Ok(RouteResult::from_walk(route_walk, &request.vehicle, diagnostics))
    }
}

impl<P> RouteOptimizer for CvrpOptimizer<P>
where
    P: DistanceProvider + Send + Sync,
{
    fn optimize(&self, request: &OptimizeRequest) -> Result<RouteResult, OptimizeError> {
        self.plan(request, request.solve_budget())
    }

    fn preview(&self, request: &OptimizeRequest) -> Result<RoutePreview, OptimizeError> {
        self.plan(request, self.config.preview_budget)
            .map(|route| route.preview())
    }
}

/// Capacity bounds for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CapacityPlan {
    /// Bound from the vehicle alone.
    vehicle_bound: u64,
    /// Bound handed to the first solve.
    bound: u64,
    /// Whether `bound` was raised above `vehicle_bound`.
    relaxed: bool,
}

impl CapacityPlan {
    /// Size the bound from the request's fractional demand total.
    ///
    /// The solver sees truncated per-stop demands, so the decision is made on
    /// the real total: a route may never collect more than the bound it was
    /// solved under.
    fn for_request(request: &OptimizeRequest, fallback: u64) -> Self {
        let vehicle_bound = request.vehicle.capacity_bound_or(fallback);
        let demand = request.total_demand();
        match units_beyond(demand, vehicle_bound) {
            None => Self {
                vehicle_bound,
                bound: vehicle_bound,
                relaxed: false,
            },
            Some(bound) => {
                log::warn!(
                    "total demand {demand} exceeds vehicle capacity {vehicle_bound}; relaxing capacity to {bound}"
                );
                Self {
                    vehicle_bound,
                    bound,
                    relaxed: true,
                }
            }
        }
    }

    /// Run `attempt` at the planned bound, retrying once at the vehicle's
    /// own bound when a relaxed model is rejected.
    ///
    /// [`RoutingModel`] validation does not look at the capacity, so with
    /// the built-in model a rejected relaxed solve is rejected again and the
    /// caller receives both errors. Only [`SolveError::NoSolution`] is an
    /// answer about the route itself and it is never retried.
    ///
    /// Returns the assignment and the bound it was found under.
    fn solve_with<F>(self, mut attempt: F) -> Result<(SolvedAssignment, u64), OptimizeError>
    where
        F: FnMut(u64) -> Result<SolvedAssignment, SolveError>,
    {
        match attempt(self.bound) {
            Ok(assignment) => Ok((assignment, self.bound)),
            Err(SolveError::Model(relaxed)) if self.relaxed => {
                log::warn!("relaxed model rejected: {relaxed}; retrying with vehicle capacity");
                attempt(self.vehicle_bound)
                    .map(|assignment| (assignment, self.vehicle_bound))
                    .map_err(|retry| OptimizeError::RetryFailed {
                        relaxed: Box::new(relaxed.into()),
                        retry: Box::new(retry.into()),
                    })
            }
            Err(err) => Err(err.into()),
        }
    }
}

/// Whole units needed to carry `demand` when it exceeds `bound`.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "demand is validated finite and non-negative; bounds stay far below 2^52"
)]
fn units_beyond(demand: f64, bound: u64) -> Option<u64> {
    (demand > bound as f64).then(|| demand.ceil() as u64)
}

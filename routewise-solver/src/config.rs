//! Optimizer and search configuration.

use std::time::Duration;

use routewise_core::{
    DEFAULT_AVERAGE_SPEED_KMH, DEFAULT_CAPACITY, DEFAULT_SOLVE_SECONDS, DistanceMetric,
};

/// Shortest search budget honoured by [`crate::solve`].
pub const MIN_TIME_LIMIT: Duration = Duration::from_secs(1);

/// Budget used by quick route previews.
pub const DEFAULT_PREVIEW_BUDGET: Duration = Duration::from_secs(5);

/// Tuning for the guided local search.
///
/// # Examples
/// ```rust
/// use std::time::Duration;
/// use routewise_solver::SearchConfig;
///
/// let config = SearchConfig::default().with_max_iterations(50);
/// assert_eq!(config.max_iterations, Some(50));
/// assert_eq!(
///     config.with_time_limit(Duration::ZERO).effective_time_limit(),
///     Duration::from_secs(1)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchConfig {
    /// Wall-clock budget. Budgets below [`MIN_TIME_LIMIT`] are raised to it.
    pub time_limit: Duration,
    /// Upper bound on penalty rounds, if any.
    pub max_iterations: Option<usize>,
    /// Stop after this many consecutive penalty rounds without a better
    /// feasible route, if set.
    pub stall_rounds: Option<usize>,
    /// Scale of the penalty term relative to the average arc cost of the
    /// first local optimum.
    pub lambda_coefficient: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            time_limit: Duration::from_secs(DEFAULT_SOLVE_SECONDS),
            max_iterations: None,
            stall_rounds: Some(100),
            lambda_coefficient: 0.1,
        }
    }
}

impl SearchConfig {
    /// Replace the wall-clock budget.
    #[must_use]
    pub const fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Cap the number of penalty rounds.
    #[must_use]
    pub const fn with_max_iterations(mut self, rounds: usize) -> Self {
        self.max_iterations = Some(rounds);
        self
    }

    /// Replace the stall limit; `None` searches until the budget runs out.
    #[must_use]
    pub const fn with_stall_rounds(mut self, rounds: Option<usize>) -> Self {
        self.stall_rounds = rounds;
        self
    }

    /// Budget actually enforced.
    #[must_use]
    pub fn effective_time_limit(&self) -> Duration {
        self.time_limit.max(MIN_TIME_LIMIT)
    }
}

/// Configuration for [`crate::CvrpOptimizer`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptimizerConfig {
    /// Average travel speed used to derive travel times.
    pub average_speed_kmh: f64,
    /// Capacity assumed for vehicles that declare none.
    pub default_capacity: u64,
    /// Earth model for straight-line distances.
    pub distance_metric: DistanceMetric,
    /// Search tuning. The time limit is replaced per call by the request's
    /// budget.
    pub search: SearchConfig,
    /// Budget for [`routewise_core::RouteOptimizer::preview`].
    pub preview_budget: Duration,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            average_speed_kmh: DEFAULT_AVERAGE_SPEED_KMH,
            default_capacity: DEFAULT_CAPACITY,
            distance_metric: DistanceMetric::default(),
            search: SearchConfig::default(),
            preview_budget: DEFAULT_PREVIEW_BUDGET,
        }
    }
}

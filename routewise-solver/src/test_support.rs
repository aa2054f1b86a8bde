//! Test-only utilities for `routewise-solver`.
//!
//! The helpers in this module are available to unit tests and behavioural
//! tests. They are gated behind the `test-support` feature (and `cfg(test)`).

use std::time::Duration;

use routewise_core::RouteMatrices;

use crate::{OptimizerConfig, SearchConfig};

/// Search settings that finish quickly on small instances.
///
/// # Examples
/// ```rust
/// use routewise_solver::test_support::fast_search;
///
/// assert_eq!(fast_search().stall_rounds, Some(20));
/// ```
#[must_use]
pub fn fast_search() -> SearchConfig {
    SearchConfig::default()
        .with_time_limit(Duration::from_secs(1))
        .with_max_iterations(200)
        .with_stall_rounds(Some(20))
}

/// Optimizer settings using [`fast_search`].
#[must_use]
pub fn fast_optimizer_config() -> OptimizerConfig {
    OptimizerConfig {
        search: fast_search(),
        preview_budget: Duration::from_secs(1),
        ..OptimizerConfig::default()
    }
}

/// Matrices for nodes on a line at the given positions.
///
/// Distance and time between two nodes both equal the gap between their
/// positions.
///
/// # Examples
/// ```rust
/// use routewise_solver::test_support::line_matrices;
///
/// let matrices = line_matrices(&[0, 10, 25]);
/// assert_eq!(matrices.distance(2, 0), Some(25));
/// assert_eq!(matrices.time(1, 2), Some(15));
/// ```
#[must_use]
pub fn line_matrices(positions: &[u64]) -> RouteMatrices {
    let distance: Vec<Vec<u64>> = positions
        .iter()
        .map(|a| positions.iter().map(|b| a.abs_diff(*b)).collect())
        .collect();
    RouteMatrices {
        time: distance.clone(),
        distance,
    }
}

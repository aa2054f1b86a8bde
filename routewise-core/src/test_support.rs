//! Fixtures shared by unit and behaviour tests: stop builders, a provider
//! serving a fixed matrix and placeholder diagnostics.

use std::time::Duration;

use geo::Coord;

use crate::{Diagnostics, DistanceMatrix, DistanceProvider, MatrixError, RouteOrigin, Stop};

/// Metres per degree of latitude near the equator, rounded.
pub const METRES_PER_DEGREE: f64 = 111_195.0;

/// Build a real stop from latitude and longitude.
#[must_use]
pub fn stop(id: u64, lat: f64, lng: f64, demand: f64) -> Stop {
    Stop::new(id, Coord { x: lng, y: lat }, demand)
}

/// Stops due north of the equator at the given kilometre offsets.
///
/// Stop identifiers count from 1 in input order.
#[expect(clippy::float_arithmetic, reason = "offsets convert km to degrees")]
#[must_use]
pub fn stops_along_meridian(offsets_km: &[f64], demand: f64) -> Vec<Stop> {
    (1_u64..)
        .zip(offsets_km)
        .map(|(id, km)| stop(id, km * 1000.0 / METRES_PER_DEGREE, 0.0, demand))
        .collect()
}

/// `DistanceProvider` returning a caller-supplied matrix unchanged.
///
/// The matrix is not checked against the stop count so tests can exercise
/// shape validation downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FixedMatrixProvider {
    matrix: DistanceMatrix,
}

impl FixedMatrixProvider {
    /// Serve `matrix` for every request.
    #[must_use]
    pub const fn new(matrix: DistanceMatrix) -> Self {
        Self { matrix }
    }
}

impl DistanceProvider for FixedMatrixProvider {
    fn distance_matrix(&self, stops: &[Stop]) -> Result<DistanceMatrix, MatrixError> {
        if stops.is_empty() {
            return Err(MatrixError::EmptyInput);
        }
        Ok(self.matrix.clone())
    }
}

/// Diagnostics with neutral values for tests that do not inspect them.
#[must_use]
pub fn diagnostics() -> Diagnostics {
    Diagnostics {
        solve_time: Duration::ZERO,
        stops_evaluated: 0,
        capacity_bound: 0,
        capacity_relaxed: false,
        depot_index: 0,
        origin: RouteOrigin::Virtual,
        algorithm: String::from("test"),
        iterations: 0,
        objective: 0,
    }
}

//! Test helpers for writing request files and stubbing the optimizer.

use std::fs;
use std::time::Duration;

use camino::Utf8Path;
use geo::Coord;
use routewise_core::{
    OptimizeError, OptimizeRequest, RouteOptimizer, RoutePreview, RouteResult, Stop, Vehicle,
};

use crate::solve::{OptimizerBuilder, SolveConfig};

pub(super) fn write_utf8(path: &Utf8Path, contents: &[u8]) {
    fs::write(path.as_std_path(), contents).expect("write test file");
}

/// Three stops a few hundred metres apart in Pune.
pub(super) fn sample_request() -> OptimizeRequest {
    OptimizeRequest::new(
        vec![
            Stop::new(1, Coord { x: 73.8567, y: 18.5204 }, 40.0),
            Stop::new(2, Coord { x: 73.8600, y: 18.5230 }, 60.0),
            Stop::new(3, Coord { x: 73.8650, y: 18.5260 }, 25.0),
        ],
        Vehicle::new(500.0).with_fuel_efficiency(4.0),
    )
    .with_solve_seconds(1)
}

pub(super) fn write_request(path: &Utf8Path, request: &OptimizeRequest) {
    let payload = serde_json::to_string_pretty(request).expect("serialize request");
    write_utf8(path, payload.as_bytes());
}

/// Optimizer that always reports that no route was found.
pub(super) struct FailingOptimizer;

impl RouteOptimizer for FailingOptimizer {
    fn optimize(&self, _request: &OptimizeRequest) -> Result<RouteResult, OptimizeError> {
        Err(OptimizeError::NoSolution {
            elapsed: Duration::from_secs(1),
        })
    }

    fn preview(&self, request: &OptimizeRequest) -> Result<RoutePreview, OptimizeError> {
        self.optimize(request).map(|route| route.preview())
    }
}

pub(super) struct FailingOptimizerBuilder;

impl OptimizerBuilder for FailingOptimizerBuilder {
    fn build(&self, _config: &SolveConfig) -> Box<dyn RouteOptimizer> {
        Box::new(FailingOptimizer)
    }
}

//! Facade crate for the routewise collection route optimizer.
//!
//! This crate re-exports the core domain types and, behind the `solver`
//! feature, the capacitated route solver.

#![forbid(unsafe_code)]

pub use routewise_core::{
    Diagnostics, DistanceMatrix, DistanceMetric, DistanceProvider, FuelAssessment,
    FuelFeasibility, GreatCircleProvider, InputError, MatrixError, OptimizeError, OptimizeRequest,
    OptimizeResponse, RouteMatrices, RouteOrigin, RouteOptimizer, RoutePreview, RouteResult,
    RouteSegment, Stop, TimeMatrix, TimeWindow, Vehicle, VisitedStop,
};

#[cfg(feature = "solver")]
pub use routewise_solver::{CvrpOptimizer, OptimizerConfig, SearchConfig, solve, walk};

//! Core domain types for the Routewise route optimizer.
//!
//! The crate holds everything about a route that does not depend on the
//! search itself: stops and vehicles, distance and travel-time matrices,
//! depot preparation, fuel feasibility, quality scoring and the result
//! types. Search strategies live in separate crates and plug in through
//! [`RouteOptimizer`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod depot;
mod fuel;
pub mod matrix;
mod optimizer;
mod quality;
mod request;
mod route;
mod stop;
mod vehicle;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use depot::{PreparedStops, RouteOrigin, VIRTUAL_DEPOT_ADDRESS, VIRTUAL_DEPOT_NAME, prepare_stops};
pub use fuel::{
    CAUTION_THRESHOLD, DEFAULT_FUEL_RATE, FuelAssessment, FuelFeasibility, assess_fuel, classify,
    estimate_consumption,
};
pub use matrix::{
    DEFAULT_AVERAGE_SPEED_KMH, DistanceMatrix, DistanceMetric, DistanceProvider,
    GreatCircleProvider, MatrixError, RouteMatrices, TimeMatrix, UnknownMetric, time_matrix,
};
pub use optimizer::{OptimizeError, OptimizeResponse, RouteOptimizer};
pub use quality::{score_legs, score_route};
pub use request::{DEFAULT_MAX_ROUTE_MINUTES, DEFAULT_SOLVE_SECONDS, InputError, OptimizeRequest};
pub use route::{
    Diagnostics, RouteFault, RoutePreview, RouteResult, RouteSegment, RouteWalk, VisitedStop,
    WalkFault,
};
pub use stop::{CoordinateError, InvertedTimeWindow, Stop, TimeWindow};
pub use vehicle::{DEFAULT_CAPACITY, Vehicle};

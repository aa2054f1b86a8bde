//! Pairwise distance and travel-time matrices between stops.
//!
//! The [`DistanceProvider`] trait abstracts where distances come from.
//! [`GreatCircleProvider`] is the default, straight-line implementation;
//! [`RouteMatrices::build`] pairs its output with a travel-time matrix derived
//! from a fixed average speed.
//!
//! Matrices are indexed by stop position, never by stop identifier, and no
//! consumer may assume they are symmetric.

mod error;
mod provider;
mod travel_time;

pub use error::MatrixError;
pub use provider::{
    DistanceMatrix, DistanceMetric, DistanceProvider, GreatCircleProvider, UnknownMetric,
};
pub use travel_time::{DEFAULT_AVERAGE_SPEED_KMH, RouteMatrices, TimeMatrix, time_matrix};

//! Capacitated single-vehicle route solver for `routewise`.
//!
//! The crate turns a set of [`routewise_core::Stop`] values into an ordered
//! open path. A [`RoutingModel`] carries the arc costs, demands and time
//! dimension; [`solve`] builds a cheapest-arc path and improves it with a
//! guided local search; [`walk`] converts the resulting
//! [`SolvedAssignment`] back into visits and segments. [`CvrpOptimizer`]
//! wires these together behind [`routewise_core::RouteOptimizer`].

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod assignment;
mod config;
mod construction;
mod model;
mod optimizer;
mod search;
mod walker;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use assignment::{SolvedAssignment, Successor};
pub use config::{DEFAULT_PREVIEW_BUDGET, MIN_TIME_LIMIT, OptimizerConfig, SearchConfig};
pub use construction::cheapest_arc_path;
pub use model::{ModelError, PathEvaluation, RoutingModel};
pub use optimizer::{ALGORITHM, CvrpOptimizer};
pub use search::{SolveError, solve};
pub use walker::walk;

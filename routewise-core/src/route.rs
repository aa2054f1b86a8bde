//! Route results: visits, segments, recovered faults and the final report.

use std::time::Duration;

use geo::Coord;
use thiserror::Error;

use crate::{FuelAssessment, RouteOrigin, Stop, Vehicle, assess_fuel, score_route};

/// One real stop reached by the route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VisitedStop {
    /// The stop as supplied by the caller.
    pub stop: Stop,
    /// Index of the stop in the solver's node list.
    pub node: usize,
    /// Number of hops taken before reaching this stop, starting at 0.
    pub visit_order: usize,
    /// Metres from the previous node.
    pub distance_from_previous: u64,
    /// Minutes from the previous node.
    pub time_from_previous: u64,
    /// Demand collected here.
    pub waste_collected: f64,
    /// Metres driven since the route origin.
    pub cumulative_distance: u64,
    /// Minutes driven since the route origin.
    pub cumulative_time: u64,
    /// Demand collected since the route origin, this stop included.
    pub cumulative_waste: f64,
}

/// A single hop between consecutive nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteSegment {
    /// Node the hop leaves.
    pub from_index: usize,
    /// Node the hop reaches.
    pub to_index: usize,
    /// Display name of the departure node.
    pub from_name: String,
    /// Display name of the arrival node.
    pub to_name: String,
    /// Hop length in metres.
    pub distance_m: u64,
    /// Hop duration in minutes.
    pub time_min: u64,
}

/// Why a route walk stopped early.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case", tag = "kind")
)]
pub enum WalkFault {
    /// The successor chain names a node outside the stop list.
    #[error("node {node} is outside the {len} known stops")]
    NodeOutOfRange {
        /// Offending node.
        node: usize,
        /// Number of known stops.
        len: usize,
    },
    /// The matrices have no entry for a hop.
    #[error("no matrix entry for hop {from} -> {to}")]
    MissingMatrixCell {
        /// Departure node.
        from: usize,
        /// Arrival node.
        to: usize,
    },
    /// The successor chain returns to a node already walked.
    #[error("node {node} was reached twice")]
    Revisit {
        /// Repeated node.
        node: usize,
    },
}

/// A problem the walk recovered from.
///
/// Faults never discard the route: the walk keeps everything gathered before
/// the fault and reports the fault next to it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case", tag = "kind")
)]
pub enum RouteFault {
    /// The walk stopped at `from`; later stops are missing from the route.
    WalkInterrupted {
        /// Last node walked successfully.
        from: usize,
        /// Cause of the interruption.
        fault: WalkFault,
    },
    /// A node's coordinates were unusable and left out of the path.
    Coordinate {
        /// Node with bad coordinates.
        node: usize,
        /// Latitude as supplied.
        lat: f64,
        /// Longitude as supplied.
        lng: f64,
    },
}

impl RouteFault {
    /// Whether this fault cut the route short.
    #[must_use]
    pub const fn truncates_route(&self) -> bool {
        matches!(self, Self::WalkInterrupted { .. })
    }
}

/// Raw output of walking a solved assignment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteWalk {
    /// Real stops in visiting order.
    pub visited: Vec<VisitedStop>,
    /// Path coordinates, origin first.
    pub path: Vec<Coord<f64>>,
    /// Every hop walked, virtual depot included.
    pub segments: Vec<RouteSegment>,
    /// Sum of hop distances in metres.
    pub total_distance_m: u64,
    /// Sum of hop durations in minutes.
    pub total_time_min: u64,
    /// Demand collected over the walk.
    pub total_waste: f64,
    /// Faults recovered from while walking.
    pub faults: Vec<RouteFault>,
}

impl RouteWalk {
    /// Whether the walk reached the end of the successor chain.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.faults.iter().any(RouteFault::truncates_route)
    }
}

/// How a route was produced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostics {
    /// Wall-clock time spent in the search.
    pub solve_time: Duration,
    /// Number of nodes handed to the solver, virtual depot included.
    pub stops_evaluated: usize,
    /// Capacity bound the solver enforced.
    pub capacity_bound: u64,
    /// Whether the bound was raised above the vehicle's capacity.
    pub capacity_relaxed: bool,
    /// Index of the route origin.
    pub depot_index: usize,
    /// How the origin was chosen.
    pub origin: RouteOrigin,
    /// Search strategy label.
    pub algorithm: String,
    /// Local search iterations performed.
    pub iterations: usize,
    /// Objective of the returned assignment in metres.
    pub objective: u64,
}

/// A complete optimized route.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    /// Real stops in visiting order.
    pub visited: Vec<VisitedStop>,
    /// Path coordinates, origin first.
    pub path: Vec<Coord<f64>>,
    /// Every hop walked.
    pub segments: Vec<RouteSegment>,
    /// Route length in metres.
    pub total_distance_m: u64,
    /// Route length in kilometres.
    pub total_distance_km: f64,
    /// Driving time in minutes.
    pub total_time_min: u64,
    /// Demand collected.
    pub total_waste: f64,
    /// Fuel need and tank feasibility.
    pub fuel: FuelAssessment,
    /// Quality score in `0..=100`.
    pub quality_score: f64,
    /// How the route was produced.
    pub diagnostics: Diagnostics,
    /// Faults recovered from while walking; empty for a complete route.
    pub faults: Vec<RouteFault>,
}

impl RouteResult {
    /// Annotate a walk with fuel and quality for `vehicle`.
    #[expect(
        clippy::float_arithmetic,
        clippy::cast_precision_loss,
        reason = "kilometres are fractional; metres stay far below 2^52"
    )]
    #[must_use]
    pub fn from_walk(walk: RouteWalk, vehicle: &Vehicle, diagnostics: Diagnostics) -> Self {
        let total_distance_km = walk.total_distance_m as f64 / 1000.0;
        let fuel = assess_fuel(total_distance_km, vehicle);
        let quality_score = score_route(&walk.visited);
        Self {
            visited: walk.visited,
            path: walk.path,
            segments: walk.segments,
            total_distance_m: walk.total_distance_m,
            total_distance_km,
            total_time_min: walk.total_time_min,
            total_waste: walk.total_waste,
            fuel,
            quality_score,
            diagnostics,
            faults: walk.faults,
        }
    }

    /// Whether the walk covered the whole assignment.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.faults.iter().any(RouteFault::truncates_route)
    }

    /// Identifiers of the visited stops, in order.
    #[must_use]
    pub fn visited_ids(&self) -> Vec<u64> {
        self.visited.iter().filter_map(|visit| visit.stop.id).collect()
    }

    /// Condensed view for quick recommendations.
    #[must_use]
    pub fn preview(&self) -> RoutePreview {
        RoutePreview {
            path: self.path.clone(),
            segments: self.segments.clone(),
            total_distance_km: self.total_distance_km,
            total_time_min: self.total_time_min,
            fuel_consumption: self.fuel.consumption,
            start: self.path.first().copied(),
            end: self.path.last().copied(),
        }
    }
}

/// Route recommendation without per-stop detail.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutePreview {
    /// Path coordinates, origin first.
    pub path: Vec<Coord<f64>>,
    /// Every hop walked.
    pub segments: Vec<RouteSegment>,
    /// Route length in kilometres.
    pub total_distance_km: f64,
    /// Driving time in minutes.
    pub total_time_min: u64,
    /// Estimated fuel need.
    pub fuel_consumption: f64,
    /// First path coordinate.
    pub start: Option<Coord<f64>>,
    /// Last path coordinate.
    pub end: Option<Coord<f64>>,
}

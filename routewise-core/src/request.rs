//! Optimization requests and their validation.

use std::collections::HashSet;
use std::time::Duration;

use thiserror::Error;

use crate::{Stop, TimeWindow, Vehicle};

/// Default cap on the route's elapsed time: one day.
pub const DEFAULT_MAX_ROUTE_MINUTES: u64 = 24 * 60;

/// Default search budget for a full solve.
pub const DEFAULT_SOLVE_SECONDS: u64 = 20;

/// Parameters for one optimization call.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use routewise_core::{OptimizeRequest, Stop, Vehicle};
///
/// let request = OptimizeRequest::new(
///     vec![Stop::new(1, Coord { x: 73.85, y: 18.52 }, 40.0)],
///     Vehicle::new(500.0),
/// )
/// .with_depot(1)
/// .with_solve_seconds(5);
/// assert!(request.validate().is_ok());
/// assert_eq!(request.max_route_minutes, 24 * 60);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizeRequest {
    /// Stops to visit, in caller order.
    pub stops: Vec<Stop>,
    /// Vehicle serving the route.
    #[cfg_attr(feature = "serde", serde(default))]
    pub vehicle: Vehicle,
    /// Identifier of the stop to start from, if any.
    #[cfg_attr(feature = "serde", serde(default))]
    pub depot_id: Option<u64>,
    /// Maximum elapsed route time in minutes.
    #[cfg_attr(feature = "serde", serde(default = "default_max_route_minutes"))]
    pub max_route_minutes: u64,
    /// Search budget in seconds. Values below one are raised to one.
    #[cfg_attr(feature = "serde", serde(default = "default_solve_seconds"))]
    pub solve_seconds: u64,
}

#[cfg(feature = "serde")]
const fn default_max_route_minutes() -> u64 {
    DEFAULT_MAX_ROUTE_MINUTES
}

#[cfg(feature = "serde")]
const fn default_solve_seconds() -> u64 {
    DEFAULT_SOLVE_SECONDS
}

/// Reasons a request is rejected before any search runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// No stops were supplied.
    #[error("no valid locations provided")]
    NoStops,
    /// The vehicle capacity is negative or not a number.
    #[error("vehicle capacity must be a non-negative number")]
    InvalidCapacity,
    /// A stop's demand is negative or not a number.
    #[error("stop {index} has a negative or non-numeric demand")]
    InvalidDemand {
        /// Position of the stop in the request.
        index: usize,
    },
    /// Two stops share an identifier.
    #[error("stop identifier {id} appears more than once")]
    DuplicateStopId {
        /// Repeated identifier.
        id: u64,
    },
    /// A time window closes before it opens.
    #[error("stop {index} has a time window that closes before it opens")]
    InvertedTimeWindow {
        /// Position of the stop in the request.
        index: usize,
    },
    /// The number of time windows does not match the number of stops.
    #[error("expected {expected} time windows, got {found}")]
    TimeWindowCount {
        /// Number of stops.
        expected: usize,
        /// Number of windows supplied.
        found: usize,
    },
    /// The route is allowed no time at all.
    #[error("maximum route duration must be positive")]
    ZeroDuration,
}

impl OptimizeRequest {
    /// Request with default duration and budget, and no designated depot.
    #[must_use]
    pub const fn new(stops: Vec<Stop>, vehicle: Vehicle) -> Self {
        Self {
            stops,
            vehicle,
            depot_id: None,
            max_route_minutes: DEFAULT_MAX_ROUTE_MINUTES,
            solve_seconds: DEFAULT_SOLVE_SECONDS,
        }
    }

    /// Start the route at the stop with this identifier.
    #[must_use]
    pub const fn with_depot(mut self, depot_id: u64) -> Self {
        self.depot_id = Some(depot_id);
        self
    }

    /// Replace the maximum route duration.
    #[must_use]
    pub const fn with_max_route_minutes(mut self, minutes: u64) -> Self {
        self.max_route_minutes = minutes;
        self
    }

    /// Replace the search budget.
    #[must_use]
    pub const fn with_solve_seconds(mut self, seconds: u64) -> Self {
        self.solve_seconds = seconds;
        self
    }

    /// Attach one optional window per stop, in request order.
    pub fn with_time_windows(mut self, windows: Vec<Option<TimeWindow>>) -> Result<Self, InputError> {
        if windows.len() != self.stops.len() {
            return Err(InputError::TimeWindowCount {
                expected: self.stops.len(),
                found: windows.len(),
            });
        }
        for (stop, window) in self.stops.iter_mut().zip(windows) {
            stop.time_window = window;
        }
        Ok(self)
    }

    /// Search budget, never below one second.
    #[must_use]
    pub fn solve_budget(&self) -> Duration {
        Duration::from_secs(self.solve_seconds.max(1))
    }

    /// Total demand across the supplied stops.
    #[must_use]
    pub fn total_demand(&self) -> f64 {
        self.stops.iter().map(|stop| stop.demand).sum()
    }

    /// Check the request before any matrix or search work.
    pub fn validate(&self) -> Result<(), InputError> {
        if self.stops.is_empty() {
            return Err(InputError::NoStops);
        }
        if !self.vehicle.has_valid_capacity() {
            return Err(InputError::InvalidCapacity);
        }
        if self.max_route_minutes == 0 {
            return Err(InputError::ZeroDuration);
        }
        let mut seen = HashSet::with_capacity(self.stops.len());
        for (index, stop) in self.stops.iter().enumerate() {
            if !(stop.demand.is_finite() && stop.demand >= 0.0) {
                return Err(InputError::InvalidDemand { index });
            }
            if let Some(window) = stop.time_window
                && !window.is_ordered()
            {
                return Err(InputError::InvertedTimeWindow { index });
            }
            if let Some(id) = stop.id
                && !seen.insert(id)
            {
                return Err(InputError::DuplicateStopId { id });
            }
        }
        Ok(())
    }
}

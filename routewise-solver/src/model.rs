//! Routing model: arc costs plus the time and capacity dimensions.
//!
//! A route is an open path: it starts at the model's start node, visits
//! every other node exactly once and ends wherever the last visit is. The
//! objective is the summed distance of the arcs taken.
//!
//! The time dimension starts at zero, adds the travel time of each arc and
//! may wait at a node until its window opens. Every cumul must stay within
//! the maximum route duration and every arrival within the node's window.
//! The start node's window is not enforced: the vehicle leaves it at zero.
//!
//! The capacity dimension starts at zero and adds the departing node's demand
//! on each arc, the last node's demand included. Load never decreases along a
//! path, so the terminal cumul bounds every other one and capacity
//! feasibility does not depend on the visiting order.

use routewise_core::{RouteMatrices, Stop, TimeWindow};
use thiserror::Error;

/// Errors raised while assembling a [`RoutingModel`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The model has no nodes.
    #[error("routing model has no nodes")]
    Empty,
    /// A matrix is not `n×n`.
    #[error("{matrix} matrix row {row} has {found} entries, expected {expected}")]
    NotSquare {
        /// Which matrix was malformed.
        matrix: &'static str,
        /// Offending row, or the row count when rows are missing.
        row: usize,
        /// Entries found.
        found: usize,
        /// Number of nodes.
        expected: usize,
    },
    /// The start node is not a node of the model.
    #[error("start node {start} is outside the {len} model nodes")]
    StartOutOfRange {
        /// Requested start node.
        start: usize,
        /// Number of nodes.
        len: usize,
    },
    /// The number of demands or windows does not match the node count.
    #[error("expected {expected} {what}, got {found}")]
    LengthMismatch {
        /// Which per-node input was malformed.
        what: &'static str,
        /// Number of nodes.
        expected: usize,
        /// Entries supplied.
        found: usize,
    },
    /// A node's window closes before it opens.
    #[error("node {node} has an inverted time window")]
    InvertedWindow {
        /// Offending node.
        node: usize,
    },
}

/// Cost and constraint violation of one candidate path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathEvaluation {
    /// Summed arc distance in metres.
    pub cost: u64,
    /// Summed minutes by which arrivals miss windows or the route overruns
    /// its maximum duration. Zero for a feasible path.
    pub violation: u64,
}

impl PathEvaluation {
    /// Whether the path satisfies the time dimension.
    #[must_use]
    pub const fn is_feasible(&self) -> bool {
        self.violation == 0
    }
}

/// Immutable single-vehicle routing problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingModel {
    distance: Vec<Vec<u64>>,
    time: Vec<Vec<u64>>,
    demand: Vec<u64>,
    windows: Vec<Option<TimeWindow>>,
    start: usize,
    capacity: u64,
    max_duration: u64,
}

impl RoutingModel {
    /// Assemble a model from raw matrices and per-node demands.
    ///
    /// # Examples
    /// ```rust
    /// use routewise_core::RouteMatrices;
    /// use routewise_solver::RoutingModel;
    ///
    /// let matrices = RouteMatrices {
    ///     distance: vec![vec![0, 5], vec![5, 0]],
    ///     time: vec![vec![0, 1], vec![1, 0]],
    /// };
    /// let model = RoutingModel::new(&matrices, vec![0, 3], 0, 10, 60)?;
    /// assert_eq!(model.evaluate(&[0, 1]).cost, 5);
    /// # Ok::<(), routewise_solver::ModelError>(())
    /// ```
    pub fn new(
        matrices: &RouteMatrices,
        demand: Vec<u64>,
        start: usize,
        capacity: u64,
        max_duration: u64,
    ) -> Result<Self, ModelError> {
        let len = matrices.distance.len();
        if len == 0 {
            return Err(ModelError::Empty);
        }
        check_square("distance", &matrices.distance, len)?;
        check_square("time", &matrices.time, len)?;
        if demand.len() != len {
            return Err(ModelError::LengthMismatch {
                what: "demands",
                expected: len,
                found: demand.len(),
            });
        }
        if start >= len {
            return Err(ModelError::StartOutOfRange { start, len });
        }
        Ok(Self {
            distance: matrices.distance.clone(),
            time: matrices.time.clone(),
            demand,
            windows: vec![None; len],
            start,
            capacity,
            max_duration,
        })
    }

    /// Assemble a model whose demands and windows come from `stops`.
    pub fn from_stops(
        matrices: &RouteMatrices,
        stops: &[Stop],
        start: usize,
        capacity: u64,
        max_duration: u64,
    ) -> Result<Self, ModelError> {
        let demand = stops.iter().map(Stop::demand_units).collect();
        let windows = stops.iter().map(|stop| stop.time_window).collect();
        Self::new(matrices, demand, start, capacity, max_duration)?.with_time_windows(windows)
    }

    /// Attach one optional arrival window per node.
    pub fn with_time_windows(mut self, windows: Vec<Option<TimeWindow>>) -> Result<Self, ModelError> {
        if windows.len() != self.len() {
            return Err(ModelError::LengthMismatch {
                what: "time windows",
                expected: self.len(),
                found: windows.len(),
            });
        }
        if let Some(node) = windows
            .iter()
            .position(|window| window.is_some_and(|w| !w.is_ordered()))
        {
            return Err(ModelError::InvertedWindow { node });
        }
        self.windows = windows;
        Ok(self)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distance.len()
    }

    /// Whether the model has no nodes. Always false for a constructed model.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }

    /// Node every route starts from.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Capacity bound enforced on the load dimension.
    #[must_use]
    pub const fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Upper bound on every time cumul.
    #[must_use]
    pub const fn max_duration(&self) -> u64 {
        self.max_duration
    }

    /// Load carried at the end of any complete route.
    #[must_use]
    pub fn total_demand(&self) -> u64 {
        self.demand.iter().fold(0_u64, |acc, d| acc.saturating_add(*d))
    }

    /// Whether the capacity dimension can be satisfied at all.
    #[must_use]
    pub fn capacity_fits(&self) -> bool {
        self.total_demand() <= self.capacity
    }

    /// Distance of arc `from → to`.
    #[must_use]
    pub fn arc_cost(&self, from: usize, to: usize) -> u64 {
        cell(&self.distance, from, to)
    }

    /// Travel time of arc `from → to`.
    #[must_use]
    pub fn arc_time(&self, from: usize, to: usize) -> u64 {
        cell(&self.time, from, to)
    }

    /// Arrival time after waiting for `node`'s window, and minutes late.
    fn arrive(&self, node: usize, time: u64) -> (u64, u64) {
        if node == self.start {
            return (time, 0);
        }
        match self.windows.get(node).copied().flatten() {
            Some(window) => {
                let arrival = time.max(window.earliest);
                (arrival, arrival.saturating_sub(window.latest))
            }
            None => (time, 0),
        }
    }

    /// Cost and time-dimension violation of `path`.
    ///
    /// `path` lists nodes in visiting order, starting with the start node.
    #[must_use]
    pub fn evaluate(&self, path: &[usize]) -> PathEvaluation {
        let Some(&first) = path.first() else {
            return PathEvaluation::default();
        };
        let (mut time, mut violation) = self.arrive(first, 0);
        let mut cost = 0_u64;
        for pair in path.windows(2) {
            let &[from, to] = pair else { continue };
            cost = cost.saturating_add(self.arc_cost(from, to));
            let (arrival, late) = self.arrive(to, time.saturating_add(self.arc_time(from, to)));
            time = arrival;
            violation = violation.saturating_add(late);
        }
        violation = violation.saturating_add(time.saturating_sub(self.max_duration));
        PathEvaluation { cost, violation }
    }

    /// Whether appending `next` to a partial path ending at `last` at `time`
    /// keeps the time dimension satisfied. Returns the new time if so.
    pub(crate) fn extend(&self, last: usize, time: u64, next: usize) -> Option<u64> {
        let (arrival, late) = self.arrive(next, time.saturating_add(self.arc_time(last, next)));
        (late == 0 && arrival <= self.max_duration).then_some(arrival)
    }
}

fn cell(matrix: &[Vec<u64>], from: usize, to: usize) -> u64 {
    matrix
        .get(from)
        .and_then(|row| row.get(to))
        .copied()
        .unwrap_or_default()
}

fn check_square(matrix: &'static str, rows: &[Vec<u64>], expected: usize) -> Result<(), ModelError> {
    if rows.len() != expected {
        return Err(ModelError::NotSquare {
            matrix,
            row: rows.len(),
            found: rows.len(),
            expected,
        });
    }
    match rows.iter().position(|row| row.len() != expected) {
        Some(row) => Err(ModelError::NotSquare {
            matrix,
            row,
            found: rows.get(row).map_or(0, Vec::len),
            expected,
        }),
        None => Ok(()),
    }
}

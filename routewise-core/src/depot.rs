//! Route origin selection.
//!
//! Every route starts at index 0 of the prepared stop list. When the caller
//! designates a depot, that stop is moved to the front. Otherwise a virtual
//! depot is prepended at the first stop's position so that every real stop is
//! reached as a visit rather than consumed as the origin.
//!
//! The two paths are deliberately not symmetric: a designated depot is a real
//! stop whose demand is charged to the vehicle when it departs, while the
//! virtual depot carries no demand and is recognised by its missing
//! identifier.

use crate::{InputError, Stop};

/// Name given to the virtual depot.
pub const VIRTUAL_DEPOT_NAME: &str = "Start";

/// Address given to the virtual depot.
pub const VIRTUAL_DEPOT_ADDRESS: &str = "Virtual Start Point";

/// How the route origin was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case", tag = "kind", content = "id")
)]
pub enum RouteOrigin {
    /// The caller's depot stop, moved to index 0.
    Designated(u64),
    /// A synthetic stop prepended at index 0.
    Virtual,
    /// A depot was requested but not found; the first stop is the origin.
    FirstStop,
}

/// Stops ordered for the solver, origin first.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedStops {
    /// Stops with the origin at [`Self::depot_index`].
    pub stops: Vec<Stop>,
    /// Index of the route origin. Always 0.
    pub depot_index: usize,
    /// How the origin was chosen.
    pub origin: RouteOrigin,
}

impl PreparedStops {
    /// Whether a virtual depot was prepended.
    #[must_use]
    pub const fn injected(&self) -> bool {
        matches!(self.origin, RouteOrigin::Virtual)
    }

    /// Number of caller-supplied stops.
    #[must_use]
    pub fn real_stop_count(&self) -> usize {
        self.stops.iter().filter(|stop| !stop.is_virtual()).count()
    }
}

/// Order `stops` so the route origin comes first.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use routewise_core::{RouteOrigin, Stop, prepare_stops};
///
/// let stops = vec![
///     Stop::new(1, Coord { x: 73.85, y: 18.52 }, 10.0),
///     Stop::new(2, Coord { x: 73.86, y: 18.53 }, 20.0),
/// ];
///
/// let prepared = prepare_stops(stops.clone(), None)?;
/// assert_eq!(prepared.origin, RouteOrigin::Virtual);
/// assert_eq!(prepared.stops.len(), 3);
///
/// let prepared = prepare_stops(stops, Some(2))?;
/// assert_eq!(prepared.stops[0].id, Some(2));
/// assert_eq!(prepared.stops.len(), 2);
/// # Ok::<(), routewise_core::InputError>(())
/// ```
pub fn prepare_stops(stops: Vec<Stop>, depot_id: Option<u64>) -> Result<PreparedStops, InputError> {
    let Some(first) = stops.first() else {
        return Err(InputError::NoStops);
    };

    let Some(depot_id) = depot_id else {
        let mut prepared = Vec::with_capacity(stops.len() + 1);
        prepared.push(Stop::virtual_depot(first.location));
        prepared.extend(stops);
        return Ok(PreparedStops {
            stops: prepared,
            depot_index: 0,
            origin: RouteOrigin::Virtual,
        });
    };

    let Some(position) = stops.iter().position(|stop| stop.id == Some(depot_id)) else {
        log::warn!("designated depot {depot_id} is not among the stops; starting from the first stop");
        return Ok(PreparedStops {
            stops,
            depot_index: 0,
            origin: RouteOrigin::FirstStop,
        });
    };

    let mut prepared = stops;
    let depot = prepared.remove(position);
    prepared.insert(0, depot);
    Ok(PreparedStops {
        stops: prepared,
        depot_index: 0,
        origin: RouteOrigin::Designated(depot_id),
    })
}

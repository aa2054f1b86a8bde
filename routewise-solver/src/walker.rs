//! Walk a solved assignment into visits, path coordinates and segments.

use routewise_core::{
    RouteFault, RouteMatrices, RouteSegment, RouteWalk, Stop, VisitedStop, WalkFault,
};

use crate::assignment::{SolvedAssignment, Successor};

/// Follow `assignment` from its start node and accumulate the route.
///
/// The virtual depot is walked like any other node but never reported as a
/// visit. Coordinates of exactly `(0, 0)` are treated as missing and left out
/// of the path. A hop that cannot be walked ends the walk and is recorded as
/// [`RouteFault::WalkInterrupted`]; everything gathered before it is kept.
///
/// # Examples
/// ```rust
/// use geo::Coord;
/// use routewise_core::{RouteMatrices, Stop};
/// use routewise_solver::{SolvedAssignment, walk};
///
/// let stops = vec![
///     Stop::virtual_depot(Coord { x: 73.80, y: 18.50 }),
///     Stop::new(1, Coord { x: 73.80, y: 18.50 }, 40.0),
///     Stop::new(2, Coord { x: 73.85, y: 18.50 }, 60.0),
/// ];
/// let matrices = RouteMatrices {
///     distance: vec![vec![0, 0, 5_000], vec![0, 0, 5_000], vec![5_000, 5_000, 0]],
///     time: vec![vec![0, 0, 10], vec![0, 0, 10], vec![10, 10, 0]],
/// };
/// let route = walk(&SolvedAssignment::from_path(&[0, 1, 2], 3, 5_000), &stops, &matrices);
/// assert_eq!(route.visited.len(), 2);
/// assert_eq!(route.total_distance_m, 5_000);
/// assert_eq!(route.total_waste, 100.0);
/// assert!(route.is_complete());
/// ```
#[must_use]
pub fn walk(assignment: &SolvedAssignment, stops: &[Stop], matrices: &RouteMatrices) -> RouteWalk {
    let mut route = RouteWalk::default();
    let mut seen = vec![false; stops.len()];

    let mut current = assignment.start();
    let Some(origin) = stops.get(current) else {
        interrupt(
            &mut route,
            current,
            WalkFault::NodeOutOfRange {
                node: current,
                len: stops.len(),
            },
        );
        return route;
    };
    if let Some(flag) = seen.get_mut(current) {
        *flag = true;
    }
    record_point(&mut route, current, origin);

    let mut visit_order = 0_usize;
    loop {
        let next = match assignment.next(current) {
            Some(Successor::End) => break,
            Some(Successor::Node(next)) => next,
            None => {
                interrupt(
                    &mut route,
                    current,
                    WalkFault::NodeOutOfRange {
                        node: current,
                        len: assignment.len(),
                    },
                );
                break;
            }
        };
        let (from_stop, to_stop) = match (stops.get(current), stops.get(next)) {
            (Some(from), Some(to)) => (from, to),
            _ => {
                interrupt(
                    &mut route,
                    current,
                    WalkFault::NodeOutOfRange {
                        node: next,
                        len: stops.len(),
                    },
                );
                break;
            }
        };
        if seen.get(next).copied().unwrap_or(false) {
            interrupt(&mut route, current, WalkFault::Revisit { node: next });
            break;
        }
        let (Some(distance), Some(time)) = (matrices.distance(current, next), matrices.time(current, next))
        else {
            interrupt(
                &mut route,
                current,
                WalkFault::MissingMatrixCell {
                    from: current,
                    to: next,
                },
            );
            break;
        };

        route.total_distance_m = route.total_distance_m.saturating_add(distance);
        route.total_time_min = route.total_time_min.saturating_add(time);
        let waste = collected(to_stop);
        route.total_waste = accumulate(route.total_waste, waste);

        if !to_stop.is_virtual() {
            route.visited.push(VisitedStop {
                stop: to_stop.clone(),
                node: next,
                visit_order,
                distance_from_previous: distance,
                time_from_previous: time,
                waste_collected: waste,
                cumulative_distance: route.total_distance_m,
                cumulative_time: route.total_time_min,
                cumulative_waste: route.total_waste,
            });
        }
        record_point(&mut route, next, to_stop);
        route.segments.push(RouteSegment {
            from_index: current,
            to_index: next,
            from_name: from_stop.label(current),
            to_name: to_stop.label(next),
            distance_m: distance,
            time_min: time,
        });

        if let Some(flag) = seen.get_mut(next) {
            *flag = true;
        }
        current = next;
        visit_order += 1;
    }
    route
}

fn interrupt(route: &mut RouteWalk, from: usize, fault: WalkFault) {
    log::warn!("route walk stopped after node {from}: {fault}");
    route.faults.push(RouteFault::WalkInterrupted { from, fault });
}

/// Append `stop`'s coordinates to the path unless they are missing or
/// unusable.
fn record_point(route: &mut RouteWalk, node: usize, stop: &Stop) {
    let location = stop.location;
    if location.x == 0.0 && location.y == 0.0 {
        return;
    }
    match stop.coordinates() {
        Ok(coord) => route.path.push(coord),
        Err(err) => {
            log::warn!("leaving node {node} out of the route path: {err}");
            route.faults.push(RouteFault::Coordinate {
                node,
                lat: err.lat,
                lng: err.lng,
            });
        }
    }
}

const fn collected(stop: &Stop) -> f64 {
    if stop.demand.is_finite() && stop.demand > 0.0 {
        stop.demand
    } else {
        0.0
    }
}

#[expect(clippy::float_arithmetic, reason = "demand is fractional")]
fn accumulate(total: f64, waste: f64) -> f64 {
    total + waste
}

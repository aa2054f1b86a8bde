//! Path-cheapest-arc construction.
//!
//! Starting from the start node, repeatedly append the unvisited node
//! reachable by the cheapest arc from the current end of the path. Nodes
//! whose arrival would break the time dimension are passed over while any
//! other node remains; once none does, the plain cheapest arc is taken and
//! the search is left to repair the violation.

use crate::model::RoutingModel;

/// Build an initial visiting order covering every node of `model`.
///
/// Ties are broken by the lower node index so construction is
/// deterministic.
#[must_use]
pub fn cheapest_arc_path(model: &RoutingModel) -> Vec<usize> {
    let len = model.len();
    let mut visited = vec![false; len];
    let mut path = Vec::with_capacity(len);

    let start = model.start();
    if let Some(flag) = visited.get_mut(start) {
        *flag = true;
    }
    path.push(start);

    let mut last = start;
    let mut time = 0_u64;
    while path.len() < len {
        let unvisited = || {
            visited
                .iter()
                .enumerate()
                .filter(|(_, seen)| !**seen)
                .map(|(node, _)| node)
        };
        let feasible = unvisited()
            .filter_map(|node| model.extend(last, time, node).map(|arrival| (node, arrival)))
            .min_by_key(|&(node, _)| (model.arc_cost(last, node), node));
        let chosen = feasible.or_else(|| {
            unvisited()
                .min_by_key(|&node| (model.arc_cost(last, node), node))
                .map(|node| (node, time.saturating_add(model.arc_time(last, node))))
        });
        let Some((next, arrival)) = chosen else {
            break;
        };
        if let Some(flag) = visited.get_mut(next) {
            *flag = true;
        }
        path.push(next);
        last = next;
        time = arrival;
    }
    path
}

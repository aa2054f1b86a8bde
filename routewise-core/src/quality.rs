//! Route quality scoring.
//!
//! The score blends two signals on a 0–100 scale: how many stops are served
//! per kilometre driven, and how evenly the driving is spread across legs. A
//! route with one very long leg among short ones loses balance points.

use crate::VisitedStop;
use crate::fuel::round_to;

/// Efficiency points awarded per stop per kilometre.
const EFFICIENCY_WEIGHT: f64 = 10.0;

/// Balance points lost per unit of relative deviation of the longest leg.
const BALANCE_PENALTY: f64 = 50.0;

/// Score a route from its visited stops.
///
/// Each stop contributes its distance from the previous stop.
///
/// # Examples
/// ```
/// use routewise_core::score_legs;
///
/// assert_eq!(score_legs(&[]), 0.0);
/// assert_eq!(score_legs(&[1_000, 1_000]), 55.0);
/// ```
#[must_use]
pub fn score_route(visited: &[VisitedStop]) -> f64 {
    let legs: Vec<u64> = visited.iter().map(|visit| visit.distance_from_previous).collect();
    score_legs(&legs)
}

/// Score a route from its per-leg distances in metres.
///
/// Returns 0 for an empty route. The result is rounded to two decimals.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "the score is a fractional blend; counts and metres stay far below 2^52"
)]
#[must_use]
pub fn score_legs(legs: &[u64]) -> f64 {
    if legs.is_empty() {
        return 0.0;
    }
    let count = legs.len() as f64;
    let total: u64 = legs.iter().sum();
    let total_km = total as f64 / 1000.0;
    let efficiency = (count / total_km.max(1.0) * EFFICIENCY_WEIGHT).min(100.0);

    let average = total as f64 / count;
    let longest = legs.iter().copied().max().unwrap_or_default() as f64;
    let balance = if average > 0.0 {
        (100.0 - (longest - average) / average * BALANCE_PENALTY).max(0.0)
    } else {
        0.0
    };

    round_to((efficiency + balance) / 2.0, 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn empty_route_scores_zero() {
        assert_eq!(score_legs(&[]), 0.0);
        assert_eq!(score_route(&[]), 0.0);
    }

    #[rstest]
    fn all_zero_legs_get_no_balance_points() {
        // 3 stops within one km cap efficiency at 30; balance is 0.
        assert_eq!(score_legs(&[0, 0, 0]), 15.0);
    }

    #[rstest]
    fn even_legs_keep_full_balance() {
        // 4 stops over 2 km: efficiency 20, balance 100.
        assert_eq!(score_legs(&[500, 500, 500, 500]), 60.0);
    }

    #[rstest]
    fn one_long_leg_costs_balance() {
        // total 20 km over 2 stops: efficiency 1.0; average 10 km, longest 19 km.
        let score = score_legs(&[1_000, 19_000]);
        assert_eq!(score, 28.0);
    }

    #[rstest]
    fn long_route_loses_efficiency() {
        // 2 stops over 20 km gives efficiency 1; equal legs give balance 100.
        assert_eq!(score_legs(&[10_000, 10_000]), 50.5);
    }
}

//! Guided local search over a [`RoutingModel`].
//!
//! The search starts from the cheapest-arc construction and alternates two
//! phases until the budget runs out:
//!
//! 1. First-improvement descent over the relocate, exchange, 2-opt and
//!    or-opt neighbourhoods, scored by the augmented objective.
//! 2. At each local optimum, the arcs of the current path with the highest
//!    utility `distance / (1 + penalty)` have their penalty raised by one.
//!
//! The augmented objective is the true cost, plus a heavy weight per minute
//! of time-dimension violation, plus `λ` times the summed penalties of the
//! arcs used. `λ` is fixed at the first local optimum as a fraction of its
//! average arc cost. The best feasible path by true cost is kept throughout.

mod moves;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::assignment::SolvedAssignment;
use crate::config::SearchConfig;
use crate::construction::cheapest_arc_path;
use crate::model::{ModelError, PathEvaluation, RoutingModel};

use moves::Neighbourhood;

/// Augmented cost charged per minute of time-dimension violation.
const VIOLATION_WEIGHT: u64 = 1_000_000;

/// Errors returned by [`solve`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// No route satisfies the constraints, or none was found in time.
    #[error("No solution found (searched for {elapsed:?})")]
    NoSolution {
        /// Time spent searching.
        elapsed: Duration,
    },
    /// The model could not be assembled.
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Search for the cheapest feasible open path through `model`.
///
/// The call is pure: it owns no state beyond its arguments and may run
/// concurrently with other calls. It returns
/// [`SolveError::NoSolution`] when the capacity dimension cannot be met or no
/// time-feasible path was found within the budget.
///
/// # Examples
/// ```rust
/// use std::time::Duration;
/// use routewise_core::RouteMatrices;
/// use routewise_solver::{RoutingModel, SearchConfig, solve};
///
/// let matrices = RouteMatrices {
///     distance: vec![vec![0, 10, 20], vec![10, 0, 10], vec![20, 10, 0]],
///     time: vec![vec![0, 1, 2], vec![1, 0, 1], vec![2, 1, 0]],
/// };
/// let model = RoutingModel::new(&matrices, vec![0, 5, 5], 0, 10, 60)?;
/// let config = SearchConfig::default().with_time_limit(Duration::from_secs(1));
/// let assignment = solve(&model, &config).expect("feasible");
/// assert_eq!(assignment.path(), vec![0, 1, 2]);
/// assert_eq!(assignment.objective(), 20);
/// # Ok::<(), routewise_solver::ModelError>(())
/// ```
pub fn solve(model: &RoutingModel, config: &SearchConfig) -> Result<SolvedAssignment, SolveError> {
    let started = Instant::now();
    if !model.capacity_fits() {
        log::debug!(
            "total demand {} exceeds capacity {}",
            model.total_demand(),
            model.capacity()
        );
        return Err(SolveError::NoSolution {
            elapsed: started.elapsed(),
        });
    }

    let initial = cheapest_arc_path(model);
    let initial_eval = model.evaluate(&initial);
    log::debug!(
        "cheapest-arc construction: cost {} violation {}",
        initial_eval.cost,
        initial_eval.violation
    );

    let mut search = GuidedLocalSearch::new(model, config, started);
    let outcome = search.run(initial, initial_eval);
    match outcome {
        Some((path, eval)) => {
            log::debug!(
                "guided local search finished after {} rounds with cost {}",
                search.rounds,
                eval.cost
            );
            Ok(SolvedAssignment::from_path(&path, model.len(), eval.cost).with_iterations(search.rounds))
        }
        None => Err(SolveError::NoSolution {
            elapsed: started.elapsed(),
        }),
    }
}

struct GuidedLocalSearch<'a> {
    model: &'a RoutingModel,
    config: &'a SearchConfig,
    deadline: Instant,
    moves: Neighbourhood,
    /// Penalties of the arcs penalised so far; every other arc has none.
    penalties: HashMap<(usize, usize), u64>,
    lambda: u64,
    rounds: usize,
}

type Candidate = (Vec<usize>, PathEvaluation);

impl<'a> GuidedLocalSearch<'a> {
    fn new(model: &'a RoutingModel, config: &'a SearchConfig, started: Instant) -> Self {
        Self {
            model,
            config,
            deadline: started + config.effective_time_limit(),
            moves: Neighbourhood::new(model.len()),
            penalties: HashMap::new(),
            lambda: 0,
            rounds: 0,
        }
    }

    fn run(&mut self, initial: Vec<usize>, initial_eval: PathEvaluation) -> Option<Candidate> {
        let mut best = initial_eval
            .is_feasible()
            .then(|| (initial.clone(), initial_eval));
        if self.moves.is_empty() {
            return best;
        }

        let mut path = initial;
        let mut stalled = 0_usize;
        loop {
            let finished = self.descend(&mut path);
            let eval = self.model.evaluate(&path);
            if eval.is_feasible() && best.as_ref().is_none_or(|(_, b)| eval.cost < b.cost) {
                best = Some((path.clone(), eval));
                stalled = 0;
            } else {
                stalled += 1;
            }
            if !finished || self.should_stop(stalled, best.as_ref()) {
                break;
            }
            if self.lambda == 0 {
                self.lambda = lambda_for(eval.cost, path.len(), self.config.lambda_coefficient);
            }
            self.penalize(&path);
            self.rounds += 1;
        }
        best
    }

    fn should_stop(&self, stalled: usize, best: Option<&Candidate>) -> bool {
        if best.is_some_and(|(_, eval)| eval.cost == 0) {
            return true;
        }
        if self.config.max_iterations.is_some_and(|cap| self.rounds >= cap) {
            return true;
        }
        self.config.stall_rounds.is_some_and(|cap| stalled >= cap)
    }

    fn timed_out(&self) -> bool {
        Instant::now() >= self.deadline
    }

    /// First-improvement descent. Returns `false` if the budget ran out.
    fn descend(&self, path: &mut Vec<usize>) -> bool {
        let mut current = self.augmented(path);
        let mut buffer = Vec::with_capacity(path.len());
        let mut cursor = self.moves.first();
        let mut unimproved = 0_usize;
        while unimproved < self.moves.len() {
            if self.timed_out() {
                return false;
            }
            let Some(mv) = cursor else {
                return true;
            };
            let applied = mv.apply(path, &mut buffer);
            let candidate = applied.then(|| self.augmented(&buffer));
            if let Some(score) = candidate
                && score < current
            {
                std::mem::swap(path, &mut buffer);
                current = score;
                unimproved = 0;
            } else {
                unimproved += 1;
            }
            cursor = self.moves.cycle_after(mv);
        }
        true
    }

    fn augmented(&self, path: &[usize]) -> u64 {
        let eval = self.model.evaluate(path);
        let penalty = arcs(path)
            .map(|(from, to)| self.penalty(from, to))
            .fold(0_u64, u64::saturating_add);
        eval.cost
            .saturating_add(eval.violation.saturating_mul(VIOLATION_WEIGHT))
            .saturating_add(penalty.saturating_mul(self.lambda))
    }

    fn penalty(&self, from: usize, to: usize) -> u64 {
        self.penalties.get(&(from, to)).copied().unwrap_or_default()
    }

    /// Raise the penalty of every maximum-utility arc on `path`.
    fn penalize(&mut self, path: &[usize]) {
        let utility = |from: usize, to: usize| (self.model.arc_cost(from, to), self.penalty(from, to));
        let Some(max) = arcs(path)
            .map(|(from, to)| utility(from, to))
            .max_by(|a, b| compare_utility(*a, *b))
        else {
            return;
        };
        let chosen: Vec<(usize, usize)> = arcs(path)
            .filter(|&(from, to)| compare_utility(utility(from, to), max).is_eq())
            .collect();
        for arc in chosen {
            let penalty = self.penalties.entry(arc).or_default();
            *penalty = penalty.saturating_add(1);
        }
    }
}

fn arcs(path: &[usize]) -> impl Iterator<Item = (usize, usize)> + '_ {
    path.windows(2).filter_map(|pair| match *pair {
        [from, to] => Some((from, to)),
        _ => None,
    })
}

/// Order arcs by `cost / (1 + penalty)` without leaving integers.
fn compare_utility((cost_a, pen_a): (u64, u64), (cost_b, pen_b): (u64, u64)) -> std::cmp::Ordering {
    let lhs = u128::from(cost_a) * (u128::from(pen_b) + 1);
    let rhs = u128::from(cost_b) * (u128::from(pen_a) + 1);
    lhs.cmp(&rhs)
}

/// Penalty weight for a local optimum of `cost` over `nodes` nodes.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "λ is a rounded fraction of the average arc cost"
)]
fn lambda_for(cost: u64, nodes: usize, coefficient: f64) -> u64 {
    let arcs = nodes.saturating_sub(1).max(1) as f64;
    let lambda = (coefficient * cost as f64 / arcs).round();
    if lambda.is_finite() && lambda >= 1.0 {
        lambda as u64
    } else {
        1
    }
}

//! Solved assignments: a successor for every node.

/// What follows a node in a solved route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Successor {
    /// The vehicle drives on to this node.
    Node(usize),
    /// The route ends here.
    End,
}

/// Successor map produced by [`crate::solve`] and consumed by
/// [`crate::walk`].
///
/// # Examples
/// ```rust
/// use routewise_solver::{SolvedAssignment, Successor};
///
/// let assignment = SolvedAssignment::from_path(&[0, 2, 1], 3, 42);
/// assert_eq!(assignment.start(), 0);
/// assert_eq!(assignment.next(0), Some(Successor::Node(2)));
/// assert_eq!(assignment.next(1), Some(Successor::End));
/// assert_eq!(assignment.path(), vec![0, 2, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolvedAssignment {
    start: usize,
    successors: Vec<Successor>,
    objective: u64,
    iterations: usize,
}

impl SolvedAssignment {
    /// Build an assignment from a visiting order over `len` nodes.
    ///
    /// Nodes missing from `path` end immediately.
    #[must_use]
    pub fn from_path(path: &[usize], len: usize, objective: u64) -> Self {
        let mut successors = vec![Successor::End; len];
        for pair in path.windows(2) {
            if let &[from, to] = pair
                && let Some(slot) = successors.get_mut(from)
            {
                *slot = Successor::Node(to);
            }
        }
        Self {
            start: path.first().copied().unwrap_or_default(),
            successors,
            objective,
            iterations: 0,
        }
    }

    /// Build an assignment from an explicit successor table.
    ///
    /// The table is taken as given; the walker reports cycles and
    /// out-of-range successors as faults.
    #[must_use]
    pub const fn from_successors(start: usize, successors: Vec<Successor>, objective: u64) -> Self {
        Self {
            start,
            successors,
            objective,
            iterations: 0,
        }
    }

    /// Record how many search rounds produced this assignment.
    #[must_use]
    pub const fn with_iterations(mut self, iterations: usize) -> Self {
        self.iterations = iterations;
        self
    }

    /// First node of the route.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// Successor of `node`, or `None` when `node` is not in the table.
    #[must_use]
    pub fn next(&self, node: usize) -> Option<Successor> {
        self.successors.get(node).copied()
    }

    /// Number of nodes in the successor table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.successors.len()
    }

    /// Whether the successor table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.successors.is_empty()
    }

    /// Objective value in metres.
    #[must_use]
    pub const fn objective(&self) -> u64 {
        self.objective
    }

    /// Search rounds performed.
    #[must_use]
    pub const fn iterations(&self) -> usize {
        self.iterations
    }

    /// Nodes in visiting order, stopping at the first repeat or gap.
    #[must_use]
    pub fn path(&self) -> Vec<usize> {
        let mut seen = vec![false; self.successors.len()];
        let mut path = Vec::with_capacity(self.successors.len());
        let mut current = self.start;
        while let Some(flag) = seen.get_mut(current)
            && !*flag
        {
            *flag = true;
            path.push(current);
            match self.next(current) {
                Some(Successor::Node(next)) => current = next,
                Some(Successor::End) | None => break,
            }
        }
        path
    }
}

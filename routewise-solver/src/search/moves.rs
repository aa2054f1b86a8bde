//! Neighbourhood moves over a visiting order.
//!
//! Moves address path positions, never node ids. Position 0 holds the start
//! node and is never moved.

/// A single neighbourhood move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Move {
    /// Take the node at `from` and reinsert it at `to`.
    Relocate { from: usize, to: usize },
    /// Swap the nodes at two positions.
    Exchange { first: usize, second: usize },
    /// Reverse the positions `first..=last`.
    TwoOpt { first: usize, last: usize },
    /// Move the `len` nodes starting at `from` so they start at `to` in the
    /// shortened path.
    OrOpt { from: usize, len: usize, to: usize },
}

impl Move {
    /// Write the moved path into `out`. Returns `false`, leaving `out`
    /// unspecified, when the move does not fit `path`.
    pub(crate) fn apply(self, path: &[usize], out: &mut Vec<usize>) -> bool {
        let n = path.len();
        out.clear();
        out.extend_from_slice(path);
        match self {
            Self::Relocate { from, to } => {
                if from == 0 || to == 0 || from >= n || to >= n || from == to {
                    return false;
                }
                let node = out.remove(from);
                out.insert(to, node);
                true
            }
            Self::Exchange { first, second } => {
                if first == 0 || first >= second || second >= n {
                    return false;
                }
                out.swap(first, second);
                true
            }
            Self::TwoOpt { first, last } => match out.get_mut(first..=last) {
                Some(segment) if first > 0 && first < last => {
                    segment.reverse();
                    true
                }
                _ => false,
            },
            Self::OrOpt { from, len, to } => {
                let end = from.saturating_add(len);
                if from == 0 || to == 0 || len == 0 || end > n || to > n - len || to == from {
                    return false;
                }
                let segment: Vec<usize> = out.drain(from..end).collect();
                out.splice(to..to, segment);
                true
            }
        }
    }
}

/// Every move applicable to a path of `n` nodes, in a fixed order:
/// relocate, exchange, 2-opt, then or-opt with segments of two and three.
///
/// Moves are enumerated on demand; the neighbourhood itself holds only the
/// path length and the move count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Neighbourhood {
    n: usize,
    len: usize,
}

impl Neighbourhood {
    pub(crate) fn new(n: usize) -> Self {
        let last = n.saturating_sub(1);
        let len = distinct_pairs(last)
            .saturating_add(increasing_pairs(last).saturating_mul(2))
            .saturating_add(distinct_pairs(n.saturating_sub(2)))
            .saturating_add(distinct_pairs(n.saturating_sub(3)));
        Self { n, len }
    }

    /// Number of moves.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First move in the enumeration order.
    pub(crate) fn first(&self) -> Option<Move> {
        next_distinct(1, 0, self.last())
            .map(|(from, to)| Move::Relocate { from, to })
            .or_else(|| self.first_exchange())
    }

    /// Move following `mv`, wrapping to the first move after the last.
    pub(crate) fn cycle_after(&self, mv: Move) -> Option<Move> {
        self.after(mv).or_else(|| self.first())
    }

    /// Move following `mv` in the enumeration order.
    pub(crate) fn after(&self, mv: Move) -> Option<Move> {
        let last = self.last();
        match mv {
            Move::Relocate { from, to } => next_distinct(from, to, last)
                .map(|(from_pos, to_pos)| Move::Relocate {
                    from: from_pos,
                    to: to_pos,
                })
                .or_else(|| self.first_exchange()),
            Move::Exchange { first, second } => next_increasing(first, second, last)
                .map(|(a, b)| Move::Exchange { first: a, second: b })
                .or_else(|| self.first_two_opt()),
            Move::TwoOpt { first, last: end } => next_increasing(first, end, last)
                .map(|(a, b)| Move::TwoOpt { first: a, last: b })
                .or_else(|| self.first_or_opt(2)),
            Move::OrOpt { from, len, to } => next_distinct(from, to, self.n.saturating_sub(len))
                .map(|(from_pos, to_pos)| Move::OrOpt {
                    from: from_pos,
                    len,
                    to: to_pos,
                })
                .or_else(|| self.first_or_opt(len + 1)),
        }
    }

    /// Iterate every move once, in order.
    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = Move> + '_ {
        std::iter::successors(self.first(), |mv| self.after(*mv))
    }

    const fn last(&self) -> usize {
        self.n.saturating_sub(1)
    }

    fn first_exchange(&self) -> Option<Move> {
        next_increasing(1, 1, self.last())
            .map(|(first, second)| Move::Exchange { first, second })
            .or_else(|| self.first_two_opt())
    }

    fn first_two_opt(&self) -> Option<Move> {
        next_increasing(1, 1, self.last())
            .map(|(first, last)| Move::TwoOpt { first, last })
            .or_else(|| self.first_or_opt(2))
    }

    fn first_or_opt(&self, len: usize) -> Option<Move> {
        if len > MAX_SEGMENT {
            return None;
        }
        next_distinct(1, 0, self.n.saturating_sub(len))
            .map(|(from, to)| Move::OrOpt { from, len, to })
            .or_else(|| self.first_or_opt(len + 1))
    }
}

/// Longest segment moved by or-opt.
const MAX_SEGMENT: usize = 3;

/// Ordered pairs `(a, b)` over `1..=last` with `a != b`.
const fn distinct_pairs(last: usize) -> usize {
    last.saturating_mul(last.saturating_sub(1))
}

/// Pairs `(a, b)` over `1..=last` with `a < b`.
#[expect(
    clippy::integer_division,
    reason = "the distinct pair count is even"
)]
const fn increasing_pairs(last: usize) -> usize {
    distinct_pairs(last) / 2
}

/// Successor of `(a, b)` among ordered pairs over `1..=last` with `a != b`,
/// in lexicographic order. `(1, 0)` yields the first pair.
const fn next_distinct(a: usize, b: usize, last: usize) -> Option<(usize, usize)> {
    let mut first = a;
    let mut second = b + 1;
    loop {
        if second == first {
            second += 1;
        }
        if second <= last {
            return Some((first, second));
        }
        first += 1;
        second = 1;
        if first > last {
            return None;
        }
    }
}

/// Successor of `(a, b)` among pairs over `1..=last` with `a < b`, in
/// lexicographic order. `(1, 1)` yields the first pair.
const fn next_increasing(a: usize, b: usize, last: usize) -> Option<(usize, usize)> {
    if b < last {
        return Some((a, b + 1));
    }
    let first = a + 1;
    if first < last {
        Some((first, first + 1))
    } else {
        None
    }
}

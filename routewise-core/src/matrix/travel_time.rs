//! Travel-time derivation and the paired matrices consumed by the solver.

use crate::Stop;
use crate::vehicle::truncate;

use super::error::MatrixError;
use super::provider::{DistanceMatrix, DistanceProvider};

/// Square matrix of whole-minute travel times.
pub type TimeMatrix = Vec<Vec<u64>>;

/// Assumed average travel speed for a collection vehicle in town.
pub const DEFAULT_AVERAGE_SPEED_KMH: f64 = 30.0;

/// Convert metre distances into whole minutes at a fixed speed.
///
/// Each cell is `floor(metres / 1000 / speed_kmh * 60)`.
///
/// # Examples
/// ```
/// use routewise_core::time_matrix;
///
/// let times = time_matrix(&vec![vec![0, 10_000], vec![10_000, 0]], 30.0)?;
/// assert_eq!(times, vec![vec![0, 20], vec![20, 0]]);
/// # Ok::<(), routewise_core::MatrixError>(())
/// ```
#[expect(
    clippy::float_arithmetic,
    clippy::cast_precision_loss,
    reason = "speed conversion is inherently fractional; distances stay far below 2^52 m"
)]
pub fn time_matrix(distances: &DistanceMatrix, average_speed_kmh: f64) -> Result<TimeMatrix, MatrixError> {
    if !(average_speed_kmh.is_finite() && average_speed_kmh > 0.0) {
        return Err(MatrixError::InvalidSpeed(average_speed_kmh));
    }
    Ok(distances
        .iter()
        .map(|row| {
            row.iter()
                .map(|&metres| {
                    let hours = metres as f64 / 1000.0 / average_speed_kmh;
                    truncate(hours * 60.0)
                })
                .collect()
        })
        .collect())
}

/// Distance and travel-time matrices for one optimization call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatrices {
    /// Whole metres between stops.
    pub distance: DistanceMatrix,
    /// Whole minutes between stops.
    pub time: TimeMatrix,
}

impl RouteMatrices {
    /// Query `provider` for distances and derive travel times.
    ///
    /// Fails on empty input, a non-positive speed, or a provider matrix whose
    /// shape does not match `stops`.
    pub fn build<P>(provider: &P, stops: &[Stop], average_speed_kmh: f64) -> Result<Self, MatrixError>
    where
        P: DistanceProvider + ?Sized,
    {
        if stops.is_empty() {
            return Err(MatrixError::EmptyInput);
        }
        let distance = provider.distance_matrix(stops)?;
        check_square(&distance, stops.len())?;
        let time = time_matrix(&distance, average_speed_kmh)?;
        Ok(Self { distance, time })
    }

    /// Number of stops covered.
    #[must_use]
    pub fn len(&self) -> usize {
        self.distance.len()
    }

    /// Whether the matrices are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distance.is_empty()
    }

    /// Distance from `from` to `to`, if both are in range.
    #[must_use]
    pub fn distance(&self, from: usize, to: usize) -> Option<u64> {
        self.distance.get(from).and_then(|row| row.get(to)).copied()
    }

    /// Travel time from `from` to `to`, if both are in range.
    #[must_use]
    pub fn time(&self, from: usize, to: usize) -> Option<u64> {
        self.time.get(from).and_then(|row| row.get(to)).copied()
    }
}

fn check_square(matrix: &DistanceMatrix, expected: usize) -> Result<(), MatrixError> {
    if matrix.len() != expected {
        return Err(MatrixError::DimensionMismatch {
            expected,
            row: matrix.len(),
            found: matrix.len(),
        });
    }
    match matrix.iter().position(|row| row.len() != expected) {
        Some(row) => Err(MatrixError::DimensionMismatch {
            expected,
            row,
            found: matrix.get(row).map_or(0, Vec::len),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FixedMatrixProvider, stop};
    use rstest::rstest;

    #[rstest]
    #[case(14_999, 29)]
    #[case(15_000, 30)]
    #[case(499, 0)]
    fn minutes_are_floor_truncated(#[case] metres: u64, #[case] minutes: u64) {
        let times = time_matrix(&vec![vec![0, metres], vec![metres, 0]], 30.0).expect("times");
        assert_eq!(times[0][1], minutes);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-5.0)]
    #[case(f64::NAN)]
    fn non_positive_speed_is_rejected(#[case] speed: f64) {
        let err = time_matrix(&vec![vec![0]], speed).expect_err("invalid speed");
        assert!(matches!(err, MatrixError::InvalidSpeed(_)));
    }

    #[rstest]
    fn asymmetric_provider_matrices_are_kept() {
        let provider = FixedMatrixProvider::new(vec![vec![0, 3_000], vec![12_000, 0]]);
        let stops = [stop(1, 0.0, 0.0, 0.0), stop(2, 0.0, 0.1, 0.0)];
        let matrices = RouteMatrices::build(&provider, &stops, 30.0).expect("matrices");
        assert_eq!(matrices.distance(0, 1), Some(3_000));
        assert_eq!(matrices.distance(1, 0), Some(12_000));
        assert_eq!(matrices.time(0, 1), Some(6));
        assert_eq!(matrices.time(1, 0), Some(24));
        assert_eq!(matrices.distance(2, 0), None);
    }

    #[rstest]
    fn ragged_provider_matrix_is_rejected() {
        let provider = FixedMatrixProvider::new(vec![vec![0, 1], vec![1]]);
        let stops = [stop(1, 0.0, 0.0, 0.0), stop(2, 0.0, 0.1, 0.0)];
        let err = RouteMatrices::build(&provider, &stops, 30.0).expect_err("ragged matrix");
        assert_eq!(
            err,
            MatrixError::DimensionMismatch {
                expected: 2,
                row: 1,
                found: 1
            }
        );
    }
}

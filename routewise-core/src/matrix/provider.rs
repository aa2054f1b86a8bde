//! Distance provider trait and the great-circle implementation.

use std::fmt;
use std::str::FromStr;

use geo::{Distance, Geodesic, Haversine, Point};

use crate::Stop;
use crate::vehicle::truncate;

use super::error::MatrixError;

/// Square matrix of whole-metre distances.
pub type DistanceMatrix = Vec<Vec<u64>>;

/// Fetch pairwise distances for a set of stops.
///
/// Implementers must return a square `n×n` matrix where `n == stops.len()`.
/// `matrix[i][j]` is the distance in metres from `stops[i]` to `stops[j]`.
/// Road-network providers may return asymmetric matrices.
///
/// # Examples
///
/// ```rust
/// use geo::Coord;
/// use routewise_core::{DistanceMatrix, DistanceProvider, MatrixError, Stop};
///
/// struct UnitProvider;
///
/// impl DistanceProvider for UnitProvider {
///     fn distance_matrix(&self, stops: &[Stop]) -> Result<DistanceMatrix, MatrixError> {
///         if stops.is_empty() {
///             return Err(MatrixError::EmptyInput);
///         }
///         let n = stops.len();
///         Ok((0..n)
///             .map(|i| (0..n).map(|j| u64::from(i != j)).collect())
///             .collect())
///     }
/// }
///
/// let stop = Stop::new(1, Coord { x: 0.0, y: 0.0 }, 0.0);
/// let matrix = UnitProvider.distance_matrix(&[stop])?;
/// assert_eq!(matrix, vec![vec![0]]);
/// # Ok::<(), MatrixError>(())
/// ```
pub trait DistanceProvider {
    /// Return a matrix of distances for `stops`.
    ///
    /// Implementations must return `Err(MatrixError::EmptyInput)` when
    /// `stops` is empty.
    fn distance_matrix(&self, stops: &[Stop]) -> Result<DistanceMatrix, MatrixError>;
}

/// Earth model used for straight-line distances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum DistanceMetric {
    /// Spherical great-circle distance.
    #[default]
    Haversine,
    /// Ellipsoidal (WGS84) geodesic distance.
    Geodesic,
}

impl DistanceMetric {
    fn metres(self, from: Point<f64>, to: Point<f64>) -> f64 {
        match self {
            Self::Haversine => Haversine.distance(from, to),
            Self::Geodesic => Geodesic.distance(from, to),
        }
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Haversine => f.write_str("haversine"),
            Self::Geodesic => f.write_str("geodesic"),
        }
    }
}

/// Error returned when parsing an unknown [`DistanceMetric`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown distance metric {0:?} (expected haversine or geodesic)")]
pub struct UnknownMetric(pub String);

impl FromStr for DistanceMetric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "haversine" | "great-circle" => Ok(Self::Haversine),
            "geodesic" => Ok(Self::Geodesic),
            other => Err(UnknownMetric(other.to_owned())),
        }
    }
}

/// Straight-line distances between stops.
///
/// A stop whose coordinates are unusable contributes zero-length edges
/// instead of failing the whole matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GreatCircleProvider {
    metric: DistanceMetric,
}

impl GreatCircleProvider {
    /// Provider using the given earth model.
    #[must_use]
    pub const fn new(metric: DistanceMetric) -> Self {
        Self { metric }
    }

    /// Earth model in use.
    #[must_use]
    pub const fn metric(&self) -> DistanceMetric {
        self.metric
    }

    fn edge(&self, from: Option<Point<f64>>, to: Option<Point<f64>>) -> u64 {
        let (Some(from), Some(to)) = (from, to) else {
            return 0;
        };
        let metres = self.metric.metres(from, to);
        if metres.is_finite() && metres >= 0.0 {
            truncate(metres)
        } else {
            0
        }
    }
}

impl DistanceProvider for GreatCircleProvider {
    fn distance_matrix(&self, stops: &[Stop]) -> Result<DistanceMatrix, MatrixError> {
        if stops.is_empty() {
            return Err(MatrixError::EmptyInput);
        }

        let points: Vec<Option<Point<f64>>> = stops
            .iter()
            .enumerate()
            .map(|(index, stop)| match stop.coordinates() {
                Ok(coord) => Some(Point::from(coord)),
                Err(err) => {
                    log::warn!("stop {index} has unusable coordinates ({err}); using zero distances");
                    None
                }
            })
            .collect();

        Ok(points
            .iter()
            .enumerate()
            .map(|(i, from)| {
                points
                    .iter()
                    .enumerate()
                    .map(|(j, to)| if i == j { 0 } else { self.edge(*from, *to) })
                    .collect()
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::rstest;

    fn stop_at(id: u64, lat: f64, lng: f64) -> Stop {
        Stop::new(id, Coord { x: lng, y: lat }, 0.0)
    }

    #[rstest]
    fn single_stop_yields_zero_matrix() {
        let matrix = GreatCircleProvider::default()
            .distance_matrix(&[stop_at(1, 18.52, 73.85)])
            .expect("single stop matrix");
        assert_eq!(matrix, vec![vec![0]]);
    }

    #[rstest]
    fn errors_on_empty_input() {
        let err = GreatCircleProvider::default()
            .distance_matrix(&[])
            .expect_err("expected EmptyInput for empty slice");
        assert_eq!(err, MatrixError::EmptyInput);
    }

    #[rstest]
    #[case(DistanceMetric::Haversine)]
    #[case(DistanceMetric::Geodesic)]
    fn one_degree_of_latitude_is_about_111_km(#[case] metric: DistanceMetric) {
        let stops = [stop_at(1, 0.0, 10.0), stop_at(2, 1.0, 10.0)];
        let matrix = GreatCircleProvider::new(metric)
            .distance_matrix(&stops)
            .expect("matrix");
        assert_eq!(matrix[0][0], 0);
        assert!((110_000..112_500).contains(&matrix[0][1]), "{}", matrix[0][1]);
        assert_eq!(matrix[0][1], matrix[1][0]);
    }

    #[rstest]
    fn malformed_coordinates_contribute_zero() {
        let stops = [
            stop_at(1, 0.0, 0.0),
            stop_at(2, f64::NAN, 0.0),
            stop_at(3, 0.5, 0.0),
        ];
        let matrix = GreatCircleProvider::default()
            .distance_matrix(&stops)
            .expect("matrix");
        assert_eq!(matrix[0][1], 0);
        assert_eq!(matrix[1][2], 0);
        assert!(matrix[0][2] > 0);
    }

    #[rstest]
    #[case("haversine", DistanceMetric::Haversine)]
    #[case("Geodesic", DistanceMetric::Geodesic)]
    #[case("great-circle", DistanceMetric::Haversine)]
    fn metric_names_parse(#[case] name: &str, #[case] expected: DistanceMetric) {
        assert_eq!(name.parse::<DistanceMetric>(), Ok(expected));
    }

    #[rstest]
    fn unknown_metric_is_rejected() {
        assert!("manhattan".parse::<DistanceMetric>().is_err());
    }
}

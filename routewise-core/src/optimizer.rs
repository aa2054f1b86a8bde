//! The optimizer abstraction and its error type.

use std::time::Duration;

use thiserror::Error;

use crate::{InputError, MatrixError, OptimizeRequest, RoutePreview, RouteResult};

/// Errors returned by [`RouteOptimizer`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    /// The request was rejected before any work started.
    #[error(transparent)]
    InvalidInput(#[from] InputError),
    /// Distance or travel-time matrices could not be built.
    #[error(transparent)]
    Matrix(#[from] MatrixError),
    /// The routing model was inconsistent.
    #[error("routing model is inconsistent: {reason}")]
    Model {
        /// Description of the inconsistency.
        reason: String,
    },
    /// The search found no route satisfying the constraints in time.
    #[error("No solution found (searched for {elapsed:?})")]
    NoSolution {
        /// Time spent searching.
        elapsed: Duration,
    },
    /// Both the relaxed solve and the retry with the vehicle's own capacity
    /// failed.
    #[error("Route optimization failed: {retry}. Original error: {relaxed}")]
    RetryFailed {
        /// Failure of the solve with the relaxed capacity.
        relaxed: Box<OptimizeError>,
        /// Failure of the retry with the vehicle's capacity.
        retry: Box<OptimizeError>,
    },
}

/// Plan a single-vehicle route over a request's stops.
///
/// Implementations are stateless between calls and must be `Send + Sync`
/// so one optimizer can serve concurrent callers.
///
/// # Examples
/// ```rust
/// use routewise_core::{
///     InputError, OptimizeError, OptimizeRequest, RouteOptimizer, RoutePreview, RouteResult,
/// };
///
/// struct Rejecting;
///
/// impl RouteOptimizer for Rejecting {
///     fn optimize(&self, request: &OptimizeRequest) -> Result<RouteResult, OptimizeError> {
///         request.validate()?;
///         Err(OptimizeError::Model { reason: "not implemented".into() })
///     }
///
///     fn preview(&self, request: &OptimizeRequest) -> Result<RoutePreview, OptimizeError> {
///         self.optimize(request).map(|route| route.preview())
///     }
/// }
///
/// let empty = OptimizeRequest::new(Vec::new(), Default::default());
/// assert_eq!(
///     Rejecting.optimize(&empty),
///     Err(OptimizeError::InvalidInput(InputError::NoStops))
/// );
/// ```
pub trait RouteOptimizer: Send + Sync {
    /// Produce a full route report for `request`.
    fn optimize(&self, request: &OptimizeRequest) -> Result<RouteResult, OptimizeError>;

    /// Produce a quick recommendation for `request` on a short budget.
    fn preview(&self, request: &OptimizeRequest) -> Result<RoutePreview, OptimizeError>;
}

/// Outcome envelope handed to external callers.
///
/// # Examples
/// ```rust
/// use routewise_core::{InputError, OptimizeError, OptimizeResponse, RouteResult};
///
/// let failed: Result<RouteResult, OptimizeError> = Err(InputError::NoStops.into());
/// let response = OptimizeResponse::from(failed);
/// assert!(!response.success);
/// assert_eq!(response.error.as_deref(), Some("no valid locations provided"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimizeResponse<T = RouteResult> {
    /// Whether a route was produced.
    pub success: bool,
    /// The route, when successful.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub route: Option<T>,
    /// Failure reason, when unsuccessful.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing_if = "Option::is_none"))]
    pub error: Option<String>,
}

impl<T> From<Result<T, OptimizeError>> for OptimizeResponse<T> {
    fn from(outcome: Result<T, OptimizeError>) -> Self {
        match outcome {
            Ok(route) => Self {
                success: true,
                route: Some(route),
                error: None,
            },
            Err(err) => Self {
                success: false,
                route: None,
                error: Some(err.to_string()),
            },
        }
    }
}

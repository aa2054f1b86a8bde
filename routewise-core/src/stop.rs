//! Stops to be visited by a route.

use geo::Coord;
use thiserror::Error;

/// Arrival window for a stop, in whole minutes from the route start.
///
/// # Examples
/// ```
/// use routewise_core::TimeWindow;
///
/// let window = TimeWindow::new(30, 90).expect("ordered window");
/// assert!(window.contains(45));
/// assert!(TimeWindow::new(90, 30).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeWindow {
    /// Earliest permitted arrival. Arriving sooner means waiting.
    pub earliest: u64,
    /// Latest permitted arrival.
    pub latest: u64,
}

/// Errors returned by [`TimeWindow::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("time window opens at {earliest} but closes at {latest}")]
pub struct InvertedTimeWindow {
    /// Requested opening minute.
    pub earliest: u64,
    /// Requested closing minute.
    pub latest: u64,
}

impl TimeWindow {
    /// Construct a window, rejecting `earliest > latest`.
    pub const fn new(earliest: u64, latest: u64) -> Result<Self, InvertedTimeWindow> {
        if earliest > latest {
            return Err(InvertedTimeWindow { earliest, latest });
        }
        Ok(Self { earliest, latest })
    }

    /// Whether `minute` lies inside the window, bounds included.
    #[must_use]
    pub const fn contains(&self, minute: u64) -> bool {
        minute >= self.earliest && minute <= self.latest
    }

    /// Whether the window is ordered. Deserialised windows bypass [`Self::new`].
    #[must_use]
    pub const fn is_ordered(&self) -> bool {
        self.earliest <= self.latest
    }
}

/// A stop's coordinates could not be used.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("coordinates ({lat}, {lng}) are not a valid WGS84 position")]
pub struct CoordinateError {
    /// Latitude as supplied.
    pub lat: f64,
    /// Longitude as supplied.
    pub lng: f64,
}

/// A location the vehicle must visit, collecting `demand` on arrival.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. A stop
/// without an identifier is synthetic: the optimizer injects one as a virtual
/// depot and never reports it as a visit.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use routewise_core::Stop;
///
/// let stop = Stop::new(7, Coord { x: 73.8567, y: 18.5204 }, 120.0)
///     .with_name("Shivaji Nagar bin");
/// assert_eq!(stop.id, Some(7));
/// assert!(!stop.is_virtual());
/// assert_eq!(stop.latitude(), 18.5204);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    /// Caller identifier; `None` marks a synthetic stop.
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: Option<u64>,
    /// Geospatial position.
    pub location: Coord<f64>,
    /// Amount to collect at this stop.
    #[cfg_attr(feature = "serde", serde(default))]
    pub demand: f64,
    /// Display name used in segment listings.
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Free-form postal address.
    #[cfg_attr(feature = "serde", serde(default))]
    pub address: String,
    /// Optional arrival window.
    #[cfg_attr(feature = "serde", serde(default))]
    pub time_window: Option<TimeWindow>,
}

impl Stop {
    /// Construct a real stop named after its identifier.
    pub fn new(id: u64, location: Coord<f64>, demand: f64) -> Self {
        Self {
            id: Some(id),
            location,
            demand,
            name: format!("Location {id}"),
            address: String::new(),
            time_window: None,
        }
    }

    /// Construct the synthetic route origin used when no depot is designated.
    pub fn virtual_depot(location: Coord<f64>) -> Self {
        Self {
            id: None,
            location,
            demand: 0.0,
            name: crate::depot::VIRTUAL_DEPOT_NAME.to_owned(),
            address: crate::depot::VIRTUAL_DEPOT_ADDRESS.to_owned(),
            time_window: None,
        }
    }

    /// Replace the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the address.
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Attach an arrival window.
    #[must_use]
    pub const fn with_time_window(mut self, window: TimeWindow) -> Self {
        self.time_window = Some(window);
        self
    }

    /// Whether this stop was synthesised rather than supplied by the caller.
    #[must_use]
    pub const fn is_virtual(&self) -> bool {
        self.id.is_none()
    }

    /// Demand in whole units as seen by the capacity dimension.
    ///
    /// Fractions are truncated; negative or non-finite demand counts as 0.
    #[must_use]
    pub fn demand_units(&self) -> u64 {
        if self.demand.is_finite() && self.demand > 0.0 {
            crate::vehicle::truncate(self.demand)
        } else {
            0
        }
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn latitude(&self) -> f64 {
        self.location.y
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn longitude(&self) -> f64 {
        self.location.x
    }

    /// Validated coordinates.
    ///
    /// Fails when either component is not finite or lies outside the WGS84
    /// range.
    pub fn coordinates(&self) -> Result<Coord<f64>, CoordinateError> {
        let lat = self.latitude();
        let lng = self.longitude();
        let valid = lat.is_finite()
            && lng.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lng);
        if valid {
            Ok(self.location)
        } else {
            Err(CoordinateError { lat, lng })
        }
    }

    /// Label used for segments, falling back to the stop's position.
    #[must_use]
    pub fn label(&self, index: usize) -> String {
        if self.name.is_empty() {
            format!("Location {index}")
        } else {
            self.name.clone()
        }
    }
}

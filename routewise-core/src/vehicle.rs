//! Vehicle attributes consumed by the solver and the fuel analysis.

/// Capacity assumed when a vehicle does not declare one.
pub const DEFAULT_CAPACITY: u64 = 10_000;

/// A single collection vehicle.
///
/// Every attribute is optional so partially configured fleet records and
/// ad-hoc preview vehicles go through the same type. Missing values are
/// resolved by [`Vehicle::capacity_bound_or`] and the fuel analysis rather
/// than probed at each use site.
///
/// # Examples
/// ```
/// use routewise_core::{DEFAULT_CAPACITY, Vehicle};
///
/// let truck = Vehicle::new(1500.75).with_fuel_efficiency(4.5);
/// assert_eq!(truck.capacity_bound(), 1500);
/// assert_eq!(Vehicle::default().capacity_bound(), DEFAULT_CAPACITY);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    /// Load capacity in demand units.
    #[cfg_attr(feature = "serde", serde(default))]
    pub capacity: Option<f64>,
    /// Kilometres travelled per unit of fuel.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fuel_efficiency: Option<f64>,
    /// Fuel tank size in fuel units.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fuel_tank_capacity: Option<f64>,
}

impl Vehicle {
    /// Construct a vehicle with a known capacity and no fuel data.
    #[must_use]
    pub const fn new(capacity: f64) -> Self {
        Self {
            capacity: Some(capacity),
            fuel_efficiency: None,
            fuel_tank_capacity: None,
        }
    }

    /// Set the fuel efficiency in kilometres per fuel unit.
    #[must_use]
    pub const fn with_fuel_efficiency(mut self, km_per_unit: f64) -> Self {
        self.fuel_efficiency = Some(km_per_unit);
        self
    }

    /// Set the fuel tank capacity.
    #[must_use]
    pub const fn with_fuel_tank_capacity(mut self, units: f64) -> Self {
        self.fuel_tank_capacity = Some(units);
        self
    }

    /// Copy of this vehicle with a replaced capacity and the same fuel data.
    #[must_use]
    pub const fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Integer capacity handed to the solver, falling back to
    /// [`DEFAULT_CAPACITY`].
    #[must_use]
    pub fn capacity_bound(&self) -> u64 {
        self.capacity_bound_or(DEFAULT_CAPACITY)
    }

    /// Integer capacity handed to the solver.
    ///
    /// Fractional capacities are truncated. A missing, non-finite or negative
    /// capacity yields `fallback`.
    #[must_use]
    pub fn capacity_bound_or(&self, fallback: u64) -> u64 {
        match self.capacity {
            Some(capacity) if capacity.is_finite() && capacity >= 0.0 => truncate(capacity),
            _ => fallback,
        }
    }

    /// Whether the declared capacity can be used at all.
    ///
    /// An absent capacity is acceptable; a negative or non-finite one is not.
    #[must_use]
    pub fn has_valid_capacity(&self) -> bool {
        self.capacity
            .is_none_or(|capacity| capacity.is_finite() && capacity >= 0.0)
    }
}

/// Truncate a finite, non-negative quantity to whole units.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "callers pass finite non-negative values; `as` saturates beyond u64::MAX"
)]
pub(crate) fn truncate(value: f64) -> u64 {
    value.trunc() as u64
}

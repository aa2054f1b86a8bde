//! Fuel need and tank feasibility for a finished route.

use crate::Vehicle;

/// Fuel units per kilometre assumed when a vehicle has no usable efficiency.
pub const DEFAULT_FUEL_RATE: f64 = 0.1;

/// Share of the tank above which a route is flagged for caution.
pub const CAUTION_THRESHOLD: f64 = 0.8;

/// How a route's fuel need compares with the vehicle's tank.
///
/// Variants are ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case", tag = "status")
)]
pub enum FuelFeasibility {
    /// The tank comfortably covers the route, or its size is unknown.
    Sufficient,
    /// The route uses more than [`CAUTION_THRESHOLD`] of the tank.
    Caution,
    /// The route needs more fuel than the tank holds.
    Insufficient {
        /// Missing fuel, rounded to two decimals.
        shortage: f64,
    },
}

impl FuelFeasibility {
    /// Numeric severity: 0 sufficient, 1 caution, 2 insufficient.
    #[must_use]
    pub const fn severity(&self) -> u8 {
        match self {
            Self::Sufficient => 0,
            Self::Caution => 1,
            Self::Insufficient { .. } => 2,
        }
    }

    /// Whether the route can be driven on one tank.
    #[must_use]
    pub const fn is_feasible(&self) -> bool {
        !matches!(self, Self::Insufficient { .. })
    }
}

/// Fuel estimate attached to a route result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuelAssessment {
    /// Estimated fuel need, rounded to two decimals.
    pub consumption: f64,
    /// Tank size the estimate was checked against.
    pub tank_capacity: Option<f64>,
    /// Classification against the tank.
    pub feasibility: FuelFeasibility,
    /// Operator-facing message; `None` when fuel is sufficient.
    pub warning: Option<String>,
}

/// Estimate fuel for `distance_km` and classify it against the vehicle tank.
///
/// # Examples
/// ```
/// use routewise_core::{FuelFeasibility, Vehicle, assess_fuel};
///
/// let truck = Vehicle::new(500.0)
///     .with_fuel_efficiency(10.0)
///     .with_fuel_tank_capacity(5.0);
/// let assessment = assess_fuel(60.0, &truck);
/// assert_eq!(assessment.consumption, 6.0);
/// assert_eq!(assessment.feasibility, FuelFeasibility::Insufficient { shortage: 1.0 });
/// ```
#[must_use]
pub fn assess_fuel(distance_km: f64, vehicle: &Vehicle) -> FuelAssessment {
    let consumption = estimate_consumption(distance_km, vehicle.fuel_efficiency);
    let tank_capacity = vehicle.fuel_tank_capacity;
    let feasibility = classify(consumption, tank_capacity);
    let warning = warning_text(consumption, tank_capacity, feasibility);
    FuelAssessment {
        consumption,
        tank_capacity,
        feasibility,
        warning,
    }
}

/// Fuel needed to drive `distance_km`, rounded to two decimals.
#[expect(clippy::float_arithmetic, reason = "fuel estimates are fractional")]
#[must_use]
pub fn estimate_consumption(distance_km: f64, fuel_efficiency: Option<f64>) -> f64 {
    match fuel_efficiency {
        Some(km_per_unit) if km_per_unit.is_finite() && km_per_unit > 0.0 => {
            round_to(distance_km / km_per_unit, 2)
        }
        _ => round_to(distance_km * DEFAULT_FUEL_RATE, 2),
    }
}

/// Classify `consumption` against an optional tank size.
///
/// A missing, zero or non-finite tank is treated as unknown and never flags
/// the route.
#[expect(clippy::float_arithmetic, reason = "tank thresholds are fractional")]
#[must_use]
pub fn classify(consumption: f64, tank_capacity: Option<f64>) -> FuelFeasibility {
    let Some(tank) = tank_capacity.filter(|tank| tank.is_finite() && *tank > 0.0) else {
        return FuelFeasibility::Sufficient;
    };
    if consumption > tank {
        FuelFeasibility::Insufficient {
            shortage: round_to(consumption - tank, 2),
        }
    } else if consumption > tank * CAUTION_THRESHOLD {
        FuelFeasibility::Caution
    } else {
        FuelFeasibility::Sufficient
    }
}

#[expect(clippy::float_arithmetic, reason = "percentage of tank is fractional")]
fn warning_text(consumption: f64, tank_capacity: Option<f64>, feasibility: FuelFeasibility) -> Option<String> {
    let tank = tank_capacity?;
    match feasibility {
        FuelFeasibility::Sufficient => None,
        FuelFeasibility::Insufficient { shortage } => Some(format!(
            "Warning: Route requires {consumption}L fuel, but vehicle fuel tank capacity is only \
             {tank}L. Shortage: {shortage}L. Vehicle may need refueling during route."
        )),
        FuelFeasibility::Caution => {
            let percent = round_to(consumption / tank * 100.0, 1);
            Some(format!(
                "Caution: Route will use {consumption}L fuel ({percent}% of tank capacity). \
                 Consider refueling before starting."
            ))
        }
    }
}

/// Round `value` half away from zero to `decimals` places.
#[expect(
    clippy::float_arithmetic,
    clippy::cast_possible_wrap,
    reason = "decimal rounding of display quantities; `decimals` is tiny"
)]
pub(crate) fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10_f64.powi(decimals as i32);
    (value * scale).round() / scale
}

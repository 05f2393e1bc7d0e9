//! Simplified first-order thermal process.

use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Temperature rise per unit heater percent per second.
pub const HEATING_COEFF: f64 = 0.1;
/// Fraction of the temperature difference to ambient lost per second.
pub const LOSS_COEFF: f64 = 0.02;

/// A body heated by a percentage-driven heater and losing heat to its surroundings.
///
/// `next = current + (heating_coeff * heater - loss_coeff * (current - ambient)) * dt`
///
/// # Example
/// ```
/// use thermo_pid::ThermalPlant;
///
/// let plant = ThermalPlant::new(5.0);
/// assert_eq!(plant.step(5.0, 100.0, 1.0), 15.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ThermalPlant<T: Float> {
    pub heating_coeff: T,
    pub loss_coeff: T,
    pub ambient: T,
}

impl<T: Float> ThermalPlant<T> {
    /// Plant with the default coefficients at the given ambient temperature.
    pub fn new(ambient: T) -> Self {
        Self::with_coefficients(ambient, cast(HEATING_COEFF), cast(LOSS_COEFF))
    }

    pub fn with_coefficients(ambient: T, heating_coeff: T, loss_coeff: T) -> Self {
        Self {
            heating_coeff,
            loss_coeff,
            ambient,
        }
    }

    /// Temperature after `dt` seconds with the heater held at `heater_percent`.
    pub fn step(&self, current: T, heater_percent: T, dt: T) -> T {
        let heat_input = self.heating_coeff * heater_percent;
        let heat_loss = self.loss_coeff * (current - self.ambient);

        current + (heat_input - heat_loss) * dt
    }
}

/// Convert an `f64` constant into `T`, falling back to `NaN` if `T` cannot hold it.
pub(crate) fn cast<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

//! Scenario configuration for the closed-loop simulation.

use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::controller::{ControllerMode, Gains, Regulator};
use crate::plant::{cast, ThermalPlant, HEATING_COEFF, LOSS_COEFF};

/// Reference proportional gain
pub const DEFAULT_KP: f64 = 5.0;
/// Reference integral gain
pub const DEFAULT_KI: f64 = 0.5;
/// Reference derivative gain
pub const DEFAULT_KD: f64 = 1.0;
/// Reference ambient temperature (°C)
pub const DEFAULT_AMBIENT: f64 = 5.0;
/// Reference target temperature (°C)
pub const DEFAULT_TARGET: f64 = 30.0;
/// Reference time step (s)
pub const DEFAULT_DT: f64 = 1.0;
/// Reference number of simulation steps
pub const DEFAULT_STEPS: usize = 50;
/// Reference heater saturation (%)
pub const DEFAULT_MAX_HEATER_POWER: f64 = 100.0;

/// Everything the driver loop needs apart from the controller itself.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct ScenarioConfig<T: Float> {
    /// Gains handed to whichever controller variant is selected
    pub gains: Gains<T>,
    /// Temperature of the surroundings
    pub ambient_temp: T,
    /// Temperature at step 0
    pub initial_temp: T,
    /// Setpoint
    pub target_temp: T,
    /// Time step (seconds)
    pub dt: T,
    /// Number of controller updates to run
    pub steps: usize,
    /// Upper heater limit; the lower limit is always zero
    pub max_heater_power: T,
    /// Plant heating coefficient
    pub heating_coeff: T,
    /// Plant loss coefficient
    pub loss_coeff: T,
}

impl<T: Float> Default for ScenarioConfig<T> {
    fn default() -> Self {
        Self {
            gains: Gains::new(cast(DEFAULT_KP), cast(DEFAULT_KI), cast(DEFAULT_KD)),
            ambient_temp: cast(DEFAULT_AMBIENT),
            initial_temp: cast(DEFAULT_AMBIENT),
            target_temp: cast(DEFAULT_TARGET),
            dt: cast(DEFAULT_DT),
            steps: DEFAULT_STEPS,
            max_heater_power: cast(DEFAULT_MAX_HEATER_POWER),
            heating_coeff: cast(HEATING_COEFF),
            loss_coeff: cast(LOSS_COEFF),
        }
    }
}

impl<T: Float> ScenarioConfig<T> {
    pub fn plant(&self) -> ThermalPlant<T> {
        ThermalPlant::with_coefficients(self.ambient_temp, self.heating_coeff, self.loss_coeff)
    }

    /// Fresh controller of the given kind using this scenario's gains.
    pub fn regulator(&self, mode: ControllerMode) -> Regulator<T> {
        Regulator::from_mode(mode, self.gains)
    }
}

// ============================================================================
// Builder Pattern for Easier Configuration
// ============================================================================

pub struct ScenarioBuilder<T: Float> {
    config: ScenarioConfig<T>,
}

impl<T: Float> ScenarioBuilder<T> {
    pub fn new() -> Self {
        Self {
            config: ScenarioConfig::default(),
        }
    }

    pub fn gains(mut self, kp: T, ki: T, kd: T) -> Self {
        self.config.gains = Gains::new(kp, ki, kd);
        self
    }

    /// Sets the ambient temperature and starts the body at it.
    pub fn ambient(mut self, ambient: T) -> Self {
        self.config.ambient_temp = ambient;
        self.config.initial_temp = ambient;
        self
    }

    pub fn initial_temp(mut self, temp: T) -> Self {
        self.config.initial_temp = temp;
        self
    }

    pub fn target(mut self, target: T) -> Self {
        self.config.target_temp = target;
        self
    }

    pub fn time_step(mut self, dt: T, steps: usize) -> Self {
        self.config.dt = dt;
        self.config.steps = steps;
        self
    }

    pub fn max_heater_power(mut self, max: T) -> Self {
        self.config.max_heater_power = max;
        self
    }

    pub fn plant_coefficients(mut self, heating: T, loss: T) -> Self {
        self.config.heating_coeff = heating;
        self.config.loss_coeff = loss;
        self
    }

    pub fn build(self) -> ScenarioConfig<T> {
        self.config
    }
}

impl<T: Float> Default for ScenarioBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

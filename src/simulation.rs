//! Closed-loop driver: controller output, heater saturation, plant step.

use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::ScenarioConfig;
use crate::controller::Controller;
use crate::plant::ThermalPlant;

/// One step of the loop, as seen after the plant has advanced.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct StepRecord<T: Float> {
    /// Zero-based step index
    pub step: usize,
    /// `step * dt`
    pub time: T,
    /// Error fed to the controller
    pub error: T,
    /// Raw controller output
    pub output: T,
    /// Output after saturation to `[0, max_heater_power]`
    pub heater: T,
    /// Temperature after the plant step
    pub temperature: T,
}

/// Saturate a controller output to `[0, max]`.
///
/// Uses plain `<` comparisons rather than `Float::min`/`Float::max`, so a `NaN` output maps to
/// `0` and a `NaN` limit is ignored on the upper side.
pub fn clamp_heater<T: Float>(output: T, max: T) -> T {
    let capped = if max < output { max } else { output };
    if T::zero() < capped {
        capped
    } else {
        T::zero()
    }
}

/// Runs a controller against a [`ThermalPlant`] for a fixed number of steps.
///
/// Each call to `next` performs one loop iteration; the iterator ends after
/// `config.steps` records.
///
/// # Example
/// ```
/// use thermo_pid::{PController, ScenarioConfig, Simulation};
///
/// let config = ScenarioConfig::default();
/// let mut sim = Simulation::new(config, PController::new(5.0));
/// let first = sim.next().unwrap();
/// assert_eq!(first.heater, 100.0);
/// assert_eq!(first.temperature, 15.0);
/// ```
pub struct Simulation<T: Float, C: Controller<T>> {
    config: ScenarioConfig<T>,
    plant: ThermalPlant<T>,
    controller: C,
    temperature: T,
    step: usize,
}

impl<T: Float, C: Controller<T>> Simulation<T, C> {
    pub fn new(config: ScenarioConfig<T>, controller: C) -> Self {
        log::info!(
            "starting simulation: {} steps, start {:?}, target {:?}, dt {:?}",
            config.steps,
            config.initial_temp.to_f64(),
            config.target_temp.to_f64(),
            config.dt.to_f64(),
        );
        Self {
            plant: config.plant(),
            temperature: config.initial_temp,
            config,
            controller,
            step: 0,
        }
    }

    pub fn temperature(&self) -> T {
        self.temperature
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn config(&self) -> &ScenarioConfig<T> {
        &self.config
    }

    /// Steps still to run.
    pub fn remaining(&self) -> usize {
        self.config.steps - self.step.min(self.config.steps)
    }

    /// Give the controller back, e.g. to inspect its accumulators.
    pub fn into_controller(self) -> C {
        self.controller
    }

    /// Drain the remaining steps and return the final temperature.
    pub fn run_to_end(&mut self) -> T {
        for _ in self.by_ref() {}
        self.temperature
    }

    fn advance(&mut self) -> StepRecord<T> {
        let dt = self.config.dt;
        let error = self.config.target_temp - self.temperature;
        let output = self.controller.update(error, dt);
        if !output.is_finite() {
            log::warn!("step {}: controller output is not finite", self.step);
        }

        let heater = clamp_heater(output, self.config.max_heater_power);
        self.temperature = self.plant.step(self.temperature, heater, dt);

        let time = T::from(self.step).unwrap_or_else(T::nan) * dt;
        let record = StepRecord {
            step: self.step,
            time,
            error,
            output,
            heater,
            temperature: self.temperature,
        };
        self.step += 1;

        log::debug!(
            "step {}: error={:?} output={:?} heater={:?} temperature={:?}",
            record.step,
            error.to_f64(),
            output.to_f64(),
            heater.to_f64(),
            record.temperature.to_f64(),
        );
        record
    }
}

impl<T: Float, C: Controller<T>> Iterator for Simulation<T, C> {
    type Item = StepRecord<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step >= self.config.steps {
            return None;
        }

        let record = self.advance();
        if self.step == self.config.steps {
            log::info!(
                "simulation finished after {} steps at {:?}",
                self.step,
                self.temperature.to_f64()
            );
        }
        Some(record)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<T: Float, C: Controller<T>> ExactSizeIterator for Simulation<T, C> {}

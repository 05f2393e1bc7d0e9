//! Feedback controllers: proportional, proportional-integral and full PID.
//!
//! Every controller consumes one `(error, dt)` sample per call and returns the raw control
//! signal. Nothing here clamps, guards or resets: degenerate inputs such as `dt == 0` surface
//! as ordinary floating-point results (`inf`, `-inf` or `NaN`).

use core::fmt;
use core::str::FromStr;

use num_traits::Float;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "std")]
use thiserror::Error;

/// A stateful unit mapping a stream of `(error, dt)` samples to control outputs.
///
/// Calls must be issued in the temporal order of the loop being modeled; swapping two calls
/// changes every later output of a stateful controller.
pub trait Controller<T: Float> {
    /// Advance the controller by one step and return the control output.
    fn update(&mut self, error: T, dt: T) -> T;
}

impl<T: Float, C: Controller<T> + ?Sized> Controller<T> for &mut C {
    fn update(&mut self, error: T, dt: T) -> T {
        (**self).update(error, dt)
    }
}

#[cfg(feature = "std")]
impl<T: Float, C: Controller<T> + ?Sized> Controller<T> for Box<C> {
    fn update(&mut self, error: T, dt: T) -> T {
        (**self).update(error, dt)
    }
}

// ============================================================================
// Gains and mode selection
// ============================================================================

/// Fixed controller gains. Variants that do not use a term ignore its gain.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Gains<T: Float> {
    /// Proportional gain
    pub kp: T,
    /// Integral gain
    pub ki: T,
    /// Derivative gain
    pub kd: T,
}

impl<T: Float> Gains<T> {
    pub fn new(kp: T, ki: T, kd: T) -> Self {
        Self { kp, ki, kd }
    }
}

/// Which control law a [`Regulator`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum ControllerMode {
    /// Proportional only
    P,
    /// Proportional + integral
    Pi,
    /// Proportional + integral + derivative
    Pid,
}

impl ControllerMode {
    /// All modes, in increasing order of terms.
    pub const ALL: [ControllerMode; 3] =
        [ControllerMode::P, ControllerMode::Pi, ControllerMode::Pid];

    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerMode::P => "P",
            ControllerMode::Pi => "PI",
            ControllerMode::Pid => "PID",
        }
    }
}

impl fmt::Display for ControllerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known [`ControllerMode`].
#[cfg_attr(feature = "std", derive(Error))]
#[cfg_attr(feature = "std", error("invalid controller mode, expected one of P / PI / PID"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeParseError;

impl FromStr for ControllerMode {
    type Err = ModeParseError;

    /// Accepts the all-uppercase or all-lowercase spelling only (`"PI"`, `"pi"`, not `"Pi"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "P" | "p" => Ok(ControllerMode::P),
            "PI" | "pi" => Ok(ControllerMode::Pi),
            "PID" | "pid" => Ok(ControllerMode::Pid),
            _ => Err(ModeParseError),
        }
    }
}

// ============================================================================
// P controller
// ============================================================================

/// Proportional controller: `u = kp * e`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct PController<T: Float> {
    kp: T,
}

impl<T: Float> PController<T> {
    pub fn new(kp: T) -> Self {
        Self { kp }
    }

    pub fn kp(&self) -> T {
        self.kp
    }
}

impl<T: Float> Controller<T> for PController<T> {
    /// `dt` is ignored: a proportional term has no time dependence.
    fn update(&mut self, error: T, _dt: T) -> T {
        self.kp * error
    }
}

// ============================================================================
// PI controller
// ============================================================================

/// Proportional-integral controller: `u = kp * e + ki * ∫e dt`.
///
/// The integral uses the rectangular rule with the error at the start of the interval and is
/// never clamped, so a persistent error winds it up without bound.
///
/// # Example
/// ```
/// use thermo_pid::{Controller, PiController};
///
/// let mut pi = PiController::new(2.0, 0.5);
/// assert_eq!(pi.update(1.0, 1.0), 2.5);
/// assert_eq!(pi.update(1.0, 1.0), 3.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct PiController<T: Float> {
    kp: T,
    ki: T,
    integral: T,
}

impl<T: Float> PiController<T> {
    pub fn new(kp: T, ki: T) -> Self {
        Self {
            kp,
            ki,
            integral: T::zero(),
        }
    }

    pub fn kp(&self) -> T {
        self.kp
    }

    pub fn ki(&self) -> T {
        self.ki
    }

    /// Accumulated `∑ e * dt`, not yet multiplied by `ki`.
    pub fn integral(&self) -> T {
        self.integral
    }
}

impl<T: Float> Controller<T> for PiController<T> {
    fn update(&mut self, error: T, dt: T) -> T {
        self.integral = self.integral + error * dt;
        self.kp * error + self.ki * self.integral
    }
}

// ============================================================================
// PID controller
// ============================================================================

/// Full PID controller: `u = kp * e + ki * ∫e dt + kd * de/dt`.
///
/// The derivative is taken on the error with a backward difference against the previous
/// call's error (`0` before the first call). `dt == 0` divides by zero and is passed through.
///
/// # Example
/// ```
/// use thermo_pid::{Controller, PidController};
///
/// let mut pid = PidController::new(0.0_f64, 0.0, 1.0);
/// assert_eq!(pid.update(4.0, 2.0), 2.0);   // (4 - 0) / 2
/// assert_eq!(pid.update(1.0, 2.0), -1.5);  // (1 - 4) / 2
/// assert!(pid.update(1.0, 0.0).is_nan());  // (1 - 1) / 0
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct PidController<T: Float> {
    kp: T,
    ki: T,
    kd: T,
    integral: T,
    previous_error: T,
}

impl<T: Float> PidController<T> {
    pub fn new(kp: T, ki: T, kd: T) -> Self {
        Self {
            kp,
            ki,
            kd,
            integral: T::zero(),
            previous_error: T::zero(),
        }
    }

    pub fn kp(&self) -> T {
        self.kp
    }

    pub fn ki(&self) -> T {
        self.ki
    }

    pub fn kd(&self) -> T {
        self.kd
    }

    pub fn gains(&self) -> Gains<T> {
        Gains::new(self.kp, self.ki, self.kd)
    }

    /// Accumulated `∑ e * dt`, not yet multiplied by `ki`.
    pub fn integral(&self) -> T {
        self.integral
    }

    /// Error passed to the most recent `update`, or `0` if none.
    pub fn previous_error(&self) -> T {
        self.previous_error
    }
}

impl<T: Float> Controller<T> for PidController<T> {
    fn update(&mut self, error: T, dt: T) -> T {
        self.integral = self.integral + error * dt;
        let derivative = (error - self.previous_error) / dt;
        self.previous_error = error;

        self.kp * error + self.ki * self.integral + self.kd * derivative
    }
}

// ============================================================================
// Regulator: closed dispatch over the three laws
// ============================================================================

/// One of the three controller variants, chosen at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub enum Regulator<T: Float> {
    P(PController<T>),
    Pi(PiController<T>),
    Pid(PidController<T>),
}

impl<T: Float> Regulator<T> {
    /// Build the variant for `mode`, taking only the gains that variant uses.
    pub fn from_mode(mode: ControllerMode, gains: Gains<T>) -> Self {
        match mode {
            ControllerMode::P => Regulator::P(PController::new(gains.kp)),
            ControllerMode::Pi => Regulator::Pi(PiController::new(gains.kp, gains.ki)),
            ControllerMode::Pid => Regulator::Pid(PidController::new(gains.kp, gains.ki, gains.kd)),
        }
    }

    pub fn mode(&self) -> ControllerMode {
        match self {
            Regulator::P(_) => ControllerMode::P,
            Regulator::Pi(_) => ControllerMode::Pi,
            Regulator::Pid(_) => ControllerMode::Pid,
        }
    }

    /// Integral accumulator of the variant, `None` for a P controller.
    pub fn integral(&self) -> Option<T> {
        match self {
            Regulator::P(_) => None,
            Regulator::Pi(c) => Some(c.integral()),
            Regulator::Pid(c) => Some(c.integral()),
        }
    }
}

impl<T: Float> Controller<T> for Regulator<T> {
    fn update(&mut self, error: T, dt: T) -> T {
        match self {
            Regulator::P(c) => c.update(error, dt),
            Regulator::Pi(c) => c.update(error, dt),
            Regulator::Pid(c) => c.update(error, dt),
        }
    }
}

impl<T: Float> From<PController<T>> for Regulator<T> {
    fn from(c: PController<T>) -> Self {
        Regulator::P(c)
    }
}

impl<T: Float> From<PiController<T>> for Regulator<T> {
    fn from(c: PiController<T>) -> Self {
        Regulator::Pi(c)
    }
}

impl<T: Float> From<PidController<T>> for Regulator<T> {
    fn from(c: PidController<T>) -> Self {
        Regulator::Pid(c)
    }
}

//! # Closed-Loop Temperature Regulation
//!
//! Pluggable feedback controllers driving a simulated first-order thermal process.
//!
//! ## Key Features
//! - **Three control laws** behind one [`Controller`] trait: P, PI and PID
//! - **Runtime selection** through [`ControllerMode`] and the [`Regulator`] enum
//! - **Thermal plant model** for reproducible closed-loop scenarios
//! - **Iterator-based simulation** yielding one [`StepRecord`] per step
//! - **CSV trajectory log** (`std` feature)
//!
//! The controllers carry no anti-windup or derivative filtering and do not guard against
//! `dt == 0`. Whatever IEEE-754 arithmetic produces is what the caller gets.
//!
//! ```
//! use thermo_pid::{ControllerMode, ScenarioConfig, Simulation};
//!
//! let config = ScenarioConfig::<f64>::default();
//! let regulator = config.regulator(ControllerMode::Pid);
//! let trajectory: Vec<_> = Simulation::new(config, regulator).collect();
//! assert_eq!(trajectory.len(), 50);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

pub mod config;
pub mod controller;
pub mod plant;
pub mod simulation;

#[cfg(feature = "std")]
pub mod csv_log;
#[cfg(feature = "std")]
pub mod error;

pub use config::{ScenarioBuilder, ScenarioConfig};
pub use controller::{
    Controller, ControllerMode, Gains, ModeParseError, PController, PiController, PidController,
    Regulator,
};
pub use plant::ThermalPlant;
pub use simulation::{clamp_heater, Simulation, StepRecord};

#[cfg(feature = "std")]
pub use csv_log::CsvLog;
#[cfg(feature = "std")]
pub use error::{Error, Result};

/// Parse a user-supplied mode, ignoring surrounding whitespace.
#[cfg(feature = "std")]
pub fn parse_mode(input: &str) -> Result<ControllerMode> {
    input
        .trim()
        .parse()
        .map_err(|_: ModeParseError| Error::InvalidMode(input.trim().to_owned()))
}

/// Read the first whitespace-delimited token from `reader` and parse it as a mode.
///
/// Blank lines are skipped and anything after the token is left unread. End of input before
/// any token is an [`Error::InvalidMode`] with an empty string.
#[cfg(feature = "std")]
pub fn read_mode<R: std::io::BufRead>(mut reader: R) -> Result<ControllerMode> {
    let mut line = String::new();
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Err(Error::InvalidMode(String::new()));
        }
        if let Some(token) = line.split_whitespace().next() {
            return parse_mode(token);
        }
    }
}

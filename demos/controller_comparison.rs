//! Runs the reference scenario under all three control laws side by side
//! Run with: cargo run --example controller_comparison

use thermo_pid::{ControllerMode, ScenarioConfig, Simulation, StepRecord};

fn main() {
    println!("=== P vs PI vs PID: heating from 5°C to 30°C ===\n");

    let config = ScenarioConfig::<f64>::default();
    let runs: Vec<(ControllerMode, Vec<StepRecord<f64>>)> = ControllerMode::ALL
        .iter()
        .map(|&mode| (mode, Simulation::new(config, config.regulator(mode)).collect()))
        .collect();

    println!("Time(s) |   P(°C) |  PI(°C) | PID(°C)");
    println!("--------|---------|---------|--------");
    for i in (0..config.steps).step_by(5) {
        println!(
            "{:7.0} | {:7.2} | {:7.2} | {:7.2}",
            runs[0].1[i].time,
            runs[0].1[i].temperature,
            runs[1].1[i].temperature,
            runs[2].1[i].temperature
        );
    }

    println!();
    for (mode, records) in &runs {
        let peak = records
            .iter()
            .map(|r| r.temperature)
            .fold(f64::NEG_INFINITY, f64::max);
        let last = records.last().map(|r| r.temperature).unwrap_or(config.initial_temp);
        let saturated = records
            .iter()
            .filter(|r| r.heater >= config.max_heater_power)
            .count();

        println!(
            "{:>3}: final {:6.2}°C | offset {:+6.2} | peak {:6.2}°C | saturated {:2} steps",
            mode.as_str(),
            last,
            last - config.target_temp,
            peak,
            saturated
        );
    }
}

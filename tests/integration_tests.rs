use num_traits::Float;
use thermo_pid::{
    clamp_heater, Controller, ControllerMode, CsvLog, Gains, PController, PiController,
    PidController, Regulator, ScenarioBuilder, ScenarioConfig, Simulation, ThermalPlant,
};

fn approx_eq<T: Float>(a: T, b: T) -> bool {
    (a - b).abs() <= T::from(1e-9).unwrap() * (T::one() + b.abs())
}

#[test]
fn test_p_output_independent_of_dt() {
    for &kp in &[0.0, 1.0, -2.5, 1e6] {
        for &error in &[0.0, 3.0, -7.25] {
            let mut p = PController::new(kp);
            let a = p.update(error, 0.01);
            let b = p.update(error, 100.0);
            let c = p.update(error, 0.01);
            assert_eq!(a, kp * error);
            assert_eq!(a, b);
            assert_eq!(a, c);
        }
    }
}

#[test]
fn test_pi_second_output_uses_both_samples() {
    let (kp, ki) = (1.5, 0.25);
    let (e1, d1, e2, d2) = (4.0, 0.5, -2.0, 0.2);

    let mut pi = PiController::new(kp, ki);
    pi.update(e1, d1);
    let out = pi.update(e2, d2);

    assert!(approx_eq(out, kp * e2 + ki * (e1 * d1 + e2 * d2)));
}

#[test]
fn test_pid_derivative_first_and_second_call() {
    let (e1, e2, dt) = (3.0, 7.0, 0.5);

    // Isolate the derivative term
    let mut pid = PidController::new(0.0, 0.0, 1.0);
    assert_eq!(pid.update(e1, dt), e1 / dt);
    assert_eq!(pid.update(e2, dt), (e2 - e1) / dt);
}

#[test]
fn test_pid_full_law() {
    let (kp, ki, kd) = (2.0, 0.5, 0.25);
    let mut pid = PidController::new(kp, ki, kd);

    let out1 = pid.update(10.0, 1.0);
    assert!(approx_eq(out1, kp * 10.0 + ki * 10.0 + kd * 10.0));

    let out2 = pid.update(4.0, 2.0);
    let integral = 10.0 * 1.0 + 4.0 * 2.0;
    let derivative = (4.0 - 10.0) / 2.0;
    assert!(approx_eq(out2, kp * 4.0 + ki * integral + kd * derivative));
    assert_eq!(pid.integral(), integral);
}

#[test]
fn test_pid_zero_dt_is_not_guarded() {
    let mut pid = PidController::new(1.0, 1.0, 1.0);
    let out = pid.update(2.0, 0.0);
    assert!(out.is_infinite() && out > 0.0);

    // Same error again: 0 / 0
    assert!(pid.update(2.0, 0.0).is_nan());

    let mut pid = PidController::new(1.0, 1.0, 1.0);
    let out = pid.update(-2.0, 0.0);
    assert!(out.is_infinite() && out < 0.0);
}

#[test]
fn test_order_dependence() {
    let (a, b, dt) = (5.0, 1.0, 1.0);

    let mut forward = PiController::new(1.0, 0.5);
    forward.update(a, dt);
    let forward_out = forward.update(b, dt);

    let mut reverse = PiController::new(1.0, 0.5);
    reverse.update(b, dt);
    let reverse_out = reverse.update(a, dt);

    assert_ne!(forward_out, reverse_out);

    let mut forward = PidController::new(1.0, 0.5, 0.1);
    forward.update(a, dt);
    let forward_out = forward.update(b, dt);

    let mut reverse = PidController::new(1.0, 0.5, 0.1);
    reverse.update(b, dt);
    let reverse_out = reverse.update(a, dt);

    assert_ne!(forward_out, reverse_out);
}

#[test]
fn test_integral_winds_up_without_bound() {
    let mut pi = PiController::new(0.0, 1.0);
    let mut last = 0.0;
    for _ in 0..10_000 {
        last = pi.update(100.0, 1.0);
    }
    assert_eq!(last, 1_000_000.0);
}

#[test]
fn test_reference_first_step_with_p() {
    let config = ScenarioConfig::<f64>::default();
    let mut controller = PController::new(config.gains.kp);
    let plant = config.plant();

    let error = config.target_temp - config.initial_temp;
    assert_eq!(error, 25.0);

    let output = controller.update(error, config.dt);
    assert_eq!(output, 125.0);

    let heater = clamp_heater(output, config.max_heater_power);
    assert_eq!(heater, 100.0);

    let next = plant.step(config.initial_temp, heater, config.dt);
    assert_eq!(next, 15.0);
}

#[test]
fn test_reference_first_step_through_simulation() {
    for mode in ControllerMode::ALL {
        let config = ScenarioConfig::<f64>::default();
        let mut sim = Simulation::new(config, config.regulator(mode));
        let first = sim.next().unwrap();

        assert_eq!(first.step, 0);
        assert_eq!(first.time, 0.0);
        assert_eq!(first.error, 25.0);
        // P: 125, PI: 125 + 12.5, PID: 137.5 + 25 -- all saturate
        assert_eq!(first.heater, 100.0, "{mode}");
        assert_eq!(first.temperature, 15.0, "{mode}");
    }
}

#[test]
fn test_regulator_matches_concrete_variants() {
    let gains = Gains::new(5.0, 0.5, 1.0);
    let errors = [25.0, 15.0, 4.0, -1.0, 0.5, 0.0];

    let mut p = PController::new(5.0);
    let mut pi = PiController::new(5.0, 0.5);
    let mut pid = PidController::new(5.0, 0.5, 1.0);
    let mut rp = Regulator::from_mode(ControllerMode::P, gains);
    let mut rpi = Regulator::from_mode(ControllerMode::Pi, gains);
    let mut rpid = Regulator::from_mode(ControllerMode::Pid, gains);

    for &e in &errors {
        assert_eq!(rp.update(e, 1.0), p.update(e, 1.0));
        assert_eq!(rpi.update(e, 1.0), pi.update(e, 1.0));
        assert_eq!(rpid.update(e, 1.0), pid.update(e, 1.0));
    }
    assert_eq!(rpid, Regulator::Pid(pid));
}

#[test]
fn test_boxed_controllers_are_interchangeable() {
    let mut controllers: Vec<Box<dyn Controller<f64>>> = vec![
        Box::new(PController::new(2.0)),
        Box::new(PiController::new(2.0, 1.0)),
        Box::new(PidController::new(2.0, 1.0, 1.0)),
    ];
    let outputs: Vec<f64> = controllers.iter_mut().map(|c| c.update(1.0, 1.0)).collect();
    assert_eq!(outputs, vec![2.0, 3.0, 4.0]);
}

#[test]
fn test_pi_removes_steady_state_offset() {
    // Gentle gains keep the loop out of saturation so the integral can do its job.
    let config = ScenarioBuilder::new()
        .gains(2.0, 0.05, 0.0)
        .time_step(1.0, 2000)
        .build();

    let final_p = Simulation::new(config, PController::new(2.0)).run_to_end();
    let final_pi = Simulation::new(config, PiController::new(2.0, 0.05)).run_to_end();

    // P settles where 0.1 * 2 * (30 - T) == 0.02 * (T - 5)  =>  T ~= 27.73
    assert!((final_p - 27.727).abs() < 0.01, "P settled at {final_p}");
    assert!((final_pi - 30.0).abs() < 0.01, "PI settled at {final_pi}");
}

#[test]
fn test_f32_simulation() {
    let config = ScenarioConfig::<f32>::default();
    let mut sim = Simulation::new(config, config.regulator(ControllerMode::P));
    assert_eq!(sim.next().unwrap().temperature, 15.0_f32);
}

#[test]
fn test_full_run_to_csv() {
    let config = ScenarioConfig::<f64>::default();
    let mut log = CsvLog::new(Vec::new()).unwrap();
    for record in Simulation::new(config, config.regulator(ControllerMode::Pid)) {
        log.record(&record).unwrap();
    }
    assert_eq!(log.rows(), 50);

    let text = String::from_utf8(log.finish().unwrap()).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 51);
    assert_eq!(lines[0], "Time, Temperature");
    assert_eq!(lines[1], "0, 15");
    assert!(lines[50].starts_with("49, "));
    for line in &lines[1..] {
        let cols: Vec<&str> = line.split(", ").collect();
        assert_eq!(cols.len(), 2);
        assert!(cols[1].parse::<f64>().unwrap().is_finite());
    }
}

#[test]
fn test_plant_holds_at_ambient_without_heat() {
    let plant = ThermalPlant::new(5.0);
    let mut t = 5.0;
    for _ in 0..10 {
        t = plant.step(t, 0.0, 1.0);
    }
    assert_eq!(t, 5.0);
}

//! Closed-loop heater simulation with a selectable controller.
//! Run with: cargo run --example temperature_loop -- [P|PI|PID] [--steps N] [--log log.csv]
//!
//! Without a mode argument the program asks for one on stdin.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{max_level, set_logger, set_max_level, LevelFilter, Log, Metadata, SetLoggerError};
use thermo_pid::{parse_mode, read_mode, ControllerMode, CsvLog, ScenarioBuilder, Simulation};

const ESCAPES: [Option<&str>; 6] = [
    None,             // Default foreground
    Some("\x1B[31m"), // Error (red)
    Some("\x1B[33m"), // Warn (yellow)
    Some("\x1B[34m"), // Info (blue)
    Some("\x1B[36m"), // Debug (cyan)
    Some("\x1B[37m"), // Trace (white)
];

struct StderrLogger;

impl StderrLogger {
    fn init(&'static self, level: LevelFilter) -> Result<(), SetLoggerError> {
        set_logger(self)?;
        set_max_level(level);
        Ok(())
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= max_level()
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            let color = ESCAPES[record.level() as usize].unwrap_or("");
            eprintln!(
                "{color}[{}] {}\x1B[0m: {}",
                record.level(),
                record.module_path().unwrap_or("?"),
                record.args()
            );
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Controller mode: P, PI or PID (prompted for when omitted)
    mode: Option<String>,

    /// Number of simulation steps
    #[arg(long, default_value_t = 50)]
    steps: usize,

    /// Trajectory log destination
    #[arg(long, default_value = "log.csv")]
    log: PathBuf,

    /// Print per-step debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn prompt_mode() -> thermo_pid::Result<ControllerMode> {
    print!("Enter controller mode [P / PI / PID]: ");
    io::stdout().flush()?;
    read_mode(io::stdin().lock())
}

fn run(cli: Cli) -> thermo_pid::Result<()> {
    let mode = match cli.mode {
        Some(mode) => parse_mode(&mode)?,
        None => prompt_mode()?,
    };

    let config = ScenarioBuilder::new().time_step(1.0, cli.steps).build();
    let mut csv = CsvLog::create(&cli.log)?;

    for record in Simulation::new(config, config.regulator(mode)) {
        println!(
            "Time: {}s, Temperature: {}C, Heater: {}%",
            record.time, record.temperature, record.heater
        );
        csv.record(&record)?;
    }

    csv.finish()?;
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Err(err) = LOGGER.init(level) {
        eprintln!("logger unavailable: {err}");
    }

    println!("Starting the controller application.");
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

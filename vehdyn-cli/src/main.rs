use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;
use vehdyn_core::export::export_tables;
use vehdyn_core::prelude::*;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Opts {
    /// Vehicle specification file (yaml, json or bin).  Defaults to the
    /// built-in C-segment reference vehicle.
    #[arg(long)]
    vehicle: Option<PathBuf>,
    /// Sampling config file.  Defaults to the reference sampling.
    #[arg(short, long)]
    config: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Write results to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// -v for info, -vv for debug messages
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rolling, aerodynamic and grade resistance
    Resistances,
    /// Engine characteristic and per-gear traction curves
    Traction,
    /// Acceleration envelope, launch and key metrics
    Performance,
    /// Brake force distribution and stopping performance
    Braking,
    /// Every model
    All,
    /// Write launch, braking and traction CSV tables into `dir`
    Export { dir: PathBuf },
    /// Print the reference vehicle specification as a starting point
    Reference,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

impl Format {
    fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
        }
    }
}

fn emit<T: SerdeAPI>(value: &T, opts: &Opts) -> anyhow::Result<()> {
    match &opts.output {
        Some(path) => {
            value.to_file(path)?;
            log::info!("Wrote {path:?}");
        }
        None => println!("{}", value.to_str(opts.format.name())?),
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let level = match opts.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let spec = match &opts.vehicle {
        Some(path) => {
            log::info!("Loading vehicle from {path:?}");
            VehicleSpecification::from_file(path, false)?
        }
        None => VehicleSpecification::valid(),
    };
    let config = match &opts.config {
        Some(path) => CalcConfig::from_file(path, false)?,
        None => CalcConfig::default(),
    };

    match &opts.command {
        Command::Resistances => emit(&compute_resistances_with(&spec, &config)?, &opts),
        Command::Traction => emit(&compute_traction_with(&spec, &config)?, &opts),
        Command::Performance => emit(&compute_performance_with(&spec, &config)?, &opts),
        Command::Braking => emit(&compute_braking_with(&spec, &config)?, &opts),
        Command::All => emit(&compute_all_with(&spec, &config)?, &opts),
        Command::Export { dir } => {
            std::fs::create_dir_all(dir)?;
            let report = compute_all_with(&spec, &config)?;
            for path in export_tables(&report, dir)? {
                log::info!("Wrote {path:?}");
            }
            Ok(())
        }
        Command::Reference => emit(&VehicleSpecification::valid(), &opts),
    }
}

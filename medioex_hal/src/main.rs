//! # MedIOEx I/O Service Binary
//!
//! Serves range-checked pin operations on the MedIOEx board. Routes are
//! read from stdin one per line and results are written to stdout as JSON
//! lines; logs go to stderr.
//!
//! # Usage
//!
//! ```bash
//! # Run against the simulated board
//! medioex_hal --simulate
//!
//! # Explicit config and driver
//! medioex_hal --config config/medioex.toml --driver simulation
//!
//! # Verbose JSON logs
//! echo "/api/ao/1/write?val=50&start=0&end=100" | medioex_hal -s -v --json
//! ```

use clap::Parser;
use medioex_common::config::{ConfigError, load_service_config};
use medioex_common::consts::{DEFAULT_CONFIG_PATH, SERVICE_NAME};
use medioex_common::hal::config::ServiceConfig;
use medioex_hal::console::Console;
use medioex_hal::core::IoCore;
use medioex_hal::driver_registry::DriverRegistry;
use medioex_hal::drivers::register_all_drivers;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// MedIOEx I/O service - range-checked board I/O with an output shadow cache
#[derive(Parser, Debug)]
#[command(name = "medioex_hal")]
#[command(version)]
#[command(about = "MedIOEx I/O service with pluggable board drivers")]
#[command(long_about = None)]
struct Args {
    /// Path to the service configuration file. Without this flag the default
    /// path is tried and built-in defaults are used if it does not exist.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Force the simulation driver
    #[arg(short = 's', long)]
    simulate: bool,

    /// Driver to load (overrides `[board] driver`)
    #[arg(short, long)]
    driver: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long)]
    json: bool,
}

fn main() {
    if let Err(e) = run() {
        error!("{} failed: {}", SERVICE_NAME, e);
        eprintln!("{SERVICE_NAME}: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let (config, defaulted) = load_config(&args)?;

    setup_tracing(&args, &config);
    if defaulted {
        warn!("No config at {}, using built-in defaults", DEFAULT_CONFIG_PATH);
    }

    info!(
        "{} ({}) v{} starting...",
        config.shared.service_name,
        SERVICE_NAME,
        env!("CARGO_PKG_VERSION")
    );

    let driver_name = if args.simulate {
        info!("Simulation mode enabled");
        "simulation".to_string()
    } else if let Some(ref driver) = args.driver {
        info!("Driver from CLI: {}", driver);
        driver.clone()
    } else {
        config.board.driver.clone()
    };

    let mut registry = DriverRegistry::new();
    register_all_drivers(&mut registry);
    info!("Available drivers: {:?}", registry.list_drivers());

    let core = IoCore::from_config(&config, &registry, &driver_name)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let served = Console::new(&core).run(stdin.lock(), stdout.lock());

    // Shut the driver down even if the console failed.
    core.shutdown()?;
    let served = served?;

    info!(
        "{} shutdown complete ({} requests, uptime {:.1}s)",
        SERVICE_NAME,
        served,
        core.uptime().as_secs_f64()
    );
    Ok(())
}

/// Load the configuration file named on the command line, or the default
/// path if present. The flag is true when built-in defaults were used.
fn load_config(args: &Args) -> Result<(ServiceConfig, bool), ConfigError> {
    match args.config {
        Some(ref path) => load_service_config(path).map(|config| (config, false)),
        None => match load_service_config(Path::new(DEFAULT_CONFIG_PATH)) {
            Ok(config) => Ok((config, false)),
            Err(ConfigError::FileNotFound) => Ok((ServiceConfig::default(), true)),
            Err(e) => Err(e),
        },
    }
}

/// Setup tracing subscriber based on CLI arguments and `[shared] log_level`.
///
/// Logs go to stderr; stdout carries results.
fn setup_tracing(args: &Args, config: &ServiceConfig) {
    let directive = if args.verbose {
        "debug"
    } else {
        config.shared.log_level.as_directive()
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    if args.json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

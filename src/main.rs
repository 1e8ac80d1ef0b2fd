use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use std::path::PathBuf;
use std::time::Duration;
use w1temp::config::{load_calibration, AppConfig};
use w1temp::output;
use w1temp::Ds18x20;

/// w1temp - Read DS18x20 1-wire temperature sensors exposed through sysfs
#[derive(Parser, Debug, Clone)]
#[command(name = "w1temp")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Debug verbosity level (0=warn, 1=info, 2=debug, 3=trace)
    #[arg(short = 'd', long = "debug", value_name = "LEVEL", default_value = "0")]
    debug: u8,

    /// Config file to use instead of the per-user config.json
    #[arg(long = "config", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Directory holding the w1 bus devices
    #[arg(long = "base-dir", value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Seconds a raw snapshot is reused before the bus is read again
    #[arg(long = "cache-timeout", value_name = "SECS")]
    cache_timeout: Option<u64>,

    /// Seconds to wait for a sensor to report ready (0 waits forever)
    #[arg(long = "max-wait", value_name = "SECS")]
    max_wait: Option<u64>,

    /// Calibration file for enriched readings
    #[arg(long = "calibration", value_name = "FILE")]
    calibration: Option<PathBuf>,

    /// List discovered sensors and exit
    #[arg(short = 'l', long = "list")]
    list: bool,

    /// Print calibrated readings instead of plain temperatures
    #[arg(short = 'e', long = "enriched")]
    enriched: bool,

    /// Keep reading until interrupted
    #[arg(short = 'w', long = "watch")]
    watch: bool,
}

fn main() {
    let cli = Cli::parse();

    // Level 0 (default): warn only
    // Level 1: info
    // Level 2: debug
    // Level 3+: trace
    let log_level = match cli.debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // Allow RUST_LOG to override CLI setting
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    info!("Starting w1temp v{}", env!("CARGO_PKG_VERSION"));

    let driver = Ds18x20::new(&config.driver);
    if driver.sensor_ids().is_empty() {
        warn!("No sensors found under {}", config.driver.base_dir.display());
    }

    if cli.list {
        print_json(&output::sensor_list_json(&driver))?;
        return Ok(());
    }

    let calibration = if cli.enriched {
        let path = cli.calibration.as_deref().or(config.calibration_path.as_deref());
        Some(load_calibration(path)?)
    } else {
        None
    };

    loop {
        let json = match &calibration {
            Some(calibration) => output::enriched_json(&driver.read_all_enriched(calibration)?)?,
            None => output::simple_json(&driver.read_all_simple()?),
        };
        print_json(&json)?;

        if !cli.watch {
            return Ok(());
        }
        std::thread::sleep(Duration::from_millis(config.watch_interval_ms));
    }
}

/// Load the config file and apply command line overrides
fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load().unwrap_or_else(|e| {
            warn!("Failed to load config, using defaults: {:#}", e);
            AppConfig::default()
        }),
    };

    if let Some(base_dir) = &cli.base_dir {
        config.driver.base_dir = base_dir.clone();
    }
    if let Some(secs) = cli.cache_timeout {
        config.driver.cache_timeout_secs = secs;
    }
    if let Some(secs) = cli.max_wait {
        config.driver.max_ready_wait_secs = (secs > 0).then_some(secs);
    }

    Ok(config)
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to render JSON")?;
    println!("{}", text);
    Ok(())
}

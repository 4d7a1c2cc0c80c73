//! CSV Logger Demo
//!
//! Logs a few synthetic sensor rows to a CSV file, then renames the target
//! mid-run to show the session reopening with a fresh header.
//!
//! Usage:
//!   cargo run --example record_demo -- [OPTIONS] [FILE]
//!
//! Options:
//!   --config PATH     Load logger settings from a JSON file
//!   --rows N          Number of rows per file (default: 5)
//!   --console         Print lines instead of writing a file
//!
//! Set RUST_LOG=debug to see session transitions.

use anyhow::Context;
use csvlog_core::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args: Vec<String> = std::env::args().collect();

    let mut config = LoggerConfig::new(
        "csvlog-demo/sensors.csv",
        vec!["rpm".into(), "map".into(), "state".into()],
    );
    let mut rows = 5usize;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                i += 1;
                let path = args.get(i).context("--config needs a path")?;
                config = LoggerConfig::load(path)?;
            }
            "--rows" | "-n" => {
                i += 1;
                rows = args
                    .get(i)
                    .and_then(|s| s.parse().ok())
                    .context("--rows needs a number")?;
            }
            "--console" => config.to_console = true,
            other => config.filename = other.into(),
        }
        i += 1;
    }

    let mut logger = CsvLogger::with_config(config);
    logger.subscribe(|event| {
        if let LoggerEvent::Changed(Setting::Filename) = event {
            println!("filename changed");
        }
    });

    for n in 0..rows {
        let rpm = 800.0 + 350.0 * n as f64;
        logger.log(&row![rpm, 30.0 + n as f64 * 1.7, "idle"])?;
    }
    println!("Logged {} rows to {}", rows, logger.filename().display());

    let rotated = logger.filename().with_extension("2.csv");
    logger.set_filename(&rotated);
    for n in 0..rows {
        logger.log(&row![4000.0 - 100.0 * n as f64, 95.0, "cruise"])?;
    }
    println!("Logged {} rows to {}", rows, logger.filename().display());

    logger.close();
    Ok(())
}

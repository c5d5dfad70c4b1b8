//! Shipment E2E - LocalStack harness for the shipment-list service
//!
//! Starts the seeded emulator and publishes the service bindings, then holds
//! the container until Ctrl-C so the service can be run against it locally.

use clap::Parser;
use shipment_e2e::bindings::ServiceBindings;
use shipment_e2e::{config::HarnessConfig, emulator::Emulator};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Shipment E2E - seeded LocalStack environment for local test runs
#[derive(Parser, Debug)]
#[command(name = "shipment-e2e")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "harness.yaml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .json()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Shipment E2E v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = HarnessConfig::load_or_default(&args.config)?;
    info!("Loaded configuration from {:?}", args.config);

    // Start the seeded emulator and publish the service bindings
    let emulator = Emulator::start(&config.emulator).await?;
    let bindings = ServiceBindings::for_emulator(&emulator, &config.bucket);
    bindings.export();

    for (key, value) in bindings.env() {
        println!("export {}={}", key, value);
    }
    info!(endpoint = emulator.endpoint(), "Emulator running, press Ctrl-C to stop");

    tokio::signal::ctrl_c().await?;

    info!("Shutting down emulator");
    Ok(())
}

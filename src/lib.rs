//! Shipment E2E Library
//!
//! Integration-test harness for the shipment-list service. The service keeps
//! its shipments in DynamoDB, their pictures in S3, and fans out change
//! notifications over SQS/SNS; the harness provides everything needed to
//! exercise it against a LocalStack emulation of that stack.
//!
//! # Components
//!
//! - **Emulator**: LocalStack container lifecycle with seeded state
//! - **Bindings**: publishes emulator endpoint/credentials to the service
//! - **Client**: REST driver for the shipment API
//! - **Inspector**: S3-side verification of bucket state
//! - **Service**: optional launch of the service under test
//!
//! # Example
//!
//! ```no_run
//! use shipment_e2e::{config::HarnessConfig, emulator::Emulator};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = HarnessConfig::load_or_default("harness.yaml")?;
//!     let emulator = Emulator::start(&config.emulator).await?;
//!     println!("LocalStack ready at {}", emulator.endpoint());
//!     Ok(())
//! }
//! ```

pub mod bindings;
pub mod client;
pub mod config;
pub mod emulator;
pub mod s3;
pub mod service;
pub mod shipment;

// Re-export commonly used types
pub use client::ShipmentClient;
pub use config::HarnessConfig;
pub use emulator::Emulator;
pub use shipment::Shipment;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

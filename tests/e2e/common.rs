//! Common E2E Test Infrastructure
//!
//! Provides shared utilities for E2E tests:
//! - Harness environment (emulator + bindings + driver + inspector)
//! - Fixture loading
//! - Prerequisite checks and skip macros

use bytes::Bytes;
use shipment_e2e::bindings::ServiceBindings;
use shipment_e2e::client::ShipmentClient;
use shipment_e2e::config::HarnessConfig;
use shipment_e2e::emulator::{Emulator, AUTH_TOKEN_VAR};
use shipment_e2e::s3::BucketInspector;
use shipment_e2e::service::{self, ServiceHandle};
use shipment_e2e::shipment::Shipment;
use std::path::PathBuf;
use std::time::Duration;

/// Identifier of the one shipment seeded with a known id
pub const SEEDED_SHIPMENT_ID: &str = "dc3b6668-45ba-4c10-9860-95bbffaebfc1";

/// Identifier that matches no seeded shipment
pub const UNKNOWN_SHIPMENT_ID: &str = "3317ac4f-1f9b-4bab-a974-4aa987wrong";

/// Identifier of the shipment created (and later deleted) by the suite
pub const CREATED_SHIPMENT_ID: &str = "3317ac4f-1f9b-4bab-a974-4aa9876d5547";

/// Number of shipments in the seeded snapshot
pub const SEEDED_SHIPMENT_COUNT: usize = 4;

/// E2E Test Environment
///
/// Owns the emulator container for the duration of a test, publishes the
/// service bindings, optionally launches the service under test, and exposes
/// the driver and the bucket inspector.
pub struct TestEnv {
    pub config: HarnessConfig,
    pub emulator: Emulator,
    pub client: ShipmentClient,
    pub inspector: BucketInspector,
    pub service_ready: bool,
    _service: Option<ServiceHandle>,
}

impl TestEnv {
    /// Start the emulator, publish bindings, bring up the service.
    pub async fn new() -> anyhow::Result<Self> {
        let config = HarnessConfig::load_or_default("harness.yaml")?;

        let emulator = Emulator::start(&config.emulator).await?;

        let bindings = ServiceBindings::for_emulator(&emulator, &config.bucket);
        bindings.export();

        let service = service::maybe_launch(&config.service, &bindings)?;
        let service_ready = service::wait_until_reachable(
            &config.service.base_url,
            Duration::from_secs(config.service.ready_timeout_secs),
        )
        .await;

        let client = ShipmentClient::new(&config.service.base_url)?;
        let inspector = BucketInspector::for_emulator(&emulator);

        Ok(Self {
            config,
            emulator,
            client,
            inspector,
            service_ready,
            _service: service,
        })
    }

    /// Absolute path of a fixture file
    pub fn fixture_path(&self, name: &str) -> PathBuf {
        PathBuf::from(&self.config.fixtures.dir).join(name)
    }

    /// Read a fixture file as raw bytes
    pub fn read_fixture(&self, name: &str) -> Bytes {
        let path = self.fixture_path(name);
        Bytes::from(std::fs::read(&path).unwrap_or_else(|e| {
            panic!("Failed to read fixture {}: {}", path.display(), e)
        }))
    }

    /// Read a fixture file as a shipment record
    pub fn read_shipment_fixture(&self, name: &str) -> Shipment {
        let path = self.fixture_path(name);
        Shipment::from_file(&path).unwrap_or_else(|e| {
            panic!("Failed to parse fixture {}: {}", path.display(), e)
        })
    }
}

/// True when Docker and the LocalStack auth token are both available
pub fn e2e_prerequisites_met() -> bool {
    std::env::var(AUTH_TOKEN_VAR).is_ok() && shipment_e2e::emulator::docker_available()
}

/// Skip the test when Docker or the auth token is missing
#[macro_export]
macro_rules! skip_unless_e2e {
    () => {
        if !$crate::e2e::common::e2e_prerequisites_met() {
            eprintln!("Skipping test: Docker or LOCALSTACK_AUTH_TOKEN not available");
            return;
        }
    };
}

/// Skip the remaining assertions when the service under test is not up
#[macro_export]
macro_rules! skip_unless_service {
    ($env:expr) => {
        if !$env.service_ready {
            eprintln!("Skipping test: shipment-list service is not reachable");
            return;
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_ids_are_hyphenated_36_char_values() {
        for id in [SEEDED_SHIPMENT_ID, CREATED_SHIPMENT_ID] {
            assert_eq!(id.len(), 36);
            assert_eq!(id.matches('-').count(), 4);
        }
    }

    #[test]
    fn test_unknown_id_is_not_well_formed() {
        // Deliberately malformed so the service cannot resolve it
        assert_ne!(UNKNOWN_SHIPMENT_ID.len(), 36);
    }
}

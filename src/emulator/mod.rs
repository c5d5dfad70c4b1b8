//! LocalStack emulator lifecycle
//!
//! Starts the LocalStack container that backs the shipment-list service
//! during integration tests. The container is started with a seeded state
//! snapshot bind-mounted into the auto-import path and is considered ready
//! once the snapshot has been loaded.
//!
//! # Example
//!
//! ```no_run
//! use shipment_e2e::config::EmulatorConfig;
//! use shipment_e2e::emulator::Emulator;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let emulator = Emulator::start(&EmulatorConfig::default()).await?;
//! println!("edge endpoint: {}", emulator.endpoint());
//!
//! let result = emulator.exec("awslocal s3 ls").await?;
//! println!("buckets: {}", result.stdout);
//! # Ok(())
//! # }
//! ```

use crate::config::EmulatorConfig;
use std::path::Path;
use std::time::Duration;
use testcontainers::core::{IntoContainerPort, Mount, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, GenericImage, ImageExt, TestcontainersError};
use thiserror::Error;
use tracing::info;

mod exec;

pub use exec::ExecOutput;

/// Environment variable holding the LocalStack Pro auth token
pub const AUTH_TOKEN_VAR: &str = "LOCALSTACK_AUTH_TOKEN";

/// Path inside the container where state snapshots are auto-imported from
const POD_IMPORT_PATH: &str = "/etc/localstack/init-pods.d/shipment-list-pod";

/// Credentials LocalStack accepts for all emulated services
const ACCESS_KEY: &str = "test";
const SECRET_KEY: &str = "test";
const REGION: &str = "us-east-1";

/// Emulator errors
#[derive(Error, Debug)]
pub enum EmulatorError {
    #[error("Environment variable {0} is not set")]
    MissingToken(String),

    #[error("Seed snapshot directory not found: {0}")]
    MissingSeedPod(String),

    #[error("Container error: {0}")]
    Container(#[from] TestcontainersError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A running LocalStack container seeded with shipment-list state.
///
/// The container is stopped and removed when this value is dropped.
pub struct Emulator {
    container: ContainerAsync<GenericImage>,
    endpoint: String,
}

impl Emulator {
    /// Start the emulator and wait until the seeded state has been loaded.
    ///
    /// Fails with an environment error when the auth token is missing or the
    /// seed snapshot directory does not exist, and with a container error
    /// when the image cannot start or the ready line is not observed within
    /// the startup timeout.
    pub async fn start(config: &EmulatorConfig) -> Result<Self, EmulatorError> {
        let token = std::env::var(AUTH_TOKEN_VAR)
            .map_err(|_| EmulatorError::MissingToken(AUTH_TOKEN_VAR.to_string()))?;

        let seed_pod = Path::new(&config.seed_pod);
        if !seed_pod.is_dir() {
            return Err(EmulatorError::MissingSeedPod(config.seed_pod.clone()));
        }
        // Bind mounts require an absolute host path
        let seed_pod = seed_pod.canonicalize()?;

        info!(
            image = %config.image,
            tag = %config.tag,
            seed_pod = %seed_pod.display(),
            "Starting LocalStack emulator"
        );

        let container = GenericImage::new(config.image.clone(), config.tag.clone())
            .with_exposed_port(config.edge_port.tcp())
            .with_wait_for(WaitFor::message_on_stdout(config.ready_message.clone()))
            .with_env_var(AUTH_TOKEN_VAR, token)
            .with_env_var("DEBUG", "1")
            .with_mount(Mount::bind_mount(
                seed_pod.display().to_string(),
                POD_IMPORT_PATH,
            ))
            .with_startup_timeout(Duration::from_secs(config.startup_timeout_secs))
            .start()
            .await?;

        let host_port = container.get_host_port_ipv4(config.edge_port.tcp()).await?;
        let endpoint = format!("http://127.0.0.1:{}", host_port);

        info!(endpoint = %endpoint, "LocalStack emulator ready");

        Ok(Self {
            container,
            endpoint,
        })
    }

    /// Edge endpoint all emulated services answer on
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Access key accepted by the emulator
    pub fn access_key(&self) -> &'static str {
        ACCESS_KEY
    }

    /// Secret key accepted by the emulator
    pub fn secret_key(&self) -> &'static str {
        SECRET_KEY
    }

    /// Region the seeded services live in
    pub fn region(&self) -> &'static str {
        REGION
    }

    /// Run a command inside the running container. See [`exec::ExecOutput`].
    pub async fn exec(&self, command: &str) -> Result<ExecOutput, EmulatorError> {
        exec::exec_in(&self.container, command).await
    }
}

/// Check whether a Docker daemon is reachable.
///
/// Used by tests to skip instead of fail on machines without Docker.
pub fn docker_available() -> bool {
    std::process::Command::new("docker")
        .arg("info")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

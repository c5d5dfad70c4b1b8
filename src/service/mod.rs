//! Service under test lifecycle
//!
//! The shipment-list service is an external collaborator: the harness can
//! either launch it from a configured command line or attach to an instance
//! that is already running. Either way the service must answer on its base
//! URL before the assertion suite starts.

use crate::bindings::ServiceBindings;
use crate::config::ServiceConfig;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Interval between readiness probes
const PROBE_INTERVAL: Duration = Duration::from_millis(500);

/// Service lifecycle errors
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Empty launch command")]
    EmptyCommand,

    #[error("Failed to launch service: {0}")]
    Launch(#[from] std::io::Error),
}

/// A service process launched by the harness.
///
/// The child is killed when the handle is dropped.
pub struct ServiceHandle {
    child: tokio::process::Child,
}

impl ServiceHandle {
    /// Launch the service with the published bindings in its environment.
    ///
    /// The command line is split on spaces, like in-container commands.
    pub fn launch(command: &str, bindings: &ServiceBindings) -> Result<Self, ServiceError> {
        let mut parts = command.split(' ').filter(|part| !part.is_empty());
        let program = parts.next().ok_or(ServiceError::EmptyCommand)?;

        info!(command = command, "Launching service under test");

        let child = tokio::process::Command::new(program)
            .args(parts)
            .envs(bindings.env())
            .kill_on_drop(true)
            .spawn()?;

        Ok(Self { child })
    }

    /// Process id of the launched service, if still running
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }
}

/// Poll the service base URL until it answers or the timeout lapses.
///
/// Any HTTP response counts as reachable; the suite itself decides which
/// statuses are acceptable per request.
pub async fn wait_until_reachable(base_url: &str, timeout: Duration) -> bool {
    let client = match reqwest::Client::builder().timeout(PROBE_INTERVAL).build() {
        Ok(client) => client,
        Err(_) => return false,
    };

    let deadline = tokio::time::Instant::now() + timeout;
    let url = format!("{}/api/shipment", base_url.trim_end_matches('/'));

    while tokio::time::Instant::now() < deadline {
        if client.get(&url).send().await.is_ok() {
            info!(base_url = base_url, "Service under test is reachable");
            return true;
        }
        tokio::time::sleep(PROBE_INTERVAL).await;
    }

    warn!(base_url = base_url, "Service under test never became reachable");
    false
}

/// Launch the service when a command is configured, otherwise attach.
pub fn maybe_launch(
    config: &ServiceConfig,
    bindings: &ServiceBindings,
) -> Result<Option<ServiceHandle>, ServiceError> {
    match config.launch_command.as_deref() {
        Some(command) if !command.trim().is_empty() => {
            Ok(Some(ServiceHandle::launch(command, bindings)?))
        }
        _ => Ok(None),
    }
}

//! In-container command execution
//!
//! Runs `awslocal` queries and other commands inside the running emulator to
//! verify side effects that are not visible through the service's REST
//! surface.

use super::EmulatorError;
use testcontainers::core::ExecCommand;
use testcontainers::{ContainerAsync, GenericImage};
use tracing::{error, info};

/// Captured result of an in-container command.
///
/// A non-zero exit code is reported, never asserted on; callers decide
/// whether it is a failure.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i64,
}

impl ExecOutput {
    /// True when the command exited with status zero
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Split a command string into argv parts.
///
/// Splits on single spaces only; arguments containing spaces are not
/// supported. The queries issued by the harness contain none.
pub(crate) fn split_command(command: &str) -> Vec<String> {
    command.split(' ').map(str::to_string).collect()
}

/// Execute a command inside the container and capture its output.
pub(super) async fn exec_in(
    container: &ContainerAsync<GenericImage>,
    command: &str,
) -> Result<ExecOutput, EmulatorError> {
    let mut result = container.exec(ExecCommand::new(split_command(command))).await?;

    let stdout = String::from_utf8_lossy(&result.stdout_to_vec().await?).into_owned();
    let stderr = String::from_utf8_lossy(&result.stderr_to_vec().await?).into_owned();
    let exit_code = result.exit_code().await?.unwrap_or(0);

    info!(command = command, stdout = %stdout, stderr = %stderr, "Executed in container");
    if exit_code != 0 {
        error!(command = command, exit_code = exit_code, "In-container command failed");
    }

    Ok(ExecOutput {
        stdout,
        stderr,
        exit_code,
    })
}

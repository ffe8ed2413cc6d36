use std::process::ExitStatus;
use std::time::Duration;

use tokio::process::Command;
use tokio::task::JoinHandle;

/// Stops the host after a fixed wall-clock interval, whatever the job slot
/// is doing.
pub struct ShutdownSafeguard {
    timeout: Duration,
    command: String,
}

impl ShutdownSafeguard {
    pub fn new(timeout: Duration, command: impl Into<String>) -> Self {
        Self {
            timeout,
            command: command.into(),
        }
    }

    /// Arms the safeguard on the current runtime.
    pub fn spawn(self) -> JoinHandle<()> {
        tracing::info!(
            timeout_secs = self.timeout.as_secs(),
            command = %self.command,
            "Shutdown safeguard armed"
        );
        tokio::spawn(async move {
            tokio::time::sleep(self.timeout).await;
            tracing::warn!(command = %self.command, "Safeguard timeout reached, stopping host");
            match Self::run_command(&self.command).await {
                Ok(status) if status.success() => tracing::info!("Stop command succeeded"),
                Ok(status) => tracing::error!(%status, "Stop command exited with failure"),
                Err(e) => tracing::error!(error = %e, "Failed to run stop command"),
            }
        })
    }

    pub async fn run_command(command: &str) -> std::io::Result<ExitStatus> {
        Command::new("sh").arg("-c").arg(command).status().await
    }
}

//! System operations: holding off idle sleep while a run is active

use tokio::process::{Child, Command};
use tracing::{debug, info};

/// A running `systemd-inhibit` process blocking idle and sleep.
///
/// The lock is held for as long as the child process lives; dropping the
/// inhibitor kills it.
#[derive(Debug)]
pub struct SleepInhibitor {
    child: Child,
}

impl SleepInhibitor {
    /// Take an idle/sleep inhibitor lock
    pub async fn acquire(why: &str) -> Result<Self, String> {
        debug!("Acquiring sleep inhibitor");

        let why = format!("--why={}", why);
        let child = Command::new("systemd-inhibit")
            .args([
                "--what=idle:sleep",
                "--who=interval-timer",
                why.as_str(),
                "--mode=block",
                "sleep",
                "infinity",
            ])
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| format!("Failed to execute systemd-inhibit: {}", e))?;

        info!("Sleep inhibitor acquired (pid {:?})", child.id());
        Ok(Self { child })
    }

    /// Release the lock by stopping the inhibitor process
    pub async fn release(mut self) -> Result<(), String> {
        self.child
            .kill()
            .await
            .map_err(|e| format!("Failed to stop systemd-inhibit: {}", e))?;

        info!("Sleep inhibitor released");
        Ok(())
    }
}

/// Check if systemd-inhibit is available on the system
pub async fn check_inhibit_available() -> Result<(), String> {
    let output = Command::new("systemd-inhibit")
        .arg("--version")
        .output()
        .await
        .map_err(|_| "systemd-inhibit is not available. Sleep inhibition requires systemd.".to_string())?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("systemd-inhibit --version failed: {}", stderr));
    }

    info!("systemd-inhibit is available");
    Ok(())
}

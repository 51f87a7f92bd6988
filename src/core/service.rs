//! systemd control through `systemctl`.

use crate::error::{InstallerError, Result};
use std::process::Command;

pub trait ServiceManager {
    /// Whether the unit currently reports `active`.
    fn is_active(&self, unit: &str) -> Result<bool>;
    fn enable(&self, unit: &str) -> Result<()>;
    fn daemon_reload(&self) -> Result<()>;
    fn restart(&self, unit: &str) -> Result<()>;
}

pub struct Systemctl;

impl Systemctl {
    fn run(&self, step: &str, args: &[&str]) -> Result<()> {
        log::debug!("systemctl {}", args.join(" "));

        let output = Command::new("systemctl")
            .args(args)
            .output()
            .map_err(|e| {
                InstallerError::step(step, format!("Failed to execute systemctl: {e}"))
            })?;

        if !output.status.success() {
            return Err(InstallerError::step(
                step,
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(())
    }
}

impl ServiceManager for Systemctl {
    fn is_active(&self, unit: &str) -> Result<bool> {
        // is-active exits non-zero for every state but active, so only stdout matters
        let output = Command::new("systemctl")
            .args(["is-active", unit])
            .output()
            .map_err(|e| {
                InstallerError::step(
                    "query service state",
                    format!("Failed to execute systemctl: {e}"),
                )
            })?;

        Ok(is_active_state(&String::from_utf8_lossy(&output.stdout)))
    }

    fn enable(&self, unit: &str) -> Result<()> {
        self.run("enable service", &["enable", unit])
    }

    fn daemon_reload(&self) -> Result<()> {
        self.run("reload systemd", &["daemon-reload"])
    }

    fn restart(&self, unit: &str) -> Result<()> {
        self.run("restart service", &["restart", unit])
    }
}

fn is_active_state(stdout: &str) -> bool {
    stdout.trim() == "active"
}

use crate::error::{InstallerError, Result};
use crate::utils::fs;
use std::path::Path;
use std::process::{Command, Output};

const DISABLED_LINE: &str = "SELINUX=disabled";

/// Host mandatory access control that would block the daemon.
pub trait SecurityModule {
    fn is_disabled(&self) -> Result<bool>;
    /// Relaxes enforcement for the running session only.
    fn set_permissive(&self) -> Result<()>;
}

pub struct SeLinux;

impl SecurityModule for SeLinux {
    fn is_disabled(&self) -> Result<bool> {
        let output = match Command::new("getenforce").output() {
            Ok(output) => output,
            Err(e) => {
                log::warn!("getenforce unavailable ({e}), treating SELinux as disabled");
                return Ok(true);
            }
        };
        getenforce_reports_disabled(&output)
    }

    fn set_permissive(&self) -> Result<()> {
        let output = Command::new("setenforce").arg("0").output().map_err(|e| {
            InstallerError::step("disable SELinux", format!("Failed to run setenforce: {e}"))
        })?;

        if !output.status.success() {
            return Err(InstallerError::step(
                "disable SELinux",
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(())
    }
}

/// Turns SELinux off if `config_path` exists. Returns whether anything changed.
pub fn disable(module: &dyn SecurityModule, config_path: &Path) -> Result<bool> {
    if !config_path.exists() {
        log::debug!("{} not present, skipping SELinux", config_path.display());
        return Ok(false);
    }

    if module.is_disabled()? {
        log::debug!("SELinux already disabled, leaving {} alone", config_path.display());
        return Ok(false);
    }

    log::info!("Setting SELinux to permissive for this session");
    module.set_permissive()?;

    let current = std::fs::read_to_string(config_path)?;
    let patched = patch_config(&current);
    if patched != current {
        log::info!("Disabling SELinux in {}", config_path.display());
        fs::write_file(config_path, &patched)?;
    }

    Ok(true)
}

fn getenforce_reports_disabled(output: &Output) -> Result<bool> {
    if !output.status.success() {
        return Err(InstallerError::step(
            "disable SELinux",
            format!(
                "getenforce exited with status {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            ),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim() == "Disabled")
}

/// Rewrites the `SELINUX=` mode line; `SELINUXTYPE=` and comments are kept.
pub fn patch_config(content: &str) -> String {
    let mut patched: String = content
        .lines()
        .map(|line| {
            if line.trim_start().starts_with("SELINUX=") {
                DISABLED_LINE
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    if content.ends_with('\n') {
        patched.push('\n');
    }
    patched
}

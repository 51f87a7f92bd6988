use crate::core::version;
use crate::error::Result;
use clap::ValueEnum;
use std::path::PathBuf;
use std::process::Command;
use std::time::Duration;

pub const DEFAULT_VERSION: &str = "24.0.5";
pub const SERVICE_NAME: &str = "docker";
pub const DEFAULT_SETTLE: Duration = Duration::from_secs(5);

/// Which base URL template the archive is fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mirror {
    /// Tsinghua University mirror of download.docker.com
    Regional,
    /// download.docker.com
    Default,
}

/// Fixed host locations the installer writes to.
#[derive(Debug, Clone)]
pub struct SystemPaths {
    pub bin_dir: PathBuf,
    pub unit_file: PathBuf,
    pub daemon_config: PathBuf,
    pub selinux_config: PathBuf,
}

impl Default for SystemPaths {
    fn default() -> Self {
        SystemPaths {
            bin_dir: PathBuf::from("/usr/bin"),
            unit_file: PathBuf::from("/etc/systemd/system/docker.service"),
            daemon_config: PathBuf::from("/etc/docker/daemon.json"),
            selinux_config: PathBuf::from("/etc/selinux/config"),
        }
    }
}

/// Everything one run needs, built once in `main` and never mutated.
#[derive(Debug, Clone)]
pub struct InstallConfig {
    pub version: String,
    pub mirror: Mirror,
    pub arch: String,
    pub work_dir: PathBuf,
    pub paths: SystemPaths,
    pub service_name: String,
    pub settle: Duration,
}

impl InstallConfig {
    pub fn new(version: &str, mirror: Mirror) -> Result<Self> {
        version::validate_version(version)?;

        Ok(InstallConfig {
            version: version.to_string(),
            mirror,
            arch: detect_arch(),
            work_dir: std::env::current_dir()?,
            paths: SystemPaths::default(),
            service_name: SERVICE_NAME.to_string(),
            settle: DEFAULT_SETTLE,
        })
    }

    pub fn archive_name(&self) -> String {
        format!("docker-{}.tgz", self.version)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.work_dir.join(self.archive_name())
    }
}

/// Host machine architecture as reported by `uname -m`.
pub fn detect_arch() -> String {
    match Command::new("uname").arg("-m").output() {
        Ok(output) if output.status.success() => {
            let arch = String::from_utf8_lossy(&output.stdout).trim().to_string();
            if !arch.is_empty() {
                return arch;
            }
            std::env::consts::ARCH.to_string()
        }
        _ => {
            log::debug!("uname -m unavailable, using compile-time architecture");
            std::env::consts::ARCH.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_name_follows_version() {
        let config = InstallConfig::new("24.0.5", Mirror::Regional).unwrap();
        assert_eq!(config.archive_name(), "docker-24.0.5.tgz");
        assert!(config.archive_path().ends_with("docker-24.0.5.tgz"));
    }

    #[test]
    fn test_new_rejects_bad_version() {
        assert!(InstallConfig::new("latest", Mirror::Default).is_err());
    }

    #[test]
    fn test_default_paths() {
        let paths = SystemPaths::default();
        assert_eq!(paths.bin_dir, PathBuf::from("/usr/bin"));
        assert_eq!(
            paths.daemon_config,
            PathBuf::from("/etc/docker/daemon.json")
        );
    }
}

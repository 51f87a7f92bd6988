use crate::error::{InstallerError, Result};
use std::fmt;

/// Docker releases from 20.x on default to the systemd cgroup driver.
const SYSTEMD_DRIVER_SINCE: u32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CgroupDriver {
    Systemd,
    Cgroupfs,
}

impl CgroupDriver {
    pub fn for_version(version: &str) -> Result<Self> {
        if major_version(version)? >= SYSTEMD_DRIVER_SINCE {
            Ok(CgroupDriver::Systemd)
        } else {
            Ok(CgroupDriver::Cgroupfs)
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CgroupDriver::Systemd => "systemd",
            CgroupDriver::Cgroupfs => "cgroupfs",
        }
    }
}

impl fmt::Display for CgroupDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn major_version(version: &str) -> Result<u32> {
    version
        .trim_start_matches('v')
        .split('.')
        .next()
        .and_then(|major| major.parse::<u32>().ok())
        .ok_or_else(|| InstallerError::InvalidVersion {
            version: version.to_string(),
        })
}

pub fn validate_version(version: &str) -> Result<()> {
    if version.is_empty()
        || version.contains("..")
        || version.contains('/')
        || version.contains('\\')
    {
        return Err(InstallerError::InvalidVersion {
            version: version.to_string(),
        });
    }

    major_version(version).map(|_| ())
}

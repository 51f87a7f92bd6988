//! Fixtures and fake collaborators shared by unit tests.

use crate::core::download::Downloader;
use crate::core::selinux::SecurityModule;
use crate::core::service::ServiceManager;
use crate::error::{InstallerError, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::cell::{Cell, RefCell};
use std::fs::File;
use std::path::Path;

pub const RELEASE_BINARIES: &[&str] = &["containerd", "ctr", "docker", "dockerd", "runc"];

/// Writes a gzipped tarball laid out like a static Docker release.
pub fn write_release_archive(path: &Path, binaries: &[&str]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    let file = File::create(path).unwrap();
    let mut builder = tar::Builder::new(GzEncoder::new(file, Compression::default()));

    for name in binaries {
        let data = format!("#!/bin/sh\necho {name}\n");
        let mut header = tar::Header::new_gnu();
        header.set_entry_type(tar::EntryType::Regular);
        header.set_size(data.len() as u64);
        header.set_mode(0o755);
        builder
            .append_data(&mut header, format!("docker/{name}"), data.as_bytes())
            .unwrap();
    }

    builder.into_inner().unwrap().finish().unwrap();
}

/// Produces a release archive on request, or fails like a non-zero exit.
#[derive(Default)]
pub struct FakeDownloader {
    pub fail: bool,
    pub calls: Cell<usize>,
}

impl FakeDownloader {
    pub fn failing() -> Self {
        Self {
            fail: true,
            calls: Cell::new(0),
        }
    }
}

impl Downloader for FakeDownloader {
    fn download_file(&self, url: &str, destination: &Path) -> Result<()> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(InstallerError::Download {
                url: url.to_string(),
                message: "exited with status Some(8)".to_string(),
            });
        }
        write_release_archive(destination, RELEASE_BINARIES);
        Ok(())
    }
}

/// Records every systemctl verb it is asked to run.
#[derive(Default)]
pub struct FakeServiceManager {
    pub active: bool,
    pub fail_restart: bool,
    pub calls: RefCell<Vec<String>>,
}

impl FakeServiceManager {
    pub fn running() -> Self {
        Self {
            active: true,
            ..Self::default()
        }
    }

    fn record(&self, verb: &str, unit: &str) {
        self.calls.borrow_mut().push(format!("{verb} {unit}"));
    }
}

impl ServiceManager for FakeServiceManager {
    fn is_active(&self, unit: &str) -> Result<bool> {
        self.record("is-active", unit);
        Ok(self.active)
    }

    fn enable(&self, unit: &str) -> Result<()> {
        self.record("enable", unit);
        Ok(())
    }

    fn daemon_reload(&self) -> Result<()> {
        self.calls.borrow_mut().push("daemon-reload".to_string());
        Ok(())
    }

    fn restart(&self, unit: &str) -> Result<()> {
        self.record("restart", unit);
        if self.fail_restart {
            return Err(InstallerError::step(
                "restart service",
                "Job for docker.service failed",
            ));
        }
        Ok(())
    }
}

pub struct FakeSecurityModule {
    pub disabled: bool,
    pub permissive_calls: Cell<usize>,
}

impl FakeSecurityModule {
    pub fn enforcing() -> Self {
        Self {
            disabled: false,
            permissive_calls: Cell::new(0),
        }
    }

    pub fn disabled() -> Self {
        Self {
            disabled: true,
            permissive_calls: Cell::new(0),
        }
    }
}

impl SecurityModule for FakeSecurityModule {
    fn is_disabled(&self) -> Result<bool> {
        Ok(self.disabled)
    }

    fn set_permissive(&self) -> Result<()> {
        self.permissive_calls.set(self.permissive_calls.get() + 1);
        Ok(())
    }
}

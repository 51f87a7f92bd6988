use crate::commands::fetch::fetch_archive;
use crate::core::archive;
use crate::core::config::InstallConfig;
use crate::core::daemon::DaemonConfig;
use crate::core::download::Downloader;
use crate::core::selinux::{self, SecurityModule};
use crate::core::service::ServiceManager;
use crate::core::unit::UnitFile;
use crate::error::{InstallerError, Result, StepContext};
use crate::utils::fs;

/// What an install run ended with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed,
    AlreadyRunning,
}

/// Installs Docker using the host collaborators it is given.
pub struct Installer<'a> {
    config: &'a InstallConfig,
    downloader: &'a dyn Downloader,
    services: &'a dyn ServiceManager,
    security: &'a dyn SecurityModule,
}

impl<'a> Installer<'a> {
    pub fn new(
        config: &'a InstallConfig,
        downloader: &'a dyn Downloader,
        services: &'a dyn ServiceManager,
        security: &'a dyn SecurityModule,
    ) -> Self {
        Self {
            config,
            downloader,
            services,
            security,
        }
    }

    pub fn run(&self) -> Result<InstallOutcome> {
        let config = self.config;
        let paths = &config.paths;
        log::info!("Installing Docker {} ({})", config.version, config.arch);

        let archive_path = config.archive_path();
        if !archive_path.exists() {
            fetch_archive(config, self.downloader)?;
        }
        if !archive_path.exists() {
            return Err(InstallerError::MissingArchive { path: archive_path });
        }

        let installed =
            archive::install_binaries(&archive_path, &paths.bin_dir).step("extract archive")?;
        log::info!(
            "Installed {} binaries into {}",
            installed.len(),
            paths.bin_dir.display()
        );

        if self
            .services
            .is_active(&config.service_name)
            .step("query service state")?
        {
            log::warn!(
                "{} service is already running, leaving its configuration untouched",
                config.service_name
            );
            return Ok(InstallOutcome::AlreadyRunning);
        }

        UnitFile::docker(&paths.bin_dir)
            .write_to(&paths.unit_file)
            .step("write unit file")?;

        if let Some(config_dir) = paths.daemon_config.parent() {
            fs::ensure_dir_exists(config_dir).step("create config directory")?;
        }
        DaemonConfig::for_version(&config.version)
            .and_then(|daemon| daemon.write_to(&paths.daemon_config))
            .step("write daemon config")?;

        selinux::disable(self.security, &paths.selinux_config).step("disable SELinux")?;

        self.services
            .enable(&config.service_name)
            .step("enable service")?;
        self.services.daemon_reload().step("reload systemd")?;
        self.services
            .restart(&config.service_name)
            .step("restart service")?;

        if !config.settle.is_zero() {
            log::info!("Waiting {:?} for the daemon to settle", config.settle);
            std::thread::sleep(config.settle);
        }

        log::info!("Docker {} installed and started", config.version);
        Ok(InstallOutcome::Installed)
    }
}

pub mod fetch;
pub mod install;

use crate::cli::Action;
use crate::core::config::InstallConfig;
use crate::core::download::CommandDownloader;
use crate::core::selinux::SeLinux;
use crate::core::service::Systemctl;
use crate::error::Result;

/// Runs `action` against the real host tools.
pub fn dispatch(action: Action, config: &InstallConfig) -> Result<()> {
    let downloader = CommandDownloader::new();

    match action {
        Action::Download => fetch::fetch_archive(config, &downloader).map(|_| ()),
        Action::Install => install::Installer::new(config, &downloader, &Systemctl, &SeLinux)
            .run()
            .map(|_| ()),
    }
}

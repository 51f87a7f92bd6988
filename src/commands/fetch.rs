use crate::core::config::InstallConfig;
use crate::core::download::{resolve_url, Downloader};
use crate::error::Result;
use std::path::PathBuf;

/// Makes sure the release archive is in the working directory, downloading it
/// only when absent. Returns the archive path.
pub fn fetch_archive(config: &InstallConfig, downloader: &dyn Downloader) -> Result<PathBuf> {
    let archive = config.archive_path();

    if archive.exists() {
        log::info!("{} already exists, skipping download", archive.display());
        return Ok(archive);
    }

    let url = resolve_url(config.mirror, &config.arch, &config.version);
    downloader.download_file(&url, &archive)?;

    log::info!("Docker {} archive ready at {}", config.version, archive.display());
    Ok(archive)
}

use crate::error::{InstallerError, Result};
use crate::utils::fs;
use flate2::read::GzDecoder;
use std::fs::File;
use std::path::{Path, PathBuf};
use tar::Archive;

/// Top-level folder inside the static release tarball.
const BUNDLE_DIR: &str = "docker";

/// Unpacks `archive_path` and moves every binary of the bundle into `bin_dir`,
/// replacing files with the same name. Returns the installed paths.
pub fn install_binaries(archive_path: &Path, bin_dir: &Path) -> Result<Vec<PathBuf>> {
    let staging = tempfile::Builder::new().prefix("dockerup-").tempdir()?;
    extract_tar_gz(archive_path, staging.path())?;

    let bundle = staging.path().join(BUNDLE_DIR);
    let source = if bundle.is_dir() {
        bundle
    } else {
        staging.path().to_path_buf()
    };

    fs::ensure_dir_exists(bin_dir)?;

    let mut installed = Vec::new();
    for entry in std::fs::read_dir(&source)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let target = bin_dir.join(entry.file_name());
        fs::replace_file(&path, &target)?;
        fs::make_executable(&target)?;
        log::debug!("Installed {}", target.display());
        installed.push(target);
    }

    if installed.is_empty() {
        return Err(InstallerError::step(
            "extract archive",
            format!("{} contains no binaries", archive_path.display()),
        ));
    }

    installed.sort();
    Ok(installed)
}

fn extract_tar_gz(archive_path: &Path, destination: &Path) -> Result<()> {
    log::info!(
        "Extracting {} to {}",
        archive_path.display(),
        destination.display()
    );

    let file = File::open(archive_path)?;
    let decoder = GzDecoder::new(file);
    let mut archive = Archive::new(decoder);
    archive.unpack(destination).map_err(|e| {
        InstallerError::step(
            "extract archive",
            format!("{}: {e}", archive_path.display()),
        )
    })?;
    Ok(())
}

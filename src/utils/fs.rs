use crate::error::{InstallerError, Result};
use std::path::Path;

pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| permission_aware(e, path))?;
    }
    Ok(())
}

/// Writes `contents` to `path`, creating the parent directory if needed.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_dir_exists(parent)?;
    }
    std::fs::write(path, contents).map_err(|e| permission_aware(e, path))?;
    Ok(())
}

/// Moves `from` over `to`. The target is unlinked first so a running binary
/// can be replaced; falls back to copying when a rename crosses filesystems.
pub fn replace_file(from: &Path, to: &Path) -> Result<()> {
    if to.exists() {
        std::fs::remove_file(to).map_err(|e| permission_aware(e, to))?;
    }

    if std::fs::rename(from, to).is_err() {
        std::fs::copy(from, to).map_err(|e| permission_aware(e, to))?;
    }
    Ok(())
}

pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

pub fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(perms.mode() | 0o755);
    std::fs::set_permissions(path, perms)?;
    Ok(())
}

fn permission_aware(e: std::io::Error, path: &Path) -> InstallerError {
    match e.kind() {
        std::io::ErrorKind::PermissionDenied => InstallerError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => InstallerError::from(e),
    }
}

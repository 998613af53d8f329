/*
File: hbin-aio/src/fs.rs
Purpose: Primitive synchronous filesystem operations used by the lifecycle.
*/
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use hbin_common::error::{HbinError, Result};
use tracing::{debug, error, warn};

/// Checks if a path exists without following symlinks.
pub fn check_symlink_exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

/// Creates a directory and all its parent components if they are missing.
pub fn create_dir_all(path: &Path) -> Result<()> {
    debug!("Creating directory recursively: {}", path.display());
    fs::create_dir_all(path).map_err(|e| {
        error!("Failed create dir {}: {}", path.display(), e);
        HbinError::IoError(format!(
            "Failed to create directory {}: {}",
            path.display(),
            e
        ))
    })
}

/// Removes a file or symlink. Returns `Ok(false)` when there was nothing to
/// remove.
pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    debug!("Removing file: {}", path.display());
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("File {} already absent.", path.display());
            Ok(false)
        }
        Err(e) => {
            error!("Failed remove file {}: {}", path.display(), e);
            Err(HbinError::from(e))
        }
    }
}

/// Clears a symlink or regular file at `path` so a link can be created there.
/// A real directory is never touched; it is reported as an error instead.
pub fn remove_existing_link_target(path: &Path) -> Result<bool> {
    match path.symlink_metadata() {
        Ok(metadata) => {
            let file_type = metadata.file_type();
            if file_type.is_dir() && !file_type.is_symlink() {
                error!(
                    "Refusing to replace directory {} with a link",
                    path.display()
                );
                return Err(HbinError::IoError(format!(
                    "{} is a directory, not a link; move it away first",
                    path.display()
                )));
            }
            debug!(
                "    Removing existing item at link target: {}",
                path.display()
            );
            match fs::remove_file(path) {
                Ok(()) => Ok(true),
                Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
                Err(e) => {
                    debug!(
                        "    Failed to remove existing item at link target {}: {}",
                        path.display(),
                        e
                    );
                    Err(HbinError::from(e))
                }
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => {
            debug!(
                "    Failed to get metadata for existing item {}: {}",
                path.display(),
                e
            );
            Err(HbinError::from(e))
        }
    }
}

/// Creates a symbolic link. Unix only.
#[cfg(unix)]
pub fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    debug!("Creating symlink {} -> {}", link.display(), target.display());
    std::os::unix::fs::symlink(target, link).map_err(|e| {
        error!(
            "Failed create symlink {} -> {}: {}",
            link.display(),
            target.display(),
            e
        );
        HbinError::from(e)
    })
}

#[cfg(windows)]
pub fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    debug!("Creating symlink {} -> {}", link.display(), target.display());
    std::os::windows::fs::symlink_file(target, link).map_err(|e| {
        error!(
            "Failed create symlink {} -> {}: {}",
            link.display(),
            target.display(),
            e
        );
        HbinError::from(e)
    })
}

/// Reads where a symlink points, resolving relative targets against the
/// directory holding the link. `Ok(None)` if nothing is at `link` or it is not
/// a symlink.
pub fn read_link_target(link: &Path) -> Result<Option<PathBuf>> {
    match fs::read_link(link) {
        Ok(target) => {
            if target.is_relative() {
                let base = link.parent().unwrap_or_else(|| Path::new("."));
                Ok(Some(base.join(target)))
            } else {
                Ok(Some(target))
            }
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => match link.symlink_metadata() {
            Ok(metadata) if !metadata.file_type().is_symlink() => {
                warn!("{} exists but is not a symlink", link.display());
                Ok(None)
            }
            _ => Err(HbinError::IoError(format!(
                "Failed to read link {}: {}",
                link.display(),
                e
            ))),
        },
    }
}

/// Marks a file as executable (0o755). Unix only; a no-op elsewhere.
#[cfg(unix)]
pub fn set_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    debug!("Setting permissions on {}: 755", path.display());
    fs::set_permissions(path, fs::Permissions::from_mode(0o755)).map_err(|e| {
        error!("Failed set permissions on {}: {}", path.display(), e);
        HbinError::from(e)
    })
}

#[cfg(not(unix))]
pub fn set_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Renames `from` to `to`. On failure the source is removed so no staging
/// file is left behind, and the rename error is returned.
pub fn commit_rename(from: &Path, to: &Path) -> Result<()> {
    debug!("Renaming {} -> {}", from.display(), to.display());
    if let Err(e) = fs::rename(from, to) {
        error!(
            "Failed to rename {} to {}: {}",
            from.display(),
            to.display(),
            e
        );
        if let Err(cleanup_err) = fs::remove_file(from) {
            if cleanup_err.kind() != io::ErrorKind::NotFound {
                warn!(
                    "Failed to clean up staging file {}: {}",
                    from.display(),
                    cleanup_err
                );
            }
        }
        return Err(HbinError::IoError(format!(
            "Failed to move {} to {}: {}",
            from.display(),
            to.display(),
            e
        )));
    }
    Ok(())
}

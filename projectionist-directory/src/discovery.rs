//! Registry discovery by walking up the directory tree.

use crate::config::RegistryConfig;
use crate::error::{DirectoryError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Find every registry file that applies to `start`, nearest first.
///
/// A relative `start` is resolved against the current directory. When
/// `start` is a file, the walk begins at its parent directory. Every directory
/// up to the filesystem root that contains `C::FILE_NAME` contributes the
/// path of that file.
///
/// # Errors
///
/// Returns `StartPath` when `start` does not exist, and `Io` when the current
/// directory is needed but unavailable.
pub fn detect<C: RegistryConfig>(start: &Path) -> Result<Vec<PathBuf>> {
    let start = absolute(start)?;
    let metadata = fs::metadata(&start).map_err(|source| DirectoryError::StartPath {
        path: start.clone(),
        source,
    })?;
    let first_dir = if metadata.is_dir() {
        start.as_path()
    } else {
        start.parent().unwrap_or(start.as_path())
    };

    let mut registries = Vec::new();
    for dir in first_dir.ancestors() {
        let candidate = dir.join(C::FILE_NAME);
        if candidate.is_file() {
            trace!("Found registry: {}", candidate.display());
            registries.push(candidate);
        }
    }

    debug!(
        "Discovered {} {} registries from {}",
        registries.len(),
        C::FILE_NAME,
        start.display()
    );
    Ok(registries)
}

/// Resolve `path` against the current directory when it is relative.
pub(crate) fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()?;
    if path.as_os_str().is_empty() {
        Ok(cwd)
    } else {
        Ok(cwd.join(path))
    }
}

//! Recursive search for compressible files under an asset root.

use pc_core::config::PrecompressConfig;
use pc_core::error::{DiscoveryError, DiscoveryErrorKind};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Absolute paths of every regular file under `root` whose suffix is in
/// `config.extensions`. Hidden entries are included. Order is unspecified.
pub async fn discover(root: &Path, config: &PrecompressConfig) -> Result<Vec<PathBuf>, DiscoveryError> {
    let root = std::path::absolute(root).map_err(|e| DiscoveryError::unreadable(root, root, e))?;
    let meta = match fs::metadata(&root).await {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(DiscoveryError::new(root, DiscoveryErrorKind::NotFound));
        }
        Err(e) => return Err(DiscoveryError::unreadable(&root, &root, e)),
    };
    if !meta.is_dir() {
        return Err(DiscoveryError::new(root, DiscoveryErrorKind::NotADirectory));
    }

    let mut files = Vec::new();
    walk(&root, &root, config, &mut files).await?;
    tracing::debug!(root = %root.display(), matched = files.len(), "discovery finished");
    Ok(files)
}

#[async_recursion::async_recursion]
async fn walk(
    root: &Path,
    current: &Path,
    config: &PrecompressConfig,
    out: &mut Vec<PathBuf>,
) -> Result<(), DiscoveryError> {
    let mut rd = fs::read_dir(current)
        .await
        .map_err(|e| DiscoveryError::unreadable(root, current, e))?;
    while let Some(entry) = rd
        .next_entry()
        .await
        .map_err(|e| DiscoveryError::unreadable(root, current, e))?
    {
        let path = entry.path();
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| DiscoveryError::unreadable(root, &path, e))?;
        if file_type.is_dir() {
            walk(root, &path, config, out).await?;
        } else if config.matches(&path) && is_regular_file(&path, file_type).await {
            out.push(path);
        }
    }
    Ok(())
}

/// Symlinks count when they resolve to a regular file. Dangling links do not.
async fn is_regular_file(path: &Path, file_type: std::fs::FileType) -> bool {
    if file_type.is_file() {
        return true;
    }
    if file_type.is_symlink() {
        return fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false);
    }
    false
}

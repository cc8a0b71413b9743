//! File system utilities for bundling.
//!
//! Thin wrappers over `tokio::fs` that attach the offending path to every
//! error and make directory creation and removal idempotent.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path.
///
/// Succeeds if the directory already exists.
pub async fn create_dir_all(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e).fs_context("removing directory", path),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist, or if fewer
/// bytes were written than the source holds. Copying a file onto itself is
/// a no-op.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    let meta = fs::metadata(from)
        .await
        .fs_context("reading metadata of", from)?;
    if !meta.is_file() {
        return Err(Error::GenericError(format!(
            "{} is not a file",
            from.display()
        )));
    }
    if same_file(from, to).await {
        log::debug!("{} is already in place", to.display());
        return Ok(());
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating directory", dest_dir)?;
    }

    let copied = fs::copy(from, to).await.fs_context("copying to", to)?;
    if copied != meta.len() {
        return Err(Error::Fs {
            context: "short copy to",
            path: to.to_path_buf(),
            error: io::Error::new(
                io::ErrorKind::WriteZero,
                format!("wrote {copied} of {} bytes", meta.len()),
            ),
        });
    }
    Ok(())
}

/// Whether both paths name the same existing file.
///
/// `fs::copy` truncates the destination before reading the source.
async fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a).await, fs::canonicalize(b).await) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Writes `contents` to `path` and marks it executable (`0o755` on Unix).
pub async fn write_executable(path: &Path, contents: &[u8]) -> Result<()> {
    fs::write(path, contents)
        .await
        .fs_context("writing executable", path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, std::fs::Permissions::from_mode(0o755))
            .await
            .fs_context("failed to set executable permissions", path)?;
    }
    Ok(())
}

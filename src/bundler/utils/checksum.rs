//! SHA-256 digests for copied files and finished bundles.
//!
//! Single files are hashed in 8KB chunks. Directory trees (the `.app` bundle)
//! are hashed over every file's relative path and content in sorted order, so
//! the result is deterministic.

use crate::bundler::error::{Error, ErrorExt, Result};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

/// Hex-encoded SHA-256 of a single file.
pub async fn file_sha256(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Fails with [`Error::ChecksumMismatch`] unless `copy` holds the same bytes as `source`.
pub async fn verify_copy(source: &Path, copy: &Path) -> Result<String> {
    let expected = file_sha256(source).await?;
    let actual = file_sha256(copy).await?;
    if expected != actual {
        return Err(Error::ChecksumMismatch {
            path: copy.to_path_buf(),
            expected,
            actual,
        });
    }
    Ok(actual)
}

/// Digest and total byte size of a directory tree.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TreeDigest {
    /// Hex-encoded SHA-256 over relative paths and contents.
    pub sha256: String,
    /// Sum of all regular file sizes in bytes.
    pub size: u64,
}

/// Hashes every regular file below `dir` in path order.
pub async fn tree_sha256(dir: &Path) -> Result<TreeDigest> {
    let mut entries = Vec::new();
    for entry in walkdir::WalkDir::new(dir).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() {
            entries.push(entry.into_path());
        }
    }
    entries.sort();

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];
    let mut size = 0u64;

    for path in entries {
        if let Ok(rel_path) = path.strip_prefix(dir) {
            hasher.update(rel_path.to_string_lossy().as_bytes());
        }

        let mut file = tokio::fs::File::open(&path)
            .await
            .fs_context("opening file for hashing", &path)?;
        loop {
            let n = file
                .read(&mut buffer)
                .await
                .fs_context("reading file for hash calculation", &path)?;
            if n == 0 {
                break;
            }
            size += n as u64;
            hasher.update(&buffer[..n]);
        }
    }

    Ok(TreeDigest {
        sha256: hex::encode(hasher.finalize()),
        size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_sha256_known_value() {
        let temp = TempDir::new().expect("temp dir");
        let path = temp.path().join("abc");
        std::fs::write(&path, b"abc").expect("write");
        assert_eq!(
            file_sha256(&path).await.expect("hash"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_verify_copy_detects_difference() {
        let temp = TempDir::new().expect("temp dir");
        let a = temp.path().join("a");
        let b = temp.path().join("b");
        std::fs::write(&a, b"same").expect("write");
        std::fs::write(&b, b"same").expect("write");
        verify_copy(&a, &b).await.expect("equal copies");

        std::fs::write(&b, b"different").expect("write");
        let err = verify_copy(&a, &b).await.unwrap_err();
        assert!(matches!(err, Error::ChecksumMismatch { .. }));
    }

    #[tokio::test]
    async fn test_tree_sha256_is_deterministic_and_sized() {
        let temp = TempDir::new().expect("temp dir");
        std::fs::create_dir_all(temp.path().join("x/y")).expect("mkdir");
        std::fs::write(temp.path().join("x/y/one"), b"12345").expect("write");
        std::fs::write(temp.path().join("two"), b"678").expect("write");

        let first = tree_sha256(temp.path()).await.expect("hash");
        let second = tree_sha256(temp.path()).await.expect("hash");
        assert_eq!(first, second);
        assert_eq!(first.size, 8);
    }
}

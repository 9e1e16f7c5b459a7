//! Remote cache collaborator
//!
//! Restores and saves a single file keyed by (tool, version, architecture).
//! The hosted cache service is reached through the [`RemoteCache`] trait;
//! the directory-backed implementation covers runners that mount a shared
//! cache volume, and disables itself when `$EARTHBUILD_CACHE_DIR` is unset.

#[cfg(test)]
use mockall::automock;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

/// Trait for the persistent cross-run cache
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait RemoteCache: Send + Sync {
    /// Try to restore a previously saved file to `path`.
    ///
    /// Returns whether the key was found.
    async fn restore(&self, path: &Path, key: &str) -> Result<bool>;

    /// Save `path` under `key` for future runs.
    async fn save(&self, path: &Path, key: &str) -> Result<()>;
}

/// Cache backed by a shared directory
pub struct DirCache {
    root: Option<PathBuf>,
}

impl DirCache {
    /// Cache rooted at the directory named by `$EARTHBUILD_CACHE_DIR`, if set.
    pub fn from_env() -> Self {
        Self {
            root: std::env::var_os("EARTHBUILD_CACHE_DIR").map(PathBuf::from),
        }
    }

    /// Cache rooted at an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}

#[async_trait::async_trait]
impl RemoteCache for DirCache {
    async fn restore(&self, path: &Path, key: &str) -> Result<bool> {
        let Some(root) = self.root.as_ref() else {
            return Ok(false);
        };

        let entry = root.join(key);
        if !entry.is_file() {
            debug!("Remote cache miss for {key}");
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        tokio::fs::copy(&entry, path)
            .await
            .with_context(|| format!("Failed to restore {}", path.display()))?;

        info!("Restored {} from cache key {key}", path.display());
        Ok(true)
    }

    async fn save(&self, path: &Path, key: &str) -> Result<()> {
        let Some(root) = self.root.as_ref() else {
            debug!("Remote cache disabled, not saving {key}");
            return Ok(());
        };

        tokio::fs::create_dir_all(root)
            .await
            .with_context(|| format!("Failed to create {}", root.display()))?;
        tokio::fs::copy(path, root.join(key))
            .await
            .with_context(|| format!("Failed to save cache key {key}"))?;

        info!("Saved cache key {key}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn save_then_restore_round_trips() {
        let cache_root = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();
        let saved = work.path().join("earthbuild");
        std::fs::write(&saved, b"binary").unwrap();

        let cache = DirCache::new(cache_root.path());
        cache.save(&saved, "earthbuild-0.8.16-x86_64").await.unwrap();

        let restored = work.path().join("restored/earthbuild");
        let hit = cache
            .restore(&restored, "earthbuild-0.8.16-x86_64")
            .await
            .unwrap();

        assert!(hit);
        assert_eq!(std::fs::read(&restored).unwrap(), b"binary");
    }

    #[tokio::test]
    async fn restore_misses_for_unknown_key() {
        let cache_root = TempDir::new().unwrap();
        let work = TempDir::new().unwrap();

        let cache = DirCache::new(cache_root.path());
        let hit = cache
            .restore(&work.path().join("earthbuild"), "earthbuild-9.9.9-x86_64")
            .await
            .unwrap();

        assert!(!hit);
    }

    #[tokio::test]
    async fn disabled_cache_misses_and_skips_save() {
        let work = TempDir::new().unwrap();
        let saved = work.path().join("earthbuild");
        std::fs::write(&saved, b"binary").unwrap();

        let cache = DirCache { root: None };
        cache.save(&saved, "earthbuild-0.8.16-x86_64").await.unwrap();
        let hit = cache
            .restore(&work.path().join("out"), "earthbuild-0.8.16-x86_64")
            .await
            .unwrap();

        assert!(!hit);
    }
}

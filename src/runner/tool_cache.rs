//! Local tool cache in the runner's layout
//!
//! Cached tools live under `<root>/<name>/<version>/<arch>/`, with a
//! sibling `<arch>.complete` marker written once the copy has finished.
//! The root comes from `$RUNNER_TOOL_CACHE`; without it the cache is
//! disabled and every lookup misses.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

pub struct ToolCache {
    root: Option<PathBuf>,
}

impl ToolCache {
    /// Cache rooted at the runner-provided directory, if any.
    pub fn from_env() -> Self {
        Self {
            root: std::env::var_os("RUNNER_TOOL_CACHE").map(PathBuf::from),
        }
    }

    /// Cache rooted at an explicit directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// Look up a completed cache entry, returning its directory.
    ///
    /// An entry without its `.complete` marker is treated as a miss: a
    /// previous run may have died mid-copy.
    pub fn find(&self, name: &str, version: &str, arch: &str) -> Option<PathBuf> {
        let root = self.root.as_ref()?;
        let entry = root.join(name).join(version).join(arch);
        let marker = root.join(name).join(version).join(format!("{arch}.complete"));

        if entry.is_dir() && marker.is_file() {
            debug!("Tool cache hit: {}", entry.display());
            Some(entry)
        } else {
            debug!("Tool cache miss for {name} {version} {arch}");
            None
        }
    }

    /// Copy `source_dir` into the cache and mark the entry complete.
    ///
    /// Returns the cached directory, or `None` when the cache is disabled.
    pub fn store(
        &self,
        source_dir: &Path,
        name: &str,
        version: &str,
        arch: &str,
    ) -> Result<Option<PathBuf>> {
        let Some(root) = self.root.as_ref() else {
            debug!("Tool cache disabled, not storing {name} {version}");
            return Ok(None);
        };

        let entry = root.join(name).join(version).join(arch);
        if entry.exists() {
            std::fs::remove_dir_all(&entry)
                .with_context(|| format!("Failed to clear stale entry {}", entry.display()))?;
        }
        std::fs::create_dir_all(&entry)
            .with_context(|| format!("Failed to create {}", entry.display()))?;
        copy_dir(source_dir, &entry)?;

        let marker = root.join(name).join(version).join(format!("{arch}.complete"));
        std::fs::write(&marker, "")
            .with_context(|| format!("Failed to write {}", marker.display()))?;

        info!("Cached {name} {version} at {}", entry.display());
        Ok(Some(entry))
    }
}

fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    for entry in std::fs::read_dir(from)
        .with_context(|| format!("Failed to read {}", from.display()))?
    {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            std::fs::create_dir_all(&target)?;
            copy_dir(&entry.path(), &target)?;
        } else {
            std::fs::copy(entry.path(), &target)
                .with_context(|| format!("Failed to copy to {}", target.display()))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn store_then_find_round_trips() {
        let cache_root = TempDir::new().unwrap();
        let source = TempDir::new().unwrap();
        std::fs::write(source.path().join("earthbuild"), b"binary").unwrap();

        let cache = ToolCache::new(cache_root.path());
        let stored = cache
            .store(source.path(), "earthbuild", "0.8.16", "x86_64")
            .unwrap()
            .unwrap();

        let found = cache.find("earthbuild", "0.8.16", "x86_64").unwrap();
        assert_eq!(found, stored);
        assert_eq!(
            std::fs::read(found.join("earthbuild")).unwrap(),
            b"binary"
        );
    }

    #[test]
    fn find_misses_without_complete_marker() {
        let cache_root = TempDir::new().unwrap();
        let entry = cache_root.path().join("earthbuild/0.8.16/x86_64");
        std::fs::create_dir_all(&entry).unwrap();

        let cache = ToolCache::new(cache_root.path());
        assert!(cache.find("earthbuild", "0.8.16", "x86_64").is_none());
    }

    #[test]
    fn find_misses_on_other_version_or_arch() {
        let cache_root = TempDir::new().unwrap();
        let source = TempDir::new().unwrap();
        std::fs::write(source.path().join("earthbuild"), b"binary").unwrap();

        let cache = ToolCache::new(cache_root.path());
        cache
            .store(source.path(), "earthbuild", "0.8.16", "x86_64")
            .unwrap();

        assert!(cache.find("earthbuild", "0.8.17", "x86_64").is_none());
        assert!(cache.find("earthbuild", "0.8.16", "aarch64").is_none());
    }

    #[test]
    fn disabled_cache_misses_and_skips_store() {
        let source = TempDir::new().unwrap();
        let cache = ToolCache { root: None };

        assert!(cache.find("earthbuild", "0.8.16", "x86_64").is_none());
        assert!(cache
            .store(source.path(), "earthbuild", "0.8.16", "x86_64")
            .unwrap()
            .is_none());
    }
}

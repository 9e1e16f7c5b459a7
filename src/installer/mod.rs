//! Installer orchestration
//!
//! Resolves the requested version, then works through an ordered list of
//! acquisition strategies (tool cache, remote cache, direct download),
//! stopping at the first one that produces a usable binary.

pub mod download;
pub mod platform;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use semver::Version;
use tracing::{debug, info};

use crate::config::{self, Inputs};
use crate::runner::cache::{DirCache, RemoteCache};
use crate::runner::commands;
use crate::runner::tool_cache::ToolCache;
use crate::version::resolver::VersionResolver;
use crate::version::source::{GitHubReleases, ReleaseSource};
use crate::version::types::ResolvedVersion;

/// Acquisition strategies, in the order they are tried.
const STRATEGIES: [Strategy; 3] = [Strategy::ToolCache, Strategy::RemoteCache, Strategy::Download];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    /// Completed install left by a previous run on this runner.
    ToolCache,
    /// Binary saved by a previous run, possibly on another runner.
    RemoteCache,
    /// Direct download from the release assets.
    Download,
}

/// Run the installer against the real runner environment.
///
/// Every failure is caught here and reported through the runner's failure
/// channel; nothing escapes.
pub async fn install(inputs: Inputs) -> ExitCode {
    let result = match Installer::from_env(inputs) {
        Ok(installer) => installer.run().await,
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            commands::set_failed(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

pub struct Installer<S, C> {
    inputs: Inputs,
    resolver: VersionResolver<S>,
    tool_cache: ToolCache,
    remote_cache: C,
    client: reqwest::Client,
    download_base: String,
    home: PathBuf,
    host_arch: &'static str,
}

impl Installer<GitHubReleases, DirCache> {
    /// Installer wired to the real runner environment.
    pub fn from_env(inputs: Inputs) -> Result<Self> {
        let home = dirs::home_dir().context("Could not determine home directory")?;
        Ok(Self::new(inputs, GitHubReleases::default(), DirCache::from_env(), home)
            .with_tool_cache(ToolCache::from_env()))
    }
}

impl<S: ReleaseSource, C: RemoteCache> Installer<S, C> {
    pub fn new(inputs: Inputs, source: S, remote_cache: C, home: impl Into<PathBuf>) -> Self {
        Self {
            inputs,
            resolver: VersionResolver::new(source),
            tool_cache: ToolCache::from_env(),
            remote_cache,
            client: reqwest::Client::builder()
                .user_agent("setup-earthbuild")
                .build()
                .expect("Failed to create HTTP client"),
            download_base: config::DEFAULT_DOWNLOAD_BASE_URL.to_string(),
            home: home.into(),
            host_arch: std::env::consts::ARCH,
        }
    }

    pub fn with_tool_cache(mut self, tool_cache: ToolCache) -> Self {
        self.tool_cache = tool_cache;
        self
    }

    pub fn with_download_base(mut self, base: impl Into<String>) -> Self {
        self.download_base = base.into();
        self
    }

    pub fn with_host_arch(mut self, arch: &'static str) -> Self {
        self.host_arch = arch;
        self
    }

    pub async fn run(&self) -> Result<()> {
        let release_platform = platform::release_platform(std::env::consts::OS)?;
        let release_arch = platform::release_arch(self.host_arch);

        let resolved = self.resolve_version().await?;
        info!("Matched version: {}", resolved.tag_name);

        let install_dir = config::install_dir(&self.home);
        let install_path = install_dir.join(config::binary_name());
        info!("Install destination is {}", install_dir.display());

        for strategy in STRATEGIES {
            let satisfied = match strategy {
                Strategy::ToolCache => self.try_tool_cache(&resolved)?,
                Strategy::RemoteCache => {
                    self.try_remote_cache(&resolved, &install_dir, &install_path)
                        .await?
                }
                Strategy::Download => {
                    self.download(&resolved, release_platform, release_arch, &install_dir, &install_path)
                        .await?;
                    true
                }
            };
            if satisfied {
                debug!("Install satisfied by {strategy:?}");
                break;
            }
        }

        Ok(())
    }

    /// Resolve the configured specifier to a concrete release tag.
    ///
    /// A bare fully-specified version needs no release listing at all.
    async fn resolve_version(&self) -> Result<ResolvedVersion> {
        let requested = self.inputs.version_spec.trim();

        if let Ok(version) = Version::parse(requested) {
            info!("Using provided strict version {requested}");
            return Ok(ResolvedVersion {
                tag_name: format!("v{requested}"),
                version,
            });
        }

        info!(
            "Configured range: {requested}; allow prerelease: {}",
            self.inputs.prerelease
        );
        let resolved = self
            .resolver
            .resolve(requested, self.inputs.prerelease)
            .await?;
        Ok(resolved)
    }

    /// A completed install from a previous run is registered as-is.
    fn try_tool_cache(&self, resolved: &ResolvedVersion) -> Result<bool> {
        match self
            .tool_cache
            .find(config::TOOL_NAME, &resolved.clean(), self.host_arch)
        {
            Some(dir) => {
                commands::add_path(&dir)?;
                info!("Using {} from tool cache ({})", config::TOOL_NAME, dir.display());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Restore from the remote cache into the install directory.
    ///
    /// The install directory goes on the search path before the attempt so
    /// that both this strategy and the download fallback are covered.
    async fn try_remote_cache(
        &self,
        resolved: &ResolvedVersion,
        install_dir: &Path,
        install_path: &Path,
    ) -> Result<bool> {
        commands::add_path(install_dir)?;

        let key = cache_key(&resolved.clean(), self.host_arch);
        if self.remote_cache.restore(install_path, &key).await? {
            download::make_executable(install_path)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Download the release asset and populate both cache layers.
    async fn download(
        &self,
        resolved: &ResolvedVersion,
        release_platform: &str,
        release_arch: &str,
        install_dir: &Path,
        install_path: &Path,
    ) -> Result<()> {
        if install_dir.exists() {
            tokio::fs::remove_dir_all(install_dir)
                .await
                .with_context(|| format!("Failed to delete pre-existing {}", install_dir.display()))?;
            info!("Deleted pre-existing {}", install_dir.display());
        }

        let url = format!(
            "{}/{}/{}-{}-{}{}",
            self.download_base,
            resolved.tag_name,
            config::TOOL_NAME,
            release_platform,
            release_arch,
            std::env::consts::EXE_SUFFIX
        );
        download::download_to(&self.client, &url, install_path).await?;
        download::make_executable(install_path)?;

        self.tool_cache
            .store(install_dir, config::TOOL_NAME, &resolved.clean(), self.host_arch)?;
        self.remote_cache
            .save(install_path, &cache_key(&resolved.clean(), self.host_arch))
            .await?;

        // The installed tool renders colors when this is set.
        commands::export_variable("FORCE_COLOR", "1")?;
        Ok(())
    }
}

/// Composite key addressing both cache layers.
fn cache_key(version: &str, arch: &str) -> String {
    format!("{}-{}-{}", config::TOOL_NAME, version, arch)
}

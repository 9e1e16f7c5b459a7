use clap::Parser;
use std::path::{Path, PathBuf};

// =============================================================================
// Release coordinates
// =============================================================================

/// Name of the installed binary, and of entries in both cache layers.
pub const TOOL_NAME: &str = "earthbuild";

/// GitHub repository that publishes earthbuild releases.
pub const REPO_OWNER: &str = "EarthBuild";
pub const REPO_NAME: &str = "earthbuild";

/// Default base URL for the GitHub API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Base URL for direct release-asset downloads.
pub const DEFAULT_DOWNLOAD_BASE_URL: &str =
    "https://github.com/EarthBuild/earthbuild/releases/download";

/// Version range used when no specifier is configured.
pub const DEFAULT_VERSION_RANGE: &str = "latest";

/// Runner inputs
///
/// The version specifier and prerelease gate arrive either as CLI arguments
/// or as `INPUT_*` environment variables, the convention the runner uses to
/// pass step configuration.
#[derive(Debug, Clone, Parser)]
#[command(name = "setup-earthbuild")]
#[command(version, about = "Install the earthbuild CLI on a CI runner")]
pub struct Inputs {
    /// Version specifier: "latest", an exact version, or a semver range
    #[arg(long, env = "INPUT_VERSION", default_value = DEFAULT_VERSION_RANGE)]
    pub version_spec: String,

    /// Allow prerelease versions to satisfy the specifier
    #[arg(long, env = "INPUT_PRERELEASE", default_value_t = false)]
    pub prerelease: bool,
}

/// Returns the directory the binary is installed into: `<home>/.earthbuild/bin`.
pub fn install_dir(home: &Path) -> PathBuf {
    home.join(format!(".{TOOL_NAME}")).join("bin")
}

/// Returns the name of the installed binary, with `.exe` on Windows.
pub fn binary_name() -> String {
    format!("{TOOL_NAME}{}", std::env::consts::EXE_SUFFIX)
}

//! Workflow command emission
//!
//! The runner consumes state changes through the files named by
//! `$GITHUB_PATH` and `$GITHUB_ENV`; failure is signaled with an
//! `::error::` line on stdout. When the files are not present the legacy
//! stdout commands are emitted instead, so the tool stays usable on older
//! runners.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Prepend `dir` to the runner's executable search path.
pub fn add_path(dir: &Path) -> Result<()> {
    info!("Adding {} to PATH", dir.display());
    match std::env::var_os("GITHUB_PATH") {
        Some(file) => append_line(Path::new(&file), &dir.display().to_string()),
        None => {
            println!("::add-path::{}", dir.display());
            Ok(())
        }
    }
}

/// Export an environment variable to subsequent workflow steps.
pub fn export_variable(name: &str, value: &str) -> Result<()> {
    match std::env::var_os("GITHUB_ENV") {
        Some(file) => append_line(Path::new(&file), &format!("{name}={value}")),
        None => {
            println!("::set-env name={name}::{value}");
            Ok(())
        }
    }
}

/// Report a fatal failure to the runner.
///
/// Only emits the annotation; the caller owns the exit status.
pub fn set_failed(message: &str) {
    println!("::error::{message}");
}

fn append_line(file: &Path, line: &str) -> Result<()> {
    let mut f = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    writeln!(f, "{line}").with_context(|| format!("Failed to write {}", file.display()))?;
    Ok(())
}

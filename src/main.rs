use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use setup_earthbuild::config::Inputs;
use setup_earthbuild::installer;
use setup_earthbuild::runner::commands;

fn main() -> ExitCode {
    let inputs = Inputs::parse();

    // stdout carries workflow commands, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime.block_on(installer::install(inputs)),
        Err(e) => {
            commands::set_failed(&format!("Failed to start runtime: {e}"));
            ExitCode::FAILURE
        }
    }
}

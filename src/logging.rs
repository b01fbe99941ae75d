//! tracing subscriber setup

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Where log output goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget<'a> {
    /// Line-oriented commands
    Stderr,
    /// Append to a file (the TUI owns the terminal)
    File(&'a Path),
    /// No subscriber at all
    Disabled,
}

/// Choose the log target for a run
pub fn target_for(interactive: bool, log_file: Option<&Path>) -> LogTarget<'_> {
    match (log_file, interactive) {
        (Some(path), _) => LogTarget::File(path),
        (None, false) => LogTarget::Stderr,
        (None, true) => LogTarget::Disabled,
    }
}

/// Default filter directive when RUST_LOG is unset
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "pokedex=debug"
    } else {
        "pokedex=warn"
    }
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `--debug`.
pub fn init(debug: bool, target: LogTarget<'_>) -> anyhow::Result<()> {
    let filter = || {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)))
    };

    match target {
        LogTarget::Disabled => Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_target(false)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e)),
        LogTarget::File(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|e| anyhow::anyhow!("failed to install logger: {}", e))
        }
    }
}

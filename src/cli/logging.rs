//! Logging setup
//!
//! Events go to stderr through `tracing-subscriber`. `RUST_LOG` takes
//! precedence over the level chosen on the command line.

use std::io::IsTerminal;
use tracing::Level;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

/// Install the global subscriber. Later calls are ignored.
pub fn init(level: Level) {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .try_init();
}

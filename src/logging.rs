//! Logging setup.
//!
//! The game owns the terminal in raw mode, so log lines must never reach
//! stdout or stderr; they are appended to a file instead.

use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Target};

use crate::error::GameError;

/// Install an `env_logger` writing to `path`.  The level defaults to `info`
/// and `RUST_LOG` overrides it.
pub fn init_to_file(path: &Path) -> Result<(), GameError> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(|e| GameError::Logging(e.to_string()))
}

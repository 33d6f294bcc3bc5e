//! Top-level error type returned from `main`.

use crate::assets::AssetError;
use crate::config::ConfigError;

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Terminal or file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A mandatory sprite could not be loaded
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// The config file is unreadable or invalid
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// The logger could not be installed
    #[error("logging setup failed: {0}")]
    Logging(String),
}

//! Errors surfaced by configuration loading
//!
//! Runtime input handling never fails; out-of-range values are clamped and
//! malformed events are dropped.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for this schema
    #[error("invalid controls config: {0}")]
    Toml(#[from] toml::de::Error),

    /// Config could not be written back out
    #[error("failed to serialize controls config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

use std::fmt;
use std::path::PathBuf;

use crate::slots::MAX_PROFILES;

/// Which profile list a slot refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    Grounded,
    Jumping,
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileKind::Grounded => f.write_str("grounded"),
            ProfileKind::Jumping => f.write_str("jumping"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CharacterError {
    /// Profile list longer than the slot field can address
    #[error("{kind} profile list has {count} entries, at most {} fit", MAX_PROFILES)]
    TooManyProfiles { kind: ProfileKind, count: usize },

    /// Requested a state whose slot has no profile
    #[error("no {kind} profile in slot {slot}")]
    MissingProfile { kind: ProfileKind, slot: u8 },

    /// Custom state id outside 1-63
    #[error("custom state {0} is outside 1-63")]
    InvalidCustomState(u8),

    /// Config file could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for this schema
    #[error("invalid character config: {0}")]
    Toml(#[from] toml::de::Error),
}

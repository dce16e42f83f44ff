//! Error types shared across the library.

use thiserror::Error;

use crate::editor::FormError;

#[derive(Error, Debug)]
pub enum KeyTaskError {
    /// Reading or writing a file failed
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// JSON encoding/decoding failed
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The hotkey facility could not parse a descriptor
    #[error("invalid hotkey '{descriptor}': {reason}")]
    InvalidHotkey { descriptor: String, reason: String },

    /// The hotkey facility refused a registration or release
    #[error("hotkey error for '{descriptor}': {reason}")]
    Hotkey { descriptor: String, reason: String },

    /// A shell command could not be spawned
    #[error("failed to launch '{command}': {source}")]
    Launch {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The scheduler refused the priority change
    #[error("failed to raise process priority: {0}")]
    Priority(String),

    /// Registry access failed
    #[error("registry error: {0}")]
    Registry(String),

    /// Form input rejected before any mutation
    #[error(transparent)]
    Validation(#[from] FormError),

    /// Feature only exists on another platform
    #[error("{0} is not supported on this platform")]
    Unsupported(&'static str),
}

pub type Result<T> = std::result::Result<T, KeyTaskError>;

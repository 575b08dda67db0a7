//! Error types for the infusion_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for infusion_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Weight or dose rate was not strictly positive
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Infusion type outside Induction/Standard/Enhanced
    #[error("Unknown infusion type: {0:?} (expected induction, standard or enhanced)")]
    UnknownInfusionType(String),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

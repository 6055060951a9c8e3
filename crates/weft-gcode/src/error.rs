//! Error types for printer profiles.

use thiserror::Error;

/// Errors raised while selecting or loading a printer profile.
#[derive(Error, Debug)]
pub enum ProfileError {
    /// No built-in profile has this name.
    #[error("unknown printer '{0}'")]
    UnknownPrinter(String),

    /// A TOML profile could not be parsed.
    #[error("invalid printer profile: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for profile operations.
pub type Result<T> = std::result::Result<T, ProfileError>;

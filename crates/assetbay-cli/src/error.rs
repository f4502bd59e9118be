//! CLI-specific error types and exit-code mappings.

use assetbay_core::StorefrontError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Entitlement denied or rate limited - expected, user-facing.
    #[error("{0}")]
    Entitlement(String),

    /// Authentication required.
    #[error("{0}")]
    Auth(String),

    /// Network or remote-service failure.
    #[error("{0}")]
    Network(String),

    /// Argument parsing or validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: sysexits.h categories
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Entitlement(_) => 1,
            Self::Arguments(_) => 2, // EX_USAGE
            Self::Network(_) => 69,  // EX_UNAVAILABLE
            Self::Io(_) => 74,       // EX_IOERR
            Self::Auth(_) => 77,     // EX_NOPERM
            Self::Config(_) => 78,   // EX_CONFIG
        }
    }
}

impl From<StorefrontError> for CliError {
    fn from(err: StorefrontError) -> Self {
        match &err {
            StorefrontError::AuthRequired => Self::Auth(err.to_string()),
            StorefrontError::EntitlementDenied { .. } | StorefrontError::RateLimited { .. } => {
                Self::Entitlement(err.to_string())
            }
            StorefrontError::Configuration { .. } => Self::Config(err.to_string()),
            StorefrontError::AssetNotFound { .. }
            | StorefrontError::Network { .. }
            | StorefrontError::InvalidResponse { .. } => Self::Network(err.to_string()),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

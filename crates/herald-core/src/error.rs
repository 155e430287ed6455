//! Error types for herald.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for command construction, registration and dispatch.
///
/// Authorization denial is not represented here: a denied invocation replies
/// to the user and completes normally.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum HeraldError {
    /// Option kind string outside the supported set
    #[error("Unknown option type: '{kind}'")]
    UnknownOptionKind { kind: String },

    /// No command registered under this name
    #[error("Unknown command: '{name}'")]
    UnknownCommand { name: String },

    /// A command with this name is already registered
    #[error("Duplicate command: '{name}'")]
    DuplicateCommand { name: String },

    /// Serialized definition violates platform limits
    #[error("Invalid definition for command '{command}': {reason}")]
    InvalidDefinition { command: String, reason: String },

    /// Failure talking to the platform through an interaction (reply, fetch)
    #[error("Interaction error: {0}")]
    Interaction(String),

    /// The role oracle failed to answer
    #[error("Authorization error: {0}")]
    Authorization(String),

    /// Business logic inside a command handler failed
    #[error("Handler error: {0}")]
    Handler(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl HeraldError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an UnknownOptionKind error
    pub fn unknown_option_kind(kind: impl Into<String>) -> Self {
        Self::UnknownOptionKind { kind: kind.into() }
    }

    /// Creates an UnknownCommand error
    pub fn unknown_command(name: impl Into<String>) -> Self {
        Self::UnknownCommand { name: name.into() }
    }

    /// Creates a DuplicateCommand error
    pub fn duplicate_command(name: impl Into<String>) -> Self {
        Self::DuplicateCommand { name: name.into() }
    }

    /// Creates an InvalidDefinition error
    pub fn invalid_definition(command: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            command: command.into(),
            reason: reason.into(),
        }
    }

    /// Creates an Interaction error
    pub fn interaction(message: impl Into<String>) -> Self {
        Self::Interaction(message.into())
    }

    /// Creates an Authorization error
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::Authorization(message.into())
    }

    /// Creates a Handler error
    pub fn handler(message: impl Into<String>) -> Self {
        Self::Handler(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an UnknownOptionKind error
    pub fn is_unknown_option_kind(&self) -> bool {
        matches!(self, Self::UnknownOptionKind { .. })
    }

    /// Check if this is an UnknownCommand error
    pub fn is_unknown_command(&self) -> bool {
        matches!(self, Self::UnknownCommand { .. })
    }

    /// Check if this is a DuplicateCommand error
    pub fn is_duplicate_command(&self) -> bool {
        matches!(self, Self::DuplicateCommand { .. })
    }

    /// Check if this is an InvalidDefinition error
    pub fn is_invalid_definition(&self) -> bool {
        matches!(self, Self::InvalidDefinition { .. })
    }

    /// Check if this is a serialization error
    pub fn is_serialization(&self) -> bool {
        matches!(self, Self::Serialization { .. })
    }

    /// Check if this error was raised while loading the command catalog.
    ///
    /// These are the programming mistakes in the static catalog that must
    /// stop the bot before it connects to the platform.
    pub fn is_catalog_error(&self) -> bool {
        matches!(
            self,
            Self::UnknownOptionKind { .. }
                | Self::DuplicateCommand { .. }
                | Self::InvalidDefinition { .. }
                | Self::Config(_)
        )
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for HeraldError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for HeraldError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for HeraldError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, HeraldError>`.
pub type Result<T> = std::result::Result<T, HeraldError>;

//! Error types for Taledeck
//!
//! Errors are classified by severity so callers can decide between retrying,
//! degrading, and giving up:
//! - **Recoverable**: safe to retry (gateway write hiccups, etc.)
//! - **Degraded**: the feature fails but playback continues
//! - **Fatal**: requires user intervention or a restart
//!
//! The session controller never lets one of these escape to a screen; engine
//! and gateway failures are translated into session state flags, with
//! [`AppError::user_message`] providing the display text.

use std::fmt;
use thiserror::Error;

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// Error can be automatically recovered from
    Recoverable,
    /// Feature degraded but playback can continue
    Degraded,
    /// Critical error requiring restart or user action
    Fatal,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recoverable => write!(f, "Recoverable"),
            Self::Degraded => write!(f, "Degraded"),
            Self::Fatal => write!(f, "Fatal"),
        }
    }
}

/// Main error type for Taledeck
#[derive(Error, Debug)]
pub enum AppError {
    /// Playback engine could not load or control a resource
    #[error("Engine error: {message}")]
    EngineFailure {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Progress database operation failed
    #[error("Database error: {message}")]
    DatabaseError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Record not found in the progress database
    #[error("Record not found: {entity} with {identifier}")]
    RecordNotFound { entity: String, identifier: String },

    /// Entitlement backend could not be reached
    #[error("Entitlement check failed: {message}")]
    EntitlementUnavailable {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid argument provided
    #[error("Invalid argument: {argument} - {reason}")]
    InvalidArgument { argument: String, reason: String },

    /// Invalid configuration
    #[error("Invalid configuration: {setting} = '{value}' ({reason})")]
    InvalidConfiguration {
        setting: String,
        value: String,
        reason: String,
    },

    /// The session controller has shut down
    #[error("Session closed")]
    SessionClosed,

    /// Generic internal error
    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl AppError {
    /// Returns the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // Recoverable - retry is reasonable
            Self::DatabaseError { .. } | Self::EntitlementUnavailable { .. } => {
                ErrorSeverity::Recoverable
            }

            // Fatal - requires user action
            Self::InvalidConfiguration { .. } => ErrorSeverity::Fatal,

            // Everything else degrades a feature but playback state stays sane
            _ => ErrorSeverity::Degraded,
        }
    }

    /// Returns true if this error can be automatically retried
    pub fn is_retryable(&self) -> bool {
        self.severity() == ErrorSeverity::Recoverable
    }

    /// Returns a user-friendly message suitable for display in the UI
    pub fn user_message(&self) -> String {
        match self {
            Self::EngineFailure { .. } => {
                "Cannot play this title right now. Tap to retry.".to_string()
            }
            Self::DatabaseError { .. } | Self::RecordNotFound { .. } => {
                "Could not read your listening progress.".to_string()
            }
            Self::EntitlementUnavailable { .. } => {
                "Could not verify your library. Please check your connection.".to_string()
            }
            Self::InvalidArgument { .. } => "Invalid input provided.".to_string(),
            Self::InvalidConfiguration { setting, .. } => {
                format!("Invalid setting: {}. Please check your configuration.", setting)
            }
            Self::SessionClosed => "Playback has ended.".to_string(),
            Self::InternalError { .. } => "An unexpected error occurred.".to_string(),
        }
    }

    /// Helper to create an engine failure from any error type
    pub fn engine<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::EngineFailure {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Helper to create a database error from any error type
    pub fn database<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::DatabaseError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Helper to create an entitlement error from any error type
    pub fn entitlement<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::EntitlementUnavailable {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Convenience type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;

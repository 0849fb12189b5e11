//! Error codes for the Todos backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//! All codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings that
//! appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the Todos backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Request Validation
    /// One or more fields failed validation
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Todo not found
    TodoNotFound,
    /// General not found error
    NotFound,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Request reached a handler without a transaction in its context
    MissingTransaction,
    /// Request body could not be bound to the entity fields
    BindError,
    /// View template failed to render
    RenderError,
    /// Configuration error
    ConfigError,
    /// Stored data could not be decoded
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::TodoNotFound => "TODO_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::MissingTransaction => "MISSING_TRANSACTION",
            Self::BindError => "BIND_ERROR",
            Self::RenderError => "RENDER_ERROR",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }

    /// Every code, in declaration order.
    pub const ALL: [ErrorCode; 11] = [
        Self::ValidationError,
        Self::BadRequest,
        Self::TodoNotFound,
        Self::NotFound,
        Self::DbError,
        Self::DbUnavailable,
        Self::MissingTransaction,
        Self::BindError,
        Self::RenderError,
        Self::ConfigError,
        Self::DataCorruption,
    ];
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

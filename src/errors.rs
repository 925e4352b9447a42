//! Unified error type for the service.
//!
//! Business logic returns [`Error`] through the crate-wide [`Result`] alias. The
//! HTTP layer maps each variant onto a status code in `api::response`.

use thiserror::Error;

/// All errors produced by configuration, storage, and business logic.
#[derive(Debug, Error)]
pub enum Error {
    /// Startup configuration could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Missing or malformed input. `message` names the offending field.
    #[error("{message}")]
    Validation {
        /// Name of the input field that failed validation
        field: String,
        /// Human-readable description of the problem
        message: String,
    },

    /// No document matches the requested id.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record that was looked up (e.g. "Exam paper")
        entity: &'static str,
        /// The id that had no match
        id: String,
    },

    /// The request is well-formed but a business rule blocks it.
    #[error("{message}")]
    BusinessRule {
        /// Names the specific entity that blocked the operation
        message: String,
    },

    /// Storage-layer failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (socket bind, reading config files).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] on `field`.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a [`Error::NotFound`] keyed by a numeric id.
    #[must_use]
    pub fn not_found(entity: &'static str, id: i64) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

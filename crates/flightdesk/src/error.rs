//! Error types for flightdesk.
//!
//! Registry operations themselves never fail: a rejected submit or a lookup
//! miss is a silent no-op. The errors here cover everything around the
//! registry: loading configuration, reading session input and turning user
//! text into commands.

use thiserror::Error;

/// The main error type for flightdesk operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === Input Errors ===
    /// A line of session input could not be understood.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of what was wrong with the input.
        message: String,
    },

    /// A draft field name was not recognized.
    #[error("unknown field '{name}' (expected flightNumber, destination, departureTime or status)")]
    UnknownField {
        /// The name that was given.
        name: String,
    },

    /// A status value is outside the fixed set.
    #[error("unknown status '{value}' (expected On Time, Delayed or Cancelled)")]
    InvalidStatus {
        /// The value that was given.
        value: String,
    },

    /// An input error on a given line of a session script.
    #[error("line {line}: {source}")]
    Script {
        /// One-based line number.
        line: usize,
        /// What went wrong on that line.
        #[source]
        source: Box<Error>,
    },

    // === I/O Errors ===
    /// File system or terminal operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for flightdesk operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new invalid input error.
    #[must_use]
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Create a new unknown field error.
    #[must_use]
    pub fn unknown_field(name: impl Into<String>) -> Self {
        Self::UnknownField { name: name.into() }
    }

    /// Create a new invalid status error.
    #[must_use]
    pub fn invalid_status(value: impl Into<String>) -> Self {
        Self::InvalidStatus {
            value: value.into(),
        }
    }

    /// Check if this error was caused by bad user input.
    ///
    /// Input errors are reported and the session carries on; anything else
    /// ends the session.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. } | Self::UnknownField { .. } | Self::InvalidStatus { .. }
        )
    }
}

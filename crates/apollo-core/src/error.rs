//! Error types for apollo-gateway.

use thiserror::Error;

/// Result type alias using apollo-gateway's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for apollo-gateway operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed global identifier
    #[error("Unable to decode global id: {0}")]
    Decode(String),

    /// Backend answered with a non-2xx status
    #[error("Backend returned {status}: {message}")]
    Backend { status: u16, message: String },

    /// HTTP/network request failed before a response arrived
    #[error("Request error: {0}")]
    Request(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Classification attempted with concepts that still have narrower terms
    #[error("Only leaf concepts may classify a document; non-leaf: {}", .0.join(", "))]
    NonLeafConcepts(Vec<String>),

    /// Removing these concepts would leave the document unclassified
    #[error("Document {0} must keep at least one classification")]
    MinimumClassification(String),

    /// Narrower expansion exceeded the depth guard
    #[error("Narrower expansion exceeded {depth} levels; broader/narrower cycle suspected")]
    CycleDetected { depth: usize },

    /// Polymorphic dispatch could not classify a backend payload
    #[error("Unresolvable type: {0}")]
    UnresolvableType(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Stable machine-readable code, surfaced to clients in error extensions.
    pub fn code(&self) -> &'static str {
        match self {
            Error::Decode(_) => "DECODE_ERROR",
            Error::Backend { .. } => "BACKEND_ERROR",
            Error::Request(_) => "REQUEST_ERROR",
            Error::NotFound(_) => "NOT_FOUND",
            Error::NonLeafConcepts(_) => "LEAF_CONSTRAINT_VIOLATION",
            Error::MinimumClassification(_) => "MINIMUM_CLASSIFICATION",
            Error::CycleDetected { .. } => "CYCLE_DETECTED",
            Error::UnresolvableType(_) => "UNRESOLVABLE_TYPE",
            Error::InvalidInput(_) => "INVALID_INPUT",
            Error::Serialization(_) => "SERIALIZATION_ERROR",
            Error::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

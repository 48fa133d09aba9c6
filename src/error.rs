//! Error types for the scheduling engine.
//!
//! The scheduling core is tolerant by default: unknown ids, malformed rule
//! values and garbage clock strings degrade to safe defaults instead of
//! surfacing here. These errors only cover the edges of the system, namely
//! configuration loading, keyed-store I/O and request validation.

use thiserror::Error;

/// The main error type for the scheduling engine.
///
/// # Example
///
/// ```
/// use banquet_schedule::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/labor.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/labor.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A blob could not be read from the keyed store.
    #[error("Failed to read '{key}' from store: {message}")]
    StoreRead {
        /// The blob name.
        key: String,
        /// A description of the I/O failure.
        message: String,
    },

    /// A blob could not be written to the keyed store.
    #[error("Failed to write '{key}' to store: {message}")]
    StoreWrite {
        /// The blob name.
        key: String,
        /// A description of the I/O failure.
        message: String,
    },

    /// A persisted blob exists but does not deserialize.
    #[error("Stored blob '{key}' is corrupt: {message}")]
    StoreCorrupt {
        /// The blob name.
        key: String,
        /// A description of the decode failure.
        message: String,
    },

    /// A persisted blob was written by a newer schema than this build understands.
    #[error("Stored blob '{key}' has version {found}, expected at most {expected}")]
    UnsupportedStoreVersion {
        /// The blob name.
        key: String,
        /// The version found in the blob.
        found: u32,
        /// The newest version this build can read.
        expected: u32,
    },

    /// A week identifier was not an ISO calendar date.
    #[error("Invalid week identifier: {value}")]
    InvalidWeek {
        /// The rejected text.
        value: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

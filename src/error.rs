//! Error types for advex.

use thiserror::Error;

/// Result type for advex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for advex operations.
///
/// Sample-count overflow is deliberately not represented here: requesting
/// more samples than the dataset holds clamps silently (with a warning log)
/// instead of failing the run.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Dataset file missing, unreadable, or malformed.
    #[error("Data load error: {0}")]
    DataLoad(String),

    /// A required field is absent from a record.
    #[error("Record '{record}' is missing required field '{field}'")]
    MissingField {
        /// Identifier of the offending record.
        record: String,
        /// Name of the absent field.
        field: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid run configuration.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid input provided.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a data load error.
    pub fn data_load(msg: impl Into<String>) -> Self {
        Error::DataLoad(msg.into())
    }

    /// Create a missing field error.
    pub fn missing_field(record: impl Into<String>, field: impl Into<String>) -> Self {
        Error::MissingField {
            record: record.into(),
            field: field.into(),
        }
    }

    /// Create a config error.
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

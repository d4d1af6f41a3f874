//! Notification Error Hierarchy
//!
//! Errors here never reach the user: the dispatcher logs them and falls back to
//! built-in texts. They surface only from the explicit loading and accessor APIs.

use std::path::PathBuf;

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Environment configuration failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Filesystem failures while reading a catalog document
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A raised event does not carry the shape its code requires
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// Message catalog could not be located or parsed
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParameterError {
    /// Required key absent from the parameter bag
    #[error("Missing parameter: {key}")]
    Missing { key: String },

    /// Key present but holding a different value shape
    #[error("Parameter {key} expected {expected} but found {found}")]
    TypeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Integer outside the range of the requested enumeration
    #[error("Parameter {key} holds unsupported value {value}")]
    OutOfRange { key: String, value: i64 },
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// None of the locale-specific candidates exist
    #[error("No message catalog found among {candidates} candidates")]
    NotFound { candidates: usize },

    /// Document exists but the INI text is malformed
    #[error("Failed to parse message catalog {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ini::ParseError,
    },

    /// Malformed INI text handed over in memory
    #[error("Malformed message catalog: {0}")]
    Syntax(#[source] ini::ParseError),
}

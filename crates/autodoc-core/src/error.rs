//! Error types for the autodoc core library
//!
//! Most problems met while documenting a model degrade the output instead of
//! failing (see the walker and assembler), so this enum only covers what a
//! caller can act on: output I/O, manifest loading and type expressions.

use thiserror::Error;

/// Main error type for autodoc operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO errors (output destination, manifest files)
    #[error("IO error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing and serialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// Manifest could not be read or is structurally invalid
    #[error("Manifest error: {message}")]
    Manifest {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
    },

    /// A type expression in a manifest failed to parse
    #[error("Invalid type expression `{expr}`: {message}")]
    TypeExpr { expr: String, message: String },

    /// A model reference points at nothing registered in the catalog
    #[error("Unknown model `{name}` referenced from {context}")]
    UnknownModel { name: String, context: String },

    /// Two models were registered under the same name
    #[error("Model `{name}` is defined more than once")]
    DuplicateModel { name: String },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a manifest error without an underlying cause
    pub fn manifest(message: impl Into<String>) -> Self {
        Error::Manifest {
            message: message.into(),
            source: None,
        }
    }

    /// Create a type expression error
    pub fn type_expr(expr: impl Into<String>, message: impl Into<String>) -> Self {
        Error::TypeExpr {
            expr: expr.into(),
            message: message.into(),
        }
    }
}

// Conversion implementations
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Manifest {
            message: err.to_string(),
            source: Some(anyhow::Error::new(err)),
        }
    }
}

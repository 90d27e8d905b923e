//! Error types for schema reading

use thiserror::Error;

/// Result type alias for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Error type for schema reading and parsing
#[derive(Error, Debug)]
pub enum SchemaError {
    /// The schema file could not be read
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The schema text is malformed
    #[error("{file}:{line}: {message}")]
    Syntax {
        file: String,
        line: usize,
        message: String,
    },

    /// A top-level declaration that has no binding representation
    #[error("{file}:{line}: unsupported declaration `{keyword}`")]
    UnsupportedEntity {
        file: String,
        line: usize,
        keyword: String,
    },
}

impl SchemaError {
    pub(crate) fn syntax(file: &str, line: usize, message: impl Into<String>) -> Self {
        SchemaError::Syntax {
            file: file.to_string(),
            line,
            message: message.into(),
        }
    }

    /// Line the error was detected on, when it refers to schema text
    pub fn line(&self) -> Option<usize> {
        match self {
            SchemaError::Io { .. } => None,
            SchemaError::Syntax { line, .. } | SchemaError::UnsupportedEntity { line, .. } => {
                Some(*line)
            }
        }
    }
}

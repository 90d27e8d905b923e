//! Error types for binding generation

use protobind_schema::SchemaError;
use thiserror::Error;

/// Result type alias for generation operations
pub type GenerateResult<T> = Result<T, GenerateError>;

/// Error type for generation runs
///
/// Every variant aborts the run; neither output file is valid afterwards.
#[derive(Error, Debug)]
pub enum GenerateError {
    /// Missing or inconsistent configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// The schema file could not be read or parsed
    #[error("schema parse error: {0}")]
    SchemaParse(String),

    /// The schema file name does not carry a recognized extension
    #[error("schema file {path} should have one of the extensions {expected}")]
    UnrecognizedExtension { path: String, expected: String },

    /// A schema entity has no rendering rule
    #[error("unsupported entity: {0}")]
    UnsupportedEntity(String),

    /// The requested mode is not available in this build
    #[error("unsupported mode: {0}")]
    UnsupportedMode(String),

    /// An output file could not be written
    #[error("cannot write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl GenerateError {
    /// Returns a stable code suitable for a process exit status
    pub fn error_code(&self) -> i32 {
        match self {
            GenerateError::Config(_) => 2,
            GenerateError::SchemaParse(_) => 3,
            GenerateError::UnrecognizedExtension { .. } => 4,
            GenerateError::UnsupportedEntity(_) => 5,
            GenerateError::UnsupportedMode(_) => 6,
            GenerateError::Io { .. } => 7,
        }
    }
}

impl From<SchemaError> for GenerateError {
    fn from(err: SchemaError) -> Self {
        match err {
            SchemaError::UnsupportedEntity { .. } => {
                GenerateError::UnsupportedEntity(err.to_string())
            }
            SchemaError::Io { .. } | SchemaError::Syntax { .. } => {
                GenerateError::SchemaParse(err.to_string())
            }
        }
    }
}

impl From<toml::de::Error> for GenerateError {
    fn from(err: toml::de::Error) -> Self {
        GenerateError::Config(err.to_string())
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;

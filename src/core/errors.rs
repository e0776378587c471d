//! Error types for the docoracle-rs library.
//!
//! Nothing inside the per-sentence pipeline fails hard: detection, matching,
//! resolution and validation misses all produce unresolved records. The
//! variants below cover configuration, catalog loading and the external
//! collaborators, whose failures are scoped to a single documented member.

use std::io;

use thiserror::Error;

/// Main result type for docoracle operations.
pub type Result<T> = std::result::Result<T, DocOracleError>;

/// Error type for all docoracle operations.
#[derive(Error, Debug)]
pub enum DocOracleError {
    /// I/O related errors (catalog and configuration files, validator processes)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Malformed textual input (member selectors, type names, patterns)
    #[error("Parse error: {message}")]
    Parse {
        /// Error description
        message: String,
        /// Offending input, if available
        input: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data format being processed
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failure raised by an external collaborator (enumerator, guard translator, validator)
    #[error("{collaborator} failed: {message}")]
    Collaborator {
        /// Collaborator name
        collaborator: String,
        /// Error description
        message: String,
        /// Additional context, usually the member being analyzed
        context: Option<String>,
    },

    /// Type catalog errors
    #[error("Catalog error: {message}")]
    Catalog {
        /// Error description
        message: String,
        /// Type that caused the issue
        type_name: Option<String>,
    },
}

impl DocOracleError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new parse error
    pub fn parse(message: impl Into<String>, input: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            input: Some(input.into()),
        }
    }

    /// Create a new collaborator failure
    pub fn collaborator(collaborator: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Collaborator {
            collaborator: collaborator.into(),
            message: message.into(),
            context: None,
        }
    }

    /// Create a new catalog error
    pub fn catalog(message: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
            type_name: None,
        }
    }

    /// Create a new catalog error naming the offending type
    pub fn catalog_type(message: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self::Catalog {
            message: message.into(),
            type_name: Some(type_name.into()),
        }
    }

    /// Add context to an existing error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        if let Self::Collaborator { context: ctx, .. } = &mut self {
            *ctx = Some(context.into());
        }
        self
    }
}

impl From<io::Error> for DocOracleError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for DocOracleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for DocOracleError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<regex::Error> for DocOracleError {
    fn from(err: regex::Error) -> Self {
        Self::Parse {
            message: format!("Invalid pattern: {err}"),
            input: None,
        }
    }
}

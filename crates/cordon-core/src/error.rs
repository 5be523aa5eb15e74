// Allow unused assignments for diagnostic fields - they're used by the macros
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

/// Core error type for Cordon operations
#[derive(Error, Debug, Diagnostic)]
pub enum CordonError {
    /// Invalid resource
    #[error("Invalid resource: {reason}")]
    #[diagnostic(
        code(cordon::invalid_resource),
        help("{suggestion}")
    )]
    InvalidResource {
        #[allow(unused)]
        reason: String,
        #[allow(unused)]
        suggestion: String,
    },

    /// Unsupported kind in a manifest
    #[error("Unexpected resource kind: expected {expected}, found {found}")]
    #[diagnostic(
        code(cordon::unexpected_kind),
        help("Manifests passed here must contain {expected} objects (or a v1 List of them)")
    )]
    UnexpectedKind {
        #[allow(unused)]
        expected: String,
        #[allow(unused)]
        found: String,
    },

    /// Invalid resource quantity
    #[error("Invalid quantity '{value}' for {resource}")]
    #[diagnostic(
        code(cordon::invalid_quantity),
        help("Use Kubernetes quantity notation such as '500m', '2', '128Mi' or '1Gi'")
    )]
    InvalidQuantity {
        #[allow(unused)]
        resource: String,
        #[allow(unused)]
        value: String,
    },

    /// Serialization error
    #[error("Serialization error: {message}")]
    #[diagnostic(
        code(cordon::serialization_error),
        help("Ensure the resource format is valid JSON or YAML")
    )]
    SerializationError {
        #[allow(unused)]
        message: String,
        #[source]
        #[allow(unused)]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Manifest could not be read
    #[error("Failed to read manifest {path}")]
    #[diagnostic(
        code(cordon::manifest_io),
        help("Check that the file exists and is readable")
    )]
    ManifestIo {
        #[allow(unused)]
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for Cordon operations
pub type Result<T> = std::result::Result<T, CordonError>;

impl CordonError {
    /// Create an InvalidResource error
    pub fn invalid_resource(reason: impl Into<String>, suggestion: impl Into<String>) -> Self {
        Self::InvalidResource {
            reason: reason.into(),
            suggestion: suggestion.into(),
        }
    }

    /// Create an UnexpectedKind error
    pub fn unexpected_kind(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::UnexpectedKind {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Create an InvalidQuantity error
    pub fn invalid_quantity(resource: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidQuantity {
            resource: resource.into(),
            value: value.into(),
        }
    }

    /// Create a SerializationError
    pub fn serialization_error(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        Self::SerializationError {
            message: message.into(),
            source,
        }
    }

    /// Create a ManifestIo error
    pub fn manifest_io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ManifestIo {
            path: path.into(),
            source,
        }
    }
}

//! Error types for the Vercel provider.

use thiserror::Error;

use crate::client::ApiError;
use crate::schema::Diagnostic;

/// Errors that can occur while serving a provider callback.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The tracked remote record no longer exists.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// An import identifier did not have the `<name>:<key>` shape.
    #[error("Invalid import ID: {0}")]
    InvalidImportId(String),

    /// A value did not match the resource schema.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A configuration error occurred.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A resource callback ran before `configure` supplied an API client.
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// The requested resource type is unknown.
    #[error("Unknown resource type: {0}")]
    UnknownResource(String),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The remote management API rejected a call or could not be reached.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Operation not implemented for this resource type.
    #[error("Unimplemented: {0}")]
    Unimplemented(String),
}

impl ProviderError {
    /// Get the error message as a string.
    pub fn message(&self) -> String {
        match self {
            Self::NotFound(msg)
            | Self::InvalidImportId(msg)
            | Self::Validation(msg)
            | Self::Configuration(msg)
            | Self::NotConfigured(msg)
            | Self::UnknownResource(msg)
            | Self::Unimplemented(msg) => msg.clone(),
            Self::Serialization(err) => err.to_string(),
            Self::Api(err) => err.to_string(),
        }
    }

    /// Whether this error means the remote record is gone.
    ///
    /// Callers clear the tracked identity instead of failing the operation.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_)) || matches!(self, Self::Api(err) if err.is_not_found())
    }

    /// Render this error as diagnostics for the host.
    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        let diagnostic = Diagnostic::error(self.to_string());
        match self {
            Self::Api(ApiError::Status { code, .. }) if !code.is_empty() => {
                vec![diagnostic.with_detail(format!("API error code: {}", code))]
            },
            _ => vec![diagnostic],
        }
    }
}

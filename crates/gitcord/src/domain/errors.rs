//! Domain Errors
//!
//! Error types for domain operations.

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Repository error: {0}")]
    Repository(String),

    #[error("External service error: {0}")]
    ExternalService(String),
}

/// A raw payload whose discriminator did not match any known event kind.
///
/// This is a value, not a fault: the caller answers it with HTTP 400
/// rather than treating it as a server error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognised event type: {}", .kind.as_deref().unwrap_or("<no discriminator>"))]
pub struct UnrecognizedEvent {
    /// The discriminator value that failed to match, if one was present.
    pub kind: Option<String>,
}

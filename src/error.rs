// src/error.rs
//! Error types for identity, delegation and discovery operations.
//!
//! Failures reported by the cryptography provider keep the provider's
//! diagnostic text verbatim; nothing in this crate rewrites or swallows it.
//! A negative discovery outcome (DID not found, malformed document) is not
//! an error at all — it is returned as data, see
//! [`DiscoveryResult`](crate::models::discovery::DiscoveryResult).

use thiserror::Error;

/// Errors raised by identity, delegation, token and discovery operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Invalid input supplied by the caller, detected before any remote
    /// call is attempted. Never retried.
    #[error("invalid input: {0}")]
    Usage(String),

    /// The provider returned an error for a create/recreate, token, seed
    /// or permission-check operation. Carries the provider message.
    #[error("identity operation failed: {0}")]
    IdentityOperationFailed(String),

    /// The provider returned an error for a delegation operation.
    #[error("delegation failed: {0}")]
    DelegationFailed(String),

    /// The resolver could not be reached at the network level (connection
    /// refused, DNS failure, timeout). Distinct from a resolver that
    /// answered negatively.
    #[error("resolver request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl IdentityError {
    /// Shorthand for a usage error with the given diagnostic.
    pub(crate) fn usage(message: impl Into<String>) -> Self {
        IdentityError::Usage(message.into())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, IdentityError>;

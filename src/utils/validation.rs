// src/utils/validation.rs
//! The single choke point where provider envelopes become domain results.
//!
//! Every component routes provider responses through these two functions;
//! nowhere else is an envelope inspected. This keeps the error taxonomy in
//! one place and guarantees no provider diagnostic is lost or rewritten.

use crate::error::{IdentityError, Result};
use crate::provider::StringResult;

/// Unwraps a provider envelope into its value.
///
/// An error side always wins; an envelope with neither side populated
/// violates the provider contract and is rejected rather than treated as
/// an empty success.
pub(crate) fn value_or_err(envelope: StringResult) -> Result<String> {
    match (envelope.value, envelope.err) {
        (_, Some(err)) => Err(IdentityError::IdentityOperationFailed(err)),
        (Some(value), None) => Ok(value),
        (None, None) => Err(IdentityError::IdentityOperationFailed(
            "provider returned neither a value nor an error".to_string(),
        )),
    }
}

/// Converts the bare nullable error of a delegation operation.
pub(crate) fn ok_or_err(err: Option<String>) -> Result<()> {
    match err {
        Some(err) => Err(IdentityError::DelegationFailed(err)),
        None => Ok(()),
    }
}

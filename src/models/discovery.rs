// src/models/discovery.rs
//! Outcome of resolving one DID against the resolver.
//!
//! A negative outcome (unknown DID, malformed document, non-2xx status) is
//! an expected, common result of discovery, so it is modeled as data with
//! `is_error` set rather than as a raised failure. Only usage errors and
//! transport failures are raised by the discovery client.

/// Content type of a plain-text diagnostic.
pub const CONTENT_TYPE_TEXT: &str = "application/text";
/// Content type of a decoded DID document.
pub const CONTENT_TYPE_JSON: &str = "application/json";
/// Content type of a raw error body relayed from the resolver.
pub const CONTENT_TYPE_XML: &str = "application/xml";

/// Classified result of one discovery call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryResult {
    content: String,
    content_type: String,
    is_error: bool,
}

impl DiscoveryResult {
    /// A successfully recovered DID document (JSON text).
    pub fn document(content: impl Into<String>) -> Self {
        DiscoveryResult {
            content: content.into(),
            content_type: CONTENT_TYPE_JSON.to_string(),
            is_error: false,
        }
    }

    /// A resolved-but-negative outcome carrying a diagnostic or the raw
    /// resolver body.
    pub fn failure(content: impl Into<String>, content_type: &str) -> Self {
        DiscoveryResult {
            content: content.into(),
            content_type: content_type.to_string(),
            is_error: true,
        }
    }

    /// DID document JSON on success, human-readable diagnostic otherwise.
    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

// src/models/identity.rs
//! Core identity data model.
//!
//! An [`Identity`] is the immutable `(key_name, name, did)` triple returned
//! by a successful create or recreate operation:
//! - `key_name`: passphrase-like label combined with a seed to derive key
//!   material deterministically; treated as an opaque label everywhere;
//! - `name`: fragment identifier of the verification method inside the DID
//!   document, always stored in `#`-prefixed form;
//! - `did`: the resolved decentralized identifier, opaque, compared only
//!   for equality.

use std::fmt;

/// Role of an identity. Selects which provider entry point a lifecycle
/// operation calls and which seed is supplied (the agent seed for `Agent`
/// and `Twin`, the user seed for `User`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Agent,
    User,
    Twin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Agent => write!(f, "agent"),
            Role::User => write!(f, "user"),
            Role::Twin => write!(f, "twin"),
        }
    }
}

/// Immutable identity triple returned by create/recreate operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    key_name: String,
    name: String,
    did: String,
}

impl Identity {
    /// Builds an identity from the label pair and the DID returned by the
    /// provider. The document name is normalized to its `#`-prefixed form;
    /// bare labels are accepted.
    pub fn new(
        key_name: impl Into<String>,
        name: impl Into<String>,
        did: impl Into<String>,
    ) -> Self {
        Identity {
            key_name: key_name.into(),
            name: normalize_fragment(&name.into()),
            did: did.into(),
        }
    }

    /// The key name used as passphrase when deriving this identity's keys.
    pub fn key_name(&self) -> &str {
        &self.key_name
    }

    /// The `#`-prefixed name of the verification method in the DID document.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The decentralized identifier.
    pub fn did(&self) -> &str {
        &self.did
    }
}

/// Normalizes a document fragment label to its `#`-prefixed form.
/// `"agent-0"` and `"#agent-0"` both yield `"#agent-0"`.
pub fn normalize_fragment(label: &str) -> String {
    if label.starts_with('#') {
        label.to_string()
    } else {
        format!("#{}", label)
    }
}

/// Opaque deterministic key material.
///
/// Seeds are process-lifetime secrets: they cross into the provider as
/// plain strings but are never logged, serialized or displayed. The `Debug`
/// implementation redacts the content so seeds cannot leak through error
/// or trace output.
#[derive(Clone, PartialEq, Eq)]
pub struct Seed(String);

impl Seed {
    pub fn new(value: impl Into<String>) -> Self {
        Seed(value.into())
    }

    /// Raw seed material, exposed to the provider boundary only.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed(<redacted>)")
    }
}

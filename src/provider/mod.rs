// src/provider/mod.rs
//! The identity cryptography provider capability.
//!
//! All cryptographic primitives — seed generation, BIP-39 mnemonic
//! conversion, key derivation, DID document signing, delegation statement
//! signing — live behind the [`IdentityProvider`] trait and are consumed,
//! never implemented, by the rest of this crate. Variants of the
//! capability include an in-process native binding, an out-of-process RPC
//! proxy, and the pure-software [`SoftwareProvider`] used for testing.
//!
//! # Thread safety
//! A provider handle is NOT safe for unsynchronized concurrent use. This
//! crate chooses the serialize-access discipline: trait methods take
//! `&mut self`, and shared handles are wrapped in an `Arc<Mutex<..>>`
//! ([`SharedProvider`]) that every service locks for the duration of a
//! single call. Implementations therefore never need internal locking.

pub mod envelope;
#[cfg(test)]
pub(crate) mod recording;
pub mod software;

use std::sync::{Arc, Mutex};

pub use envelope::StringResult;
pub use software::SoftwareProvider;

/// Shared, serialized handle to a provider implementation.
pub type SharedProvider = Arc<Mutex<dyn IdentityProvider + Send>>;

/// Wraps a provider implementation into the shared handle the services
/// expect.
pub fn share<P: IdentityProvider + Send + 'static>(provider: P) -> SharedProvider {
    Arc::new(Mutex::new(provider))
}

/// Primitive identity operations exposed by the cryptography provider.
///
/// Identity, token and permission operations answer with a
/// [`StringResult`] envelope; the two delegation operations answer with a
/// bare optional error string (`None` means success).
#[allow(clippy::too_many_arguments)]
pub trait IdentityProvider {
    fn create_default_seed(&mut self) -> StringResult;

    fn mnemonic_to_seed(&mut self, mnemonic: &str) -> StringResult;

    fn seed_to_mnemonic(&mut self, seed: &str) -> StringResult;

    fn create_agent_identity(
        &mut self,
        resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult;

    fn recreate_agent_identity(
        &mut self,
        resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult;

    fn create_user_identity(
        &mut self,
        resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult;

    fn recreate_user_identity(
        &mut self,
        resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult;

    fn create_twin_identity(
        &mut self,
        resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult;

    fn recreate_twin_identity(
        &mut self,
        resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult;

    /// Creates a twin and a control delegation from that twin to the given
    /// agent in one operation. The agent seed signs both halves.
    fn create_twin_with_control_delegation(
        &mut self,
        resolver_address: &str,
        agent_did: &str,
        agent_key_name: &str,
        agent_name: &str,
        agent_seed: &str,
        twin_key_name: &str,
        twin_name: &str,
    ) -> StringResult;

    fn create_agent_auth_token(
        &mut self,
        agent_did: &str,
        agent_key_name: &str,
        agent_name: &str,
        agent_seed: &str,
        user_did: &str,
        audience: &str,
        duration_seconds: u64,
    ) -> StringResult;

    fn is_allowed_for(&mut self, resolver_address: &str, token: &str) -> StringResult;

    /// Returns `None` on success, or the provider diagnostic on failure.
    fn user_delegates_authentication_to_agent(
        &mut self,
        resolver_address: &str,
        agent_did: &str,
        agent_key_name: &str,
        agent_name: &str,
        agent_seed: &str,
        user_did: &str,
        user_key_name: &str,
        user_name: &str,
        user_seed: &str,
        delegation_name: &str,
    ) -> Option<String>;

    /// Returns `None` on success, or the provider diagnostic on failure.
    fn twin_delegates_control_to_agent(
        &mut self,
        resolver_address: &str,
        agent_did: &str,
        agent_key_name: &str,
        agent_name: &str,
        agent_seed: &str,
        twin_did: &str,
        twin_key_name: &str,
        twin_name: &str,
        twin_seed: &str,
        delegation_name: &str,
    ) -> Option<String>;
}

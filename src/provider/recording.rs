// src/provider/recording.rs
//! Test-only provider that records every call it receives.
//!
//! Services are tested against this the way the original system mocked its
//! library interface: program the envelope to answer with, run the
//! operation, then assert on the recorded operation name and arguments.

use crate::provider::{IdentityProvider, StringResult};

/// One recorded provider invocation: operation name plus stringified args,
/// in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Call {
    pub op: &'static str,
    pub args: Vec<String>,
}

impl Call {
    fn new(op: &'static str, args: &[&str]) -> Self {
        Call {
            op,
            args: args.iter().map(|a| a.to_string()).collect(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct RecordingProvider {
    pub calls: Vec<Call>,
    /// Envelope returned by every envelope-shaped operation.
    pub envelope: StringResult,
    /// Error returned by the two delegation operations.
    pub delegation_error: Option<String>,
}

impl RecordingProvider {
    pub fn answering(envelope: StringResult) -> Self {
        RecordingProvider {
            calls: Vec::new(),
            envelope,
            delegation_error: None,
        }
    }

    pub fn last_call(&self) -> &Call {
        self.calls.last().expect("no provider call recorded")
    }

    fn record(&mut self, op: &'static str, args: &[&str]) -> StringResult {
        self.calls.push(Call::new(op, args));
        self.envelope.clone()
    }
}

impl Default for RecordingProvider {
    fn default() -> Self {
        RecordingProvider::answering(StringResult::value("did:local:recorded"))
    }
}

impl IdentityProvider for RecordingProvider {
    fn create_default_seed(&mut self) -> StringResult {
        self.record("create_default_seed", &[])
    }

    fn mnemonic_to_seed(&mut self, mnemonic: &str) -> StringResult {
        self.record("mnemonic_to_seed", &[mnemonic])
    }

    fn seed_to_mnemonic(&mut self, seed: &str) -> StringResult {
        self.record("seed_to_mnemonic", &[seed])
    }

    fn create_agent_identity(
        &mut self,
        resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult {
        self.record(
            "create_agent_identity",
            &[resolver_address, key_name, name, seed],
        )
    }

    fn recreate_agent_identity(
        &mut self,
        resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult {
        self.record(
            "recreate_agent_identity",
            &[resolver_address, key_name, name, seed],
        )
    }

    fn create_user_identity(
        &mut self,
        resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult {
        self.record(
            "create_user_identity",
            &[resolver_address, key_name, name, seed],
        )
    }

    fn recreate_user_identity(
        &mut self,
        resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult {
        self.record(
            "recreate_user_identity",
            &[resolver_address, key_name, name, seed],
        )
    }

    fn create_twin_identity(
        &mut self,
        resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult {
        self.record(
            "create_twin_identity",
            &[resolver_address, key_name, name, seed],
        )
    }

    fn recreate_twin_identity(
        &mut self,
        resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult {
        self.record(
            "recreate_twin_identity",
            &[resolver_address, key_name, name, seed],
        )
    }

    fn create_twin_with_control_delegation(
        &mut self,
        resolver_address: &str,
        agent_did: &str,
        agent_key_name: &str,
        agent_name: &str,
        agent_seed: &str,
        twin_key_name: &str,
        twin_name: &str,
    ) -> StringResult {
        self.record(
            "create_twin_with_control_delegation",
            &[
                resolver_address,
                agent_did,
                agent_key_name,
                agent_name,
                agent_seed,
                twin_key_name,
                twin_name,
            ],
        )
    }

    fn create_agent_auth_token(
        &mut self,
        agent_did: &str,
        agent_key_name: &str,
        agent_name: &str,
        agent_seed: &str,
        user_did: &str,
        audience: &str,
        duration_seconds: u64,
    ) -> StringResult {
        let seconds = duration_seconds.to_string();
        self.record(
            "create_agent_auth_token",
            &[
                agent_did,
                agent_key_name,
                agent_name,
                agent_seed,
                user_did,
                audience,
                &seconds,
            ],
        )
    }

    fn is_allowed_for(&mut self, resolver_address: &str, token: &str) -> StringResult {
        self.record("is_allowed_for", &[resolver_address, token])
    }

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
    ) -> Option<String> {
        self.record(
            "user_delegates_authentication_to_agent",
            &[
                resolver_address,
                agent_did,
                agent_key_name,
                agent_name,
                agent_seed,
                user_did,
                user_key_name,
                user_name,
                user_seed,
                delegation_name,
            ],
        );
        self.delegation_error.clone()
    }

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
    ) -> Option<String> {
        self.record(
            "twin_delegates_control_to_agent",
            &[
                resolver_address,
                agent_did,
                agent_key_name,
                agent_name,
                agent_seed,
                twin_did,
                twin_key_name,
                twin_name,
                twin_seed,
                delegation_name,
            ],
        );
        self.delegation_error.clone()
    }
}

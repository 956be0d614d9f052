// src/services/delegation.rs
//! Delegation management: authorization edges between identities.
//!
//! Control delegations flow twin -> agent, authentication delegations flow
//! user -> agent. A delegation name is the unit of replace-ability:
//! re-issuing a delegation under an existing name overwrites it at the
//! resolver.
//!
//! Twins hold no independent secret material: a control delegation is
//! signed with the agent seed on BOTH halves. That rule is part of the
//! system's contract and is pinned by tests.

use log::debug;

use crate::error::Result;
use crate::models::identity::normalize_fragment;
use crate::models::{Identity, Seed};
use crate::provider::SharedProvider;
use crate::utils::validation::{ok_or_err, value_or_err};

/// Delegation name used when a twin is created with a built-in control
/// delegation and no name is chosen by the caller.
pub const DEFAULT_CONTROL_DELEGATION_NAME: &str = "#c-delegation-0";

/// Manager for delegation operations. Requires the secret material of both
/// endpoints to be available in this context; seeds are bound at
/// construction, never fetched.
pub struct DelegationManager {
    provider: SharedProvider,
    resolver_address: String,
    user_seed: Seed,
    agent_seed: Seed,
}

impl std::fmt::Debug for DelegationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DelegationManager")
            .field("resolver_address", &self.resolver_address)
            .field("user_seed", &self.user_seed)
            .field("agent_seed", &self.agent_seed)
            .finish_non_exhaustive()
    }
}

impl DelegationManager {
    pub fn new(
        provider: SharedProvider,
        resolver_address: impl Into<String>,
        user_seed: Seed,
        agent_seed: Seed,
    ) -> Self {
        DelegationManager {
            provider,
            resolver_address: resolver_address.into(),
            user_seed,
            agent_seed,
        }
    }

    /// Creates a twin and a control delegation from that twin to
    /// `agent_identity` in one provider operation, under
    /// [`DEFAULT_CONTROL_DELEGATION_NAME`]. The agent seed derives the
    /// twin's keys and signs the delegation statement.
    pub fn create_twin_with_control_delegation(
        &self,
        agent_identity: &Identity,
        twin_key_name: &str,
        twin_name: &str,
    ) -> Result<Identity> {
        let twin_name = normalize_fragment(twin_name);
        debug!(
            "creating twin '{}' with control delegation to {}",
            twin_key_name,
            agent_identity.did()
        );
        let envelope = self.provider.lock().unwrap().create_twin_with_control_delegation(
            &self.resolver_address,
            agent_identity.did(),
            agent_identity.key_name(),
            agent_identity.name(),
            self.agent_seed.as_str(),
            twin_key_name,
            &twin_name,
        );
        let did = value_or_err(envelope)?;
        Ok(Identity::new(twin_key_name, twin_name, did))
    }

    /// Establishes an authentication delegation from `user_identity` to
    /// `agent_identity`: the user seed signs the user half, the agent seed
    /// the agent half.
    pub fn user_delegates_authentication_to_agent(
        &self,
        agent_identity: &Identity,
        user_identity: &Identity,
        delegation_name: &str,
    ) -> Result<()> {
        let delegation_name = normalize_fragment(delegation_name);
        debug!(
            "delegating authentication {} -> {} as '{}'",
            user_identity.did(),
            agent_identity.did(),
            delegation_name
        );
        let err = self.provider.lock().unwrap().user_delegates_authentication_to_agent(
            &self.resolver_address,
            agent_identity.did(),
            agent_identity.key_name(),
            agent_identity.name(),
            self.agent_seed.as_str(),
            user_identity.did(),
            user_identity.key_name(),
            user_identity.name(),
            self.user_seed.as_str(),
            &delegation_name,
        );
        ok_or_err(err)
    }

    /// Establishes a control delegation from `twin_identity` to
    /// `agent_identity`. The agent seed is supplied for both signing
    /// halves; a twin-specific seed does not exist in this system.
    pub fn twin_delegates_control_to_agent(
        &self,
        agent_identity: &Identity,
        twin_identity: &Identity,
        delegation_name: &str,
    ) -> Result<()> {
        let delegation_name = normalize_fragment(delegation_name);
        debug!(
            "delegating control {} -> {} as '{}'",
            twin_identity.did(),
            agent_identity.did(),
            delegation_name
        );
        let err = self.provider.lock().unwrap().twin_delegates_control_to_agent(
            &self.resolver_address,
            agent_identity.did(),
            agent_identity.key_name(),
            agent_identity.name(),
            self.agent_seed.as_str(),
            twin_identity.did(),
            twin_identity.key_name(),
            twin_identity.name(),
            self.agent_seed.as_str(),
            &delegation_name,
        );
        ok_or_err(err)
    }
}

// src/services/lifecycle.rs
//! Identity lifecycle management: deterministic creation and recreation of
//! agent, user and twin identities.
//!
//! The three roles are structurally identical at this layer; one
//! role-tagged operation pair dispatches to the matching provider entry
//! point. The seed selection rule is fixed: agents and twins derive from
//! the agent seed, users from the user seed.

use log::debug;

use crate::error::Result;
use crate::models::identity::normalize_fragment;
use crate::models::{Identity, Role, Seed};
use crate::provider::SharedProvider;
use crate::utils::validation::value_or_err;

/// Stateless manager for identity create/recreate operations.
pub struct IdentityLifecycle {
    provider: SharedProvider,
    resolver_address: String,
    user_seed: Seed,
    agent_seed: Seed,
}

impl std::fmt::Debug for IdentityLifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityLifecycle")
            .field("resolver_address", &self.resolver_address)
            .field("user_seed", &self.user_seed)
            .field("agent_seed", &self.agent_seed)
            .finish_non_exhaustive()
    }
}

impl IdentityLifecycle {
    pub fn new(
        provider: SharedProvider,
        resolver_address: impl Into<String>,
        user_seed: Seed,
        agent_seed: Seed,
    ) -> Self {
        IdentityLifecycle {
            provider,
            resolver_address: resolver_address.into(),
            user_seed,
            agent_seed,
        }
    }

    /// Creates an identity for `(key_name, seed-of-role)`. If the identity
    /// already exists at the resolver the existing DID is returned
    /// unchanged and no delegation is touched.
    pub fn create_identity(&self, role: Role, key_name: &str, name: &str) -> Result<Identity> {
        let name = normalize_fragment(name);
        debug!("creating {} identity for key name '{}'", role, key_name);
        let envelope = {
            let mut provider = self.provider.lock().unwrap();
            let seed = self.seed_for(role);
            match role {
                Role::Agent => {
                    provider.create_agent_identity(&self.resolver_address, key_name, &name, seed)
                }
                Role::User => {
                    provider.create_user_identity(&self.resolver_address, key_name, &name, seed)
                }
                Role::Twin => {
                    provider.create_twin_identity(&self.resolver_address, key_name, &name, seed)
                }
            }
        };
        let did = value_or_err(envelope)?;
        Ok(Identity::new(key_name, name, did))
    }

    /// Forces regeneration of the identity's DID document.
    ///
    /// Destructive: every delegation previously attached to this identity
    /// is wiped by the provider. Callers must re-establish delegations
    /// afterwards; no ordering is provided here.
    pub fn recreate_identity(&self, role: Role, key_name: &str, name: &str) -> Result<Identity> {
        let name = normalize_fragment(name);
        debug!("recreating {} identity for key name '{}'", role, key_name);
        let envelope = {
            let mut provider = self.provider.lock().unwrap();
            let seed = self.seed_for(role);
            match role {
                Role::Agent => {
                    provider.recreate_agent_identity(&self.resolver_address, key_name, &name, seed)
                }
                Role::User => {
                    provider.recreate_user_identity(&self.resolver_address, key_name, &name, seed)
                }
                Role::Twin => {
                    provider.recreate_twin_identity(&self.resolver_address, key_name, &name, seed)
                }
            }
        };
        let did = value_or_err(envelope)?;
        Ok(Identity::new(key_name, name, did))
    }

    fn seed_for(&self, role: Role) -> &str {
        match role {
            Role::User => self.user_seed.as_str(),
            Role::Agent | Role::Twin => self.agent_seed.as_str(),
        }
    }
}

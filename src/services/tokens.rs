// src/services/tokens.rs
//! Bearer token issuance and permission-check forwarding.
//!
//! Pure pass-through over the provider: no local validation, caching or
//! expiry enforcement happens here.

use std::time::Duration;

use log::debug;

use crate::error::Result;
use crate::models::{Identity, Seed};
use crate::provider::SharedProvider;
use crate::utils::validation::value_or_err;

/// Issues tokens asserting that an agent may act on behalf of a user.
pub struct TokenIssuer {
    provider: SharedProvider,
    resolver_address: String,
    agent_seed: Seed,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("resolver_address", &self.resolver_address)
            .field("agent_seed", &self.agent_seed)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(
        provider: SharedProvider,
        resolver_address: impl Into<String>,
        agent_seed: Seed,
    ) -> Self {
        TokenIssuer {
            provider,
            resolver_address: resolver_address.into(),
            agent_seed,
        }
    }

    /// Issues an auth token with the resolver address as audience.
    pub fn new_auth_token(
        &self,
        agent_identity: &Identity,
        user_did: &str,
        duration: Duration,
    ) -> Result<String> {
        let audience = self.resolver_address.clone();
        self.new_auth_token_for_audience(agent_identity, user_did, &audience, duration)
    }

    /// Issues an auth token for an explicit audience.
    ///
    /// The duration is converted to whole seconds at the provider
    /// boundary; fractional seconds are truncated, not rounded, for
    /// interoperability with deployed resolvers.
    pub fn new_auth_token_for_audience(
        &self,
        agent_identity: &Identity,
        user_did: &str,
        audience: &str,
        duration: Duration,
    ) -> Result<String> {
        debug!(
            "issuing auth token for agent {} on behalf of {} (audience '{}')",
            agent_identity.did(),
            user_did,
            audience
        );
        let envelope = self.provider.lock().unwrap().create_agent_auth_token(
            agent_identity.did(),
            agent_identity.key_name(),
            agent_identity.name(),
            self.agent_seed.as_str(),
            user_did,
            audience,
            duration.as_secs(),
        );
        value_or_err(envelope)
    }

    /// Forwards a permission check to the resolver ecosystem and returns
    /// the provider's raw response string. Interpreting that string (for
    /// instance `"true"` / `"false"`) is the caller's contract.
    pub fn is_allowed_for(&self, resolver_address: &str, token: &str) -> Result<String> {
        let envelope = self
            .provider
            .lock()
            .unwrap()
            .is_allowed_for(resolver_address, token);
        value_or_err(envelope)
    }
}

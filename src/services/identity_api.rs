// src/services/identity_api.rs
//! Single entry point composing lifecycle, delegation and token
//! management over one provider handle and one resolver address.

use std::time::Duration;

use reqwest::Url;

use crate::error::{IdentityError, Result};
use crate::models::{Identity, Role, Seed};
use crate::provider::SharedProvider;
use crate::services::delegation::DelegationManager;
use crate::services::lifecycle::IdentityLifecycle;
use crate::services::seeds::SeedGenerator;
use crate::services::tokens::TokenIssuer;

/// Facade over the identity, delegation and token operations.
///
/// Holds the user and agent seeds for the lifetime of the process and
/// routes every operation through the composed managers.
///
/// # Example
/// ```
/// use std::time::Duration;
/// use did_identity::provider::{share, SoftwareProvider};
/// use did_identity::services::identity_api::IdentityApi;
///
/// let api = IdentityApi::generate(share(SoftwareProvider::new()), "https://resolver.example.com")
///     .unwrap();
/// let agent = api.create_agent_identity("agent-key", "#agent-0").unwrap();
/// let user = api.create_user_identity("user-key", "#user-0").unwrap();
/// api.user_delegates_authentication_to_agent(&agent, &user, "#auth-0")
///     .unwrap();
/// let token = api
///     .new_auth_token(&agent, user.did(), Duration::from_secs(60))
///     .unwrap();
/// assert_eq!(token.split('.').count(), 3);
/// ```
#[derive(Debug)]
pub struct IdentityApi {
    resolver_address: String,
    user_seed: Seed,
    agent_seed: Seed,
    lifecycle: IdentityLifecycle,
    delegation: DelegationManager,
    tokens: TokenIssuer,
}

impl IdentityApi {
    /// Builds a facade with a freshly generated seed used for both the
    /// user and agent roles.
    pub fn generate(provider: SharedProvider, resolver_address: &str) -> Result<Self> {
        let seed = SeedGenerator::new(provider.clone()).create_default_seed()?;
        Self::new(provider, resolver_address, seed.clone(), seed)
    }

    /// Builds a facade with one seed shared by the user and agent roles.
    pub fn with_seed(provider: SharedProvider, resolver_address: &str, seed: Seed) -> Result<Self> {
        Self::new(provider, resolver_address, seed.clone(), seed)
    }

    /// Builds a facade with independent user and agent seeds.
    ///
    /// # Errors
    /// `IdentityError::Usage` when the resolver address is not an absolute
    /// URL.
    pub fn new(
        provider: SharedProvider,
        resolver_address: &str,
        user_seed: Seed,
        agent_seed: Seed,
    ) -> Result<Self> {
        let resolver_address = validate_resolver_address(resolver_address)?;
        Ok(IdentityApi {
            lifecycle: IdentityLifecycle::new(
                provider.clone(),
                resolver_address.clone(),
                user_seed.clone(),
                agent_seed.clone(),
            ),
            delegation: DelegationManager::new(
                provider.clone(),
                resolver_address.clone(),
                user_seed.clone(),
                agent_seed.clone(),
            ),
            tokens: TokenIssuer::new(provider, resolver_address.clone(), agent_seed.clone()),
            resolver_address,
            user_seed,
            agent_seed,
        })
    }

    // identity lifecycle

    /// Makes an agent identity; an existing one is returned unchanged.
    pub fn create_agent_identity(&self, key_name: &str, name: &str) -> Result<Identity> {
        self.lifecycle.create_identity(Role::Agent, key_name, name)
    }

    /// Recreates an agent identity, wiping its existing delegations.
    pub fn recreate_agent_identity(&self, key_name: &str, name: &str) -> Result<Identity> {
        self.lifecycle.recreate_identity(Role::Agent, key_name, name)
    }

    /// Makes a user identity; an existing one is returned unchanged.
    pub fn create_user_identity(&self, key_name: &str, name: &str) -> Result<Identity> {
        self.lifecycle.create_identity(Role::User, key_name, name)
    }

    /// Recreates a user identity, wiping its existing delegations.
    pub fn recreate_user_identity(&self, key_name: &str, name: &str) -> Result<Identity> {
        self.lifecycle.recreate_identity(Role::User, key_name, name)
    }

    /// Makes a twin identity (no delegation); an existing one is returned
    /// unchanged.
    pub fn create_twin_identity(&self, key_name: &str, name: &str) -> Result<Identity> {
        self.lifecycle.create_identity(Role::Twin, key_name, name)
    }

    /// Recreates a twin identity, wiping its existing delegations.
    pub fn recreate_twin_identity(&self, key_name: &str, name: &str) -> Result<Identity> {
        self.lifecycle.recreate_identity(Role::Twin, key_name, name)
    }

    // delegations

    /// Creates a twin and a control delegation to `agent_identity` in one
    /// operation.
    pub fn create_twin_with_control_delegation(
        &self,
        agent_identity: &Identity,
        twin_key_name: &str,
        twin_name: &str,
    ) -> Result<Identity> {
        self.delegation
            .create_twin_with_control_delegation(agent_identity, twin_key_name, twin_name)
    }

    pub fn user_delegates_authentication_to_agent(
        &self,
        agent_identity: &Identity,
        user_identity: &Identity,
        delegation_name: &str,
    ) -> Result<()> {
        self.delegation.user_delegates_authentication_to_agent(
            agent_identity,
            user_identity,
            delegation_name,
        )
    }

    pub fn twin_delegates_control_to_agent(
        &self,
        agent_identity: &Identity,
        twin_identity: &Identity,
        delegation_name: &str,
    ) -> Result<()> {
        self.delegation
            .twin_delegates_control_to_agent(agent_identity, twin_identity, delegation_name)
    }

    // tokens

    /// Issues an auth token with the resolver address as audience.
    pub fn new_auth_token(
        &self,
        agent_identity: &Identity,
        user_did: &str,
        duration: Duration,
    ) -> Result<String> {
        self.tokens.new_auth_token(agent_identity, user_did, duration)
    }

    pub fn new_auth_token_for_audience(
        &self,
        agent_identity: &Identity,
        user_did: &str,
        audience: &str,
        duration: Duration,
    ) -> Result<String> {
        self.tokens
            .new_auth_token_for_audience(agent_identity, user_did, audience, duration)
    }

    pub fn is_allowed_for(&self, resolver_address: &str, token: &str) -> Result<String> {
        self.tokens.is_allowed_for(resolver_address, token)
    }

    // composition accessors

    pub fn resolver_address(&self) -> &str {
        &self.resolver_address
    }

    pub fn lifecycle(&self) -> &IdentityLifecycle {
        &self.lifecycle
    }

    pub fn delegation(&self) -> &DelegationManager {
        &self.delegation
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    pub(crate) fn user_seed(&self) -> &Seed {
        &self.user_seed
    }

    pub(crate) fn agent_seed(&self) -> &Seed {
        &self.agent_seed
    }
}

/// Checks that the resolver address parses as an absolute URL and returns
/// it unchanged.
fn validate_resolver_address(resolver_address: &str) -> Result<String> {
    Url::parse(resolver_address).map_err(|e| {
        IdentityError::usage(format!(
            "invalid resolver address '{}': {}",
            resolver_address, e
        ))
    })?;
    Ok(resolver_address.to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::provider::recording::RecordingProvider;
    use crate::provider::software::SoftwareProvider;
    use crate::provider::StringResult;

    const RESOLVER: &str = "https://resolver.example.com";

    #[test]
    fn test_invalid_resolver_address_is_a_usage_error() {
        let provider = Arc::new(Mutex::new(RecordingProvider::default()));
        let err =
            IdentityApi::with_seed(provider, "not an url", Seed::new("some seed")).unwrap_err();
        assert!(matches!(err, IdentityError::Usage(_)));
    }

    #[test]
    fn test_generate_asks_the_provider_for_a_seed() {
        let provider = Arc::new(Mutex::new(RecordingProvider::answering(
            StringResult::value("generated seed"),
        )));
        let api = IdentityApi::generate(provider.clone(), RESOLVER).unwrap();

        assert_eq!(provider.lock().unwrap().last_call().op, "create_default_seed");
        assert_eq!(api.user_seed(), api.agent_seed());
        assert_eq!(api.agent_seed().as_str(), "generated seed");
    }

    #[test]
    fn test_one_seed_serves_both_roles() {
        let provider = Arc::new(Mutex::new(RecordingProvider::default()));
        let api = IdentityApi::with_seed(provider.clone(), RESOLVER, Seed::new("some seed"))
            .unwrap();

        assert_eq!(api.user_seed().as_str(), "some seed");
        assert_eq!(api.agent_seed().as_str(), "some seed");
        // construction with an explicit seed never calls the provider
        assert!(provider.lock().unwrap().calls.is_empty());
    }

    #[test]
    fn test_two_seeds_stay_independent() {
        let provider = Arc::new(Mutex::new(RecordingProvider::default()));
        let api = IdentityApi::new(
            provider,
            RESOLVER,
            Seed::new("user seed"),
            Seed::new("agent seed"),
        )
        .unwrap();

        assert_eq!(api.user_seed().as_str(), "user seed");
        assert_eq!(api.agent_seed().as_str(), "agent seed");
        assert_ne!(api.user_seed(), api.agent_seed());
    }

    #[test]
    fn test_operations_route_to_the_matching_provider_entry_point() {
        let provider = Arc::new(Mutex::new(RecordingProvider::default()));
        let api = IdentityApi::new(
            provider.clone(),
            RESOLVER,
            Seed::new("user seed"),
            Seed::new("agent seed"),
        )
        .unwrap();

        let agent = api.create_agent_identity("agent-key", "#agent-0").unwrap();
        assert_eq!(provider.lock().unwrap().last_call().op, "create_agent_identity");

        api.recreate_user_identity("user-key", "#user-0").unwrap();
        assert_eq!(provider.lock().unwrap().last_call().op, "recreate_user_identity");

        api.create_twin_with_control_delegation(&agent, "twin-key", "#twin-0")
            .unwrap();
        assert_eq!(
            provider.lock().unwrap().last_call().op,
            "create_twin_with_control_delegation"
        );

        api.new_auth_token(&agent, "did:local:user", Duration::from_secs(10))
            .unwrap();
        assert_eq!(provider.lock().unwrap().last_call().op, "create_agent_auth_token");

        api.is_allowed_for("some resolver", "a.b.c").unwrap();
        assert_eq!(provider.lock().unwrap().last_call().op, "is_allowed_for");
    }

    #[test]
    fn test_end_to_end_against_the_software_provider() {
        let provider = Arc::new(Mutex::new(SoftwareProvider::new()));
        let api = IdentityApi::with_seed(provider.clone(), RESOLVER, Seed::new("shared seed"))
            .unwrap();

        let agent = api.create_agent_identity("agent-key", "#agent-0").unwrap();
        let user = api.create_user_identity("user-key", "#user-0").unwrap();
        api.user_delegates_authentication_to_agent(&agent, &user, "#auth-0")
            .unwrap();

        let twin = api
            .create_twin_with_control_delegation(&agent, "twin-key", "#twin-0")
            .unwrap();

        let locked = provider.lock().unwrap();
        assert!(locked.has_delegation(user.did(), "#auth-0"));
        assert!(locked.has_delegation(twin.did(), "#c-delegation-0"));
        assert_eq!(
            locked.delegation_target(twin.did(), "#c-delegation-0"),
            Some(agent.did())
        );
    }
}

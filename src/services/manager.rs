// src/services/manager.rs
//! Runtime identity manager.
//!
//! However agent and user identities were first provisioned, a running
//! application only ever needs new auth tokens and new twin identities.
//! This manager resolves both identities once at construction and serves
//! those two needs from the cached pair.

use std::time::Duration;

use crate::error::Result;
use crate::models::Identity;
use crate::services::identity_api::IdentityApi;

/// Application-facing manager over a cached agent/user identity pair.
pub struct IdentityManager {
    api: IdentityApi,
    agent_identity: Identity,
    user_identity: Identity,
}

impl IdentityManager {
    /// Creates (idempotently) and caches the agent and user identities.
    pub fn new(
        api: IdentityApi,
        agent_key_name: &str,
        agent_name: &str,
        user_key_name: &str,
        user_name: &str,
    ) -> Result<Self> {
        let agent_identity = api.create_agent_identity(agent_key_name, agent_name)?;
        let user_identity = api.create_user_identity(user_key_name, user_name)?;
        Ok(IdentityManager {
            api,
            agent_identity,
            user_identity,
        })
    }

    /// Issues an auth token for the cached pair, valid for `expiry`, with
    /// the resolver address as audience.
    pub fn new_authentication_token(&self, expiry: Duration) -> Result<String> {
        self.api
            .new_auth_token(&self.agent_identity, self.user_identity.did(), expiry)
    }

    /// Issues an auth token for the cached pair and an explicit audience.
    pub fn new_authentication_token_for_audience(
        &self,
        expiry: Duration,
        audience: &str,
    ) -> Result<String> {
        self.api.new_auth_token_for_audience(
            &self.agent_identity,
            self.user_identity.did(),
            audience,
            expiry,
        )
    }

    /// Creates a twin controlled by this agent under the default control
    /// delegation name.
    pub fn new_twin_identity(&self, twin_key_name: &str, twin_name: &str) -> Result<Identity> {
        self.api
            .create_twin_with_control_delegation(&self.agent_identity, twin_key_name, twin_name)
    }

    /// Creates a twin, then issues a control delegation to this agent
    /// under a caller-chosen name.
    pub fn new_twin_identity_with_delegation(
        &self,
        twin_key_name: &str,
        twin_name: &str,
        control_delegation_name: &str,
    ) -> Result<Identity> {
        let twin = self.api.create_twin_identity(twin_key_name, twin_name)?;
        self.api
            .twin_delegates_control_to_agent(&self.agent_identity, &twin, control_delegation_name)?;
        Ok(twin)
    }

    pub fn agent_identity(&self) -> &Identity {
        &self.agent_identity
    }

    pub fn user_identity(&self) -> &Identity {
        &self.user_identity
    }

    pub fn api(&self) -> &IdentityApi {
        &self.api
    }
}

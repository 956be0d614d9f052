// src/provider/software.rs
//! Pure-software reference implementation of the provider capability.
//!
//! Backs the test suite and examples without touching real cryptography.
//! It models the provider contract that the rest of the crate depends on:
//! - DIDs are a deterministic function of `(key_name, seed)`;
//! - `create_*` is idempotent: an existing identity is returned unchanged
//!   and its delegations are kept;
//! - `recreate_*` regenerates the document and wipes every delegation
//!   attached to that identity;
//! - delegations are named edges, overwritten per name;
//! - delegation statements require the seed registered for each endpoint,
//!   mirroring a signature check.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::models::Role;
use crate::provider::{IdentityProvider, StringResult};

// no Debug derive: records hold raw seed material
#[derive(Clone)]
#[allow(dead_code)]
struct IdentityRecord {
    key_name: String,
    name: String,
    seed: String,
    role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DelegationKind {
    Control,
    Authentication,
}

#[derive(Debug, Clone)]
struct DelegationRecord {
    to_did: String,
    kind: DelegationKind,
}

/// In-memory provider modeling create/recreate and delegation semantics.
#[derive(Default)]
pub struct SoftwareProvider {
    registry: HashMap<String, IdentityRecord>,
    // delegating identity did -> delegation name -> edge
    delegations: HashMap<String, HashMap<String, DelegationRecord>>,
    seed_counter: u64,
}

impl SoftwareProvider {
    pub fn new() -> Self {
        SoftwareProvider::default()
    }

    /// Whether the identity `did` currently holds a delegation under
    /// `delegation_name`. Lets tests observe delegation wiping and
    /// overwrite semantics.
    pub fn has_delegation(&self, did: &str, delegation_name: &str) -> bool {
        self.delegations
            .get(did)
            .map(|edges| edges.contains_key(delegation_name))
            .unwrap_or(false)
    }

    /// Whether `did` resolves to a registered identity.
    pub fn is_registered(&self, did: &str) -> bool {
        self.registry.contains_key(did)
    }

    /// DID on the receiving end of a named delegation, if present.
    pub fn delegation_target(&self, did: &str, delegation_name: &str) -> Option<&str> {
        self.delegations
            .get(did)
            .and_then(|edges| edges.get(delegation_name))
            .map(|edge| edge.to_did.as_str())
    }

    /// Kind of a named delegation: `"control"` or `"authentication"`.
    pub fn delegation_kind(&self, did: &str, delegation_name: &str) -> Option<&'static str> {
        self.delegations
            .get(did)
            .and_then(|edges| edges.get(delegation_name))
            .map(|edge| match edge.kind {
                DelegationKind::Control => "control",
                DelegationKind::Authentication => "authentication",
            })
    }

    fn derive_did(key_name: &str, seed: &str) -> String {
        let mut hasher = DefaultHasher::new();
        key_name.hash(&mut hasher);
        seed.hash(&mut hasher);
        format!("did:local:{:016x}", hasher.finish())
    }

    fn create(&mut self, role: Role, key_name: &str, name: &str, seed: &str) -> StringResult {
        if seed.is_empty() {
            return StringResult::error("empty seed");
        }
        let did = Self::derive_did(key_name, seed);
        self.registry.entry(did.clone()).or_insert(IdentityRecord {
            key_name: key_name.to_string(),
            name: name.to_string(),
            seed: seed.to_string(),
            role,
        });
        StringResult::value(did)
    }

    fn recreate(&mut self, role: Role, key_name: &str, name: &str, seed: &str) -> StringResult {
        if seed.is_empty() {
            return StringResult::error("empty seed");
        }
        let did = Self::derive_did(key_name, seed);
        self.registry.insert(
            did.clone(),
            IdentityRecord {
                key_name: key_name.to_string(),
                name: name.to_string(),
                seed: seed.to_string(),
                role,
            },
        );
        // regenerating the document invalidates every delegation signed
        // against the previous one
        self.delegations.remove(&did);
        StringResult::value(did)
    }

    fn check_endpoint(&self, did: &str, seed: &str) -> Option<String> {
        match self.registry.get(did) {
            None => Some(format!("unknown did: {}", did)),
            Some(record) if record.seed != seed => Some(format!("seed mismatch for {}", did)),
            Some(_) => None,
        }
    }

    fn delegate(
        &mut self,
        from_did: &str,
        from_seed: &str,
        to_did: &str,
        to_seed: &str,
        delegation_name: &str,
        kind: DelegationKind,
    ) -> Option<String> {
        if let Some(err) = self.check_endpoint(to_did, to_seed) {
            return Some(err);
        }
        if let Some(err) = self.check_endpoint(from_did, from_seed) {
            return Some(err);
        }
        self.delegations
            .entry(from_did.to_string())
            .or_insert_with(HashMap::new)
            .insert(
                delegation_name.to_string(),
                DelegationRecord {
                    to_did: to_did.to_string(),
                    kind,
                },
            );
        None
    }
}

impl IdentityProvider for SoftwareProvider {
    fn create_default_seed(&mut self) -> StringResult {
        self.seed_counter += 1;
        let mut hasher = DefaultHasher::new();
        "seed-material".hash(&mut hasher);
        self.seed_counter.hash(&mut hasher);
        StringResult::value(format!("{:032x}", hasher.finish() as u128))
    }

    fn mnemonic_to_seed(&mut self, mnemonic: &str) -> StringResult {
        if mnemonic.trim().is_empty() {
            return StringResult::error("empty mnemonic");
        }
        let mut hasher = DefaultHasher::new();
        mnemonic.hash(&mut hasher);
        StringResult::value(format!("{:032x}", hasher.finish() as u128))
    }

    fn seed_to_mnemonic(&mut self, seed: &str) -> StringResult {
        if seed.trim().is_empty() {
            return StringResult::error("empty seed");
        }
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        let digest = format!("{:016x}", hasher.finish());
        let words: Vec<String> = digest
            .as_bytes()
            .chunks(4)
            .map(|chunk| format!("w{}", String::from_utf8_lossy(chunk)))
            .collect();
        StringResult::value(words.join(" "))
    }

    fn create_agent_identity(
        &mut self,
        _resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult {
        self.create(Role::Agent, key_name, name, seed)
    }

    fn recreate_agent_identity(
        &mut self,
        _resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult {
        self.recreate(Role::Agent, key_name, name, seed)
    }

    fn create_user_identity(
        &mut self,
        _resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult {
        self.create(Role::User, key_name, name, seed)
    }

    fn recreate_user_identity(
        &mut self,
        _resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult {
        self.recreate(Role::User, key_name, name, seed)
    }

    fn create_twin_identity(
        &mut self,
        _resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult {
        self.create(Role::Twin, key_name, name, seed)
    }

    fn recreate_twin_identity(
        &mut self,
        _resolver_address: &str,
        key_name: &str,
        name: &str,
        seed: &str,
    ) -> StringResult {
        self.recreate(Role::Twin, key_name, name, seed)
    }

    fn create_twin_with_control_delegation(
        &mut self,
        _resolver_address: &str,
        agent_did: &str,
        _agent_key_name: &str,
        _agent_name: &str,
        agent_seed: &str,
        twin_key_name: &str,
        twin_name: &str,
    ) -> StringResult {
        if let Some(err) = self.check_endpoint(agent_did, agent_seed) {
            return StringResult::error(err);
        }
        let twin = self.create(Role::Twin, twin_key_name, twin_name, agent_seed);
        let twin_did = match &twin.value {
            Some(did) => did.clone(),
            None => return twin,
        };
        self.delegations
            .entry(twin_did.clone())
            .or_insert_with(HashMap::new)
            .insert(
                "#c-delegation-0".to_string(),
                DelegationRecord {
                    to_did: agent_did.to_string(),
                    kind: DelegationKind::Control,
                },
            );
        StringResult::value(twin_did)
    }

    fn create_agent_auth_token(
        &mut self,
        agent_did: &str,
        _agent_key_name: &str,
        _agent_name: &str,
        agent_seed: &str,
        user_did: &str,
        audience: &str,
        duration_seconds: u64,
    ) -> StringResult {
        if let Some(err) = self.check_endpoint(agent_did, agent_seed) {
            return StringResult::error(err);
        }
        let header =
            base64::encode_config("{\"alg\":\"none\",\"typ\":\"JWT\"}", base64::STANDARD_NO_PAD);
        let claims = serde_json::json!({
            "iss": agent_did,
            "sub": user_did,
            "aud": audience,
            "dur": duration_seconds,
        });
        let payload = base64::encode_config(claims.to_string(), base64::STANDARD_NO_PAD);
        StringResult::value(format!("{}.{}.unsigned", header, payload))
    }

    fn is_allowed_for(&mut self, _resolver_address: &str, token: &str) -> StringResult {
        if token.split('.').count() == 3 {
            StringResult::value("true")
        } else {
            StringResult::value("false")
        }
    }

    fn user_delegates_authentication_to_agent(
        &mut self,
        _resolver_address: &str,
        agent_did: &str,
        _agent_key_name: &str,
        _agent_name: &str,
        agent_seed: &str,
        user_did: &str,
        _user_key_name: &str,
        _user_name: &str,
        user_seed: &str,
        delegation_name: &str,
    ) -> Option<String> {
        self.delegate(
            user_did,
            user_seed,
            agent_did,
            agent_seed,
            delegation_name,
            DelegationKind::Authentication,
        )
    }

    fn twin_delegates_control_to_agent(
        &mut self,
        _resolver_address: &str,
        agent_did: &str,
        _agent_key_name: &str,
        _agent_name: &str,
        agent_seed: &str,
        twin_did: &str,
        _twin_key_name: &str,
        _twin_name: &str,
        twin_seed: &str,
        delegation_name: &str,
    ) -> Option<String> {
        self.delegate(
            twin_did,
            twin_seed,
            agent_did,
            agent_seed,
            delegation_name,
            DelegationKind::Control,
        )
    }
}

// src/lib.rs

//! # did-identity
//!
//! Decentralized identity management for three role classes — users,
//! agents and twins — built on deterministic key material (seeds), plus
//! the delegations and bearer tokens that let an agent act on behalf of a
//! user or twin, and DID discovery against a remote resolver.
//!
//! ## Architecture Overview
//! 1. **Provider Layer**: the [`provider::IdentityProvider`] capability
//!    holds every cryptographic primitive (seed generation, key
//!    derivation, document and delegation signing); this crate consumes
//!    it, never implements it. A pure-software reference variant backs
//!    the tests.
//! 2. **Services Layer**: identity lifecycle, delegation and token
//!    management, composed by the [`services::IdentityApi`] facade and the
//!    runtime [`services::IdentityManager`].
//! 3. **Resolver Layer**: [`resolver::HttpResolverClient`] resolves a DID
//!    to its published document over the discovery protocol.
//! 4. **Models**: immutable identity triples, structural token
//!    decomposition, classified discovery results.
//!
//! Seeds are process-lifetime secrets: they cross the provider boundary
//! as opaque labels and are never logged or serialized.

pub mod config;
pub mod error;
pub mod models;
pub mod provider;
pub mod resolver;
pub mod services;

mod utils;

pub use config::SimpleConfig;
pub use error::{IdentityError, Result};
pub use models::{DiscoveryResult, Identity, Jwt, Role, Seed};
pub use provider::{share, IdentityProvider, SharedProvider, SoftwareProvider, StringResult};
pub use resolver::HttpResolverClient;
pub use services::{
    DelegationManager, IdentityApi, IdentityLifecycle, IdentityManager, SeedGenerator, TokenIssuer,
    DEFAULT_CONTROL_DELEGATION_NAME,
};

// src/services/mod.rs
//! Business logic: identity lifecycle, delegations, tokens, seeds, and
//! the facades applications program against.

pub mod delegation;
pub mod identity_api;
pub mod lifecycle;
pub mod manager;
pub mod seeds;
pub mod tokens;

pub use delegation::{DelegationManager, DEFAULT_CONTROL_DELEGATION_NAME};
pub use identity_api::IdentityApi;
pub use lifecycle::IdentityLifecycle;
pub use manager::IdentityManager;
pub use seeds::SeedGenerator;
pub use tokens::TokenIssuer;

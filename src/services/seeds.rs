// src/services/seeds.rs
//! Seed generation and BIP-39 mnemonic conversion, delegated to the
//! provider.

use crate::error::Result;
use crate::models::Seed;
use crate::provider::SharedProvider;
use crate::utils::validation::value_or_err;

/// Thin wrapper over the provider's seed primitives.
pub struct SeedGenerator {
    provider: SharedProvider,
}

impl SeedGenerator {
    pub fn new(provider: SharedProvider) -> Self {
        SeedGenerator { provider }
    }

    /// Generates fresh seed material.
    pub fn create_default_seed(&self) -> Result<Seed> {
        let envelope = self.provider.lock().unwrap().create_default_seed();
        value_or_err(envelope).map(Seed::new)
    }

    /// Derives the seed encoded by a BIP-39 mnemonic.
    pub fn mnemonic_to_seed(&self, mnemonic: &str) -> Result<Seed> {
        let envelope = self.provider.lock().unwrap().mnemonic_to_seed(mnemonic);
        value_or_err(envelope).map(Seed::new)
    }

    /// Renders a seed as its BIP-39 mnemonic.
    pub fn seed_to_mnemonic(&self, seed: &Seed) -> Result<String> {
        let envelope = self.provider.lock().unwrap().seed_to_mnemonic(seed.as_str());
        value_or_err(envelope)
    }
}

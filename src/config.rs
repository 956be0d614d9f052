// src/config.rs
//! Seed and key-name configuration loading.
//!
//! A [`SimpleConfig`] pairs a seed with a key name and can be sourced from
//! prefixed environment variables (after a best-effort `.env` load), from
//! a JSON file (`{"seed": "...", "keyName": "..."}`), or from a file under
//! `$HOME/.config/did-identity/`. Partial configs can be completed from a
//! default.

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{IdentityError, Result};

/// Seed/key-name pair for one role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleConfig {
    seed: Option<String>,
    key_name: Option<String>,
}

impl SimpleConfig {
    pub fn new(seed: impl Into<String>, key_name: impl Into<String>) -> Self {
        SimpleConfig {
            seed: Some(seed.into()),
            key_name: Some(key_name.into()),
        }
    }

    /// Reads `<PREFIX>SEED` and `<PREFIX>KEYNAME` from the environment.
    /// Variables declared in a `.env` file are honored. Missing variables
    /// leave the corresponding field unset; validate with [`is_valid`]
    /// (SimpleConfig::is_valid) or complete with [`with_defaults`]
    /// (SimpleConfig::with_defaults).
    pub fn from_env(prefix: &str) -> Self {
        dotenv::dotenv().ok();
        SimpleConfig {
            seed: env::var(format!("{}SEED", prefix)).ok(),
            key_name: env::var(format!("{}KEYNAME", prefix)).ok(),
        }
    }

    /// Reads a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            IdentityError::usage(format!("cannot open config '{}': {}", path.display(), e))
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            IdentityError::usage(format!("cannot parse config '{}': {}", path.display(), e))
        })
    }

    /// Reads a JSON config file, completing missing fields from `default`.
    /// An unreadable file falls back to `default` entirely; an incomplete
    /// result is a usage error.
    pub fn from_file_or(path: &Path, default: &SimpleConfig) -> Result<Self> {
        match Self::from_file(path) {
            Ok(config) => config.with_defaults(default),
            Err(_) => {
                if default.is_valid() {
                    Ok(default.clone())
                } else {
                    Err(IdentityError::usage(format!(
                        "config '{}' not available and the default is incomplete",
                        path.display()
                    )))
                }
            }
        }
    }

    /// Reads `$HOME/.config/did-identity/<name>`.
    pub fn from_home(name: &str) -> Result<Self> {
        let home = env::var("HOME")
            .map_err(|_| IdentityError::usage("HOME is not set; cannot locate config"))?;
        let path: PathBuf = [home.as_str(), ".config", "did-identity", name]
            .iter()
            .collect();
        Self::from_file(&path)
    }

    pub fn seed(&self) -> Option<&str> {
        self.seed.as_deref()
    }

    pub fn key_name(&self) -> Option<&str> {
        self.key_name.as_deref()
    }

    /// Both fields present and non-empty.
    pub fn is_valid(&self) -> bool {
        let filled = |v: &Option<String>| v.as_deref().map(|s| !s.is_empty()).unwrap_or(false);
        filled(&self.seed) && filled(&self.key_name)
    }

    /// Fills unset fields from `default` and validates the result.
    pub fn with_defaults(&self, default: &SimpleConfig) -> Result<SimpleConfig> {
        let merged = SimpleConfig {
            seed: self.seed.clone().or_else(|| default.seed.clone()),
            key_name: self.key_name.clone().or_else(|| default.key_name.clone()),
        };
        if merged.is_valid() {
            Ok(merged)
        } else {
            Err(IdentityError::usage("incomplete configuration"))
        }
    }
}

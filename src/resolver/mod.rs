// src/resolver/mod.rs
//! DID discovery against the resolver service.

pub mod http;

pub use http::HttpResolverClient;

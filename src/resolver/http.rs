// src/resolver/http.rs
//! HTTP client for the resolver's read-only DID discovery protocol.
//!
//! One call is one `GET <base>/1.0/discover/<url-encoded-did>` with no
//! request body. The outcome is classified into a [`DiscoveryResult`]:
//! a decoded DID document on success, a diagnostic value otherwise.
//! Network-level failures (connection refused, DNS, timeout) are raised as
//! [`IdentityError::Transport`] instead, so callers can tell "resolver
//! said no" apart from "could not reach resolver".

use log::warn;
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::error::{IdentityError, Result};
use crate::models::discovery::{DiscoveryResult, CONTENT_TYPE_TEXT, CONTENT_TYPE_XML};
use crate::models::token::decode_segment;

// one pooled client shared by every default-constructed resolver client;
// safe for concurrent reuse
static SHARED_CLIENT: Lazy<Client> = Lazy::new(Client::new);

/// Wire shape of a successful discovery response: a JSON object carrying
/// the DID document as a three-segment compound token.
#[derive(Debug, Deserialize)]
struct DiscoverResponse {
    token: String,
}

/// Resolver client over HTTP.
#[derive(Debug)]
pub struct HttpResolverClient {
    base: Url,
    client: Client,
}

impl HttpResolverClient {
    /// Client over the shared connection pool.
    pub fn new(base: Url) -> Self {
        Self::with_client(base, SHARED_CLIENT.clone())
    }

    /// Client over a caller-supplied `reqwest::Client`, e.g. one
    /// configured with a timeout.
    pub fn with_client(base: Url, client: Client) -> Self {
        HttpResolverClient { base, client }
    }

    /// Parses `address` as the resolver base URL.
    pub fn from_address(address: &str) -> Result<Self> {
        let base = Url::parse(address).map_err(|e| {
            IdentityError::usage(format!("invalid resolver address '{}': {}", address, e))
        })?;
        Ok(Self::new(base))
    }

    /// Resolves `did` to its published document.
    ///
    /// # Errors
    /// - `IdentityError::Usage` for a blank DID or one that cannot form a
    ///   request URL, before any network activity;
    /// - `IdentityError::Transport` when the resolver cannot be reached.
    /// A resolver that answers negatively (unknown DID, malformed
    /// document, error status) yields an `Ok` result with `is_error` set.
    pub async fn discover(&self, did: &str) -> Result<DiscoveryResult> {
        if did.trim().is_empty() {
            return Err(IdentityError::usage("invalid input string"));
        }
        let url = self
            .base
            .join(&format!("/1.0/discover/{}", urlencoding::encode(did)))
            .map_err(|e| IdentityError::usage(format!("invalid input did: {}", e)))?;

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status.as_u16() > 299 {
            if status == StatusCode::NOT_FOUND {
                return Ok(DiscoveryResult::failure("DID not found", CONTENT_TYPE_TEXT));
            }
            warn!("resolver answered {} for discovery of '{}'", status, did);
            let body = response.text().await?;
            if body.is_empty() {
                return Ok(DiscoveryResult::failure("No result found", CONTENT_TYPE_TEXT));
            }
            return Ok(DiscoveryResult::failure(body, CONTENT_TYPE_XML));
        }

        let body = response.text().await?;
        if body.is_empty() {
            return Ok(DiscoveryResult::failure("invalid response", CONTENT_TYPE_TEXT));
        }
        match decode_document(&body) {
            Ok(document) => Ok(DiscoveryResult::document(document)),
            Err(diagnostic) => Ok(DiscoveryResult::failure(
                format!("parsing error: {}", diagnostic),
                CONTENT_TYPE_TEXT,
            )),
        }
    }
}

/// Extracts the DID document from a discovery body: the JSON envelope's
/// compound token is split on `.` and the payload segment decoded to
/// UTF-8 text.
fn decode_document(body: &str) -> std::result::Result<String, String> {
    let envelope: DiscoverResponse =
        serde_json::from_str(body).map_err(|e| e.to_string())?;
    let payload = envelope
        .token
        .split('.')
        .nth(1)
        .ok_or_else(|| "token has no payload segment".to_string())?;
    let bytes = decode_segment(payload).map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use mockito::mock;

    use super::*;
    use crate::models::discovery::CONTENT_TYPE_JSON;

    fn client() -> HttpResolverClient {
        HttpResolverClient::from_address(&mockito::server_url()).unwrap()
    }

    #[tokio::test]
    async fn test_discover_decodes_the_document_payload() {
        // middle segment: base64 of {"key":"value"}
        let _m = mock("GET", "/1.0/discover/validDID")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("{ \"token\": \"unused.eyJrZXkiOiJ2YWx1ZSJ9.unused\" }")
            .create();

        let result = client().discover("validDID").await.unwrap();

        _m.assert();
        assert_eq!(result.content(), "{\"key\":\"value\"}");
        assert_eq!(result.content_type(), CONTENT_TYPE_JSON);
        assert!(!result.is_error());
    }

    #[tokio::test]
    async fn test_discover_not_found() {
        let _m = mock("GET", "/1.0/discover/unknownDID")
            .with_status(404)
            .create();

        let result = client().discover("unknownDID").await.unwrap();

        assert!(result.is_error());
        assert_eq!(result.content(), "DID not found");
        assert_eq!(result.content_type(), CONTENT_TYPE_TEXT);
    }

    #[tokio::test]
    async fn test_discover_empty_success_body() {
        let _m = mock("GET", "/1.0/discover/emptyBodyDID")
            .with_status(200)
            .with_body("")
            .create();

        let result = client().discover("emptyBodyDID").await.unwrap();

        assert!(result.is_error());
        assert_eq!(result.content(), "invalid response");
    }

    #[tokio::test]
    async fn test_discover_error_status_with_body_relays_it() {
        let _m = mock("GET", "/1.0/discover/failingDID")
            .with_status(500)
            .with_body("boom")
            .create();

        let result = client().discover("failingDID").await.unwrap();

        assert!(result.is_error());
        assert_eq!(result.content(), "boom");
        assert_eq!(result.content_type(), CONTENT_TYPE_XML);
    }

    #[tokio::test]
    async fn test_discover_error_status_without_body() {
        let _m = mock("GET", "/1.0/discover/silentDID")
            .with_status(500)
            .create();

        let result = client().discover("silentDID").await.unwrap();

        assert!(result.is_error());
        assert_eq!(result.content(), "No result found");
    }

    #[tokio::test]
    async fn test_discover_malformed_compound_token() {
        let _m = mock("GET", "/1.0/discover/flatTokenDID")
            .with_status(200)
            .with_body("{ \"token\": \"nodotsinhere\" }")
            .create();

        let result = client().discover("flatTokenDID").await.unwrap();

        assert!(result.is_error());
        assert!(result.content().starts_with("parsing error:"));
    }

    #[tokio::test]
    async fn test_discover_undecodable_payload_segment() {
        let _m = mock("GET", "/1.0/discover/badPayloadDID")
            .with_status(200)
            .with_body("{ \"token\": \"not.a.valid.jwt.format\" }")
            .create();

        let result = client().discover("badPayloadDID").await.unwrap();

        assert!(result.is_error());
        assert!(result.content().starts_with("parsing error:"));
    }

    #[tokio::test]
    async fn test_discover_body_that_is_not_the_envelope() {
        let _m = mock("GET", "/1.0/discover/oddBodyDID")
            .with_status(200)
            .with_body("{ \"document\": {} }")
            .create();

        let result = client().discover("oddBodyDID").await.unwrap();

        assert!(result.is_error());
        assert!(result.content().starts_with("parsing error:"));
    }

    #[tokio::test]
    async fn test_blank_did_fails_before_any_network_call() {
        // no mock registered: a network attempt would error differently
        let err = client().discover("   ").await.unwrap_err();
        assert!(matches!(err, IdentityError::Usage(_)));
    }

    #[tokio::test]
    async fn test_special_characters_are_percent_encoded() {
        let _m = mock("GET", "/1.0/discover/did%3Aexample%3Aspecial%26character")
            .with_status(200)
            .with_body("")
            .create();

        client()
            .discover("did:example:special&character")
            .await
            .unwrap();

        _m.assert();
    }

    #[tokio::test]
    async fn test_unreachable_resolver_is_a_transport_error() {
        let unreachable =
            HttpResolverClient::from_address("http://127.0.0.1:9/").unwrap();

        let err = unreachable.discover("someDID").await.unwrap_err();

        assert!(matches!(err, IdentityError::Transport(_)));
    }

    #[test]
    fn test_invalid_base_address_is_a_usage_error() {
        let err = HttpResolverClient::from_address("not an url").unwrap_err();
        assert!(matches!(err, IdentityError::Usage(_)));
    }
}

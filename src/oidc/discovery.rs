//! OpenID Connect discovery client.
//!
//! # Responsibilities
//! - Derive the well-known discovery URL from the issuer
//! - Fetch the discovery document with a bounded timeout
//! - Reject bad status codes and bodies that are not JSON objects
//!
//! # Design Decisions
//! - One attempt only: no retries, no backoff
//! - Every failure is fatal for startup; the caller decides how to report it

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use url::Url;

use crate::oidc::metadata::OidcMetadata;

/// Path appended to the issuer to locate the discovery document.
pub const WELL_KNOWN_PATH: &str = "/.well-known/openid-configuration";

/// Timeout for the discovery request.
pub const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors that can occur while fetching the discovery document.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The issuer is not an absolute http(s) URL.
    #[error("invalid issuer URL '{issuer}': {reason}")]
    InvalidIssuer { issuer: String, reason: String },

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Connection or transport failure.
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// No complete response within the timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The provider answered with a non-success status.
    #[error("unexpected HTTP status {0}")]
    Status(reqwest::StatusCode),

    /// The body was not valid JSON.
    #[error("invalid discovery document: {0}")]
    Body(#[source] reqwest::Error),

    /// The body was JSON but not an object.
    #[error("discovery document is not a JSON object")]
    NotAnObject,
}

/// Build the discovery URL for an issuer.
///
/// Trailing slashes on the issuer are dropped so the path is not doubled.
pub fn discovery_url(issuer: &str) -> String {
    format!("{}{}", issuer.trim_end_matches('/'), WELL_KNOWN_PATH)
}

/// Client for the provider's discovery endpoint.
#[derive(Debug, Clone)]
pub struct DiscoveryClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl DiscoveryClient {
    /// Create a client with the standard [`DISCOVERY_TIMEOUT`].
    pub fn new() -> Result<Self, DiscoveryError> {
        Self::with_timeout(DISCOVERY_TIMEOUT)
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, DiscoveryError> {
        // No idle pool: the connection closes once the response is read.
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(DiscoveryError::Client)?;
        Ok(Self { client, timeout })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Fetch and decode the issuer's discovery document.
    pub async fn fetch(&self, issuer: &str) -> Result<OidcMetadata, DiscoveryError> {
        let url = discovery_url(issuer);
        tracing::info!(url = %url, "Fetching OpenID configuration");

        match self.fetch_url(issuer, &url).await {
            Ok(metadata) => {
                tracing::info!(
                    url = %url,
                    keys = metadata.document().len(),
                    "Successfully fetched OpenID configuration"
                );
                Ok(metadata)
            }
            Err(e) => {
                tracing::error!(url = %url, error = %e, "Error fetching OpenID configuration");
                Err(e)
            }
        }
    }

    async fn fetch_url(&self, issuer: &str, url: &str) -> Result<OidcMetadata, DiscoveryError> {
        let url = parse_http_url(issuer, url)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DiscoveryError::Status(status));
        }

        let body: Value = response.json().await.map_err(|e| {
            if e.is_timeout() {
                DiscoveryError::Timeout(self.timeout)
            } else {
                DiscoveryError::Body(e)
            }
        })?;

        match body {
            Value::Object(map) => Ok(OidcMetadata::from(map)),
            _ => Err(DiscoveryError::NotAnObject),
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> DiscoveryError {
        if e.is_timeout() {
            DiscoveryError::Timeout(self.timeout)
        } else {
            DiscoveryError::Request(e)
        }
    }
}

/// Fetch the discovery document with a default client.
pub async fn fetch_oidc_metadata(issuer: &str) -> Result<OidcMetadata, DiscoveryError> {
    DiscoveryClient::new()?.fetch(issuer).await
}

fn parse_http_url(issuer: &str, url: &str) -> Result<Url, DiscoveryError> {
    let invalid = |reason: String| DiscoveryError::InvalidIssuer {
        issuer: issuer.to_string(),
        reason,
    };

    let parsed = Url::parse(url).map_err(|e| invalid(e.to_string()))?;
    if matches!(parsed.scheme(), "http" | "https") {
        Ok(parsed)
    } else {
        Err(invalid(format!("unsupported scheme '{}'", parsed.scheme())))
    }
}

//! Configuration schema definitions.
//!
//! Defines the snapshot assembled at startup and the environment variable
//! names and defaults it is read from.

use std::fmt;
use std::time::Duration;

use serde::{Serialize, Serializer};

use crate::config::routes::RouteTable;
use crate::oidc::OidcEndpoints;

pub const SERVICE_ROUTES_JSON: &str = "SERVICE_ROUTES_JSON";
pub const KEYCLOAK_ISSUER: &str = "KEYCLOAK_ISSUER";
pub const KEYCLOAK_CLIENT_ID: &str = "KEYCLOAK_CLIENT_ID";
pub const KEYCLOAK_CLIENT_SECRET: &str = "KEYCLOAK_CLIENT_SECRET";
pub const REDIRECT_URL: &str = "REDIRECT_URL";
pub const KEYCLOAK_SCOPE: &str = "KEYCLOAK_SCOPE";
pub const FRONTEND_URL: &str = "FRONTEND_URL";
pub const TIMEOUT: &str = "TIMEOUT";
pub const ALLOW_METHODS: &str = "ALLOW_METHODS";
pub const ALLOW_HEADERS: &str = "ALLOW_HEADERS";

pub const DEFAULT_SERVICE_ROUTES_JSON: &str = "{}";
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;
pub const DEFAULT_ALLOW_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";
pub const DEFAULT_ALLOW_HEADERS: &str = "Authorization,Content-Type";

/// Everything the gateway needs, assembled once at startup.
///
/// Never mutated after construction; share it with `Arc`.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigurationSnapshot {
    /// Logical service name → routing target.
    pub service_routes: RouteTable,

    /// Identity provider base URL.
    pub issuer: String,

    /// Endpoint URLs from the provider's discovery document.
    pub endpoints: OidcEndpoints,

    pub client_id: String,

    pub client_secret: ClientSecret,

    /// Where the provider sends the user back after login.
    pub redirect_url: String,

    /// Space-separated OAuth2 scopes requested at login.
    pub scope: String,

    /// Browser application origin; the only origin allowed by CORS.
    pub frontend_url: String,

    /// Upstream request timeout in seconds.
    pub timeout_secs: u64,

    pub cors: CorsSettings,
}

impl ConfigurationSnapshot {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Individual scopes from [`Self::scope`].
    pub fn scopes(&self) -> impl Iterator<Item = &str> {
        self.scope.split_whitespace()
    }
}

/// CORS allow-lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorsSettings {
    pub allow_methods: Vec<String>,
    pub allow_headers: Vec<String>,
}

impl Default for CorsSettings {
    fn default() -> Self {
        Self {
            allow_methods: crate::config::env::split_list(DEFAULT_ALLOW_METHODS),
            allow_headers: crate::config::env::split_list(DEFAULT_ALLOW_HEADERS),
        }
    }
}

const REDACTED: &str = "[REDACTED]";

/// OAuth2 client secret. Redacted in `Debug` and serialized output.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientSecret(String);

impl ClientSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The raw secret, for the token exchange.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl Serialize for ClientSecret {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(REDACTED)
    }
}

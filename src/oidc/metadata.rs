//! OpenID provider metadata and the endpoint URLs derived from it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const AUTHORIZATION_ENDPOINT: &str = "authorization_endpoint";
pub const TOKEN_ENDPOINT: &str = "token_endpoint";
pub const JWKS_URI: &str = "jwks_uri";
pub const END_SESSION_ENDPOINT: &str = "end_session_endpoint";
pub const INTROSPECTION_ENDPOINT: &str = "introspection_endpoint";
pub const USERINFO_ENDPOINT: &str = "userinfo_endpoint";

/// The provider's discovery document, kept exactly as served.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OidcMetadata(Map<String, Value>);

impl OidcMetadata {
    /// Look up a URL by key. Missing or non-string entries yield `None`.
    pub fn endpoint(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn issuer(&self) -> Option<&str> {
        self.endpoint("issuer")
    }

    pub fn document(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Extract the endpoints the gateway uses.
    pub fn endpoints(&self) -> OidcEndpoints {
        let url = |key| self.endpoint(key).map(str::to_string);
        OidcEndpoints {
            authorization_endpoint: url(AUTHORIZATION_ENDPOINT),
            token_endpoint: url(TOKEN_ENDPOINT),
            jwks_uri: url(JWKS_URI),
            end_session_endpoint: url(END_SESSION_ENDPOINT),
            introspection_endpoint: url(INTROSPECTION_ENDPOINT),
            userinfo_endpoint: url(USERINFO_ENDPOINT),
        }
    }
}

impl From<Map<String, Value>> for OidcMetadata {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Endpoint URLs published by the identity provider.
///
/// `None` means the provider does not advertise the feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OidcEndpoints {
    /// Login redirect target.
    pub authorization_endpoint: Option<String>,
    pub token_endpoint: Option<String>,
    /// Signing key set for token verification.
    pub jwks_uri: Option<String>,
    /// Logout redirect target.
    pub end_session_endpoint: Option<String>,
    pub introspection_endpoint: Option<String>,
    pub userinfo_endpoint: Option<String>,
}

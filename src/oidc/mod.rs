//! OpenID Connect provider integration.
//!
//! # Data Flow
//! ```text
//! KEYCLOAK_ISSUER
//!     → discovery.rs (GET {issuer}/.well-known/openid-configuration)
//!     → metadata.rs (OidcMetadata, raw document)
//!     → OidcEndpoints (authorization, token, jwks, logout, introspection, userinfo)
//! ```

pub mod discovery;
pub mod metadata;

pub use discovery::{
    discovery_url, fetch_oidc_metadata, DiscoveryClient, DiscoveryError, DISCOVERY_TIMEOUT,
    WELL_KNOWN_PATH,
};
pub use metadata::{OidcEndpoints, OidcMetadata};

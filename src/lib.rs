//! Keycloak Gateway Configuration Library
//!
//! Assembles the gateway's immutable configuration snapshot from the
//! environment and the identity provider's OIDC discovery document.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod oidc;

pub use config::{ConfigError, ConfigurationSnapshot, EnvSource, MapEnv, ProcessEnv};
pub use lifecycle::load_configuration;
pub use oidc::{DiscoveryClient, OidcEndpoints, OidcMetadata};

//! Configuration error types.
//!
//! Two tiers:
//! - [`ConfigError`] is fatal and aborts startup.
//! - [`RouteTableParseError`] is recovered locally by the route loader.

use thiserror::Error;

use crate::oidc::DiscoveryError;

/// Fatal errors raised while assembling the configuration snapshot.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is unset or empty.
    #[error("Missing required environment variable: {name}")]
    MissingConfiguration { name: String },

    /// A required environment variable is set but not valid UTF-8.
    #[error("Environment variable {name} is not valid UTF-8")]
    InvalidUnicode { name: String },

    /// The identity provider's discovery document could not be obtained.
    #[error("OIDC discovery failed for {url}: {source}")]
    DiscoveryFailed {
        url: String,
        #[source]
        source: DiscoveryError,
    },
}

impl ConfigError {
    pub(crate) fn missing(name: &str) -> Self {
        Self::MissingConfiguration {
            name: name.to_string(),
        }
    }
}

/// Reasons the service route table was rejected.
///
/// Never returned to callers; logged and replaced by an empty table.
#[derive(Debug, Error)]
pub enum RouteTableParseError {
    #[error("invalid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}

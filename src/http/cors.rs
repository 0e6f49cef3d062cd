//! CORS policy built from the configuration snapshot.
//!
//! # Design Decisions
//! - Only the frontend origin is allowed; credentials (session cookies) are allowed
//! - Entries that are not valid method/header tokens are skipped with a warning
//! - `*` entries are skipped: wildcards cannot be combined with credentials

use axum::http::{HeaderName, HeaderValue, Method};
use thiserror::Error;
use tower_http::cors::{AllowOrigin, CorsLayer};
use url::Url;

use crate::config::ConfigurationSnapshot;

/// Errors building the CORS policy.
#[derive(Debug, Error)]
pub enum CorsError {
    #[error("invalid FRONTEND_URL '{url}': {reason}")]
    InvalidOrigin { url: String, reason: String },
}

/// Browser origin (`scheme://host[:port]`) of the frontend URL.
pub fn frontend_origin(frontend_url: &str) -> Result<HeaderValue, CorsError> {
    let invalid = |reason: String| CorsError::InvalidOrigin {
        url: frontend_url.to_string(),
        reason,
    };

    let url = Url::parse(frontend_url).map_err(|e| invalid(e.to_string()))?;
    let origin = url.origin();
    if !origin.is_tuple() {
        return Err(invalid("URL has no host origin".into()));
    }

    HeaderValue::from_str(&origin.ascii_serialization()).map_err(|e| invalid(e.to_string()))
}

/// Build the gateway's CORS layer.
pub fn cors_layer(config: &ConfigurationSnapshot) -> Result<CorsLayer, CorsError> {
    let origin = frontend_origin(&config.frontend_url)?;

    let methods: Vec<Method> = config
        .cors
        .allow_methods
        .iter()
        .filter(|m| is_not_wildcard("method", m))
        .filter_map(|m| match Method::from_bytes(m.as_bytes()) {
            Ok(method) => Some(method),
            Err(e) => {
                tracing::warn!(method = %m, error = %e, "Ignoring invalid CORS method");
                None
            }
        })
        .collect();

    let headers: Vec<HeaderName> = config
        .cors
        .allow_headers
        .iter()
        .filter(|h| is_not_wildcard("header", h))
        .filter_map(|h| match HeaderName::from_bytes(h.as_bytes()) {
            Ok(header) => Some(header),
            Err(e) => {
                tracing::warn!(header = %h, error = %e, "Ignoring invalid CORS header");
                None
            }
        })
        .collect();

    tracing::debug!(
        origin = ?origin,
        methods = ?methods,
        headers = ?headers,
        "CORS policy built"
    );

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true))
}

fn is_not_wildcard(kind: &str, value: &str) -> bool {
    if value == "*" {
        tracing::warn!(kind, "Ignoring wildcard CORS entry; credentials are allowed");
        return false;
    }
    true
}

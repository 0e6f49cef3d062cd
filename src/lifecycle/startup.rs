//! Startup orchestration.
//!
//! # Responsibilities
//! - Assemble the configuration snapshot in a fixed order
//! - Run OIDC discovery once the issuer is known
//! - Log the assembled configuration (never the client secret)
//!
//! # Design Decisions
//! - Fail fast: a missing required value or failed discovery is fatal
//! - Route table problems are not fatal
//! - Steps run in order, not concurrently; no partial snapshot escapes

use crate::config::env::EnvSource;
use crate::config::error::ConfigError;
use crate::config::routes::load_route_table;
use crate::config::schema::{self, ClientSecret, ConfigurationSnapshot, CorsSettings};
use crate::oidc::{discovery_url, DiscoveryClient};

/// Build the configuration snapshot from `env`, using `discovery` to fetch
/// the provider metadata.
pub async fn load_configuration(
    env: &impl EnvSource,
    discovery: &DiscoveryClient,
) -> Result<ConfigurationSnapshot, ConfigError> {
    let routes_json =
        env.get_optional_string(schema::SERVICE_ROUTES_JSON, schema::DEFAULT_SERVICE_ROUTES_JSON);
    let service_routes = load_route_table(&routes_json);

    let issuer = required(env, schema::KEYCLOAK_ISSUER)?;

    let metadata = discovery
        .fetch(&issuer)
        .await
        .map_err(|source| ConfigError::DiscoveryFailed {
            url: discovery_url(&issuer),
            source,
        })?;
    let endpoints = metadata.endpoints();

    let client_id = required(env, schema::KEYCLOAK_CLIENT_ID)?;
    let client_secret = ClientSecret::new(required(env, schema::KEYCLOAK_CLIENT_SECRET)?);
    let redirect_url = required(env, schema::REDIRECT_URL)?;
    let scope = required(env, schema::KEYCLOAK_SCOPE)?;
    let frontend_url = required(env, schema::FRONTEND_URL)?;

    let timeout_secs = timeout_secs(env);
    let cors = CorsSettings {
        allow_methods: env.get_string_list(schema::ALLOW_METHODS, schema::DEFAULT_ALLOW_METHODS),
        allow_headers: env.get_string_list(schema::ALLOW_HEADERS, schema::DEFAULT_ALLOW_HEADERS),
    };

    let snapshot = ConfigurationSnapshot {
        service_routes,
        issuer,
        endpoints,
        client_id,
        client_secret,
        redirect_url,
        scope,
        frontend_url,
        timeout_secs,
        cors,
    };

    log_snapshot(&snapshot);
    Ok(snapshot)
}

fn required(env: &impl EnvSource, name: &str) -> Result<String, ConfigError> {
    env.get_required_string(name).map_err(|e| {
        tracing::error!(variable = name, error = %e, "Required environment variable unusable");
        e
    })
}

/// `TIMEOUT` as whole seconds. Unparseable values fall back to the default.
fn timeout_secs(env: &impl EnvSource) -> u64 {
    let raw = match env.var(schema::TIMEOUT) {
        Some(raw) => raw,
        None => return schema::DEFAULT_TIMEOUT_SECS,
    };

    match raw.trim().parse::<u64>() {
        Ok(secs) => secs,
        Err(e) => {
            tracing::warn!(
                value = %raw,
                error = %e,
                default = schema::DEFAULT_TIMEOUT_SECS,
                "Invalid TIMEOUT, using default"
            );
            schema::DEFAULT_TIMEOUT_SECS
        }
    }
}

fn log_snapshot(snapshot: &ConfigurationSnapshot) {
    let endpoints = &snapshot.endpoints;
    let show = |url: &Option<String>| url.clone().unwrap_or_else(|| "<not advertised>".into());

    tracing::info!(
        issuer = %snapshot.issuer,
        client_id = %snapshot.client_id,
        routes = snapshot.service_routes.len(),
        "Keycloak configuration loaded successfully"
    );
    tracing::info!("Authorization URL: {}", show(&endpoints.authorization_endpoint));
    tracing::info!("Token URL: {}", show(&endpoints.token_endpoint));
    tracing::info!("JWKS URL: {}", show(&endpoints.jwks_uri));
    tracing::info!("Logout URL: {}", show(&endpoints.end_session_endpoint));
    tracing::info!("Introspection URL: {}", show(&endpoints.introspection_endpoint));
    tracing::info!("Userinfo URL: {}", show(&endpoints.userinfo_endpoint));
    tracing::info!(
        redirect_url = %snapshot.redirect_url,
        frontend_url = %snapshot.frontend_url,
        scope = %snapshot.scope,
        timeout_secs = snapshot.timeout_secs,
        "Session settings"
    );
    tracing::info!(
        allow_methods = ?snapshot.cors.allow_methods,
        allow_headers = ?snapshot.cors.allow_headers,
        "CORS settings"
    );
}

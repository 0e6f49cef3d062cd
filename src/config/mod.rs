//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! process environment (+ optional .env file)
//!     → env.rs (EnvSource: required / optional / list accessors)
//!     → routes.rs (SERVICE_ROUTES_JSON, fail-soft)
//!     → lifecycle::startup (OIDC discovery, fail-hard)
//!     → ConfigurationSnapshot (immutable)
//!     → read-only consumers (CORS policy, routing, authentication)
//! ```
//!
//! # Design Decisions
//! - Snapshot is immutable once loaded; no reload
//! - Environment is injected, never read from ambient globals by consumers
//! - Malformed routes degrade to an empty table; missing required values abort

pub mod env;
pub mod error;
pub mod routes;
pub mod schema;

pub use env::{EnvSource, MapEnv, ProcessEnv};
pub use error::{ConfigError, RouteTableParseError};
pub use routes::{load_route_table, RouteTable};
pub use schema::{ClientSecret, ConfigurationSnapshot, CorsSettings};

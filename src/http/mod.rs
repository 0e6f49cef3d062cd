//! HTTP-facing adapters built from the configuration snapshot.
//!
//! # Data Flow
//! ```text
//! ConfigurationSnapshot
//!     → cors.rs (frontend origin + method/header allow-lists → CorsLayer)
//!     → applied by the request-routing server
//! ```

pub mod cors;

pub use cors::{cors_layer, frontend_origin, CorsError};

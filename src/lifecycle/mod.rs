//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Read environment → Load routes → Discover OIDC endpoints
//!     → Read remaining settings → Log → ConfigurationSnapshot
//! ```
//!
//! # Design Decisions
//! - Ordered startup: issuer and discovery before client settings
//! - Any fatal error stops the process before it can serve

pub mod startup;

pub use startup::load_configuration;

//! Observability subsystem.
//!
//! All modules log through `tracing` with structured fields; `logging.rs`
//! installs the subscriber in the binary.

pub mod logging;

pub use logging::init_logging;

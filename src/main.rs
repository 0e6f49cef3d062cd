//! Keycloak Gateway configuration bootstrap.
//!
//! # Startup Sequence
//!
//! ```text
//!   .env file (optional)
//!        │
//!        ▼
//!   ┌───────────────┐    ┌────────────────┐    ┌───────────────────────────┐
//!   │  environment  │───▶│  route table   │───▶│   KEYCLOAK_ISSUER         │
//!   │  (EnvSource)  │    │  (fail-soft)   │    │   (required)              │
//!   └───────────────┘    └────────────────┘    └─────────────┬─────────────┘
//!                                                            │
//!                                                            ▼
//!   ┌───────────────┐    ┌────────────────┐    ┌───────────────────────────┐
//!   │ Configuration │◀───│ client, CORS,  │◀───│  OIDC discovery           │
//!   │   Snapshot    │    │ timeout values │    │  (fail-hard, 10s timeout) │
//!   └───────┬───────┘    └────────────────┘    └───────────────────────────┘
//!           │
//!           ▼
//!   ConfigurationSnapshot → CORS validation, `check` / `show` output
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use keycloak_gateway::config::{ConfigurationSnapshot, ProcessEnv};
use keycloak_gateway::http::{cors_layer, CorsError};
use keycloak_gateway::lifecycle::load_configuration;
use keycloak_gateway::observability::init_logging;
use keycloak_gateway::oidc::DiscoveryClient;

#[derive(Parser)]
#[command(name = "keycloak-gateway")]
#[command(about = "Load and validate the Keycloak gateway configuration", long_about = None)]
struct Cli {
    /// Dotenv file loaded before reading the environment
    #[arg(long, default_value = ".env")]
    env_file: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Clone, Copy, Default)]
enum Commands {
    /// Assemble the configuration and report whether it is usable
    #[default]
    Check,
    /// Assemble the configuration and print it as JSON (secrets redacted)
    Show,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Before logging, so RUST_LOG may come from the dotenv file.
    let dotenv = ProcessEnv::load_dotenv(&cli.env_file);

    init_logging();

    tracing::info!("keycloak-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    match dotenv {
        Ok(true) => tracing::info!(path = %cli.env_file.display(), "Loaded dotenv file"),
        Ok(false) => tracing::debug!(path = %cli.env_file.display(), "No dotenv file found"),
        Err(e) => {
            tracing::warn!(path = %cli.env_file.display(), error = %e, "Ignoring unreadable dotenv file")
        }
    }

    let discovery = DiscoveryClient::new()?;
    let config = match load_configuration(&ProcessEnv, &discovery).await {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Configuration failed, aborting startup");
            return Err(e.into());
        }
    };

    validate_cors(&config)?;

    match cli.command.unwrap_or_default() {
        Commands::Check => {
            tracing::info!("Configuration OK");
        }
        Commands::Show => {
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
    }

    Ok(())
}

/// Check that the snapshot yields a usable CORS policy.
fn validate_cors(config: &ConfigurationSnapshot) -> Result<(), CorsError> {
    cors_layer(config).map(|_| {
        tracing::info!(origin = %config.frontend_url, "CORS policy valid");
    })
}

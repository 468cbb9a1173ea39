//! VisionChat - Interactive vision-capable chat client
//!
//! Main entry point for the VisionChat application.

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use visionchat::cli::{Cli, Commands};
use visionchat::commands;
use visionchat::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config = Config::load(&cli.config, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat {
            ref model,
            ref host,
            ref history,
        } => {
            tracing::info!("Starting interactive chat session");
            if let Some(m) = model {
                tracing::debug!("Using model override: {}", m);
            }
            if let Some(h) = host {
                tracing::debug!("Using host override: {}", h);
            }
            if let Some(path) = history {
                tracing::debug!("Using transcript override: {}", path.display());
            }

            commands::chat::run_chat(config).await?;
            Ok(())
        }
    }
}

/// Initialize tracing subscriber with environment filter
fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("visionchat=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

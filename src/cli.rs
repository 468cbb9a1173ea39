//! Command-line interface definition for VisionChat
//!
//! This module defines the CLI structure using clap's derive API.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// VisionChat - Interactive vision-capable chat client for Ollama
///
/// Converse with a local model, attach images to questions, and keep
/// the conversation across sessions.
#[derive(Parser, Debug, Clone)]
#[command(name = "visionchat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for VisionChat
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Override the model from config
        #[arg(short, long)]
        model: Option<String>,

        /// Override the Ollama host from config
        #[arg(long)]
        host: Option<String>,

        /// Override the transcript file from config
        #[arg(long)]
        history: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    ///
    /// # Returns
    ///
    /// Returns the parsed CLI structure
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: "config/config.yaml".to_string(),
            verbose: false,
            command: Commands::Chat {
                model: None,
                host: None,
                history: None,
            },
        }
    }
}

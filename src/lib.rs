//! VisionChat - Interactive vision-capable chat client library
//!
//! This library provides the core functionality for the VisionChat client:
//! a persisted, turn-structured chat transcript and a non-streaming
//! exchange loop against an Ollama chat endpoint, with optional image
//! attachments for vision models.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `transcript`: Turn data model and sequencing rules
//! - `store`: Transcript persistence to a flat JSON file
//! - `media`: Base64 encoding of image files for vision requests
//! - `ollama`: HTTP client for the Ollama chat API
//! - `session`: Exchange orchestration and persistence policy
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli`: Command-line interface definition
//!
//! # Example
//!
//! ```no_run
//! use visionchat::config::Config;
//! use visionchat::session::ChatSession;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let mut session = ChatSession::open(&config)?;
//!     let reply = session.submit("Hello!", None).await?;
//!     println!("{}", reply);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod media;
pub mod ollama;
pub mod session;
pub mod store;
pub mod transcript;

// Re-export commonly used types
pub use config::Config;
pub use error::{Result, VisionChatError};
pub use media::{encode_image, EncodedImage};
pub use session::ChatSession;
pub use store::TranscriptStore;
pub use transcript::{Role, Transcript, Turn};

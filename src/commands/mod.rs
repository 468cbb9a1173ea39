//! Command handlers for VisionChat
//!
//! This module contains the top-level command implementations invoked
//! from `main` after CLI parsing and configuration loading.

use crate::error::Result;

// Chat command handler
pub mod chat {
    //! Interactive chat session handler.
    //!
    //! Opens a session against the configured endpoint and runs a
    //! readline-based loop that submits user input, with an `img`
    //! command for attaching an image file to a question.

    use super::*;
    use crate::config::Config;
    use crate::error::VisionChatError;
    use crate::media::encode_image;
    use crate::session::ChatSession;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;
    use std::path::PathBuf;

    /// Question used when an `img` command carries no text
    const DEFAULT_IMAGE_QUESTION: &str = "Describe this image.";

    /// One parsed line of session input
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum ChatInput {
        /// Plain text to submit as a user turn
        Text(String),
        /// Image path plus the question to ask about it
        Image { path: PathBuf, question: String },
        /// End the session
        Exit,
    }

    /// Start an interactive chat session
    ///
    /// # Arguments
    ///
    /// * `config` - Global configuration (consumed)
    ///
    /// # Errors
    ///
    /// Returns an error when the session cannot be opened (corrupt
    /// transcript, bad configuration) or the readline editor fails.
    /// Endpoint and media errors during the loop are printed and the
    /// session continues.
    pub async fn run_chat(config: Config) -> Result<()> {
        let mut session = ChatSession::open(&config)?;
        let mut rl = DefaultEditor::new()?;

        print_welcome_banner(&config);

        loop {
            match rl.readline(&format!("{} ", "You:".green().bold())) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(trimmed);

                    match parse_input(trimmed) {
                        ChatInput::Exit => break,
                        ChatInput::Text(text) => {
                            submit_and_print(&mut session, &text, None).await;
                        }
                        ChatInput::Image { path, question } => {
                            let image = match encode_image(&path) {
                                Ok(image) => image,
                                Err(e) => {
                                    // A bad image path aborts this turn only.
                                    eprintln!("{} {}", "Error:".red().bold(), e);
                                    continue;
                                }
                            };
                            submit_and_print(&mut session, &question, Some(&image)).await;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    break;
                }
                Err(ReadlineError::Eof) => {
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    /// Submit one exchange and print the outcome
    ///
    /// Failures are printed rather than propagated so the session keeps
    /// running after a failed exchange.
    async fn submit_and_print(
        session: &mut ChatSession,
        text: &str,
        media: Option<&crate::media::EncodedImage>,
    ) {
        match session.submit(text, media).await {
            Ok(reply) => {
                println!("\n{} {}\n", "Bot:".cyan().bold(), reply);
            }
            Err(e) => {
                eprintln!("{} {}\n", "Error:".red().bold(), e);
            }
        }
    }

    /// Classify one line of input
    ///
    /// `exit` and `quit` end the session (case-insensitive). A line whose
    /// first token is `img` (case-insensitive) names an image path and an
    /// optional question; everything else is plain text.
    fn parse_input(line: &str) -> ChatInput {
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            return ChatInput::Exit;
        }

        let mut parts = line.split_whitespace();
        let first = parts.next().unwrap_or_default();
        if first.eq_ignore_ascii_case("img") {
            if let Some(path) = parts.next() {
                let question = parts.collect::<Vec<_>>().join(" ");
                let question = if question.is_empty() {
                    DEFAULT_IMAGE_QUESTION.to_string()
                } else {
                    question
                };
                return ChatInput::Image {
                    path: expand_tilde(path),
                    question,
                };
            }
            // `img` with no path falls through as plain text so the model
            // can answer whatever the user meant.
        }

        ChatInput::Text(line.to_string())
    }

    /// Expand a leading `~` to the user's home directory
    fn expand_tilde(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(base) = directories::BaseDirs::new() {
                return base.home_dir().join(rest);
            }
        } else if path == "~" {
            if let Some(base) = directories::BaseDirs::new() {
                return base.home_dir().to_path_buf();
            }
        }
        PathBuf::from(path)
    }

    /// Display a short banner before the first prompt
    fn print_welcome_banner(config: &Config) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║              VisionChat - Interactive Session                ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Model: {} @ {}", config.ollama.model, config.ollama.host);
        println!("Type 'img <path> [question]' to ask about an image, 'exit' to quit\n");
    }

}

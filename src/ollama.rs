//! Ollama chat client
//!
//! This module implements the exchange with an Ollama server's `/api/chat`
//! endpoint. Requests are always non-streaming: the transcript is sent in
//! full and the reply text is extracted from a single JSON response. An
//! optional base64 image payload is attached to the last message of the
//! request, which is the user turn appended for the current exchange.

use crate::config::OllamaConfig;
use crate::error::{Result, VisionChatError};
use crate::media::EncodedImage;
use crate::transcript::Transcript;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Request structure for the Ollama chat API
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    stream: bool,
}

/// Message structure for outgoing Ollama chat requests
#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    images: Option<Vec<String>>,
}

/// Response structure from the Ollama chat API
#[derive(Debug, Deserialize)]
struct ChatResponse {
    message: ReplyMessage,
}

/// Reply message from the endpoint
///
/// The reply text is required: a success body without it is a contract
/// violation, not an empty reply.
#[derive(Debug, Deserialize)]
struct ReplyMessage {
    content: String,
}

/// Client for a single Ollama chat endpoint
///
/// # Examples
///
/// ```no_run
/// use visionchat::config::OllamaConfig;
/// use visionchat::ollama::OllamaClient;
/// use visionchat::transcript::Transcript;
///
/// # async fn example() -> visionchat::error::Result<()> {
/// let config = OllamaConfig::default();
/// let client = OllamaClient::new(&config)?;
///
/// let mut transcript = Transcript::new();
/// transcript.ensure_system_prompt("You are a helpful assistant.");
/// transcript.append_user("Hello!");
///
/// let reply = client.send(&transcript, None).await?;
/// println!("{}", reply);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct OllamaClient {
    client: Client,
    config: OllamaConfig,
}

impl OllamaClient {
    /// Create a new Ollama client
    ///
    /// # Errors
    ///
    /// Returns a `Config` error if HTTP client initialization fails
    pub fn new(config: &OllamaConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("visionchat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                VisionChatError::Config(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!(
            "Initialized Ollama client: host={}, model={}",
            config.host,
            config.model
        );

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// The configured Ollama host
    pub fn host(&self) -> &str {
        &self.config.host
    }

    /// The configured model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send the transcript for completion and return the reply text
    ///
    /// The full transcript is serialized into a non-streaming chat request.
    /// When `media` is present it is attached as a one-element image list
    /// on the last message of the request.
    ///
    /// # Errors
    ///
    /// * [`VisionChatError::EndpointUnreachable`] when the request cannot
    ///   be delivered (connect failure, timeout)
    /// * [`VisionChatError::EndpointError`] on a non-success status
    /// * [`VisionChatError::MalformedReply`] when the success body does
    ///   not contain a `message.content`
    pub async fn send(
        &self,
        transcript: &Transcript,
        media: Option<&EncodedImage>,
    ) -> Result<String> {
        let url = format!("{}/api/chat", self.config.host);
        let request = self.build_request(transcript, media);

        tracing::debug!(
            "Sending chat request: {} messages, media={}",
            request.messages.len(),
            media.is_some()
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Chat request failed: {}", e);
                VisionChatError::EndpointUnreachable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::error!("Ollama returned error {}: {}", status, message);
            return Err(VisionChatError::EndpointError {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse chat response: {}", e);
            VisionChatError::MalformedReply(e.to_string())
        })?;

        Ok(chat_response.message.content)
    }

    /// Build the outgoing request for a transcript and optional image
    fn build_request(
        &self,
        transcript: &Transcript,
        media: Option<&EncodedImage>,
    ) -> ChatRequest {
        let mut messages: Vec<ChatMessage> = transcript
            .turns()
            .iter()
            .map(|turn| ChatMessage {
                role: turn.role.as_str().to_string(),
                content: turn.content.clone(),
                images: None,
            })
            .collect();

        if let Some(image) = media {
            if let Some(last) = messages.last_mut() {
                last.images = Some(vec![image.as_str().to_string()]);
            }
        }

        ChatRequest {
            model: self.config.model.clone(),
            messages,
            stream: false,
        }
    }
}

//! Chat session orchestration
//!
//! Ties the transcript, store, and Ollama client together into the
//! exchange cycle: append the user turn, send the transcript, append the
//! reply, persist. Persistence happens only after a successful exchange;
//! a failed exchange rolls the in-memory transcript back so disk and
//! memory never diverge.

use crate::config::Config;
use crate::error::Result;
use crate::media::EncodedImage;
use crate::ollama::OllamaClient;
use crate::store::TranscriptStore;
use crate::transcript::Transcript;

/// A single interactive conversation against one endpoint
///
/// Owns the transcript exclusively; exchanges are strictly sequential.
///
/// # Examples
///
/// ```no_run
/// use visionchat::config::Config;
/// use visionchat::session::ChatSession;
///
/// # async fn example() -> visionchat::error::Result<()> {
/// let config = Config::default();
/// let mut session = ChatSession::open(&config)?;
/// let reply = session.submit("Hello!", None).await?;
/// println!("{}", reply);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ChatSession {
    store: TranscriptStore,
    client: OllamaClient,
    transcript: Transcript,
}

impl ChatSession {
    /// Open a session: load the persisted transcript and normalize it
    ///
    /// A missing transcript file starts the session empty; the system
    /// instruction from the configuration is guaranteed to lead the
    /// transcript afterwards.
    ///
    /// # Errors
    ///
    /// Returns `StorageCorrupt` when the persisted transcript cannot be
    /// parsed, and `Config` errors from client construction.
    pub fn open(config: &Config) -> Result<Self> {
        let store = TranscriptStore::new(config.chat.history_file.clone());
        let client = OllamaClient::new(&config.ollama)?;

        let mut transcript = store.load()?;
        transcript.ensure_system_prompt(&config.chat.system_prompt);

        tracing::info!(
            "Opened chat session with {} prior turns",
            transcript.len()
        );

        Ok(Self {
            store,
            client,
            transcript,
        })
    }

    /// The current transcript
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Run one exchange: user text in, assistant reply out
    ///
    /// On success the user and assistant turns are appended and the full
    /// transcript is persisted. On any failure the in-memory transcript
    /// is rolled back to its pre-exchange state and the persisted file is
    /// left untouched.
    ///
    /// # Errors
    ///
    /// Propagates endpoint errors from the client and
    /// `StorageUnwritable` from the save.
    pub async fn submit(&mut self, text: &str, media: Option<&EncodedImage>) -> Result<String> {
        let checkpoint = self.transcript.len();
        self.transcript.append_user(text);

        let reply = match self.client.send(&self.transcript, media).await {
            Ok(reply) => reply,
            Err(e) => {
                self.transcript.truncate(checkpoint);
                return Err(e);
            }
        };

        self.transcript.append_assistant(&reply);

        if let Err(e) = self.store.save(&self.transcript) {
            self.transcript.truncate(checkpoint);
            return Err(e);
        }

        Ok(reply)
    }
}

//! Turn-structured chat transcript
//!
//! This module defines the transcript data model and the sequencing rules
//! applied to it: a mandatory leading system instruction and append-only
//! user/assistant turns. The transcript serializes transparently as a JSON
//! array of turn records, which is also the on-disk format.

use serde::{Deserialize, Serialize};

/// Speaker of a single turn
///
/// Serialized in lowercase to match the wire and storage formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The fixed instruction that opens every transcript
    System,
    /// Input typed by the person at the terminal
    User,
    /// Reply produced by the model
    Assistant,
}

impl Role {
    /// Wire representation of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn of the conversation
///
/// A turn is a role plus its text content. Media never appears here: an
/// image is a request-scoped value attached to the outgoing wire message
/// only, so persisted transcripts stay small and text-only.
///
/// # Examples
///
/// ```
/// use visionchat::transcript::{Role, Turn};
///
/// let turn = Turn::user("What is in this picture?");
/// assert_eq!(turn.role, Role::User);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Turn {
    /// Who produced this turn
    pub role: Role,
    /// The text of the turn
    pub content: String,
}

impl Turn {
    /// Create a system turn
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Create a user turn
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Create an assistant turn
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Ordered sequence of conversation turns
///
/// Serialized transparently, so a transcript reads and writes as a plain
/// JSON array of turn records. Invariant: once normalized with
/// [`Transcript::ensure_system_prompt`], a non-empty transcript always
/// starts with a system turn. No alternation is enforced on the rest.
///
/// # Examples
///
/// ```
/// use visionchat::transcript::{Role, Transcript};
///
/// let mut transcript = Transcript::new();
/// transcript.ensure_system_prompt("You are a helpful assistant.");
/// transcript.append_user("Hello");
/// transcript.append_assistant("Hi there!");
/// assert_eq!(transcript.len(), 3);
/// assert_eq!(transcript.turns()[0].role, Role::System);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a transcript from an existing turn sequence
    pub fn from_turns(turns: Vec<Turn>) -> Self {
        Self { turns }
    }

    /// View the turns in order
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the transcript has no turns
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Guarantee the transcript opens with the given system instruction
    ///
    /// Prepends a system turn when the transcript is empty or its first
    /// turn is not a system turn. Idempotent: calling this again on a
    /// normalized transcript changes nothing, even if the stored
    /// instruction text differs from `instruction`.
    pub fn ensure_system_prompt(&mut self, instruction: &str) {
        let needs_prompt = self
            .turns
            .first()
            .map(|turn| turn.role != Role::System)
            .unwrap_or(true);

        if needs_prompt {
            tracing::debug!("Prepending system instruction to transcript");
            self.turns.insert(0, Turn::system(instruction));
        }
    }

    /// Append a user turn
    ///
    /// Empty text is allowed; no validation beyond ordering is applied.
    pub fn append_user(&mut self, text: impl Into<String>) {
        self.turns.push(Turn::user(text));
    }

    /// Append an assistant turn
    pub fn append_assistant(&mut self, reply: impl Into<String>) {
        self.turns.push(Turn::assistant(reply));
    }

    /// Roll the transcript back to a previous length
    ///
    /// Used to discard the in-flight turns of a failed exchange. A `len`
    /// at or beyond the current length is a no-op.
    pub fn truncate(&mut self, len: usize) {
        self.turns.truncate(len);
    }
}

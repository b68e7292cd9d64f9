//! Chat session: an append-only transcript replayed on every request.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use evergreen_common::new_id;
use serde::{Deserialize, Serialize};

use crate::prompts::GREETING;
use crate::{ChatTurn, GenerationClient, GenerationError, Role};

use super::flight::{FlightPolicy, FlightSession};

/// Shown when the backend answers with no text.
pub const EMPTY_REPLY_FALLBACK: &str = "I'm sorry, I couldn't process that. Can you try again?";

/// Shown when the backend call fails for any reason.
pub const ERROR_FALLBACK: &str = "Oops! I encountered an error connecting to my botanical database. Please check your connection.";

/// One transcript entry. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: new_id(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn turn(&self) -> ChatTurn {
        ChatTurn::new(self.role, self.content.clone())
    }
}

/// Append-only message history.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// A transcript seeded with the assistant greeting.
    pub fn new() -> Self {
        Self::seeded(GREETING)
    }

    pub fn seeded(greeting: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::new(Role::Assistant, greeting)],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new()
    }
}

pub struct ChatRequest {
    context: Vec<ChatTurn>,
    input: String,
}

#[async_trait]
impl FlightPolicy for Transcript {
    type Request = ChatRequest;
    type Reply = String;

    const KIND: &'static str = "chat";

    fn issue(&mut self, input: &str) -> ChatRequest {
        // Context is the history before this turn; the new input travels separately.
        let context = self.messages.iter().map(Message::turn).collect();
        self.push(Role::User, input);
        ChatRequest {
            context,
            input: input.to_string(),
        }
    }

    async fn dispatch(
        client: &dyn GenerationClient,
        request: ChatRequest,
    ) -> Result<String, GenerationError> {
        client.complete_chat(&request.context, &request.input).await
    }

    fn settle(&mut self, result: Result<String, GenerationError>) {
        let content = match result {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => EMPTY_REPLY_FALLBACK.to_string(),
            Err(_) => ERROR_FALLBACK.to_string(),
        };
        self.push(Role::Assistant, content);
    }
}

/// Conversation with the landscaping assistant.
pub type ChatSession = FlightSession<Transcript>;

impl FlightSession<Transcript> {
    /// A new chat opened with the standard greeting.
    pub fn new(client: Arc<dyn GenerationClient>) -> Self {
        Self::with_policy(client, Transcript::new())
    }

    /// Snapshot of the transcript in display order.
    pub fn transcript(&self) -> Vec<Message> {
        self.read(|t| t.messages.clone())
    }

    pub fn len(&self) -> usize {
        self.read(|t| t.messages.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The newest transcript entry.
    pub fn last_message(&self) -> Option<Message> {
        self.read(|t| t.messages.last().cloned())
    }
}

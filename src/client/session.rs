use chrono::{DateTime, Local};
use std::fmt;
use tracing::debug;

use crate::client::{AgentClient, ClientError};

pub const GREETING: &str = "Hello! I'm your AI assistant. How can I help you today?";
pub const EMPTY_ANSWER_FALLBACK: &str = "I couldn’t find any relevant information.";
pub const ERROR_MARKER: &str = "❌ Error:";

pub const QUICK_PROMPTS: [&str; 4] = [
    "Explain quantum computing",
    "Write a Python function",
    "Summarize this topic",
    "Help me brainstorm ideas",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Agent,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::User => write!(f, "You"),
            Role::Agent => write!(f, "Agent"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    id: u64,
    role: Role,
    text: String,
    created_at: DateTime<Local>,
}

impl ChatMessage {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn is_error(&self) -> bool {
        self.role == Role::Agent && self.text.starts_with(ERROR_MARKER)
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.created_at.format("%H:%M"),
            self.role,
            self.text
        )
    }
}

/// Conversation state for one chat window.
///
/// Messages are only ever appended. `awaiting_response` gates submissions so
/// at most one request is outstanding.
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<ChatMessage>,
    pending_input: String,
    awaiting_response: bool,
    next_id: u64,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_greeting() -> Self {
        let mut session = Self::new();
        session.push(Role::Agent, GREETING.to_string());
        session
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.pending_input = text.into();
    }

    pub fn is_awaiting(&self) -> bool {
        self.awaiting_response
    }

    /// Whether the send control should be enabled.
    pub fn can_submit(&self) -> bool {
        !self.awaiting_response && !self.pending_input.trim().is_empty()
    }

    /// Records the user's message and flips to awaiting. Returns the text to
    /// send, or `None` when the submission is ignored.
    pub fn begin_submit(&mut self, text: &str) -> Option<String> {
        if text.trim().is_empty() || self.awaiting_response {
            debug!(awaiting = self.awaiting_response, "Submission ignored");
            return None;
        }

        self.push(Role::User, text.to_string());
        self.pending_input.clear();
        self.awaiting_response = true;
        Some(text.to_string())
    }

    /// Applies the outcome of the outstanding request.
    pub fn finish(&mut self, result: Result<String, ClientError>) {
        if !self.awaiting_response {
            debug!("No request in flight; outcome dropped");
            return;
        }

        let text = match result {
            Ok(output) if output.trim().is_empty() => EMPTY_ANSWER_FALLBACK.to_string(),
            Ok(output) => output,
            Err(e) => format!("{} {}", ERROR_MARKER, e),
        };

        self.push(Role::Agent, text);
        self.awaiting_response = false;
    }

    /// Sends `text` through `client` and records the reply. Returns whether a
    /// request was issued.
    pub async fn submit(&mut self, text: &str, client: &dyn AgentClient) -> bool {
        let Some(input) = self.begin_submit(text) else {
            return false;
        };

        let result = client.ask(&input).await;
        self.finish(result);
        true
    }

    /// Transcript lines in display order.
    pub fn render(&self) -> Vec<String> {
        self.messages.iter().map(|m| m.to_string()).collect()
    }

    fn push(&mut self, role: Role, text: String) {
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id: self.next_id,
            role,
            text,
            created_at: Local::now(),
        });
    }
}

//! Common types for completion requests

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role that originated a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One message in a conversation. Never mutated once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// True when the content holds something other than whitespace
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

/// Completion request: the ordered turns to send
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmRequest {
    pub messages: Vec<Turn>,
}

impl LlmRequest {
    pub fn new(messages: Vec<Turn>) -> Self {
        Self { messages }
    }

    /// A request is sendable only if at least one turn carries content
    pub fn has_content(&self) -> bool {
        self.messages.iter().any(Turn::has_content)
    }
}

/// Completion response
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub reply: String,
    pub usage: Usage,
}

/// Token accounting reported by the service, when present
#[derive(Debug, Clone, Default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

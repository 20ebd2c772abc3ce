//! Conversation transcript
//!
//! Append-only, ordered list of turns for one widget instance, optionally
//! seeded with a system turn. Lives in memory for the lifetime of the widget.

use crate::llm::{LlmRequest, Role, Turn};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How much of the transcript each completion request carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    /// Record every turn and send the whole transcript
    #[default]
    Full,
    /// Record nothing; each request is the latest user turn alone
    LatestOnly,
}

impl HistoryMode {
    /// Whether accepted sends and replies are appended to the store
    pub fn records_turns(self) -> bool {
        matches!(self, Self::Full)
    }
}

impl fmt::Display for HistoryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => f.write_str("full"),
            Self::LatestOnly => f.write_str("latest"),
        }
    }
}

impl FromStr for HistoryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "stateful" => Ok(Self::Full),
            "latest" | "stateless" => Ok(Self::LatestOnly),
            other => Err(format!("unknown history mode: {other}")),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("user turn content must not be empty")]
    EmptyUserContent,
}

/// Ordered transcript. There is no removal operation.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    turns: Vec<Turn>,
}

impl ConversationStore {
    /// Create a store, seeding the system turn when one is given
    pub fn new(system_prompt: Option<String>) -> Self {
        let turns = system_prompt
            .filter(|text| !text.trim().is_empty())
            .map(Turn::system)
            .into_iter()
            .collect();
        Self { turns }
    }

    /// Append a turn at the end of the transcript
    pub fn append_turn(
        &mut self,
        role: Role,
        content: impl Into<String>,
    ) -> Result<(), StoreError> {
        let turn = Turn::new(role, content);
        if role == Role::User && !turn.has_content() {
            return Err(StoreError::EmptyUserContent);
        }
        self.turns.push(turn);
        Ok(())
    }

    /// Full ordered sequence, for transmission
    pub fn snapshot(&self) -> Vec<Turn> {
        self.turns().to_vec()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Build the outbound request for `latest`.
    ///
    /// In `Full` mode the user turn has already been appended, so the request
    /// is the snapshot. In `LatestOnly` mode it is `latest` and nothing else,
    /// not even the system turn.
    pub fn payload_for(&self, mode: HistoryMode, latest: &Turn) -> LlmRequest {
        match mode {
            HistoryMode::Full => LlmRequest::new(self.snapshot()),
            HistoryMode::LatestOnly => LlmRequest::new(vec![latest.clone()]),
        }
    }
}

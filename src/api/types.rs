//! API request and response types

use crate::llm::Turn;
use crate::panel::{ClickTarget, PanelLayout, Point};
use serde::{Deserialize, Serialize};

/// Sync the input field's contents
#[derive(Debug, Deserialize)]
pub struct InputRequest {
    pub text: String,
}

/// Press send; `text`, when present, is submitted instead of the input field
#[derive(Debug, Default, Deserialize)]
pub struct SendRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// Show or hide the panel explicitly
#[derive(Debug, Deserialize)]
pub struct PanelRequest {
    pub open: bool,
}

/// A document click, either pre-classified by the page or as raw geometry
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ClickRequest {
    Target { target: ClickTarget },
    Point { point: Point, layout: PanelLayout },
}

impl ClickRequest {
    pub fn target(&self) -> ClickTarget {
        match self {
            ClickRequest::Target { target } => *target,
            ClickRequest::Point { point, layout } => layout.classify(*point),
        }
    }
}

/// Response for widget actions
#[derive(Debug, Serialize)]
pub struct QueuedResponse {
    pub queued: bool,
}

/// Current conversation store contents
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub turns: Vec<Turn>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

//! Trait abstractions for runtime I/O
//!
//! These traits let the executor run against mock implementations.

use crate::llm::{LlmError, LlmRequest, LlmService};
use crate::state_machine::RequestId;
use async_trait::async_trait;
use std::sync::Arc;

/// The presentation layer the widget renders into.
///
/// Called only from the runtime's event loop, never concurrently.
pub trait Presentation: Send {
    /// Append a message to the visible list
    fn render_message(&mut self, text: &str, from_user: bool);

    /// Show the pending placeholder for `request_id`
    fn render_placeholder(&mut self, request_id: RequestId, text: &str);

    /// Remove the placeholder for `request_id`, if it is still shown
    fn remove_placeholder(&mut self, request_id: RequestId);

    fn clear_input(&mut self);

    /// Current contents of the input field
    fn read_input(&self) -> String;

    fn show_panel(&mut self);

    fn hide_panel(&mut self);
}

/// Client for completion requests
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Resolve to the reply text, or fail
    async fn complete(&self, request: &LlmRequest) -> Result<String, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

// ============================================================================
// Arc implementations for trait objects
// ============================================================================

#[async_trait]
impl<T: LlmClient + ?Sized> LlmClient for Arc<T> {
    async fn complete(&self, request: &LlmRequest) -> Result<String, LlmError> {
        (**self).complete(request).await
    }

    fn model_id(&self) -> &str {
        (**self).model_id()
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Adapter to use an `LlmService` as `LlmClient`
pub struct ServiceLlmClient {
    service: Arc<dyn LlmService>,
}

impl ServiceLlmClient {
    pub fn new(service: Arc<dyn LlmService>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl LlmClient for ServiceLlmClient {
    async fn complete(&self, request: &LlmRequest) -> Result<String, LlmError> {
        self.service.complete(request).await.map(|response| response.reply)
    }

    fn model_id(&self) -> &str {
        self.service.model_id()
    }
}

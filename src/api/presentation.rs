//! Presentation backed by the browser page
//!
//! The runtime renders into a server-side view model; every change is also
//! broadcast as a `ViewEvent` so connected pages can mirror it over SSE.

use crate::runtime::Presentation;
use crate::state_machine::RequestId;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

const VIEW_EVENT_BUFFER: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    User,
    Assistant,
    Placeholder,
}

/// A message as shown in the page's message list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedMessage {
    pub id: u64,
    pub kind: MessageKind,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<RequestId>,
}

/// Full view state, sent to a page when it connects
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewSnapshot {
    pub messages: Vec<RenderedMessage>,
    pub input: String,
    pub panel_open: bool,
}

/// Incremental view change
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViewEvent {
    MessageAdded { message: RenderedMessage },
    MessageRemoved { id: u64 },
    InputCleared,
    PanelChanged { open: bool },
}

#[derive(Debug, Default)]
struct ViewModel {
    snapshot: ViewSnapshot,
    next_id: u64,
}

/// View model shared between the runtime and the HTTP handlers
#[derive(Debug, Clone)]
pub struct SharedView {
    model: Arc<Mutex<ViewModel>>,
    events: broadcast::Sender<ViewEvent>,
}

impl SharedView {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(VIEW_EVENT_BUFFER);
        Self {
            model: Arc::new(Mutex::new(ViewModel::default())),
            events,
        }
    }

    fn lock(&self) -> MutexGuard<'_, ViewModel> {
        self.model.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[cfg(test)]
    pub fn snapshot(&self) -> ViewSnapshot {
        self.lock().snapshot.clone()
    }

    /// Snapshot plus a receiver that sees exactly the changes made after it
    pub fn snapshot_and_subscribe(&self) -> (ViewSnapshot, broadcast::Receiver<ViewEvent>) {
        let model = self.lock();
        (model.snapshot.clone(), self.events.subscribe())
    }

    /// Sync the input field from the page
    pub fn set_input(&self, text: impl Into<String>) {
        self.lock().snapshot.input = text.into();
    }

    fn update(&self, f: impl FnOnce(&mut ViewModel) -> Option<ViewEvent>) {
        let mut model = self.lock();
        if let Some(event) = f(&mut model) {
            // No connected page is fine
            let _ = self.events.send(event);
        }
    }

    fn push_message(&self, kind: MessageKind, text: &str, request_id: Option<RequestId>) {
        self.update(|model| {
            model.next_id += 1;
            let message = RenderedMessage {
                id: model.next_id,
                kind,
                text: text.to_string(),
                request_id,
            };
            model.snapshot.messages.push(message.clone());
            Some(ViewEvent::MessageAdded { message })
        });
    }
}

impl Default for SharedView {
    fn default() -> Self {
        Self::new()
    }
}

/// `Presentation` that renders into a `SharedView`
pub struct BrowserPresentation {
    view: SharedView,
}

impl BrowserPresentation {
    pub fn new(view: SharedView) -> Self {
        Self { view }
    }
}

impl Presentation for BrowserPresentation {
    fn render_message(&mut self, text: &str, from_user: bool) {
        let kind = if from_user {
            MessageKind::User
        } else {
            MessageKind::Assistant
        };
        self.view.push_message(kind, text, None);
    }

    fn render_placeholder(&mut self, request_id: RequestId, text: &str) {
        self.view
            .push_message(MessageKind::Placeholder, text, Some(request_id));
    }

    fn remove_placeholder(&mut self, request_id: RequestId) {
        self.view.update(|model| {
            let messages = &mut model.snapshot.messages;
            let index = messages.iter().position(|m| {
                m.kind == MessageKind::Placeholder && m.request_id == Some(request_id)
            })?;
            let removed = messages.remove(index);
            Some(ViewEvent::MessageRemoved { id: removed.id })
        });
    }

    fn clear_input(&mut self) {
        self.view.update(|model| {
            model.snapshot.input.clear();
            Some(ViewEvent::InputCleared)
        });
    }

    fn read_input(&self) -> String {
        self.view.lock().snapshot.input.clone()
    }

    fn show_panel(&mut self) {
        self.view.update(|model| {
            model.snapshot.panel_open = true;
            Some(ViewEvent::PanelChanged { open: true })
        });
    }

    fn hide_panel(&mut self) {
        self.view.update(|model| {
            model.snapshot.panel_open = false;
            Some(ViewEvent::PanelChanged { open: false })
        });
    }
}

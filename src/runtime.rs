//! Runtime for a single widget instance
//!
//! One event loop owns the widget state, the conversation store and the
//! presentation. Completion requests run as spawned tasks that report back
//! into the same loop, tagged with their request id.

mod executor;
pub mod traits;


#[allow(unused_imports)] // Public API re-exports
pub use executor::WidgetRuntime;
pub use traits::*;

use crate::conversation::ConversationStore;
use crate::llm::Turn;
use crate::panel::{ClickTarget, PanelEvent};
use crate::state_machine::{Event, WidgetContext};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

const EVENT_BUFFER: usize = 64;

/// Everything the event loop reacts to
#[derive(Debug)]
pub enum WidgetEvent {
    /// Send button or Enter: read the input from the presentation
    SendRequested,
    /// Submit text directly, bypassing the input field
    Submit { text: String },
    Panel(PanelEvent),
    /// Completion outcome reported by a request task
    Machine(Event),
    /// Read the current transcript
    Transcript { reply: oneshot::Sender<Vec<Turn>> },
    /// Stop the loop; outstanding outcomes are dropped
    Shutdown,
}

#[derive(Debug, Error)]
#[error("Widget runtime has shut down")]
pub struct RuntimeClosed;

/// Handle to interact with a running widget
#[derive(Clone)]
pub struct WidgetHandle {
    event_tx: mpsc::Sender<WidgetEvent>,
}

impl WidgetHandle {
    pub async fn send(&self, event: WidgetEvent) -> Result<(), RuntimeClosed> {
        self.event_tx.send(event).await.map_err(|_| RuntimeClosed)
    }

    pub async fn request_send(&self) -> Result<(), RuntimeClosed> {
        self.send(WidgetEvent::SendRequested).await
    }

    pub async fn submit(&self, text: impl Into<String>) -> Result<(), RuntimeClosed> {
        self.send(WidgetEvent::Submit { text: text.into() }).await
    }

    pub async fn toggle_panel(&self) -> Result<(), RuntimeClosed> {
        self.send(WidgetEvent::Panel(PanelEvent::Toggle)).await
    }

    pub async fn set_panel(&self, open: bool) -> Result<(), RuntimeClosed> {
        let event = if open { PanelEvent::Show } else { PanelEvent::Hide };
        self.send(WidgetEvent::Panel(event)).await
    }

    pub async fn document_click(&self, target: ClickTarget) -> Result<(), RuntimeClosed> {
        self.send(WidgetEvent::Panel(PanelEvent::DocumentClick(target)))
            .await
    }

    pub async fn transcript(&self) -> Result<Vec<Turn>, RuntimeClosed> {
        let (reply, rx) = oneshot::channel();
        self.send(WidgetEvent::Transcript { reply }).await?;
        rx.await.map_err(|_| RuntimeClosed)
    }

    pub async fn shutdown(&self) -> Result<(), RuntimeClosed> {
        self.send(WidgetEvent::Shutdown).await
    }
}

/// Start a widget on the current tokio runtime
pub fn spawn_widget<P, L>(
    context: WidgetContext,
    store: ConversationStore,
    presentation: P,
    llm_client: L,
) -> (WidgetHandle, JoinHandle<()>)
where
    P: Presentation + 'static,
    L: LlmClient + 'static,
{
    let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
    let runtime = WidgetRuntime::new(
        context,
        store,
        presentation,
        llm_client,
        event_rx,
        event_tx.downgrade(),
    );
    let join = tokio::spawn(runtime.run());
    (WidgetHandle { event_tx }, join)
}

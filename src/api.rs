//! HTTP surface for the chat widget
//!
//! Serves the widget page and relays page actions into the widget runtime.
//! The page mirrors the server-side view over SSE.

mod assets;
mod handlers;
pub mod presentation;
mod sse;
mod types;

pub use handlers::create_router;

use crate::runtime::WidgetHandle;
use presentation::SharedView;
use tokio::sync::watch;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub widget: WidgetHandle,
    pub view: SharedView,
    /// Flips to true when the server starts shutting down; ends SSE streams
    pub shutdown: watch::Receiver<bool>,
}

impl AppState {
    pub fn new(widget: WidgetHandle, view: SharedView, shutdown: watch::Receiver<bool>) -> Self {
        Self {
            widget,
            view,
            shutdown,
        }
    }
}

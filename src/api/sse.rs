//! Server-Sent Events support

use super::presentation::{SharedView, ViewEvent, ViewSnapshot};
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::{self, Stream, StreamExt};
use serde_json::json;
use std::convert::Infallible;
use std::time::Duration;
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::watch;

/// What a connected page receives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewFrame {
    /// Full view; the page replaces whatever it shows
    Init(ViewSnapshot),
    View(ViewEvent),
}

/// Snapshot first, then every change. A receiver that falls behind gets a
/// fresh snapshot and carries on from there.
pub fn view_frames(view: SharedView) -> impl Stream<Item = ViewFrame> {
    let (snapshot, rx) = view.snapshot_and_subscribe();
    let init = stream::once(async move { ViewFrame::Init(snapshot) });

    let updates = stream::unfold((view, rx), |(view, mut rx)| async move {
        match rx.recv().await {
            Ok(event) => Some((ViewFrame::View(event), (view, rx))),
            Err(RecvError::Lagged(skipped)) => {
                tracing::debug!(skipped, "SSE client lagged, resending view snapshot");
                let (snapshot, rx) = view.snapshot_and_subscribe();
                Some((ViewFrame::Init(snapshot), (view, rx)))
            }
            Err(RecvError::Closed) => None,
        }
    });

    init.chain(updates)
}

/// Convert the view to an SSE stream that ends once `shutdown` turns true
pub fn sse_stream(
    view: SharedView,
    mut shutdown: watch::Receiver<bool>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stopped = async move {
        // A dropped sender also ends the stream
        let _ = shutdown.wait_for(|stopping| *stopping).await;
    };

    let frames = view_frames(view)
        .take_until(stopped)
        .map(|frame| Ok(to_event(&frame)));

    Sse::new(frames).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("ping"),
    )
}

fn to_event(frame: &ViewFrame) -> Event {
    match frame {
        ViewFrame::Init(snapshot) => {
            let data = json!({
                "type": "init",
                "messages": snapshot.messages,
                "input": snapshot.input,
                "panel_open": snapshot.panel_open,
            });
            Event::default().event("init").data(data.to_string())
        }
        ViewFrame::View(event) => {
            let data = serde_json::to_string(event).unwrap_or_else(|_| "{}".to_string());
            Event::default().event("view").data(data)
        }
    }
}

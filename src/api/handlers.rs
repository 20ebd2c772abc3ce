//! HTTP request handlers

use super::assets::{get_index_html, serve_static};
use super::sse::sse_stream;
use super::types::{
    ClickRequest, ErrorResponse, InputRequest, PanelRequest, QueuedResponse, SendRequest,
    TranscriptResponse,
};
use super::AppState;
use crate::runtime::RuntimeClosed;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Host page with the widget mounted
        .route("/", get(serve_widget))
        // Static assets (embedded or filesystem fallback)
        .route("/assets/*path", get(serve_static))
        // View mirroring
        .route("/api/widget/stream", get(stream_widget))
        // Page actions
        .route("/api/widget/input", post(set_input))
        .route("/api/widget/send", post(send_message))
        .route("/api/widget/toggle", post(toggle_panel))
        .route("/api/widget/panel", post(set_panel))
        .route("/api/widget/click", post(document_click))
        .route("/api/widget/transcript", get(get_transcript))
        .route("/version", get(get_version))
        .with_state(state)
}

async fn serve_widget() -> impl IntoResponse {
    match get_index_html() {
        Some(content) => Html(content).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Html("<h1>404 - widget page not found in ui/dist</h1>".to_string()),
        )
            .into_response(),
    }
}

async fn stream_widget(State(state): State<AppState>) -> impl IntoResponse {
    sse_stream(state.view.clone(), state.shutdown.clone())
}

async fn set_input(
    State(state): State<AppState>,
    Json(req): Json<InputRequest>,
) -> Json<QueuedResponse> {
    state.view.set_input(req.text);
    Json(QueuedResponse { queued: false })
}

async fn send_message(
    State(state): State<AppState>,
    body: Option<Json<SendRequest>>,
) -> Result<Json<QueuedResponse>, AppError> {
    let req = body.map_or_else(SendRequest::default, |Json(req)| req);
    match req.text {
        Some(text) => state.widget.submit(text).await?,
        None => state.widget.request_send().await?,
    }
    Ok(Json(QueuedResponse { queued: true }))
}

async fn toggle_panel(State(state): State<AppState>) -> Result<Json<QueuedResponse>, AppError> {
    state.widget.toggle_panel().await?;
    Ok(Json(QueuedResponse { queued: true }))
}

async fn set_panel(
    State(state): State<AppState>,
    Json(req): Json<PanelRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    state.widget.set_panel(req.open).await?;
    Ok(Json(QueuedResponse { queued: true }))
}

async fn document_click(
    State(state): State<AppState>,
    Json(req): Json<ClickRequest>,
) -> Result<Json<QueuedResponse>, AppError> {
    state.widget.document_click(req.target()).await?;
    Ok(Json(QueuedResponse { queued: true }))
}

async fn get_transcript(
    State(state): State<AppState>,
) -> Result<Json<TranscriptResponse>, AppError> {
    let turns = state.widget.transcript().await?;
    Ok(Json(TranscriptResponse { turns }))
}

async fn get_version() -> &'static str {
    concat!("waychat ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

#[derive(Debug)]
enum AppError {
    Unavailable(String),
}

impl From<RuntimeClosed> for AppError {
    fn from(e: RuntimeClosed) -> Self {
        AppError::Unavailable(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}

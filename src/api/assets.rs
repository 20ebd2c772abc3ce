//! Embedded static assets
//!
//! Falls back to the filesystem so the page can be edited without a rebuild.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::Embed;
use std::path::{Component, Path, PathBuf};

const ASSET_DIR: &str = "ui/dist";

#[derive(Embed)]
#[folder = "ui/dist"]
struct Assets;

/// Serve embedded static files, with filesystem fallback
pub async fn serve_static(req: Request<Body>) -> Response {
    let path = req.uri().path().trim_start_matches('/');
    if !is_plain_relative(path) {
        return (StatusCode::NOT_FOUND, "Not found").into_response();
    }

    if let Some(content) = Assets::get(path) {
        return with_mime(path, content.data.into_owned());
    }

    let fs_path = PathBuf::from(ASSET_DIR).join(path);
    if let Ok(content) = std::fs::read(&fs_path) {
        return with_mime(path, content);
    }

    (StatusCode::NOT_FOUND, "Not found").into_response()
}

/// Only plain file names below the asset root; no `..`, roots or prefixes
fn is_plain_relative(path: &str) -> bool {
    !path.is_empty()
        && Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_)))
}

fn with_mime(path: &str, body: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime.as_ref().to_string())],
        body,
    )
        .into_response()
}

/// Get the index.html content (embedded or from filesystem)
pub fn get_index_html() -> Option<String> {
    if let Some(content) = Assets::get("index.html") {
        return String::from_utf8(content.data.into_owned()).ok();
    }

    std::fs::read_to_string(PathBuf::from(ASSET_DIR).join("index.html")).ok()
}

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "frontend/"]
struct EditorAssets;

pub async fn serve_static(req: Request<Body>) -> Response {
    let path = req.uri().path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    if let Some(content) = EditorAssets::get(path) {
        return response_from_asset(path, content.data.into_owned());
    }

    // Directory-style links to pages, e.g. `/routes` -> `routes.html`
    if !path.contains('.') {
        let html_path = format!("{}.html", path.trim_end_matches('/'));
        if let Some(content) = EditorAssets::get(&html_path) {
            return response_from_asset(&html_path, content.data.into_owned());
        }
    }

    tracing::debug!(path, "Static asset not found");
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

fn response_from_asset(path: &str, data: Vec<u8>) -> Response {
    let mime = mime_guess::from_path(path).first_or_octet_stream().to_string();
    let cache = if path.ends_with(".html") {
        "no-cache"
    } else {
        "public, max-age=3600"
    };

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime), (header::CACHE_CONTROL, cache.to_string())],
        Body::from(data),
    )
        .into_response()
}

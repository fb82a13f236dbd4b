use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

// Page shells and their assets, embedded at compile time
#[derive(RustEmbed)]
#[folder = "web/"]
pub struct WebAssets;

/// Page route -> embedded HTML shell
pub fn page_file(path: &str) -> Option<&'static str> {
    match path.trim_end_matches('/') {
        "" => Some("index.html"),
        "/submit" => Some("submit.html"),
        "/login" => Some("login.html"),
        "/admin" => Some("admin/index.html"),
        "/admin/websites" => Some("admin/websites.html"),
        "/admin/users" => Some("admin/users.html"),
        _ => None,
    }
}

/// Serve a page shell for the request path
pub async fn serve_page(uri: Uri) -> Response {
    match page_file(uri.path()) {
        Some(file) => serve_embedded(file),
        None => not_found(),
    }
}

/// Serve a static asset under `/assets`
pub async fn serve_asset(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    serve_embedded(path)
}

fn serve_embedded(path: &str) -> Response {
    match WebAssets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
        }
        None => not_found(),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "404 Not Found").into_response()
}

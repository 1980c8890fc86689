use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

/// Landing page at `/` plus every other file under `static_dir`
///
/// Registered as the fallback so API routes always match first.
pub fn static_router(static_dir: &Path) -> Router {
    let index = ServeFile::new(static_dir.join("index.html"));

    if !static_dir.join("index.html").is_file() {
        tracing::warn!(dir = %static_dir.display(), "static directory has no index.html, landing page will 404");
    }

    Router::new()
        .route_service("/", index)
        .fallback_service(ServeDir::new(static_dir))
}
